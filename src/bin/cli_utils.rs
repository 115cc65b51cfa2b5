use benchlog::{ExportFormat, RecordKind};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` overrides the flag-derived level.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("benchlog={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

/// `res/<mode>`, the directory each benchmark binary writes its logs to
pub fn default_input_dir(kind: RecordKind) -> PathBuf {
    PathBuf::from("res").join(kind.as_str())
}

/// `benchmark_results_<mode>.<ext>` in the working directory
pub fn default_output_path(kind: RecordKind, format: ExportFormat) -> PathBuf {
    PathBuf::from(format!(
        "benchmark_results_{}.{}",
        kind.as_str(),
        format.extension()
    ))
}

pub fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
