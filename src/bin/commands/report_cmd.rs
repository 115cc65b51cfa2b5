use anyhow::{Context, Result};
use benchlog::pipeline::{run, ReportConfig};
use benchlog::report::render_console;
use benchlog::{ExportFormat, RecordKind, ZeroPolicy};
use std::path::PathBuf;

use crate::cli_utils::{default_input_dir, default_output_path, file_name};

pub struct ReportOptions {
    pub kind: RecordKind,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub no_export: bool,
    pub format: String,
    pub extension: String,
    pub allow_zero: bool,
    pub json: bool,
    pub freshness_factor: f64,
}

pub fn cmd_report(options: ReportOptions) -> Result<()> {
    let format: ExportFormat = options.format.parse()?;
    let kind = options.kind;

    if !options.freshness_factor.is_finite() || options.freshness_factor < 0.0 {
        anyhow::bail!(
            "Invalid freshness factor {}, expected a non-negative number",
            options.freshness_factor
        );
    }

    let input_dir = options.input.unwrap_or_else(|| default_input_dir(kind));
    let mut builder = ReportConfig::builder(kind, &input_dir)
        .format(format)
        .extension(&options.extension)
        .freshness_factor(options.freshness_factor)
        .zero_policy(if options.allow_zero {
            ZeroPolicy::Accept
        } else {
            ZeroPolicy::Reject
        });
    if !options.no_export {
        builder = builder.output(
            options
                .output
                .unwrap_or_else(|| default_output_path(kind, format)),
        );
    }
    let config = builder.build();

    let outcome = run(&config)
        .with_context(|| format!("Failed to build {} report from {}", kind, input_dir.display()))?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!("Found {} benchmark files:", outcome.files_found.len());
    for path in &outcome.files_found {
        println!("  - {}", file_name(path));
    }
    if !outcome.skipped.is_empty() {
        println!(
            "Skipped {} of {} file(s) (see warnings)",
            outcome.skipped.len(),
            outcome.files_found.len()
        );
    }

    println!();
    print!("{}", render_console(&outcome.table));

    if let Some(path) = &outcome.output {
        println!();
        println!("Results saved to: {}", path.display());
    }

    Ok(())
}
