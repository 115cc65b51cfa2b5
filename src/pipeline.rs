//! End-to-end report run: list inputs, extract, aggregate, export.
//!
//! All file-system state comes in through [`ReportConfig`]; nothing is
//! resolved relative to the working directory or the executable.
//!
//! ```rust,no_run
//! use benchlog::pipeline::{run, ReportConfig};
//! use benchlog::RecordKind;
//!
//! let config = ReportConfig::builder(RecordKind::Verifier, "res/verifier")
//!     .output("benchmark_results_verifier.tex")
//!     .build();
//! let outcome = run(&config)?;
//! println!("{} sizes aggregated", outcome.table.len());
//! # Ok::<(), benchlog::error::ReportError>(())
//! ```

use crate::aggregate::{aggregate, Table};
use crate::error::{ReportError, Result};
use crate::extractor::{Extractor, ZeroPolicy};
use crate::file_reader;
use crate::freshness::DEFAULT_FRESHNESS_FACTOR;
use crate::record::{RecordKind, Records};
use crate::report::{write_report, ExportFormat};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default input file extension
pub const DEFAULT_EXTENSION: &str = "txt";

/// Parameters of one report run
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Which kind of benchmark log to parse
    pub kind: RecordKind,
    /// Directory holding the benchmark logs (not traversed recursively)
    pub input_dir: PathBuf,
    /// Where to write the exported artifact. `None` skips the export.
    pub output: Option<PathBuf>,
    /// Export dialect
    pub format: ExportFormat,
    /// Extension of input files, without the dot. `.gz` variants also match.
    pub extension: String,
    /// Treatment of zero-valued measurements
    pub zero_policy: ZeroPolicy,
    /// Scale from mean mining time to freshness period
    pub freshness_factor: f64,
}

impl ReportConfig {
    /// Start a builder for `kind` reading from `input_dir`
    pub fn builder<P: Into<PathBuf>>(kind: RecordKind, input_dir: P) -> ReportConfigBuilder {
        ReportConfigBuilder::new(kind, input_dir)
    }
}

/// Builder for ReportConfig
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new<P: Into<PathBuf>>(kind: RecordKind, input_dir: P) -> Self {
        Self {
            config: ReportConfig {
                kind,
                input_dir: input_dir.into(),
                output: None,
                format: ExportFormat::default(),
                extension: DEFAULT_EXTENSION.to_string(),
                zero_policy: ZeroPolicy::default(),
                freshness_factor: DEFAULT_FRESHNESS_FACTOR,
            },
        }
    }

    /// Write the artifact to `path`
    pub fn output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config.output = Some(path.into());
        self
    }

    /// Set the export dialect
    pub fn format(mut self, format: ExportFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Set the input file extension (leading dot optional)
    pub fn extension(mut self, extension: &str) -> Self {
        self.config.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Set the zero policy
    pub fn zero_policy(mut self, policy: ZeroPolicy) -> Self {
        self.config.zero_policy = policy;
        self
    }

    /// Set the freshness factor
    pub fn freshness_factor(mut self, factor: f64) -> Self {
        self.config.freshness_factor = factor;
        self
    }

    /// Build the ReportConfig
    pub fn build(self) -> ReportConfig {
        self.config
    }
}

/// A benchmark file that did not contribute a record
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    /// Path of the file
    pub path: PathBuf,
    /// Why it was dropped
    pub reason: String,
}

/// Result of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutcome {
    /// Aggregated rows
    pub table: Table,
    /// Input files found in the directory
    pub files_found: Vec<PathBuf>,
    /// Number of files that yielded a record
    pub parsed: usize,
    /// Files dropped with a warning
    pub skipped: Vec<SkippedFile>,
    /// Where the artifact was written, if anywhere
    pub output: Option<PathBuf>,
}

fn matches_extension(path: &Path, extension: &str) -> bool {
    let Some(name) = file_reader::logical_name(path) else {
        return false;
    };
    match name.rsplit_once('.') {
        Some((stem, ext)) => !stem.is_empty() && ext.eq_ignore_ascii_case(extension),
        None => false,
    }
}

/// List regular files in `dir` whose (decompressed) name ends in `.extension`, sorted by path.
pub fn list_inputs(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(ReportError::MissingInputDir(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && matches_extension(&path, extension) {
            files.push(path);
        }
    }
    files.sort();

    if files.is_empty() {
        return Err(ReportError::NoInputFiles {
            dir: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }
    Ok(files)
}

/// Run the whole pipeline for `config`.
///
/// Stops on a missing directory, no input files, no valid records, or uneven
/// sample counts. Unparseable files are logged, listed in
/// [`ReportOutcome::skipped`] and otherwise ignored.
pub fn run(config: &ReportConfig) -> Result<ReportOutcome> {
    let files = list_inputs(&config.input_dir, &config.extension)?;
    info!(
        kind = %config.kind,
        dir = %config.input_dir.display(),
        "Found {} benchmark file(s)",
        files.len()
    );

    let extractor = Extractor::builder()
        .zero_policy(config.zero_policy)
        .build()?;

    let mut records = Records::new(config.kind);
    let mut skipped = Vec::new();

    for path in &files {
        debug!(file = %path.display(), "Parsing");
        let extracted = file_reader::read_to_string(path)
            .map_err(|e| format!("read failed: {}", e))
            .and_then(|content| {
                let name = file_reader::logical_name(path).unwrap_or_default();
                extractor
                    .extract(config.kind, name, &content)
                    .map_err(|e| e.to_string())
            });

        match extracted {
            Ok(record) => {
                if let Err(other) = records.push(record) {
                    // Extractor returns the requested kind; reaching here is a bug.
                    return Err(ReportError::Format(format!(
                        "extracted {} record while building a {} report",
                        other.kind(),
                        config.kind
                    )));
                }
            }
            Err(reason) => {
                warn!("Could not parse {}: {}", path.display(), reason);
                skipped.push(SkippedFile {
                    path: path.clone(),
                    reason,
                });
            }
        }
    }

    if records.is_empty() {
        return Err(ReportError::NoRecords);
    }
    let parsed = records.len();

    let table = aggregate(&records, config.freshness_factor)?;

    if let Some(output) = &config.output {
        write_report(output, &table, config.format)?;
        info!(path = %output.display(), "Report written");
    }

    Ok(ReportOutcome {
        table,
        files_found: files,
        parsed,
        skipped,
        output: config.output.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_matches_extension() {
        assert!(matches_extension(Path::new("a/out1-1.txt"), "txt"));
        assert!(matches_extension(Path::new("a/out1-1.TXT"), "txt"));
        assert!(matches_extension(Path::new("a/out1-1.txt.gz"), "txt"));
        assert!(!matches_extension(Path::new("a/out1-1.log"), "txt"));
        assert!(!matches_extension(Path::new("a/.txt"), "txt"));
        assert!(!matches_extension(Path::new("a/txt"), "txt"));
    }

    #[test]
    fn test_list_inputs_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::write(dir.path().join("notes.md"), "").unwrap();
        fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let files = list_inputs(dir.path(), "txt").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_list_inputs_errors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            list_inputs(&dir.path().join("missing"), "txt"),
            Err(ReportError::MissingInputDir(_))
        ));
        assert!(matches!(
            list_inputs(dir.path(), "txt"),
            Err(ReportError::NoInputFiles { .. })
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let config = ReportConfig::builder(RecordKind::Prover, "res/prover").build();
        assert_eq!(config.extension, "txt");
        assert_eq!(config.output, None);
        assert_eq!(config.format, ExportFormat::Latex);
        assert_eq!(config.zero_policy, ZeroPolicy::Reject);
        assert_eq!(config.freshness_factor, DEFAULT_FRESHNESS_FACTOR);

        let config = ReportConfig::builder(RecordKind::Prover, "res")
            .extension(".log")
            .build();
        assert_eq!(config.extension, "log");
    }
}
