/// Error types for the benchlog library
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Errors that halt a report run.
///
/// Per-file extraction problems are not represented here; those drop a single
/// record (see [`MissingField`]) and the run continues.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The input directory does not exist or is not a directory
    #[error("Input directory not found: {}", .0.display())]
    MissingInputDir(PathBuf),

    /// The input directory contains no files with the expected extension
    #[error("No .{extension} files found in {}", .dir.display())]
    NoInputFiles {
        /// Directory that was scanned
        dir: PathBuf,
        /// Extension that was searched for
        extension: String,
    },

    /// Every input file failed extraction
    #[error("No valid benchmark records found")]
    NoRecords,

    /// Size groups have differing sample counts
    #[error("Inconsistent sample counts per file size: {}", format_counts(.counts))]
    UnevenSamples {
        /// `(size_kib, sample_count)` for every group, ascending by size
        counts: Vec<(u64, usize)>,
    },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV export errors
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    /// Extraction pattern failed to compile
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Format/rendering errors
    #[error("Format error: {0}")]
    Format(String),
}

fn format_counts(counts: &[(u64, usize)]) -> String {
    counts
        .iter()
        .map(|(size, count)| format!("{} KiB: {} sample(s)", size, count))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<std::fmt::Error> for ReportError {
    fn from(err: std::fmt::Error) -> Self {
        ReportError::Format(err.to_string())
    }
}

/// Why a single benchmark file did not yield a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MissingField {
    /// The `File size:` line is missing, unparseable or zero
    #[error("missing or invalid 'File size:'")]
    FileSize,
    /// The `FK20 time:` line is missing, unparseable or zero
    #[error("missing or invalid 'FK20 time:'")]
    Fk20Time,
    /// The `Proving time:` line is missing, unparseable or zero
    #[error("missing or invalid 'Proving time:'")]
    ProvingTime,
    /// The file name does not start with `out<digits><delimiter>`
    #[error("file name does not encode a size (expected out<KiB>-...)")]
    SizeInFileName,
    /// The `Verification took: <n>ms` line is missing, unparseable or zero
    #[error("missing or invalid 'Verification took:'")]
    VerificationTime,
}
