//! Extraction of benchmark records from raw log content.
//!
//! Prover logs are plain `Label: value` lines written by the proving binary:
//!
//! ```text
//! File size: 512 KiB
//! Initialization time: 1.203s
//! FK20 time: 2.0s
//! Proving time: 7.5s
//! ```
//!
//! Verifier logs encode the size in their file name (`out512-3.txt`) and carry
//! a single `Verification took: 11.865ms` line.
//!
//! Extraction is pure: content and file name are handed in, nothing is read here.
//!
//! ```rust
//! use benchlog::extractor::Extractor;
//!
//! let extractor = Extractor::new()?;
//! let record = extractor
//!     .extract_prover("File size: 512 KiB\nFK20 time: 2.0s\nProving time: 7.5s\n")
//!     .unwrap();
//! assert_eq!(record.size_kib, 512);
//! assert_eq!(record.mining_secs, 5.5);
//! # Ok::<(), benchlog::error::ReportError>(())
//! ```

use crate::error::{MissingField, ReportError};
use crate::record::{BenchmarkRecord, ProverRecord, RecordKind, VerifierRecord};
use crate::units::{parse_duration_to_seconds, parse_size_to_kib};
use memchr::memmem;
use regex::Regex;

/// Label of the committed file size line
pub const FILE_SIZE_LABEL: &str = "File size:";
/// Label of the optional setup time line
pub const INIT_TIME_LABEL: &str = "Initialization time:";
/// Label of the FK20 precomputation time line
pub const FK20_TIME_LABEL: &str = "FK20 time:";
/// Label of the total proving time line
pub const PROVING_TIME_LABEL: &str = "Proving time:";

const VERIFIER_NAME_PATTERN: &str = r"^out(\d+)\D";
const VERIFICATION_TIME_PATTERN: &str = r"Verification took:\s*(\d+(?:\.\d*)?)\s*ms";

/// How a zero-valued measurement is treated.
///
/// `Reject` keeps the historic behavior where a zero is indistinguishable from
/// a missing value and drops the record. `Accept` only drops records whose
/// fields are actually absent or unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroPolicy {
    /// Zero counts as missing
    #[default]
    Reject,
    /// Zero is a legitimate measurement
    Accept,
}

impl ZeroPolicy {
    fn admits_u64(self, value: u64) -> bool {
        self == ZeroPolicy::Accept || value != 0
    }

    fn admits_f64(self, value: f64) -> bool {
        self == ZeroPolicy::Accept || value != 0.0
    }
}

/// Builder for Extractor
pub struct ExtractorBuilder {
    zero_policy: ZeroPolicy,
}

impl ExtractorBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            zero_policy: ZeroPolicy::default(),
        }
    }

    /// Choose how zero-valued fields are treated
    pub fn zero_policy(mut self, policy: ZeroPolicy) -> Self {
        self.zero_policy = policy;
        self
    }

    /// Build the Extractor
    pub fn build(self) -> Result<Extractor, ReportError> {
        Ok(Extractor {
            zero_policy: self.zero_policy,
            verifier_name: Regex::new(VERIFIER_NAME_PATTERN)?,
            verification_time: Regex::new(VERIFICATION_TIME_PATTERN)?,
        })
    }
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns log content into [`BenchmarkRecord`]s
#[derive(Debug, Clone)]
pub struct Extractor {
    zero_policy: ZeroPolicy,
    verifier_name: Regex,
    verification_time: Regex,
}

impl Extractor {
    /// Create an extractor with the default (rejecting) zero policy
    pub fn new() -> Result<Self, ReportError> {
        ExtractorBuilder::new().build()
    }

    /// Create a builder
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::new()
    }

    /// Configured zero policy
    pub fn zero_policy(&self) -> ZeroPolicy {
        self.zero_policy
    }

    /// Extract a record of `kind`. `file_name` is only consulted for verifier logs.
    pub fn extract(
        &self,
        kind: RecordKind,
        file_name: &str,
        content: &str,
    ) -> Result<BenchmarkRecord, MissingField> {
        match kind {
            RecordKind::Prover => self.extract_prover(content).map(BenchmarkRecord::Prover),
            RecordKind::Verifier => self
                .extract_verifier(file_name, content)
                .map(BenchmarkRecord::Verifier),
        }
    }

    /// Extract a prover record from log content.
    ///
    /// `File size:`, `FK20 time:` and `Proving time:` are all required.
    /// `Initialization time:` is picked up when present and parseable.
    pub fn extract_prover(&self, content: &str) -> Result<ProverRecord, MissingField> {
        let policy = self.zero_policy;

        let size_kib = labeled_value(content, FILE_SIZE_LABEL)
            .and_then(parse_size_to_kib)
            .filter(|&v| policy.admits_u64(v))
            .ok_or(MissingField::FileSize)?;

        let fk20_secs = labeled_value(content, FK20_TIME_LABEL)
            .and_then(parse_duration_to_seconds)
            .filter(|&v| policy.admits_f64(v))
            .ok_or(MissingField::Fk20Time)?;

        let proving_secs = labeled_value(content, PROVING_TIME_LABEL)
            .and_then(parse_duration_to_seconds)
            .filter(|&v| policy.admits_f64(v))
            .ok_or(MissingField::ProvingTime)?;

        let init_secs = labeled_value(content, INIT_TIME_LABEL).and_then(parse_duration_to_seconds);

        Ok(ProverRecord {
            size_kib,
            init_secs,
            fk20_secs,
            mining_secs: proving_secs - fk20_secs,
        })
    }

    /// Extract a verifier record from a file name such as `out512-3.txt` and its content.
    pub fn extract_verifier(
        &self,
        file_name: &str,
        content: &str,
    ) -> Result<VerifierRecord, MissingField> {
        let policy = self.zero_policy;

        let size_kib = self
            .verifier_name
            .captures(file_name)
            .and_then(|caps| caps[1].parse::<u64>().ok())
            .filter(|&v| policy.admits_u64(v))
            .ok_or(MissingField::SizeInFileName)?;

        let verification_ms = self
            .verification_time
            .captures(content)
            .and_then(|caps| caps[1].parse::<f64>().ok())
            .filter(|&v| policy.admits_f64(v))
            .ok_or(MissingField::VerificationTime)?;

        Ok(VerifierRecord {
            size_kib,
            verification_ms,
        })
    }
}

/// Remainder of the first line containing `label`, starting right after it.
fn labeled_value<'a>(content: &'a str, label: &str) -> Option<&'a str> {
    let haystack = content.as_bytes();
    let start = memmem::find(haystack, label.as_bytes())? + label.len();
    let end = memchr::memchr(b'\n', &haystack[start..])
        .map(|pos| start + pos)
        .unwrap_or(haystack.len());
    Some(&content[start..end])
}
