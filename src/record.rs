//! Benchmark record types.

use serde::Serialize;
use std::fmt;

/// Which benchmark binary produced a log file, and therefore which fields it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Proof generation logs (`File size:`, `FK20 time:`, `Proving time:` lines)
    Prover,
    /// Verification logs (`out<KiB>-<n>.txt` name plus a `Verification took:` line)
    Verifier,
}

impl RecordKind {
    /// Lowercase name, also used for default directory and report names
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Prover => "prover",
            RecordKind::Verifier => "verifier",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metrics extracted from one prover log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProverRecord {
    /// Committed file size in KiB
    pub size_kib: u64,
    /// Setup time, when the log reports one
    pub init_secs: Option<f64>,
    /// Time spent in FK20 opening precomputation
    pub fk20_secs: f64,
    /// Proving time minus FK20 time. Negative for inconsistent logs.
    pub mining_secs: f64,
}

/// Metrics extracted from one verifier log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifierRecord {
    /// Committed file size in KiB, taken from the log's file name
    pub size_kib: u64,
    /// Verification time in milliseconds
    pub verification_ms: f64,
}

/// A single extracted record of either kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BenchmarkRecord {
    /// Prover metrics
    Prover(ProverRecord),
    /// Verifier metrics
    Verifier(VerifierRecord),
}

impl BenchmarkRecord {
    /// Record kind
    pub fn kind(&self) -> RecordKind {
        match self {
            BenchmarkRecord::Prover(_) => RecordKind::Prover,
            BenchmarkRecord::Verifier(_) => RecordKind::Verifier,
        }
    }

    /// Grouping key
    pub fn size_kib(&self) -> u64 {
        match self {
            BenchmarkRecord::Prover(r) => r.size_kib,
            BenchmarkRecord::Verifier(r) => r.size_kib,
        }
    }
}

/// A batch of records sharing one kind
#[derive(Debug, Clone, PartialEq)]
pub enum Records {
    /// Prover records
    Prover(Vec<ProverRecord>),
    /// Verifier records
    Verifier(Vec<VerifierRecord>),
}

impl Records {
    /// An empty batch for `kind`
    pub fn new(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Prover => Records::Prover(Vec::new()),
            RecordKind::Verifier => Records::Verifier(Vec::new()),
        }
    }

    /// Kind of the batch
    pub fn kind(&self) -> RecordKind {
        match self {
            Records::Prover(_) => RecordKind::Prover,
            Records::Verifier(_) => RecordKind::Verifier,
        }
    }

    /// Append a record. Returns the record back if its kind differs from the batch.
    pub fn push(&mut self, record: BenchmarkRecord) -> Result<(), BenchmarkRecord> {
        match (self, record) {
            (Records::Prover(v), BenchmarkRecord::Prover(r)) => v.push(r),
            (Records::Verifier(v), BenchmarkRecord::Verifier(r)) => v.push(r),
            (_, other) => return Err(other),
        }
        Ok(())
    }

    /// Number of records
    pub fn len(&self) -> usize {
        match self {
            Records::Prover(v) => v.len(),
            Records::Verifier(v) => v.len(),
        }
    }

    /// True when no records were collected
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
