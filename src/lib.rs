//! Benchlog - Benchmark Log Parsing and Reporting
//!
//! Benchlog reads the plaintext logs written by the prover and verifier
//! benchmark binaries, extracts size and timing metrics from labeled lines,
//! averages them per file size and renders the result as a console table and
//! an exported LaTeX, CSV or Markdown artifact.
//!
//! # Quick Start
//!
//! ```rust
//! use benchlog::{aggregate, Extractor, ExportFormat, RecordKind, Records};
//! use benchlog::freshness::DEFAULT_FRESHNESS_FACTOR;
//! use benchlog::report::render_export;
//!
//! let extractor = Extractor::new()?;
//! let mut records = Records::new(RecordKind::Prover);
//!
//! for log in [
//!     "File size: 512 KiB\nFK20 time: 2.0s\nProving time: 7.5s\n",
//!     "File size: 512 KiB\nFK20 time: 2.2s\nProving time: 7.9s\n",
//! ] {
//!     if let Ok(record) = extractor.extract(RecordKind::Prover, "run.txt", log) {
//!         let _ = records.push(record);
//!     }
//! }
//!
//! let table = aggregate(&records, DEFAULT_FRESHNESS_FACTOR)?;
//! let latex = render_export(&table, ExportFormat::Latex)?;
//! assert!(latex.starts_with("% This file is auto-generated"));
//! # Ok::<(), benchlog::ReportError>(())
//! ```
//!
//! # Architecture
//!
//! Data flows one way, and every stage except the pipeline driver is a pure
//! function over its input:
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌─────────────┐   ┌──────────────┐
//! │ file_reader  │ → │  extractor  │ → │  aggregate  │ → │    report    │
//! │ (.txt, .gz)  │   │ (+ units)   │   │ (freshness) │   │ console/file │
//! └──────────────┘   └─────────────┘   └─────────────┘   └──────────────┘
//! ```
//!
//! [`pipeline::run`] wires the stages together from an explicit
//! [`pipeline::ReportConfig`].

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Per-size grouping and averaging
pub mod aggregate;
/// Error types
pub mod error;
pub mod extractor;
pub mod file_reader;
pub mod freshness;
pub mod pipeline;
/// Benchmark record types
pub mod record;
pub mod report;
pub mod units;

// Re-exports for Rust consumers

pub use crate::aggregate::{aggregate, ProverRow, Table, VerifierRow};
pub use crate::error::{MissingField, ReportError};
pub use crate::extractor::{Extractor, ZeroPolicy};
pub use crate::pipeline::{run, ReportConfig, ReportOutcome};
pub use crate::record::{BenchmarkRecord, ProverRecord, RecordKind, Records, VerifierRecord};
pub use crate::report::ExportFormat;
