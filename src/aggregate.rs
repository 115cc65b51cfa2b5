//! Grouping of benchmark records by file size and per-group averaging.

use crate::error::{ReportError, Result};
use crate::freshness::{format_compact, freshness_secs};
use crate::record::{ProverRecord, RecordKind, Records, VerifierRecord};
use serde::Serialize;
use std::collections::BTreeMap;

/// Averaged prover metrics for one file size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProverRow {
    /// File size in KiB
    pub size_kib: u64,
    /// Number of records averaged
    pub samples: usize,
    /// Mean setup time over the records that reported one
    pub mean_init_secs: Option<f64>,
    /// Mean FK20 time
    pub mean_fk20_secs: f64,
    /// Mean mining time
    pub mean_mining_secs: f64,
    /// Mean mining time scaled by the freshness factor
    pub freshness_secs: f64,
    /// `freshness_secs` rendered with [`format_compact`]
    pub freshness: String,
}

/// Averaged verifier metrics for one file size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifierRow {
    /// File size in KiB
    pub size_kib: u64,
    /// Number of records averaged
    pub samples: usize,
    /// Mean verification time in milliseconds
    pub mean_verification_ms: f64,
}

/// Aggregated rows, ascending by size
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "lowercase")]
pub enum Table {
    /// Prover rows
    Prover(Vec<ProverRow>),
    /// Verifier rows
    Verifier(Vec<VerifierRow>),
}

impl Table {
    /// Kind of the aggregated records
    pub fn kind(&self) -> RecordKind {
        match self {
            Table::Prover(_) => RecordKind::Prover,
            Table::Verifier(_) => RecordKind::Verifier,
        }
    }

    /// Number of rows (distinct sizes)
    pub fn len(&self) -> usize {
        match self {
            Table::Prover(rows) => rows.len(),
            Table::Verifier(rows) => rows.len(),
        }
    }

    /// True when the table has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Group records by size key, ascending.
pub fn group_by_size<T, F>(records: &[T], size_of: F) -> BTreeMap<u64, Vec<&T>>
where
    F: Fn(&T) -> u64,
{
    let mut groups: BTreeMap<u64, Vec<&T>> = BTreeMap::new();
    for record in records {
        groups.entry(size_of(record)).or_default().push(record);
    }
    groups
}

/// Verify every group holds the same number of samples.
///
/// Returns the common sample count, or [`ReportError::UnevenSamples`] listing
/// each group's count.
pub fn check_sample_counts<T>(groups: &BTreeMap<u64, Vec<T>>) -> Result<usize> {
    let mut counts = groups.iter().map(|(size, group)| (*size, group.len()));
    let Some((_, expected)) = counts.next() else {
        return Err(ReportError::NoRecords);
    };

    if counts.all(|(_, count)| count == expected) {
        Ok(expected)
    } else {
        Err(ReportError::UnevenSamples {
            counts: groups
                .iter()
                .map(|(size, group)| (*size, group.len()))
                .collect(),
        })
    }
}

fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Average prover records per size and derive the freshness column.
pub fn aggregate_prover(records: &[ProverRecord], freshness_factor: f64) -> Result<Vec<ProverRow>> {
    let groups = group_by_size(records, |r| r.size_kib);
    check_sample_counts(&groups)?;

    Ok(groups
        .into_iter()
        .map(|(size_kib, group)| {
            let mean_fk20_secs = mean(group.iter().map(|r| r.fk20_secs)).unwrap_or_default();
            let mean_mining_secs = mean(group.iter().map(|r| r.mining_secs)).unwrap_or_default();
            let freshness_secs = freshness_secs(mean_mining_secs, freshness_factor);
            ProverRow {
                size_kib,
                samples: group.len(),
                mean_init_secs: mean(group.iter().filter_map(|r| r.init_secs)),
                mean_fk20_secs,
                mean_mining_secs,
                freshness_secs,
                freshness: format_compact(freshness_secs),
            }
        })
        .collect())
}

/// Average verifier records per size.
pub fn aggregate_verifier(records: &[VerifierRecord]) -> Result<Vec<VerifierRow>> {
    let groups = group_by_size(records, |r| r.size_kib);
    check_sample_counts(&groups)?;

    Ok(groups
        .into_iter()
        .map(|(size_kib, group)| VerifierRow {
            size_kib,
            samples: group.len(),
            mean_verification_ms: mean(group.iter().map(|r| r.verification_ms))
                .unwrap_or_default(),
        })
        .collect())
}

/// Aggregate a batch of records of either kind.
pub fn aggregate(records: &Records, freshness_factor: f64) -> Result<Table> {
    match records {
        Records::Prover(r) => aggregate_prover(r, freshness_factor).map(Table::Prover),
        Records::Verifier(r) => aggregate_verifier(r).map(Table::Verifier),
    }
}
