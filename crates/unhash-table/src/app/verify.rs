//! Table verification
//!
//! Walks every shard of a table and checks it against the enumerator:
//! - every line parses
//! - candidates appear in enumeration order, without gaps or duplicates
//! - every digest matches the recomputed digest
//! - every shard stays within the size cap plus one record
//!
//! A table cut short by an interrupted run is reported as incomplete rather
//! than rejected.

use crate::config::TableConfig;
use crate::domain::enumerate::{Candidates, candidate_count};
use crate::domain::record::max_encoded_len;
use crate::domain::shard::ShardLocator;
use crate::error::{Result, TableError};
use crate::infra::shard_reader::scan_shard;
use std::convert::Infallible;
use std::fs;
use std::ops::ControlFlow;
use std::path::PathBuf;
use tracing::{debug, info};

/// Per-shard totals
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShardSummary {
    pub part: u32,
    pub path: PathBuf,
    pub records: u64,
    pub bytes: u64,
}

/// Result of a successful verification
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSummary {
    pub length: usize,
    pub shards: Vec<ShardSummary>,
    /// Records found across all shards
    pub records: u64,
    /// Records a complete table holds (`None` if it overflows `u64`)
    pub expected_records: Option<u64>,
}

impl TableSummary {
    /// True when every candidate of the length is present
    pub fn is_complete(&self) -> bool {
        self.expected_records == Some(self.records)
    }

    /// Encoded bytes across all shards
    pub fn bytes(&self) -> u64 {
        self.shards.iter().map(|s| s.bytes).sum()
    }
}

/// Verify the table for `length`
///
/// # Errors
///
/// Returns [`TableError::TableNotFound`] if no shard exists, and the first
/// inconsistency found otherwise.
pub fn verify_table(length: usize, config: &TableConfig) -> Result<TableSummary> {
    config.validate()?;

    let algorithm = config.algorithm;
    let limit = config
        .max_shard_bytes
        .saturating_add(max_encoded_len(algorithm, length, config.alphabet.max_char_len()) as u64);
    let mut expected = Candidates::new(&config.alphabet, length);
    let mut shards = Vec::new();
    let mut records = 0u64;

    for shard in ShardLocator::new(&config.output_dir, length) {
        debug!(path = %shard.path.display(), part = shard.part, "verifying shard");
        let path = shard.path.as_path();

        let flow = scan_shard(path, algorithm, |line, record| -> Result<ControlFlow<Infallible>> {
            let Some(want) = expected.next() else {
                return Err(TableError::UnexpectedRecord {
                    path: path.to_path_buf(),
                    line,
                    found: record.candidate.to_string(),
                });
            };

            if record.candidate != want {
                return Err(TableError::OutOfOrder {
                    path: path.to_path_buf(),
                    line,
                    expected: want,
                    found: record.candidate.to_string(),
                });
            }

            if record.digest != algorithm.hex_digest(record.candidate) {
                return Err(TableError::DigestMismatch {
                    path: path.to_path_buf(),
                    line,
                    candidate: want,
                });
            }

            Ok(ControlFlow::Continue(()))
        })?;
        let ControlFlow::Continue(shard_records) = flow;

        let bytes = fs::metadata(path).map_err(TableError::io(path))?.len();
        if bytes > limit {
            return Err(TableError::ShardOversized {
                path: shard.path,
                bytes,
                limit,
            });
        }

        records += shard_records;
        shards.push(ShardSummary {
            part: shard.part,
            path: shard.path,
            records: shard_records,
            bytes,
        });
    }

    if shards.is_empty() {
        return Err(TableError::TableNotFound {
            length,
            dir: config.output_dir.clone(),
        });
    }

    let summary = TableSummary {
        length,
        shards,
        records,
        expected_records: candidate_count(config.alphabet.len(), length),
    };
    info!(
        length,
        shards = summary.shards.len(),
        records = summary.records,
        complete = summary.is_complete(),
        "table verified"
    );
    Ok(summary)
}
