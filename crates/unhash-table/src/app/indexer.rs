//! Sorted index workflow
//!
//! Optional alternative to the linear scan: the table is read once, its
//! `(digest, ordinal)` pairs are sorted by digest and saved next to the
//! shards. A lookup then binary-searches the index and rebuilds the
//! candidate from its ordinal.

use crate::config::TableConfig;
use crate::domain::digest::DigestAlgorithm;
use crate::domain::enumerate::{Candidates, candidate_count, nth_candidate};
use crate::domain::index_format::{IndexEntry, IndexHeader};
use crate::domain::shard::{ShardLocator, index_path};
use crate::error::{Result, TableError};
use crate::infra::index_io::{SortedIndex, save_index};
use crate::infra::shard_reader::scan_shard;
use rayon::prelude::*;
use std::convert::Infallible;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outcome of an index build
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexSummary {
    pub path: PathBuf,
    pub entries: u64,
    pub elapsed: Duration,
}

/// Build the sorted index for the table of `length`
///
/// The table must hold its records in enumeration order; the ordinal of a
/// record is its position in the table. Entries are held in memory at the
/// algorithm's digest width plus 8 bytes each while sorting.
///
/// # Errors
///
/// Fails if the table is missing, malformed or out of order, or if the
/// candidate space does not fit in 64 bits.
pub fn build_index(length: usize, config: &TableConfig) -> Result<IndexSummary> {
    config.validate()?;
    let length_u32 = index_length(length, config)?;

    let start = Instant::now();
    let path = index_path(&config.output_dir, length);
    let entries = match config.algorithm {
        DigestAlgorithm::Sha1 => write_index::<20>(length, length_u32, config, &path)?,
        DigestAlgorithm::Sha256 => write_index::<32>(length, length_u32, config, &path)?,
        DigestAlgorithm::Sha512 => write_index::<64>(length, length_u32, config, &path)?,
    };

    let summary = IndexSummary {
        path,
        entries,
        elapsed: start.elapsed(),
    };
    info!(
        length,
        entries = summary.entries,
        path = %summary.path.display(),
        elapsed_secs = summary.elapsed.as_secs_f64(),
        "index built"
    );
    Ok(summary)
}

/// Collect, sort and save the entries of one table with `N`-byte digests
fn write_index<const N: usize>(
    length: usize,
    length_u32: u32,
    config: &TableConfig,
    path: &Path,
) -> Result<u64> {
    let algorithm = config.algorithm;
    let mut expected = Candidates::new(&config.alphabet, length);
    let mut entries: Vec<IndexEntry<N>> = Vec::new();

    let shards: Vec<_> = ShardLocator::new(&config.output_dir, length).collect();
    if shards.is_empty() {
        return Err(TableError::TableNotFound {
            length,
            dir: config.output_dir.clone(),
        });
    }

    for shard in &shards {
        debug!(path = %shard.path.display(), part = shard.part, "indexing shard");
        let shard_path = shard.path.as_path();

        let flow = scan_shard(shard_path, algorithm, |line, record| -> Result<ControlFlow<Infallible>> {
            let ordinal = entries.len() as u64;
            match expected.next() {
                Some(want) if want == record.candidate => {}
                Some(want) => {
                    return Err(TableError::OutOfOrder {
                        path: shard_path.to_path_buf(),
                        line,
                        expected: want,
                        found: record.candidate.to_string(),
                    });
                }
                None => {
                    return Err(TableError::UnexpectedRecord {
                        path: shard_path.to_path_buf(),
                        line,
                        found: record.candidate.to_string(),
                    });
                }
            }

            let mut digest = [0u8; N];
            hex::decode_to_slice(record.digest, &mut digest).map_err(|_| {
                TableError::DigestMismatch {
                    path: shard_path.to_path_buf(),
                    line,
                    candidate: record.candidate.to_string(),
                }
            })?;
            entries.push(IndexEntry::new(digest, ordinal));
            Ok(ControlFlow::Continue(()))
        })?;
        let ControlFlow::Continue(_) = flow;
    }

    entries.par_sort_unstable();

    let header = IndexHeader::new(config, length_u32, entries.len() as u64);
    save_index(path, &header, &entries)?;
    Ok(entries.len() as u64)
}

/// Find the string whose digest is `target` using the sorted index
///
/// Targets that are not valid hex of the configured digest width are
/// reported as not found.
pub fn lookup_indexed(length: usize, target: &str, config: &TableConfig) -> Result<Option<String>> {
    let length_u32 = index_length(length, config)?;
    let index = SortedIndex::open(index_path(&config.output_dir, length))?;
    index.header().validate(config, length_u32)?;

    let Ok(digest) = hex::decode(target) else {
        return Ok(None);
    };
    if target.len() != config.algorithm.hex_len() || target.bytes().any(|b| b.is_ascii_uppercase()) {
        // Linear lookup compares lowercase hex exactly; keep the same semantics
        return Ok(None);
    }

    let found = index
        .find(&digest)
        .and_then(|ordinal| nth_candidate(&config.alphabet, length, ordinal));
    debug!(length, found = found.is_some(), "indexed lookup finished");
    Ok(found)
}

/// Lengths whose candidate space and length fit the index format
fn index_length(length: usize, config: &TableConfig) -> Result<u32> {
    let too_large = || TableError::CandidateSpaceTooLarge {
        alphabet_len: config.alphabet.len(),
        length,
    };
    candidate_count(config.alphabet.len(), length).ok_or_else(too_large)?;
    u32::try_from(length).map_err(|_| too_large())
}
