//! Lookup workflow implementation
//!
//! Linear scan over the shards of one table: shards in locator order, lines
//! in file order, first matching digest wins.

use crate::config::TableConfig;
use crate::domain::shard::ShardLocator;
use crate::error::Result;
use crate::infra::shard_reader::scan_shard;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outcome of a lookup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LookupReport {
    /// Original string, if the digest was found
    pub candidate: Option<String>,
    /// Shards opened (including the one holding the match)
    pub shards_scanned: u32,
    /// Records compared
    pub records_scanned: u64,
    pub elapsed: Duration,
}

/// Find the string whose digest is `target` in the table for `length`
///
/// Digest comparison is exact and case sensitive. Returns `Ok(None)` when no
/// shard holds the digest, including when the table does not exist.
pub fn lookup(length: usize, target: &str, config: &TableConfig) -> Result<Option<String>> {
    lookup_with_report(length, target, config).map(|report| report.candidate)
}

/// Same as [`lookup`], also reporting how much of the table was scanned
///
/// # Errors
///
/// Stops at the first unreadable shard or malformed line.
pub fn lookup_with_report(
    length: usize,
    target: &str,
    config: &TableConfig,
) -> Result<LookupReport> {
    let start = Instant::now();
    let mut shards_scanned = 0u32;
    let mut records_scanned = 0u64;
    let mut candidate = None;

    for shard in ShardLocator::new(&config.output_dir, length) {
        shards_scanned += 1;
        debug!(path = %shard.path.display(), part = shard.part, "scanning shard");

        let flow = scan_shard(&shard.path, config.algorithm, |_, record| {
            records_scanned += 1;
            Ok(if record.digest == target {
                ControlFlow::Break(record.candidate.to_string())
            } else {
                ControlFlow::Continue(())
            })
        })?;

        if let ControlFlow::Break(found) = flow {
            candidate = Some(found);
            break;
        }
    }

    let report = LookupReport {
        candidate,
        shards_scanned,
        records_scanned,
        elapsed: start.elapsed(),
    };
    info!(
        length,
        found = report.candidate.is_some(),
        shards = report.shards_scanned,
        records = report.records_scanned,
        elapsed_secs = report.elapsed.as_secs_f64(),
        "lookup finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::generator::{GenerateOptions, generate_table};
    use crate::domain::digest::DigestAlgorithm;
    use crate::error::TableError;
    use std::fs;
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> TableConfig {
        TableConfig::new(dir.path()).with_alphabet("ab".parse().unwrap())
    }

    #[test]
    fn test_lookup_found() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        generate_table(2, &cfg, GenerateOptions::default()).unwrap();

        let target = DigestAlgorithm::Sha256.hex_digest("ba");
        assert_eq!(lookup(2, &target, &cfg).unwrap().as_deref(), Some("ba"));
    }

    #[test]
    fn test_lookup_stops_at_first_match() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        generate_table(2, &cfg, GenerateOptions::default()).unwrap();

        let target = DigestAlgorithm::Sha256.hex_digest("ab");
        let report = lookup_with_report(2, &target, &cfg).unwrap();
        assert_eq!(report.candidate.as_deref(), Some("ab"));
        assert_eq!(report.records_scanned, 2);
        assert_eq!(report.shards_scanned, 1);
    }

    #[test]
    fn test_lookup_not_found_scans_everything() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir).with_max_shard_bytes(69);
        generate_table(2, &cfg, GenerateOptions::default()).unwrap();

        let report = lookup_with_report(2, "not-a-real-digest", &cfg).unwrap();
        assert_eq!(report.candidate, None);
        assert_eq!(report.shards_scanned, 4);
        assert_eq!(report.records_scanned, 4);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        generate_table(1, &cfg, GenerateOptions::default()).unwrap();

        let upper = DigestAlgorithm::Sha256.hex_digest("a").to_uppercase();
        assert_eq!(lookup(1, &upper, &cfg).unwrap(), None);
    }

    #[test]
    fn test_lookup_missing_table() {
        let dir = TempDir::new().unwrap();
        let target = DigestAlgorithm::Sha256.hex_digest("a");
        assert_eq!(lookup(1, &target, &config(&dir)).unwrap(), None);
    }

    #[test]
    fn test_lookup_corrupt_line_aborts() {
        let dir = TempDir::new().unwrap();
        let cfg = config(&dir);
        generate_table(1, &cfg, GenerateOptions::default()).unwrap();

        let path = dir.path().join("1.txt");
        let mut content = fs::read_to_string(&path).unwrap();
        content.insert_str(0, "corrupted line\n");
        fs::write(&path, content).unwrap();

        let target = DigestAlgorithm::Sha256.hex_digest("b");
        let result = lookup(1, &target, &cfg);
        assert!(matches!(result, Err(TableError::CorruptRecord { line: 1, .. })));
    }
}
