//! Shard reading
//!
//! Streams a shard line by line and hands each parsed record to a visitor.
//! A line that does not parse aborts the scan with
//! [`TableError::CorruptRecord`] instead of being skipped.

use crate::domain::digest::DigestAlgorithm;
use crate::domain::record::Record;
use crate::error::{Result, TableError};
use std::fs::File;
use std::ops::ControlFlow;
use std::path::Path;

#[cfg(feature = "mmap")]
use memmap2::Mmap;

#[cfg(not(feature = "mmap"))]
use std::io::{BufRead, BufReader};

/// Visit every record of the shard at `path` in file order
///
/// The visitor receives the 1-based line number and the record. Returns
/// `Break` with the visitor's value if it stopped early, otherwise
/// `Continue` with the number of records visited.
pub fn scan_shard<B, F>(
    path: &Path,
    algorithm: DigestAlgorithm,
    mut visit: F,
) -> Result<ControlFlow<B, u64>>
where
    F: FnMut(u64, Record<'_>) -> Result<ControlFlow<B>>,
{
    let mut line_no = 0u64;
    let mut handle = |line: &[u8]| -> Result<ControlFlow<B>> {
        line_no += 1;
        let record = Record::parse_bytes(line, algorithm).map_err(|source| {
            TableError::CorruptRecord {
                path: path.to_path_buf(),
                line: line_no,
                source,
            }
        })?;
        visit(line_no, record)
    };

    #[cfg(feature = "mmap")]
    {
        let file = File::open(path).map_err(TableError::io(path))?;
        let len = file.metadata().map_err(TableError::io(path))?.len();
        if len == 0 {
            return Ok(ControlFlow::Continue(0));
        }

        let mmap = unsafe { Mmap::map(&file) }.map_err(TableError::io(path))?;
        for line in mmap.split_inclusive(|&b| b == b'\n') {
            if let ControlFlow::Break(value) = handle(line)? {
                return Ok(ControlFlow::Break(value));
            }
        }
    }

    #[cfg(not(feature = "mmap"))]
    {
        let file = File::open(path).map_err(TableError::io(path))?;
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .map_err(TableError::io(path))?;
            if n == 0 {
                break;
            }
            if let ControlFlow::Break(value) = handle(&buf)? {
                return Ok(ControlFlow::Break(value));
            }
        }
    }

    Ok(ControlFlow::Continue(line_no))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::RecordError;
    use std::fs;
    use tempfile::TempDir;

    fn line(candidate: &str) -> String {
        let digest = DigestAlgorithm::Sha256.hex_digest(candidate);
        Record::new(&digest, candidate).encode()
    }

    fn collect(path: &Path) -> Result<Vec<(u64, String)>> {
        let mut seen = Vec::new();
        scan_shard::<(), _>(path, DigestAlgorithm::Sha256, |n, record| {
            seen.push((n, record.candidate.to_string()));
            Ok(ControlFlow::Continue(()))
        })?;
        Ok(seen)
    }

    #[test]
    fn test_scan_in_file_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("2.txt");
        fs::write(&path, [line("aa"), line("ab"), line("ba")].concat()).unwrap();

        let seen = collect(&path).unwrap();
        assert_eq!(
            seen,
            vec![(1, "aa".to_string()), (2, "ab".to_string()), (3, "ba".to_string())]
        );
    }

    #[test]
    fn test_scan_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("2.txt");
        fs::write(&path, b"").unwrap();

        let flow = scan_shard::<(), _>(&path, DigestAlgorithm::Sha256, |_, _| {
            Ok(ControlFlow::Continue(()))
        })
        .unwrap();
        assert_eq!(flow, ControlFlow::Continue(0));
    }

    #[test]
    fn test_scan_stops_on_break() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("2.txt");
        fs::write(&path, [line("aa"), line("ab"), line("ba")].concat()).unwrap();

        let flow = scan_shard(&path, DigestAlgorithm::Sha256, |n, record| {
            Ok(if record.candidate == "ab" {
                ControlFlow::Break(n)
            } else {
                ControlFlow::Continue(())
            })
        })
        .unwrap();
        assert_eq!(flow, ControlFlow::Break(2));
    }

    #[test]
    fn test_scan_reads_unterminated_last_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("1.txt");
        let content = [line("a"), line("b")].concat();
        fs::write(&path, content.trim_end()).unwrap();

        let seen = collect(&path).unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].1, "b");
    }

    #[test]
    fn test_scan_corrupt_line_fails_fast() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("1.txt");
        fs::write(&path, [line("a"), "garbage\n".to_string(), line("b")].concat()).unwrap();

        let result = collect(&path);
        match result {
            Err(TableError::CorruptRecord { line, source, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(source, RecordError::MissingDelimiter);
            }
            other => panic!("expected corrupt record, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = collect(&dir.path().join("nope.txt"));
        assert!(matches!(result, Err(TableError::Io { .. })));
    }
}
