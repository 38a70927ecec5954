//! Size-bounded shard writer
//!
//! Records are appended to `{length}.txt` until the next record would push
//! the shard past `max_shard_bytes`; writing then continues in
//! `{length}-2.txt`, `{length}-3.txt` and so on. Sizes are counted on the
//! encoded bytes of each record.

use crate::domain::record::Record;
use crate::domain::shard::shard_path;
use crate::error::{Result, TableError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Totals of a finished writer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Number of shard files written
    pub shards: u32,
    /// Number of records written
    pub records: u64,
    /// Encoded bytes written across all shards
    pub bytes: u64,
}

struct OpenShard {
    path: PathBuf,
    writer: BufWriter<File>,
}

/// Writes records of one length into consecutive shards
pub struct ShardWriter {
    dir: PathBuf,
    length: usize,
    max_shard_bytes: u64,
    /// Current shard number (1-based)
    part: u32,
    /// Bytes written to the current shard
    written: u64,
    current: Option<OpenShard>,
    stats: WriterStats,
    line: String,
}

impl ShardWriter {
    /// Create a writer; no file is created until the first record
    pub fn new(dir: impl Into<PathBuf>, length: usize, max_shard_bytes: u64) -> Self {
        Self {
            dir: dir.into(),
            length,
            max_shard_bytes,
            part: 1,
            written: 0,
            current: None,
            stats: WriterStats::default(),
            line: String::new(),
        }
    }

    /// Current shard number
    pub fn part(&self) -> u32 {
        self.part
    }

    /// Bytes written to the current shard
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Totals so far
    pub fn stats(&self) -> WriterStats {
        self.stats
    }

    /// Append one record, moving to the next shard first if it would not fit
    ///
    /// A shard that is still empty always takes the record, so a record
    /// larger than the cap ends up alone in its own shard.
    pub fn write_record(&mut self, record: &Record<'_>) -> Result<()> {
        let len = record.encoded_len() as u64;

        if self.written > 0 && self.written + len > self.max_shard_bytes {
            self.close_current()?;
            self.part += 1;
            self.written = 0;
        }

        self.line.clear();
        record.encode_into(&mut self.line);

        let mut shard = match self.current.take() {
            Some(shard) => shard,
            None => {
                self.stats.shards += 1;
                open_shard(&self.dir, self.length, self.part)?
            }
        };

        shard
            .writer
            .write_all(self.line.as_bytes())
            .map_err(TableError::io(&shard.path))?;
        self.current = Some(shard);

        self.written += len;
        self.stats.records += 1;
        self.stats.bytes += len;
        Ok(())
    }

    /// Flush the last shard and return the totals
    pub fn finish(mut self) -> Result<WriterStats> {
        self.close_current()?;
        Ok(self.stats)
    }

    fn close_current(&mut self) -> Result<()> {
        if let Some(mut shard) = self.current.take() {
            shard.writer.flush().map_err(TableError::io(&shard.path))?;
            debug!(
                path = %shard.path.display(),
                part = self.part,
                bytes = self.written,
                "closed shard"
            );
        }
        Ok(())
    }
}

fn open_shard(dir: &Path, length: usize, part: u32) -> Result<OpenShard> {
    let path = shard_path(dir, length, part);
    let file = File::create(&path).map_err(TableError::io(&path))?;
    debug!(path = %path.display(), part, "opened shard");
    Ok(OpenShard {
        path,
        writer: BufWriter::new(file),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::digest::DigestAlgorithm;
    use std::fs;
    use tempfile::TempDir;

    fn write_all(writer: &mut ShardWriter, candidates: &[&str]) {
        for candidate in candidates {
            let digest = DigestAlgorithm::Sha256.hex_digest(candidate);
            writer.write_record(&Record::new(&digest, candidate)).unwrap();
        }
    }

    // Every record below is 64 + 2 + 1 + 1 = 68 bytes
    const RECORD_LEN: u64 = 68;

    #[test]
    fn test_single_shard() {
        let dir = TempDir::new().unwrap();
        let mut writer = ShardWriter::new(dir.path(), 1, 1024);
        write_all(&mut writer, &["a", "b", "c"]);
        let stats = writer.finish().unwrap();

        assert_eq!(stats.shards, 1);
        assert_eq!(stats.records, 3);
        assert_eq!(stats.bytes, 3 * RECORD_LEN);

        let content = fs::read_to_string(dir.path().join("1.txt")).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(!dir.path().join("1-2.txt").exists());
    }

    #[test]
    fn test_rolls_over_before_exceeding_cap() {
        let dir = TempDir::new().unwrap();
        // Room for exactly two records per shard
        let mut writer = ShardWriter::new(dir.path(), 1, 2 * RECORD_LEN);
        write_all(&mut writer, &["a", "b", "c", "d", "e"]);
        let stats = writer.finish().unwrap();

        assert_eq!(stats.shards, 3);
        assert_eq!(fs::metadata(dir.path().join("1.txt")).unwrap().len(), 2 * RECORD_LEN);
        assert_eq!(fs::metadata(dir.path().join("1-2.txt")).unwrap().len(), 2 * RECORD_LEN);
        assert_eq!(fs::metadata(dir.path().join("1-3.txt")).unwrap().len(), RECORD_LEN);
    }

    #[test]
    fn test_cap_just_below_two_records() {
        let dir = TempDir::new().unwrap();
        let mut writer = ShardWriter::new(dir.path(), 1, 2 * RECORD_LEN - 1);
        write_all(&mut writer, &["a", "b", "c"]);
        let stats = writer.finish().unwrap();

        assert_eq!(stats.shards, 3);
        for name in ["1.txt", "1-2.txt", "1-3.txt"] {
            assert_eq!(fs::metadata(dir.path().join(name)).unwrap().len(), RECORD_LEN);
        }
    }

    #[test]
    fn test_oversized_record_gets_its_own_shard() {
        let dir = TempDir::new().unwrap();
        let mut writer = ShardWriter::new(dir.path(), 1, 10);
        write_all(&mut writer, &["a", "b"]);
        let stats = writer.finish().unwrap();

        assert_eq!(stats.shards, 2);
        assert!(dir.path().join("1.txt").exists());
        assert!(dir.path().join("1-2.txt").exists());
    }

    #[test]
    fn test_no_records_creates_no_file() {
        let dir = TempDir::new().unwrap();
        let writer = ShardWriter::new(dir.path(), 1, 1024);
        let stats = writer.finish().unwrap();

        assert_eq!(stats, WriterStats::default());
        assert!(!dir.path().join("1.txt").exists());
    }

    #[test]
    fn test_unwritable_dir_is_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let mut writer = ShardWriter::new(&missing, 1, 1024);
        let digest = DigestAlgorithm::Sha256.hex_digest("a");

        let result = writer.write_record(&Record::new(&digest, "a"));
        assert!(matches!(result, Err(TableError::Io { .. })));
    }
}
