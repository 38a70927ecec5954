//! Shard naming and location
//!
//! Shard 1 of a table is `{length}.txt`; shard `n >= 2` is `{length}-{n}.txt`.
//! The locator walks shards in numbering order and stops at the first gap.

use crate::constants::{INDEX_EXTENSION, SHARD_EXTENSION};
use std::path::{Path, PathBuf};

/// File name of shard `part` (1-based) for candidates of `length`
pub fn shard_file_name(length: usize, part: u32) -> String {
    if part <= 1 {
        format!("{}.{}", length, SHARD_EXTENSION)
    } else {
        format!("{}-{}.{}", length, part, SHARD_EXTENSION)
    }
}

/// Path of shard `part` under `dir`
pub fn shard_path(dir: impl AsRef<Path>, length: usize, part: u32) -> PathBuf {
    dir.as_ref().join(shard_file_name(length, part))
}

/// Explicitly suffixed name of a part: `{length}-{part}.txt`
fn suffixed_path(dir: &Path, length: usize, part: u32) -> PathBuf {
    dir.join(format!("{}-{}.{}", length, part, SHARD_EXTENSION))
}

/// Path of the sorted index for `length` under `dir`
///
/// Format: `{dir}/{length}.idx`
pub fn index_path(dir: impl AsRef<Path>, length: usize) -> PathBuf {
    dir.as_ref()
        .join(format!("{}.{}", length, INDEX_EXTENSION))
}

/// A located shard
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShardRef {
    /// 1-based shard number
    pub part: u32,
    /// Existing file holding the shard
    pub path: PathBuf,
}

/// Iterator over the existing shards of one table, in numbering order
///
/// For each part the suffixed name `{length}-{part}.txt` is tried first.
/// Part 1 falls back to the bare `{length}.txt`; that fallback is taken at
/// most once, so the bare shard is never visited twice. The sequence ends at
/// the first part with no file.
#[derive(Clone, Debug)]
pub struct ShardLocator {
    dir: PathBuf,
    length: usize,
    next_part: u32,
    done: bool,
}

impl ShardLocator {
    pub fn new(dir: impl Into<PathBuf>, length: usize) -> Self {
        Self {
            dir: dir.into(),
            length,
            next_part: 1,
            done: false,
        }
    }

    fn resolve(&self, part: u32) -> Option<PathBuf> {
        let suffixed = suffixed_path(&self.dir, self.length, part);
        if suffixed.is_file() {
            return Some(suffixed);
        }
        if part == 1 {
            let bare = shard_path(&self.dir, self.length, 1);
            if bare.is_file() {
                return Some(bare);
            }
        }
        None
    }
}

impl Iterator for ShardLocator {
    type Item = ShardRef;

    fn next(&mut self) -> Option<ShardRef> {
        if self.done {
            return None;
        }

        let part = self.next_part;
        match self.resolve(part) {
            Some(path) => {
                self.next_part += 1;
                Some(ShardRef { part, path })
            }
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for ShardLocator {}

/// Locate every shard of the table for `length`
pub fn locate_shards(dir: impl Into<PathBuf>, length: usize) -> Vec<ShardRef> {
    ShardLocator::new(dir, length).collect()
}
