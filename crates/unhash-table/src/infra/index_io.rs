//! Sorted index file I/O
//!
//! Entries are written as `(digest bytes, ordinal: u64 LE)` after the
//! 64-byte header. Reading goes through [`SortedIndex`], which is backed by a
//! memory map with the `mmap` feature and by an in-memory copy otherwise.

use crate::constants::INDEX_HEADER_SIZE;
use crate::domain::index_format::{
    IndexEntry, IndexFormatError, IndexHeader, expected_file_size,
};
use crate::error::{Result, TableError};
use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};
use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

#[cfg(feature = "mmap")]
use memmap2::Mmap;

fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    Ok(())
}

/// Save a sorted index
///
/// `entries` must already be sorted; `header.entry_count` must match and `N`
/// must be the digest width of `header.algorithm`.
pub fn save_index<const N: usize>(
    path: impl AsRef<Path>,
    header: &IndexHeader,
    entries: &[IndexEntry<N>],
) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path).map_err(TableError::io(path))?;

    let file = File::create(path).map_err(TableError::io(path))?;
    let mut writer = BufWriter::new(file);

    let write = |writer: &mut BufWriter<File>| -> std::io::Result<()> {
        writer.write_all(&header.to_bytes())?;
        for entry in entries {
            writer.write_all(&entry.digest)?;
            writer.write_u64::<LittleEndian>(entry.ordinal)?;
        }
        writer.flush()
    };

    write(&mut writer).map_err(TableError::io(path))
}

enum IndexData {
    #[cfg(feature = "mmap")]
    Mapped(Mmap),
    #[cfg(not(feature = "mmap"))]
    Owned(Vec<u8>),
}

impl IndexData {
    fn bytes(&self) -> &[u8] {
        match self {
            #[cfg(feature = "mmap")]
            Self::Mapped(mmap) => &mmap[..],
            #[cfg(not(feature = "mmap"))]
            Self::Owned(bytes) => bytes.as_slice(),
        }
    }
}

/// Read-only view of a sorted index file
pub struct SortedIndex {
    header: IndexHeader,
    data: IndexData,
    entry_size: usize,
    digest_len: usize,
}

impl SortedIndex {
    /// Open an index file and check its header and size
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not an index file,
    /// or its size does not match the header.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        #[cfg(feature = "mmap")]
        let data = {
            let file = File::open(path).map_err(TableError::io(path))?;
            let len = file.metadata().map_err(TableError::io(path))?.len();
            if len < INDEX_HEADER_SIZE as u64 {
                return Err(IndexFormatError::Truncated.into());
            }
            IndexData::Mapped(unsafe { Mmap::map(&file) }.map_err(TableError::io(path))?)
        };

        #[cfg(not(feature = "mmap"))]
        let data = IndexData::Owned(fs::read(path).map_err(TableError::io(path))?);

        let bytes = data.bytes();
        let header_bytes: &[u8; INDEX_HEADER_SIZE] = bytes
            .get(..INDEX_HEADER_SIZE)
            .and_then(|b| b.try_into().ok())
            .ok_or(IndexFormatError::Truncated)?;
        let header = IndexHeader::from_bytes(header_bytes)?;

        let expected = expected_file_size(&header)?;
        if bytes.len() as u64 != expected {
            return Err(IndexFormatError::InvalidFileSize {
                expected,
                found: bytes.len() as u64,
            }
            .into());
        }

        Ok(Self {
            header,
            entry_size: header.entry_size(),
            digest_len: header.algorithm.byte_len(),
            data,
        })
    }

    pub fn header(&self) -> &IndexHeader {
        &self.header
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.header.entry_count as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry_bytes(&self, index: usize) -> &[u8] {
        let offset = INDEX_HEADER_SIZE + index * self.entry_size;
        &self.data.bytes()[offset..offset + self.entry_size]
    }

    /// Digest of entry `index`
    pub fn digest_at(&self, index: usize) -> &[u8] {
        &self.entry_bytes(index)[..self.digest_len]
    }

    /// Ordinal of entry `index`
    pub fn ordinal_at(&self, index: usize) -> u64 {
        LittleEndian::read_u64(&self.entry_bytes(index)[self.digest_len..])
    }

    /// Binary search for a raw digest, returning its ordinal
    pub fn find(&self, digest: &[u8]) -> Option<u64> {
        if digest.len() != self.digest_len {
            return None;
        }

        let (mut lo, mut hi) = (0usize, self.len());
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            match self.digest_at(mid).cmp(digest) {
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
                Ordering::Equal => return Some(self.ordinal_at(mid)),
            }
        }
        None
    }
}
