//! Indexed random access over a tar archive
//!
//! Opening walks the tar headers once, seeking past every payload, and records
//! where each regular file's data starts. Fetching a seed is then a single
//! seek and read. The handle owns its reader, so dropping it releases the file.

use crate::archive::TileSource;
use crate::archive::key::{entry_key, normalize_entry_path};
use crate::io::error::{Result, ViewerError};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// Location of an entry's payload inside the archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLocation {
    /// Byte offset of the first payload byte
    pub offset: u64,
    /// Payload length in bytes
    pub size: u64,
}

/// Opened tar archive with an in-memory entry index
pub struct TarArchive<R = File> {
    reader: R,
    dirname: String,
    index: HashMap<String, EntryLocation>,
}

impl TarArchive<File> {
    /// Open the archive at `path` and index its entries
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::ArchiveUnavailable`] if the file cannot be opened
    /// or its headers are malformed
    pub fn open<P: AsRef<Path>>(path: P, dirname: &str) -> Result<Self> {
        let path = path.as_ref();
        let unavailable = |source| ViewerError::ArchiveUnavailable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(unavailable)?;
        let archive = Self::from_reader(file, dirname).map_err(unavailable)?;

        tracing::debug!(
            path = %path.display(),
            entries = archive.len(),
            "indexed archive"
        );
        Ok(archive)
    }
}

impl<R: Read + Seek> TarArchive<R> {
    /// Index a tar stream held by any seekable reader
    ///
    /// # Errors
    ///
    /// Returns an error if the tar headers cannot be read
    pub fn from_reader(reader: R, dirname: &str) -> std::io::Result<Self> {
        let mut archive = tar::Archive::new(reader);
        let mut index = HashMap::new();

        for entry in archive.entries_with_seek()? {
            let entry = entry?;
            if !entry.header().entry_type().is_file() {
                continue;
            }
            let path = entry.path()?;
            let key = normalize_entry_path(&path.to_string_lossy()).to_owned();
            index.insert(
                key,
                EntryLocation {
                    offset: entry.raw_file_position(),
                    size: entry.size(),
                },
            );
        }

        Ok(Self {
            reader: archive.into_inner(),
            dirname: dirname.to_owned(),
            index,
        })
    }

    /// Read the payload stored under `key`, if present
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::EntryRead`] if seeking or reading fails
    pub fn read_entry(&mut self, key: &str) -> Result<Option<Vec<u8>>> {
        let Some(location) = self.index.get(key).copied() else {
            return Ok(None);
        };

        let read_error = |source| ViewerError::EntryRead {
            key: key.to_owned(),
            source,
        };

        let size = usize::try_from(location.size)
            .map_err(|e| read_error(std::io::Error::other(e)))?;
        let mut data = vec![0; size];
        self.reader
            .seek(SeekFrom::Start(location.offset))
            .map_err(read_error)?;
        self.reader.read_exact(&mut data).map_err(read_error)?;

        Ok(Some(data))
    }
}

impl<R> TarArchive<R> {
    /// Directory prefix used to build entry keys
    pub fn dirname(&self) -> &str {
        &self.dirname
    }

    /// Number of indexed regular-file entries
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the archive holds no regular-file entries
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Whether an entry exists for `seed`
    pub fn contains(&self, seed: i64) -> bool {
        self.index.contains_key(&entry_key(&self.dirname, seed))
    }

    /// Payload location of the entry for `seed`
    pub fn location(&self, seed: i64) -> Option<EntryLocation> {
        self.index.get(&entry_key(&self.dirname, seed)).copied()
    }
}

impl<R: Read + Seek> TileSource for TarArchive<R> {
    fn fetch(&mut self, seed: i64) -> Result<Option<Vec<u8>>> {
        let key = entry_key(&self.dirname, seed);
        self.read_entry(&key)
    }

    fn describe(&self, seed: i64) -> String {
        entry_key(&self.dirname, seed)
    }
}
