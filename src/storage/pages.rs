//! On-disk store for downloaded pages
//!
//! Pages are saved as `{id}.txt` inside one directory, next to an index file
//! mapping each id to the URL it was downloaded from.

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::PageIndexEntry;
use crate::utils::error::StorageError;

/// Directory of numbered raw pages plus their index
pub struct PageStore {
    dir: PathBuf,
    index_file: String,
}

impl PageStore {
    /// Create the store, creating its directory if needed
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created
    pub fn new(dir: &Path, index_file: &str) -> Result<Self, StorageError> {
        fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
        Ok(Self::open(dir, index_file))
    }

    /// Open an existing store without touching the filesystem
    #[must_use]
    pub fn open(dir: &Path, index_file: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            index_file: index_file.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(&self.index_file)
    }

    /// Write a page body for an index entry, returning the path written
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be written
    pub fn write_page(&self, entry: &PageIndexEntry, body: &str) -> Result<PathBuf, StorageError> {
        let path = self.dir.join(entry.file_name());
        fs::write(&path, body).map_err(|e| StorageError::io(&path, e))?;
        tracing::trace!(path = %path.display(), bytes = body.len(), "Wrote page");
        Ok(path)
    }

    /// Write the index file: one `{id} {url}` line per entry, no trailing newline
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be written
    pub fn write_index(&self, entries: &[PageIndexEntry]) -> Result<PathBuf, StorageError> {
        let path = self.index_path();
        let content = entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");

        fs::write(&path, content).map_err(|e| StorageError::io(&path, e))?;
        Ok(path)
    }

    /// Read the index file back
    ///
    /// Blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file cannot be read and
    /// `StorageError::InvalidIndex` for a malformed line (1-based line number)
    pub fn read_index(&self) -> Result<Vec<PageIndexEntry>, StorageError> {
        let path = self.index_path();
        let content = fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))?;

        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(number, line)| {
                line.parse::<PageIndexEntry>()
                    .map_err(|_| StorageError::InvalidIndex {
                        line: number + 1,
                        content: line.to_string(),
                    })
            })
            .collect()
    }

    /// Regular files in the store sorted by file name, index file excluded
    ///
    /// A missing directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory exists but cannot be listed
    pub fn page_files(&self) -> Result<Vec<PathBuf>, StorageError> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&self.dir, e))?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }
            if entry.file_name().to_str() == Some(self.index_file.as_str()) {
                continue;
            }

            files.push(path);
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}
