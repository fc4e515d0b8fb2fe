//! # Catalog Source
//!
//! The filesystem seam. Scanning only needs three capabilities (list a
//! directory, read a timestamp, read a file), so they sit behind one trait
//! and tests swap in an in-memory implementation.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, warn};

use super::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One name returned by [`CatalogSource::list_dir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }
}

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Returns the name of the source, for logging.
    fn name(&self) -> &str;

    /// Lists the direct entries of `dir`, in no particular order.
    async fn list_dir(&self, dir: &Path) -> Result<Vec<DirEntry>, CatalogError>;

    /// Last-modified time of `path`. Callers tolerate failure.
    async fn modified(&self, path: &Path) -> Result<DateTime<Utc>, CatalogError>;

    /// Full text of a document, read when it is opened.
    async fn read_to_string(&self, path: &Path) -> Result<String, CatalogError>;

    /// Identity of a directory for cycle detection. Two paths that reach the
    /// same directory through links must resolve to the same value.
    async fn canonical_path(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

/// [`CatalogSource`] over the local filesystem via `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl FsSource {
    pub fn new() -> Self {
        Self
    }
}

fn listing_error(dir: &Path, e: io::Error) -> CatalogError {
    match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            CatalogError::DirectoryNotFound(dir.to_path_buf())
        }
        _ => CatalogError::EnumerationFailed {
            path: dir.to_path_buf(),
            message: e.to_string(),
        },
    }
}

#[async_trait]
impl CatalogSource for FsSource {
    fn name(&self) -> &str {
        "fs"
    }

    async fn list_dir(&self, dir: &Path) -> Result<Vec<DirEntry>, CatalogError> {
        let mut read_dir = tokio::fs::read_dir(dir)
            .await
            .map_err(|e| listing_error(dir, e))?;

        let mut entries = Vec::new();
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| listing_error(dir, e))?
        {
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    warn!("Skipping non UTF-8 entry in {}: {:?}", dir.display(), raw);
                    continue;
                }
            };

            // Follow symlinks so a linked folder is still a folder.
            let kind = match tokio::fs::metadata(entry.path()).await {
                Ok(meta) if meta.is_dir() => EntryKind::Directory,
                Ok(_) => EntryKind::File,
                Err(e) => {
                    debug!("Could not stat {}: {}", entry.path().display(), e);
                    EntryKind::File
                }
            };
            entries.push(DirEntry { name, kind });
        }
        Ok(entries)
    }

    async fn modified(&self, path: &Path) -> Result<DateTime<Utc>, CatalogError> {
        let to_error = |e: io::Error| CatalogError::MetadataReadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        let meta = tokio::fs::metadata(path).await.map_err(to_error)?;
        let modified = meta.modified().map_err(to_error)?;
        Ok(DateTime::<Utc>::from(modified))
    }

    async fn read_to_string(&self, path: &Path) -> Result<String, CatalogError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CatalogError::ContentReadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }

    async fn canonical_path(&self, path: &Path) -> PathBuf {
        tokio::fs::canonicalize(path).await.unwrap_or_else(|e| {
            debug!("Could not canonicalize {}: {}", path.display(), e);
            path.to_path_buf()
        })
    }
}
