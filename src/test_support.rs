//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::core::error::CatalogError;
use crate::core::source::{CatalogSource, DirEntry};

/// An in-memory [`CatalogSource`] with injectable failures and delays.
#[derive(Default)]
pub struct MemorySource {
    dirs: Mutex<HashMap<PathBuf, Vec<DirEntry>>>,
    contents: Mutex<HashMap<PathBuf, String>>,
    broken_metadata: Mutex<HashSet<PathBuf>>,
    listing_failure: Mutex<Option<CatalogError>>,
    /// Consumed one per `list_dir` call, front first.
    delays: Mutex<VecDeque<Duration>>,
    /// Link path → target directory.
    links: Mutex<HashMap<PathBuf, PathBuf>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp reported for every file with readable metadata.
    pub fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    pub fn with_files(self, dir: &str, names: &[&str]) -> Self {
        self.add_files(dir, names);
        self
    }

    pub fn with_dir(self, parent: &str, name: &str) -> Self {
        self.dirs
            .lock()
            .unwrap()
            .entry(PathBuf::from(parent))
            .or_default()
            .push(DirEntry::directory(name));
        self
    }

    pub fn with_content(self, path: &str, text: &str) -> Self {
        self.contents
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), text.to_string());
        self
    }

    pub fn with_broken_metadata(self, path: &str) -> Self {
        self.broken_metadata
            .lock()
            .unwrap()
            .insert(PathBuf::from(path));
        self
    }

    /// Lists `parent/name` as a directory that resolves to `target`.
    pub fn with_link(self, parent: &str, name: &str, target: &str) -> Self {
        let path = Path::new(parent).join(name);
        self.links
            .lock()
            .unwrap()
            .insert(path, PathBuf::from(target));
        self.with_dir(parent, name)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.links
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_else(|| path.to_path_buf())
    }

    pub fn add_files(&self, dir: &str, names: &[&str]) {
        let mut dirs = self.dirs.lock().unwrap();
        let entries = dirs.entry(PathBuf::from(dir)).or_default();
        entries.extend(names.iter().map(|n| DirEntry::file(*n)));
    }

    /// Every `list_dir` call fails with `err` until cleared.
    pub fn fail_listing(&self, err: CatalogError) {
        *self.listing_failure.lock().unwrap() = Some(err);
    }

    pub fn clear_failure(&self) {
        *self.listing_failure.lock().unwrap() = None;
    }

    pub fn push_delay(&self, delay: Duration) {
        self.delays.lock().unwrap().push_back(delay);
    }
}

#[async_trait]
impl CatalogSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    async fn list_dir(&self, dir: &Path) -> Result<Vec<DirEntry>, CatalogError> {
        let delay = self.delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(err) = self.listing_failure.lock().unwrap().clone() {
            return Err(err);
        }
        let target = self.resolve(dir);
        self.dirs
            .lock()
            .unwrap()
            .get(&target)
            .cloned()
            .ok_or_else(|| CatalogError::DirectoryNotFound(dir.to_path_buf()))
    }

    async fn modified(&self, path: &Path) -> Result<DateTime<Utc>, CatalogError> {
        if self.broken_metadata.lock().unwrap().contains(path) {
            return Err(CatalogError::MetadataReadFailed {
                path: path.to_path_buf(),
                message: "injected failure".to_string(),
            });
        }
        Ok(Self::fixed_time())
    }

    async fn read_to_string(&self, path: &Path) -> Result<String, CatalogError> {
        self.contents
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| CatalogError::ContentReadFailed {
                path: path.to_path_buf(),
                message: "no such document".to_string(),
            })
    }

    async fn canonical_path(&self, path: &Path) -> PathBuf {
        self.resolve(path)
    }
}
