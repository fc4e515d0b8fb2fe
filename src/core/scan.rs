//! # Scan
//!
//! Walks a [`CatalogSource`] and produces a [`ScannedDir`]: the raw listing
//! (names, paths, timestamps) the builder turns into categories.
//!
//! Failure policy:
//! - root listing fails → the whole scan fails
//! - a subdirectory listing fails → that subtree is skipped
//! - a file's metadata read fails → timestamp defaults to now
//!
//! Recursive scans visit each directory once, by canonical path, so a link
//! back to an ancestor can't loop and a linked sibling isn't listed twice.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt};
use log::{debug, info, warn};

use crate::ScanMode;
use crate::core::catalog::ContentType;
use crate::core::classify::extension;

use super::error::CatalogError;
use super::source::{CatalogSource, EntryKind};

/// Extensions accepted when nothing is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["md"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub root: PathBuf,
    pub mode: ScanMode,
    /// Lowercased extensions without the dot.
    pub extensions: Vec<String>,
}

impl ScanOptions {
    pub fn new(root: impl Into<PathBuf>, mode: ScanMode) -> Self {
        Self {
            root: root.into(),
            mode,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn with_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// A file is a document if its extension is configured and maps to a
    /// known content type. Hidden files are never documents.
    pub fn accepts(&self, file_name: &str) -> bool {
        if file_name.starts_with('.') {
            return false;
        }
        match extension(file_name) {
            Some(ext) => {
                self.extensions.contains(&ext) && ContentType::from_extension(&ext).is_some()
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScannedFile {
    pub name: String,
    pub relative_path: String,
    pub full_path: PathBuf,
    pub modified: DateTime<Utc>,
}

/// One scanned directory. The scan root has an empty `name` and
/// `relative_path`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScannedDir {
    pub name: String,
    pub relative_path: String,
    pub full_path: PathBuf,
    pub files: Vec<ScannedFile>,
    pub directories: Vec<ScannedDir>,
}

impl ScannedDir {
    pub fn file_count(&self) -> usize {
        self.files.len() + self.directories.iter().map(ScannedDir::file_count).sum::<usize>()
    }
}

fn join_relative(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Scans `options.root`. Only a failure to list the root itself is an error.
pub async fn scan(
    source: &dyn CatalogSource,
    options: &ScanOptions,
) -> Result<ScannedDir, CatalogError> {
    info!(
        "Scanning {} ({:?}, source={})",
        options.root.display(),
        options.mode,
        source.name()
    );
    let mut visited = HashSet::new();
    visited.insert(source.canonical_path(&options.root).await);
    let root = walk(
        source,
        options,
        &mut visited,
        options.root.clone(),
        String::new(),
        String::new(),
    )
    .await?;
    info!("Scan found {} documents", root.file_count());
    Ok(root)
}

fn walk<'a>(
    source: &'a dyn CatalogSource,
    options: &'a ScanOptions,
    visited: &'a mut HashSet<PathBuf>,
    full_path: PathBuf,
    relative_path: String,
    name: String,
) -> BoxFuture<'a, Result<ScannedDir, CatalogError>> {
    async move {
        let mut entries = source.list_dir(&full_path).await?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let mut dir = ScannedDir {
            name,
            relative_path,
            full_path,
            files: Vec::new(),
            directories: Vec::new(),
        };

        for entry in entries {
            let child_full = dir.full_path.join(&entry.name);
            let child_relative = join_relative(&dir.relative_path, &entry.name);

            match entry.kind {
                EntryKind::File => {
                    if !options.accepts(&entry.name) {
                        continue;
                    }
                    let modified = modified_or_now(source, &child_full).await;
                    dir.files.push(ScannedFile {
                        name: entry.name,
                        relative_path: child_relative,
                        full_path: child_full,
                        modified,
                    });
                }
                EntryKind::Directory if options.mode == ScanMode::Recursive => {
                    if !visited.insert(source.canonical_path(&child_full).await) {
                        debug!("Already scanned {}, skipping", child_full.display());
                        continue;
                    }
                    let child = walk(
                        source,
                        options,
                        &mut *visited,
                        child_full,
                        child_relative,
                        entry.name,
                    );
                    match child.await {
                        Ok(child) => dir.directories.push(child),
                        Err(e) => warn!("Skipping subdirectory: {}", e),
                    }
                }
                EntryKind::Directory => {}
            }
        }
        Ok(dir)
    }
    .boxed()
}

async fn modified_or_now(source: &dyn CatalogSource, path: &Path) -> DateTime<Utc> {
    source.modified(path).await.unwrap_or_else(|e| {
        debug!("{}; using current time", e);
        Utc::now()
    })
}
