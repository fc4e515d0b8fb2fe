//! # Tree Builder
//!
//! Turns a [`ScannedDir`] into sorted root categories. Pure: no I/O.
//!
//! ```text
//! files ──strip ext──► classify ──group by key──► Category per key ──sort──► roots
//! dirs  ──(recursive mode)──► Category per dir, depth-first, sorted per level
//! ```

use std::collections::HashMap;
use std::path::Path;

use chrono::Utc;
use log::debug;

use crate::ScanMode;
use crate::core::catalog::{Category, Document, sort_tree};
use crate::core::classify::{CategoryKey, classify_file_name};
use crate::core::scan::{ScannedDir, ScannedFile};

/// Builds the catalog for a finished scan.
pub fn build_catalog(listing: &ScannedDir, mode: ScanMode) -> Vec<Category> {
    let mut roots = build_flat(&listing.files, &listing.full_path);

    if mode == ScanMode::Recursive {
        for dir in &listing.directories {
            let Some(category) = build_directory(dir) else {
                debug!("Skipping empty directory {}", dir.relative_path);
                continue;
            };
            match roots.iter_mut().find(|c| c.name == category.name) {
                Some(bucket) => merge_into(bucket, category),
                None => roots.push(category),
            }
        }
        sort_tree(&mut roots);
    }

    roots
}

/// Groups files into one category per classification key.
///
/// Documents are sorted by file name, categories by name. Flat mode never
/// produces sub-categories.
pub fn build_flat(files: &[ScannedFile], root: &Path) -> Vec<Category> {
    let mut groups: HashMap<CategoryKey, Vec<&ScannedFile>> = HashMap::new();
    for file in files {
        groups
            .entry(classify_file_name(&file.name))
            .or_default()
            .push(file);
    }

    let mut categories: Vec<Category> = groups
        .into_iter()
        .map(|(key, files)| {
            let mut category = Category::new(key.as_str(), key.as_str(), root);
            category.documents = files.into_iter().map(document_for).collect();
            category
                .documents
                .sort_by(|a, b| a.file_name.cmp(&b.file_name));
            category
        })
        .collect();

    categories.sort_by(|a, b| a.name.cmp(&b.name));
    categories
}

/// Convenience for callers that only have bare file names.
pub fn build_from_file_names<S: AsRef<str>>(names: &[S], root: &Path) -> Vec<Category> {
    let now = Utc::now();
    let files: Vec<ScannedFile> = names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            ScannedFile {
                name: name.to_string(),
                relative_path: name.to_string(),
                full_path: root.join(name),
                modified: now,
            }
        })
        .collect();
    build_flat(&files, root)
}

fn document_for(file: &ScannedFile) -> Document {
    Document::new(
        file.name.clone(),
        file.relative_path.clone(),
        file.full_path.clone(),
        file.modified,
    )
}

/// A directory category, or `None` if nothing below it is a document.
fn build_directory(dir: &ScannedDir) -> Option<Category> {
    let mut category = Category::new(
        dir.name.clone(),
        dir.relative_path.clone(),
        dir.full_path.clone(),
    );
    category.documents = dir.files.iter().map(document_for).collect();
    category.sub_categories = dir.directories.iter().filter_map(build_directory).collect();
    sort_tree(std::slice::from_mut(&mut category));

    if category.total_document_count() == 0 {
        None
    } else {
        Some(category)
    }
}

fn merge_into(bucket: &mut Category, other: Category) {
    for document in other.documents {
        bucket.add_document(document);
    }
    for sub in other.sub_categories {
        bucket.add_sub_category(sub);
    }
}
