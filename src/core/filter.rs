//! # Search Filter
//!
//! Produces a pruned copy of a catalog for a query. The source tree is never
//! touched; surviving categories are rebuilt with [`Category::with_children`].
//!
//! A category survives if any of these hold:
//! - one of its documents matches (display name or file name)
//! - one of its sub-categories survives
//! - its own display name matches
//!
//! Matching is a case-insensitive substring test using Unicode lowercasing.

use std::borrow::Cow;

use crate::core::catalog::{Category, Document};

/// Filters `categories` by `query`. An empty query borrows the input as-is.
pub fn filter_categories<'a>(categories: &'a [Category], query: &str) -> Cow<'a, [Category]> {
    if query.is_empty() {
        return Cow::Borrowed(categories);
    }
    let needle = query.to_lowercase();
    Cow::Owned(
        categories
            .iter()
            .filter_map(|c| filter_category(c, &needle))
            .collect(),
    )
}

/// Post-order: children first, then this node. `needle` is already lowercased.
fn filter_category(category: &Category, needle: &str) -> Option<Category> {
    let sub_categories: Vec<Category> = category
        .sub_categories
        .iter()
        .filter_map(|c| filter_category(c, needle))
        .collect();

    let documents: Vec<Document> = category
        .documents
        .iter()
        .filter(|d| document_matches(d, needle))
        .cloned()
        .collect();

    if documents.is_empty() && sub_categories.is_empty() && !contains(&category.display_name, needle)
    {
        return None;
    }
    Some(category.with_children(documents, sub_categories))
}

fn document_matches(document: &Document, needle: &str) -> bool {
    contains(&document.display_name, needle) || contains(&document.file_name, needle)
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
