//! Summary counts over a catalog tree. Recomputed on every call.

use serde::Serialize;

use crate::core::catalog::Category;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    /// Root categories only.
    pub category_count: usize,
    pub document_count: usize,
    pub markdown_count: usize,
    pub text_count: usize,
}

pub fn statistics(categories: &[Category]) -> Statistics {
    let mut stats = Statistics {
        category_count: categories.len(),
        ..Default::default()
    };
    for document in categories.iter().flat_map(Category::all_documents) {
        stats.document_count += 1;
        if document.is_markdown() {
            stats.markdown_count += 1;
        } else {
            stats.text_count += 1;
        }
    }
    stats
}
