//! # Catalog Model
//!
//! `Document` and `Category`, the two node types of a catalog tree.
//!
//! ```text
//! Category (name = "state")
//! ├── documents: [Document]          // sorted by file_name
//! └── sub_categories: [Category]     // sorted by name, recursive
//! ```
//!
//! Both types are values: built once per scan, cloned into filtered views,
//! never patched in place after the scan that produced them.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::core::classify::{category_appearance, document_display_name, extension};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Markdown,
    Text,
}

impl ContentType {
    /// Maps a lowercased extension to a content type. Unknown extensions are
    /// not documents.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "md" | "markdown" => Some(ContentType::Markdown),
            "txt" | "text" => Some(ContentType::Text),
            _ => None,
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        extension(file_name).and_then(|ext| Self::from_extension(&ext))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: Uuid,
    pub file_name: String,
    pub display_name: String,
    pub relative_path: String,
    pub full_path: PathBuf,
    pub content_type: ContentType,
    pub last_modified: DateTime<Utc>,
}

impl Document {
    /// Builds a document, resolving its display name from the title table.
    ///
    /// Falls back to `Markdown` when the extension isn't recognised; callers
    /// filter unrecognised names before they get here.
    pub fn new(
        file_name: impl Into<String>,
        relative_path: impl Into<String>,
        full_path: impl Into<PathBuf>,
        last_modified: DateTime<Utc>,
    ) -> Self {
        let file_name = file_name.into();
        let content_type =
            ContentType::from_file_name(&file_name).unwrap_or(ContentType::Markdown);
        Self {
            id: Uuid::new_v4(),
            display_name: document_display_name(&file_name),
            file_name,
            relative_path: relative_path.into(),
            full_path: full_path.into(),
            content_type,
            last_modified,
        }
    }

    pub fn is_markdown(&self) -> bool {
        self.content_type == ContentType::Markdown
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub display_name: String,
    pub relative_path: String,
    pub full_path: PathBuf,
    pub icon: String,
    pub color: String,
    pub documents: Vec<Document>,
    pub sub_categories: Vec<Category>,
}

impl Category {
    /// Creates an empty category. Display name, icon, and color come from the
    /// category table, with `"folder"`/`"gray"`/`name` for unknown names.
    pub fn new(
        name: impl Into<String>,
        relative_path: impl Into<String>,
        full_path: impl Into<PathBuf>,
    ) -> Self {
        let name = name.into();
        let (display_name, icon, color) = category_appearance(&name);
        Self {
            id: Uuid::new_v4(),
            name,
            display_name,
            relative_path: relative_path.into(),
            full_path: full_path.into(),
            icon: icon.to_string(),
            color: color.to_string(),
            documents: Vec::new(),
            sub_categories: Vec::new(),
        }
    }

    /// Inserts a document at its sorted position.
    pub fn add_document(&mut self, document: Document) {
        let idx = self
            .documents
            .partition_point(|d| d.file_name <= document.file_name);
        self.documents.insert(idx, document);
    }

    /// Inserts a sub-category at its sorted position.
    pub fn add_sub_category(&mut self, category: Category) {
        let idx = self
            .sub_categories
            .partition_point(|c| c.name <= category.name);
        self.sub_categories.insert(idx, category);
    }

    /// Direct documents plus every descendant's, computed on demand.
    pub fn total_document_count(&self) -> usize {
        self.documents.len()
            + self
                .sub_categories
                .iter()
                .map(Category::total_document_count)
                .sum::<usize>()
    }

    /// Shallow copy with the child lists swapped out. Everything else,
    /// including `id`, is preserved.
    pub fn with_children(&self, documents: Vec<Document>, sub_categories: Vec<Category>) -> Self {
        Self {
            id: self.id,
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            relative_path: self.relative_path.clone(),
            full_path: self.full_path.clone(),
            icon: self.icon.clone(),
            color: self.color.clone(),
            documents,
            sub_categories,
        }
    }

    /// Depth-first iterator over every document in this subtree.
    pub fn all_documents(&self) -> Box<dyn Iterator<Item = &Document> + '_> {
        Box::new(
            self.documents
                .iter()
                .chain(self.sub_categories.iter().flat_map(|c| c.all_documents())),
        )
    }

    /// Finds a document anywhere in this subtree by raw file name.
    pub fn find_document(&self, file_name: &str) -> Option<&Document> {
        self.all_documents().find(|d| d.file_name == file_name)
    }
}

/// Sorts categories by name, recursively, and their documents by file name.
pub fn sort_tree(categories: &mut [Category]) {
    categories.sort_by(|a, b| a.name.cmp(&b.name));
    for category in categories.iter_mut() {
        category
            .documents
            .sort_by(|a, b| a.file_name.cmp(&b.file_name));
        sort_tree(&mut category.sub_categories);
    }
}

/// Looks a document up across a whole catalog.
pub fn find_document<'a>(categories: &'a [Category], file_name: &str) -> Option<&'a Document> {
    categories.iter().find_map(|c| c.find_document(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(name: &str) -> Document {
        Document::new(name, name, format!("/res/{name}"), Utc::now())
    }

    #[test]
    fn test_document_resolves_display_name_and_type() {
        let d = doc("SwiftUI_Guide.md");
        assert_eq!(d.display_name, "SwiftUI 入门指南");
        assert_eq!(d.content_type, ContentType::Markdown);

        let t = doc("notes.txt");
        assert_eq!(t.display_name, "notes");
        assert_eq!(t.content_type, ContentType::Text);
        assert!(!t.is_markdown());
    }

    #[test]
    fn test_documents_get_distinct_ids() {
        assert_ne!(doc("a.md").id, doc("a.md").id);
    }

    #[test]
    fn test_category_defaults_for_unknown_name() {
        let c = Category::new("Tutorials", "Tutorials", "/res/Tutorials");
        assert_eq!(c.display_name, "Tutorials");
        assert_eq!(c.icon, "folder");
        assert_eq!(c.color, "gray");
    }

    #[test]
    fn test_add_document_keeps_sorted() {
        let mut c = Category::new("misc", "misc", "/res");
        c.add_document(doc("c.md"));
        c.add_document(doc("a.md"));
        c.add_document(doc("b.md"));
        let names: Vec<_> = c.documents.iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.md", "b.md", "c.md"]);
    }

    #[test]
    fn test_add_sub_category_keeps_sorted() {
        let mut root = Category::new("root", "", "/res");
        root.add_sub_category(Category::new("zeta", "zeta", "/res/zeta"));
        root.add_sub_category(Category::new("alpha", "alpha", "/res/alpha"));
        let names: Vec<_> = root.sub_categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_total_document_count_is_recursive() {
        let mut leaf = Category::new("leaf", "a/leaf", "/res/a/leaf");
        leaf.add_document(doc("x.md"));
        leaf.add_document(doc("y.md"));
        let mut mid = Category::new("a", "a", "/res/a");
        mid.add_document(doc("z.md"));
        mid.add_sub_category(leaf);

        assert_eq!(mid.total_document_count(), 3);
        assert_eq!(mid.all_documents().count(), 3);
        assert!(mid.find_document("y.md").is_some());
    }

    #[test]
    fn test_with_children_preserves_identity() {
        let mut c = Category::new("state", "state", "/res");
        c.add_document(doc("State_A.md"));
        let copy = c.with_children(Vec::new(), Vec::new());
        assert_eq!(copy.id, c.id);
        assert_eq!(copy.icon, c.icon);
        assert!(copy.documents.is_empty());
        assert_eq!(c.documents.len(), 1);
    }

    #[test]
    fn test_sort_tree_is_ordinal() {
        let mut cats = vec![
            Category::new("b", "b", "/b"),
            Category::new("B", "B", "/B"),
            Category::new("a", "a", "/a"),
        ];
        sort_tree(&mut cats);
        let names: Vec<_> = cats.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["B", "a", "b"]);
    }
}
