//! Plain-text rendering for the `doccat` binary.
//!
//! Kept in the library so the formatting is testable without a terminal.

use std::fmt::Write;

use crate::core::catalog::Category;
use crate::core::preview::DocumentContent;
use crate::core::state::CatalogState;
use crate::core::stats::Statistics;

const INDENT: &str = "  ";

/// One line per category and document, indented by depth.
pub fn render_tree(categories: &[Category]) -> String {
    let mut out = String::new();
    for category in categories {
        write_category(&mut out, category, 0);
    }
    out
}

fn write_category(out: &mut String, category: &Category, depth: usize) {
    let pad = INDENT.repeat(depth);
    let _ = writeln!(
        out,
        "{pad}{} [{}] ({})",
        category.display_name,
        category.name,
        category.total_document_count()
    );
    for document in &category.documents {
        let _ = writeln!(
            out,
            "{pad}{INDENT}- {} ({})",
            document.display_name, document.file_name
        );
    }
    for sub in &category.sub_categories {
        write_category(out, sub, depth + 1);
    }
}

pub fn render_stats(stats: &Statistics) -> String {
    format!(
        "categories: {}\ndocuments:  {}\nmarkdown:   {}\ntext:       {}\n",
        stats.category_count, stats.document_count, stats.markdown_count, stats.text_count
    )
}

/// Heading outline followed by the raw document.
pub fn render_document(content: &DocumentContent) -> String {
    let mut out = String::new();
    if !content.outline.is_empty() {
        out.push_str("Outline:\n");
        for heading in &content.outline {
            let pad = INDENT.repeat(heading.level.saturating_sub(1) as usize + 1);
            let _ = writeln!(out, "{pad}{}", heading.title);
        }
        out.push('\n');
    }
    out.push_str(&content.raw);
    if !content.raw.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// One-line status for a failed or empty load, if there is one to show.
pub fn status_line(state: &CatalogState) -> Option<String> {
    if let Some(error) = &state.error_message {
        return Some(error.clone());
    }
    if state.root_categories.is_empty() {
        return Some("No documents found".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::build_from_file_names;
    use crate::core::preview::Heading;
    use crate::core::stats::statistics;
    use std::path::Path;
    use std::sync::Arc;

    #[test]
    fn test_render_tree() {
        let cats = build_from_file_names(&["SwiftUI_Guide.md", "Random_File.md"], Path::new("/r"));
        let text = render_tree(&cats);
        assert_eq!(
            text,
            "SwiftUI 基础 [basics] (1)\n  - SwiftUI 入门指南 (SwiftUI_Guide.md)\n\
             其他文档 [misc] (1)\n  - Random_File (Random_File.md)\n"
        );
    }

    #[test]
    fn test_render_stats() {
        let cats = build_from_file_names(&["a.md", "b.md"], Path::new("/r"));
        let text = render_stats(&statistics(&cats));
        assert!(text.starts_with("categories: 1\ndocuments:  2\n"));
    }

    #[test]
    fn test_render_document_with_outline() {
        let content = DocumentContent {
            raw: "# Top\n## Sub".to_string(),
            outline: vec![
                Heading {
                    level: 1,
                    title: "Top".into(),
                },
                Heading {
                    level: 2,
                    title: "Sub".into(),
                },
            ],
        };
        assert_eq!(
            render_document(&content),
            "Outline:\n  Top\n    Sub\n\n# Top\n## Sub\n"
        );
    }

    #[test]
    fn test_status_line() {
        let mut state = CatalogState::new();
        assert_eq!(status_line(&state).as_deref(), Some("No documents found"));

        state.root_categories = Arc::new(build_from_file_names(&["a.md"], Path::new("/r")));
        assert_eq!(status_line(&state), None);

        state.error_message = Some("Failed to load documents: boom".into());
        assert_eq!(
            status_line(&state).as_deref(),
            Some("Failed to load documents: boom")
        );
    }
}
