//! Document open: raw content plus a heading outline.
//!
//! Rendering is left to the consumer. This only reads the file and walks
//! `pulldown_cmark` events far enough to list the headings, which a browser
//! uses for its table of contents.

use log::debug;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;

use crate::core::catalog::{ContentType, Document};
use crate::core::error::CatalogError;
use crate::core::source::CatalogSource;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// 1 for `#`, up to 6.
    pub level: u8,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentContent {
    pub raw: String,
    pub outline: Vec<Heading>,
}

/// Reads a document through `source`. Plain-text documents get no outline.
pub async fn open_document(
    source: &dyn CatalogSource,
    document: &Document,
) -> Result<DocumentContent, CatalogError> {
    let raw = source.read_to_string(&document.full_path).await?;
    let outline = match document.content_type {
        ContentType::Markdown => outline(&raw),
        ContentType::Text => Vec::new(),
    };
    debug!(
        "Opened {} ({} bytes, {} headings)",
        document.relative_path,
        raw.len(),
        outline.len()
    );
    Ok(DocumentContent { raw, outline })
}

/// Heading titles in document order. Inline markup is flattened to text.
pub fn outline(markdown: &str) -> Vec<Heading> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);

    let mut headings = Vec::new();
    let mut current: Option<Heading> = None;

    for event in Parser::new_ext(markdown, opts) {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                current = Some(Heading {
                    level: level as u8,
                    title: String::new(),
                });
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(mut heading) = current.take() {
                    heading.title = heading.title.trim().to_string();
                    headings.push(heading);
                }
            }
            Event::Text(t) | Event::Code(t) => {
                if let Some(heading) = current.as_mut() {
                    heading.title.push_str(&t);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(heading) = current.as_mut() {
                    heading.title.push(' ');
                }
            }
            _ => {}
        }
    }
    headings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemorySource;
    use chrono::Utc;

    #[test]
    fn test_outline_levels_and_inline_markup() {
        let md = "# SwiftUI 入门\n\nintro\n\n## The `View` protocol\n\ntext\n\n### **Bold** part\n";
        let headings = outline(md);
        assert_eq!(
            headings,
            vec![
                Heading {
                    level: 1,
                    title: "SwiftUI 入门".into(),
                },
                Heading {
                    level: 2,
                    title: "The View protocol".into(),
                },
                Heading {
                    level: 3,
                    title: "Bold part".into(),
                },
            ]
        );
    }

    #[test]
    fn test_outline_ignores_code_blocks() {
        let md = "```\n# not a heading\n```\n\nSetext\n======\n";
        let headings = outline(md);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].title, "Setext");
    }

    #[tokio::test]
    async fn test_open_markdown_document() {
        let source = MemorySource::new().with_content("/res/SwiftUI_Guide.md", "# Hello\n\nbody");
        let doc = Document::new(
            "SwiftUI_Guide.md",
            "SwiftUI_Guide.md",
            "/res/SwiftUI_Guide.md",
            Utc::now(),
        );
        let content = open_document(&source, &doc).await.unwrap();
        assert_eq!(content.raw, "# Hello\n\nbody");
        assert_eq!(content.outline.len(), 1);
    }

    #[tokio::test]
    async fn test_open_text_document_has_no_outline() {
        let source = MemorySource::new().with_content("/res/notes.txt", "# not markdown");
        let doc = Document::new("notes.txt", "notes.txt", "/res/notes.txt", Utc::now());
        let content = open_document(&source, &doc).await.unwrap();
        assert!(content.outline.is_empty());
    }

    #[tokio::test]
    async fn test_open_missing_document_fails() {
        let source = MemorySource::new();
        let doc = Document::new("gone.md", "gone.md", "/res/gone.md", Utc::now());
        let err = open_document(&source, &doc).await.unwrap_err();
        assert!(matches!(err, CatalogError::ContentReadFailed { .. }));
    }
}
