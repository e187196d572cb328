//! nodecms Parser Library
//!
//! Content loaders. Every loader turns one file into a content node and
//! reports failures as phase-tagged [`BuildError`]s.

pub mod json;
pub mod markdown;
pub mod resolve;

use std::path::Path;

pub use json::{load_json, parse_json};
pub use markdown::{load_markdown, markdown_to_node, title_from_filename};
use nodecms_core::{BuildError, Node, Phase};
pub use resolve::resolve_api_path;

/// Result type for loaders.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Kind of content source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// A JSON content tree (.json files).
    Json,
    /// Markdown with optional frontmatter (.md files).
    Markdown,
}

impl ContentKind {
    /// Determine content kind from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "md" | "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }

    /// Determine content kind from a file path.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Load a content file, choosing the loader from the file extension.
pub fn load_content(path: &Path) -> Result<Node> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();

    match ContentKind::from_extension(ext) {
        Some(ContentKind::Json) => load_json(path),
        Some(ContentKind::Markdown) => load_markdown(path),
        None => Err(BuildError::new(
            Phase::FileTypeValidation,
            path,
            if ext.is_empty() {
                "Unsupported file type: file has no extension".to_string()
            } else {
                format!("Unsupported file type: .{ext}")
            },
        )),
    }
}

#[cfg(test)]
mod tests {
    use nodecms_core::NodeExt;

    use super::*;

    #[test]
    fn test_content_kind() {
        assert_eq!(ContentKind::from_extension("JSON"), Some(ContentKind::Json));
        assert_eq!(
            ContentKind::from_extension("markdown"),
            Some(ContentKind::Markdown)
        );
        assert_eq!(ContentKind::from_extension("yaml"), None);
        assert_eq!(
            ContentKind::from_path(Path::new("pages/a.md")),
            Some(ContentKind::Markdown)
        );
    }

    #[test]
    fn test_load_content_dispatch() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let json_path = dir.path().join("a.json");
        let md_path = dir.path().join("b.md");
        std::fs::write(&json_path, r#"{"type": "page"}"#).expect("write");
        std::fs::write(&md_path, "Hello").expect("write");

        assert_eq!(load_content(&json_path).expect("json").node_type(), Some("page"));
        assert_eq!(load_content(&md_path).expect("md").node_type(), Some("page"));
    }

    #[test]
    fn test_load_content_unknown_extension() {
        let err = load_content(Path::new("pages/notes.txt")).unwrap_err();
        assert_eq!(err.phase(), Phase::FileTypeValidation);
        assert!(err.message().contains(".txt"));

        let err = load_content(Path::new("pages/README")).unwrap_err();
        assert_eq!(err.phase(), Phase::FileTypeValidation);
    }
}
