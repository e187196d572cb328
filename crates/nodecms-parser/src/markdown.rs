//! Markdown content loader.
//!
//! A Markdown file becomes a `page` node whose only child is a `markdown`
//! node holding the body. Frontmatter keys become page attributes; missing
//! `title`, `path`, `date`, `lang` and `draft` get derived defaults.

use std::{path::Path, time::SystemTime};

use chrono::{DateTime, Utc};
use nodecms_core::{BuildError, Node, Phase, frontmatter::parse_frontmatter, node::node};
use serde_json::{Value, json};
use tracing::debug;

use crate::Result;

/// Read a Markdown file and synthesize its page node.
pub fn load_markdown(path: &Path) -> Result<Node> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        BuildError::caused_by(
            Phase::MarkdownConversion,
            path,
            "Failed to read Markdown file",
            e,
        )
    })?;

    let modified = std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .map_err(|e| {
            BuildError::caused_by(
                Phase::MarkdownConversion,
                path,
                "Failed to read file modification time",
                e,
            )
        })?;

    markdown_to_node(&content, path, modified)
}

/// Build the page node for Markdown `content` read from `path`.
pub fn markdown_to_node(content: &str, path: &Path, modified: SystemTime) -> Result<Node> {
    let (mut attributes, body) = parse_frontmatter(content, path).map_err(|e| {
        BuildError::caused_by(
            Phase::MarkdownConversion,
            path,
            "Failed to parse frontmatter",
            e,
        )
    })?;

    let filename = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let mut set_default = |key: &str, value: Value| {
        let absent = match attributes.get(key) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        };
        if absent {
            attributes.insert(key.to_string(), value);
        }
    };

    set_default("title", Value::String(title_from_filename(filename)));
    set_default("path", Value::String(format!("/{filename}/")));
    set_default(
        "date",
        Value::String(DateTime::<Utc>::from(modified).timestamp_millis().to_string()),
    );
    set_default("lang", Value::String("en".to_string()));
    set_default("draft", Value::Bool(false));

    attributes.insert(
        "content".to_string(),
        json!([node("markdown", json!({ "content": body.trim() }))]),
    );

    debug!(path = %path.display(), "Converted Markdown to page node");
    Ok(node("page", Value::Object(attributes)))
}

/// Derive a title from a file stem: hyphens become spaces and each word is
/// capitalized (`my-page` becomes `My Page`).
pub fn title_from_filename(stem: &str) -> String {
    stem.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, UNIX_EPOCH};

    use nodecms_core::NodeExt;

    use super::*;

    #[test]
    fn test_title_from_filename() {
        assert_eq!(title_from_filename("my-page"), "My Page");
        assert_eq!(title_from_filename("about"), "About");
        assert_eq!(title_from_filename("hello-wORLD"), "Hello WORLD");
        assert_eq!(title_from_filename("über-uns"), "Über Uns");
    }

    #[test]
    fn test_defaults_without_frontmatter() {
        let modified = UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);
        let node = markdown_to_node("# Hi\n\nBody\n\n", Path::new("pages/my-page.md"), modified)
            .expect("convert");

        assert_eq!(node.node_type(), Some("page"));
        assert_eq!(node.attr_str("title"), Some("My Page"));
        assert_eq!(node.attr_str("path"), Some("/my-page/"));
        assert_eq!(node.attr_str("lang"), Some("en"));
        assert_eq!(node.attr_str("date"), Some("1700000000123"));
        assert_eq!(node.attr("draft"), Some(&Value::Bool(false)));

        let children = node.children().and_then(Value::as_array).expect("children");
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].node_type(), Some("markdown"));
        assert_eq!(children[0].attr_str("content"), Some("# Hi\n\nBody"));
    }

    #[test]
    fn test_frontmatter_overrides_defaults() {
        let content = "---\ntitle: Custom\nlang: de\ndraft: true\ndate: \"2024-01-14\"\nclass: wide\n---\nText";
        let node = markdown_to_node(content, Path::new("post.md"), UNIX_EPOCH).expect("convert");

        assert_eq!(node.attr_str("title"), Some("Custom"));
        assert_eq!(node.attr_str("lang"), Some("de"));
        assert!(node.attr_bool("draft"));
        assert_eq!(node.attr_str("date"), Some("2024-01-14"));
        assert_eq!(node.attr_str("class"), Some("wide"));
        assert_eq!(node.attr_str("path"), Some("/post/"));
    }

    #[test]
    fn test_bad_frontmatter() {
        let err = markdown_to_node("---\ntitle: [oops\n---\n", Path::new("bad.md"), UNIX_EPOCH)
            .unwrap_err();
        assert_eq!(err.phase(), Phase::MarkdownConversion);
        assert!(err.cause().is_some());
    }

    #[test]
    fn test_load_markdown_uses_mtime() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("my-page.md");
        std::fs::write(&path, "Hello").expect("write");

        let expected = std::fs::metadata(&path)
            .and_then(|m| m.modified())
            .map(|t| DateTime::<Utc>::from(t).timestamp_millis().to_string())
            .expect("mtime");

        let node = load_markdown(&path).expect("load");
        assert_eq!(node.attr_str("title"), Some("My Page"));
        assert_eq!(node.attr_str("date"), Some(expected.as_str()));
    }

    #[test]
    fn test_missing_file() {
        let err = load_markdown(Path::new("/nonexistent/a.md")).unwrap_err();
        assert_eq!(err.phase(), Phase::MarkdownConversion);
    }
}
