//! Content collections and their overview pages.
//!
//! A collection is a directory below the collections root. Every content
//! file inside it contributes one [`OverviewItem`].

use std::{cmp::Ordering, path::Path};

use nodecms_core::{BuildError, Node, NodeExt, Phase, date::parse_date, node::node};
use nodecms_parser::{ContentKind, load_content};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Summary of one collection entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewItem {
    pub filename: String,
    pub title: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Value>,
    pub draft: bool,
    #[serde(rename = "type")]
    pub kind: String,
}

impl OverviewItem {
    fn from_node(filename: &str, node: &Node) -> Self {
        let title = node
            .attr_text("title")
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| filename.to_string());
        let path = node
            .attr_str("path")
            .filter(|p| !p.is_empty())
            .map_or_else(|| format!("/{filename}/"), str::to_string);

        Self {
            filename: filename.to_string(),
            title,
            path,
            date: node.attr("date").cloned(),
            draft: node.attr_bool("draft"),
            kind: node.node_type().unwrap_or("page").to_string(),
        }
    }
}

/// Gather the items of collection `name` below `root`, sorted.
///
/// Returns `Ok(None)` when the collection directory does not exist.
pub fn collect_items(root: &Path, name: &str) -> Result<Option<Vec<OverviewItem>>, BuildError> {
    let dir = root.join(name);
    if !dir.is_dir() {
        debug!(collection = name, dir = %dir.display(), "Collection directory not found");
        return Ok(None);
    }

    let mut items = Vec::new();
    for entry in WalkDir::new(&dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            BuildError::caused_by(
                Phase::FileDiscovery,
                &dir,
                format!("Failed to read collection '{name}'"),
                e,
            )
        })?;
        let path = entry.path();
        if !entry.file_type().is_file() || ContentKind::from_path(path).is_none() {
            continue;
        }

        let filename = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        match load_content(path) {
            Ok(node) => items.push(OverviewItem::from_node(&filename, &node)),
            Err(e) => warn!(
                path = %path.display(),
                error = %e,
                "Skipping unreadable collection item"
            ),
        }
    }

    sort_items(&mut items);
    debug!(collection = name, count = items.len(), "Collected items");
    Ok(Some(items))
}

/// Dated items first, newest first; undated items after, by title.
pub fn sort_items(items: &mut [OverviewItem]) {
    items.sort_by(|a, b| {
        let da = a.date.as_ref().and_then(parse_date);
        let db = b.date.as_ref().and_then(parse_date);
        match (da, db) {
            (Some(da), Some(db)) => db.cmp(&da),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.title.cmp(&b.title),
        }
    });
}

/// The `overview` node listing `items` of collection `name`.
pub fn overview_node(name: &str, items: &[OverviewItem]) -> Node {
    let mut chars = name.chars();
    let title: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    node(
        "overview",
        json!({
            "title": title,
            "description": format!(
                "Welcome to the {name} collection. Here you can find all available {name}."
            ),
            "collection": name,
            "items": items,
        }),
    )
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn item(title: &str, date: Option<Value>) -> OverviewItem {
        OverviewItem {
            filename: title.to_lowercase(),
            title: title.to_string(),
            path: format!("/{}/", title.to_lowercase()),
            date,
            draft: false,
            kind: "page".to_string(),
        }
    }

    #[test]
    fn test_sort_dated_first_then_title() {
        let mut items = vec![
            item("B", Some(json!(200))),
            item("A", None),
            item("C", Some(json!(100))),
        ];
        sort_items(&mut items);

        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["B", "C", "A"]);
    }

    #[test]
    fn test_sort_mixed_date_formats() {
        let mut items = vec![
            item("Old", Some(json!("2020-01-01"))),
            item("Junk", Some(json!("not a date"))),
            item("New", Some(json!("2024-03-01T10:00:00Z"))),
            item("Mid", Some(json!("1609459200000"))),
        ];
        sort_items(&mut items);

        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["New", "Mid", "Old", "Junk"]);
    }

    #[test]
    fn test_missing_collection() {
        let root = TempDir::new().expect("root");
        assert_eq!(collect_items(root.path(), "blog").expect("collect"), None);
    }

    #[test]
    fn test_collect_items() {
        let root = TempDir::new().expect("root");
        let blog = root.path().join("blog");
        fs::create_dir_all(&blog).expect("mkdir");
        fs::write(
            blog.join("first.json"),
            r#"{"type": "page", "attributes": {"title": "First", "date": "2024-01-01"}}"#,
        )
        .expect("write");
        fs::write(blog.join("second-post.md"), "---\ndraft: true\n---\nBody").expect("write");
        fs::write(blog.join("plain.json"), r#"{"attributes": {}}"#).expect("write");
        fs::write(blog.join("broken.json"), "{").expect("write");
        fs::write(blog.join("notes.txt"), "ignored").expect("write");

        let items = collect_items(root.path(), "blog")
            .expect("collect")
            .expect("exists");
        assert_eq!(items.len(), 3);

        let first = items.iter().find(|i| i.filename == "first").expect("first");
        assert_eq!(first.title, "First");
        assert_eq!(first.path, "/first/");

        let second = items.iter().find(|i| i.filename == "second-post").expect("second");
        assert_eq!(second.title, "Second Post");
        assert!(second.draft);

        let plain = items.iter().find(|i| i.filename == "plain").expect("plain");
        assert_eq!(plain.title, "plain");
        assert_eq!(plain.kind, "page");
        assert_eq!(plain.date, None);
        // Undated items sort last.
        assert_eq!(items.last().map(|i| i.filename.as_str()), Some("plain"));
    }

    #[test]
    fn test_overview_node() {
        let node = overview_node("blog", &[item("Hello", Some(json!(1)))]);

        assert_eq!(node.node_type(), Some("overview"));
        assert_eq!(node.attr_str("title"), Some("Blog"));
        assert_eq!(node.attr_str("collection"), Some("blog"));
        assert_eq!(
            node.attr_str("description"),
            Some("Welcome to the blog collection. Here you can find all available blog.")
        );
        let items = node.attr("items").and_then(Value::as_array).expect("items");
        assert_eq!(items[0]["type"], "page");
        assert_eq!(items[0]["filename"], "hello");
    }
}
