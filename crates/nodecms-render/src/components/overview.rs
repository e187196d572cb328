//! `overview`: a listing of the items of a collection.
//!
//! Items are `{filename, title, date, draft, excerpt}` records. Drafts are
//! never listed.

use nodecms_core::{Markup, Node, NodeExt, date::parse_date, markup::Element, node::node};
use serde_json::{Value, json};

use crate::{Result, renderer::RenderContext};

fn render_item(item: &Value) -> Markup {
    let filename = item.get("filename").and_then(Value::as_str).unwrap_or_default();
    let title = item
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or(filename);

    let mut article = Element::new("article").class("overview-item").child(
        Element::new("h2").child(
            Element::new("a")
                .attr("href", format!("/{filename}"))
                .text(title),
        ),
    );

    if let Some(date) = item.get("date").and_then(parse_date) {
        article = article.child(
            Element::new("time")
                .class("overview-date")
                .attr("datetime", date.to_rfc3339())
                .text(date.format("%Y-%m-%d").to_string()),
        );
    }

    if let Some(excerpt) = item.get("excerpt").and_then(Value::as_str) {
        article = article.child(Element::new("p").class("overview-excerpt").text(excerpt));
    }

    article.into()
}

pub(super) fn render(node_data: &Node, ctx: &RenderContext<'_>) -> Result<Markup> {
    let collection = node_data.attr_str("collection").unwrap_or_default();
    let title = node_data
        .attr_text("title")
        .unwrap_or_else(|| format!("{collection} Overview"));

    let mut overview = Element::new("div")
        .class("overview")
        .child(Element::new("h1").text(title));

    if let Some(description) = node_data.attr_str("description") {
        let text = node("text", json!({ "body": description }));
        overview = overview.child(
            Element::new("div")
                .class("overview-description")
                .child(ctx.render(&text)),
        );
    }

    let items: Vec<Markup> = node_data
        .attr("items")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|item| !item.get("draft").and_then(Value::as_bool).unwrap_or(false))
        .map(render_item)
        .collect();

    let listing = if items.is_empty() {
        Element::new("div").class("overview-items").child(
            Element::new("p")
                .class("overview-empty")
                .text("No items found in this collection."),
        )
    } else {
        Element::new("div").class("overview-items").children(items)
    };

    Ok(overview.child(listing).into())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Registry, render};

    #[test]
    fn test_overview_lists_items_without_drafts() {
        let registry = Registry::with_builtins();
        let node = json!({
            "type": "overview",
            "attributes": {
                "title": "Blog",
                "description": "All **posts**.",
                "collection": "blog",
                "items": [
                    {"filename": "hello", "title": "Hello", "date": "1705190400000", "excerpt": "First"},
                    {"filename": "wip", "title": "Work in progress", "draft": true},
                    {"filename": "untitled"}
                ]
            }
        });

        let html = render(&node, &registry).render_to_string();
        assert!(html.contains("<h1>Blog</h1>"));
        assert!(html.contains(r#"<div class="overview-description"><div class="node-text">"#));
        assert!(html.contains("<strong>posts</strong>"));
        assert!(html.contains(r#"<a href="/hello">Hello</a>"#));
        assert!(html.contains(r#"<time class="overview-date" datetime="2024-01-14T00:00:00+00:00">2024-01-14</time>"#));
        assert!(html.contains(r#"<p class="overview-excerpt">First</p>"#));
        assert!(html.contains(r#"<a href="/untitled">untitled</a>"#));
        assert!(!html.contains("Work in progress"));
    }

    #[test]
    fn test_empty_overview() {
        let registry = Registry::with_builtins();
        let node = json!({"type": "overview", "attributes": {"collection": "news", "items": []}});

        let html = render(&node, &registry).render_to_string();
        assert!(html.contains("<h1>news Overview</h1>"));
        assert!(html.contains("No items found in this collection."));
    }

    #[test]
    fn test_only_drafts_counts_as_empty() {
        let registry = Registry::with_builtins();
        let node = json!({
            "type": "overview",
            "attributes": {"collection": "x", "items": [{"filename": "a", "draft": true}]}
        });

        let html = render(&node, &registry).render_to_string();
        assert!(html.contains("overview-empty"));
    }
}
