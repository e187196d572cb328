//! `page`: the root of a document.
//!
//! Attributes: `lang` (default `en`), `title`, `description`,
//! `head.stylesheets` and `head.js` (lists of `{path}` entries), `class`,
//! `content`.

use nodecms_core::{Markup, Node, NodeExt, markup::Element};
use serde_json::Value;

use super::{class_list, render_children};
use crate::{Result, renderer::RenderContext};

pub(super) fn render(node: &Node, ctx: &RenderContext<'_>) -> Result<Markup> {
    let head = ctx.head();

    head.set_lang(node.attr_str("lang").unwrap_or("en"));
    if let Some(title) = node.attr_text("title") {
        head.set_title(title);
    }
    if let Some(description) = node.attr("description") {
        head.add_meta("description", description.as_str().map(str::to_string));
    }

    for stylesheet in head_entries(node, "stylesheets") {
        head.add_link("stylesheet", entry_path(stylesheet, "href"));
    }
    for script in head_entries(node, "js") {
        head.add_script(entry_path(script, "src"));
    }

    Ok(Element::new("div")
        .class(class_list("node-page", node))
        .child(render_children(node, ctx))
        .into())
}

fn head_entries<'a>(node: &'a Node, key: &str) -> impl Iterator<Item = &'a Value> {
    node.attr("head")
        .and_then(|h| h.get(key))
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}

fn entry_path(entry: &Value, alias: &str) -> Option<String> {
    entry
        .get("path")
        .or_else(|| entry.get(alias))
        .and_then(Value::as_str)
        .map(str::to_string)
}
