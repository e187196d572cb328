//! `text`: a short run of Markdown-formatted prose.
//!
//! The text comes from `body`, or from a `content` list of strings and
//! `{value}` entries joined with blank lines.

use nodecms_core::{Markup, Node, NodeExt, markup::Element};
use serde_json::Value;

use super::class_list;
use crate::{Result, renderer::RenderContext};

pub(super) fn render(node: &Node, ctx: &RenderContext<'_>) -> Result<Markup> {
    let source = match node.attr_str("body") {
        Some(body) => body.to_string(),
        None => node
            .children()
            .and_then(Value::as_array)
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part.as_str().or_else(|| part.get("value")?.as_str()))
                    .collect::<Vec<_>>()
                    .join("\n\n")
            })
            .unwrap_or_default(),
    };

    if source.trim().is_empty() {
        return Ok(Markup::Empty);
    }

    Ok(Element::new("div")
        .class(class_list("node-text", node))
        .child(ctx.markdown(&source))
        .into())
}
