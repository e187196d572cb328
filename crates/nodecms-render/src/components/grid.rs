//! `grid`, `grid-column` and `grid-item`: CSS grid layout.
//!
//! Column count and span are passed to CSS as custom properties.

use nodecms_core::{Markup, Node, NodeExt, markup::Element, node::node};
use serde_json::Value;

use super::{class_list, render_children};
use crate::{Result, renderer::RenderContext};

const DEFAULT_COLUMNS: &str = "12";
const DEFAULT_SPAN: &str = "6";

/// Untyped grid children are treated as `grid-column` nodes. An untyped
/// child with an `attributes` map uses it; otherwise the child object itself
/// is the attribute map.
fn as_column(child: &Value) -> Value {
    if child.node_type().is_some() {
        return child.clone();
    }

    match child {
        Value::Object(map) => match map.get("attributes") {
            Some(attrs @ Value::Object(_)) => node("grid-column", attrs.clone()),
            _ => node("grid-column", Value::Object(map.clone())),
        },
        other => other.clone(),
    }
}

pub(super) fn render_grid(node: &Node, ctx: &RenderContext<'_>) -> Result<Markup> {
    let columns = match node.children() {
        Some(Value::Array(children)) => children
            .iter()
            .map(|child| ctx.render(&as_column(child)))
            .collect(),
        Some(child) => vec![ctx.render(&as_column(child))],
        None => Vec::new(),
    };

    Ok(Element::new("div")
        .class(class_list("node-grid", node))
        .children(columns)
        .into())
}

pub(super) fn render_column(node: &Node, ctx: &RenderContext<'_>) -> Result<Markup> {
    let count = node
        .attr_text("cols")
        .unwrap_or_else(|| DEFAULT_COLUMNS.to_string());

    Ok(Element::new("div")
        .class(class_list("node-grid-column", node))
        .attr("style", format!("--node-grid-column--count: {count}"))
        .child(render_children(node, ctx))
        .into())
}

pub(super) fn render_item(node: &Node, ctx: &RenderContext<'_>) -> Result<Markup> {
    let span = node
        .attr_text("columnSpan")
        .unwrap_or_else(|| DEFAULT_SPAN.to_string());

    Ok(Element::new("div")
        .class(class_list("node-grid-item", node))
        .attr("style", format!("--node-grid-item--column-span: {span}"))
        .child(render_children(node, ctx))
        .into())
}
