//! Built-in components.
//!
//! Every component reads its settings from the node's `attributes` map and
//! renders children through [`RenderContext::render`].

mod grid;
mod image;
mod markdown;
mod nodebox;
mod overview;
mod page;
mod text;

use nodecms_core::{Markup, Node, NodeExt};

use crate::{registry::Component, renderer::RenderContext};

/// Every built-in component, in registration order.
pub fn builtins() -> Vec<Component> {
    vec![
        Component::new("page", page::render),
        Component::new("text", text::render),
        Component::new("markdown", markdown::render),
        Component::new("grid", grid::render_grid),
        Component::new("grid-column", grid::render_column),
        Component::new("grid-item", grid::render_item),
        Component::new("box", nodebox::render),
        Component::new("image", image::render),
        Component::new("overview", overview::render),
    ]
}

/// The built-in component registered under `name`.
pub fn builtin(name: &str) -> Option<Component> {
    builtins().into_iter().find(|c| c.type_name() == name)
}

/// Join a base class with the node's optional `class` attribute.
fn class_list(base: &str, node: &Node) -> String {
    match node.attr_str("class").map(str::trim) {
        Some(extra) if !extra.is_empty() => format!("{base} {extra}"),
        _ => base.to_string(),
    }
}

/// Render the node's children, if it has any.
fn render_children(node: &Node, ctx: &RenderContext<'_>) -> Markup {
    node.children()
        .map(|children| ctx.render(children))
        .unwrap_or_default()
}
