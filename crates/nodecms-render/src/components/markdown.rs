//! `markdown`: a full Markdown document body with highlighted code blocks.

use nodecms_core::{Markup, Node, NodeExt, markup::Element};

use super::class_list;
use crate::{RenderError, Result, renderer::RenderContext};

pub(super) fn render(node: &Node, ctx: &RenderContext<'_>) -> Result<Markup> {
    let source = match node.attr("content") {
        Some(content) => content
            .as_str()
            .ok_or_else(|| RenderError::invalid("markdown", "content", "a string"))?,
        None => return Err(RenderError::missing("markdown", "content")),
    };

    Ok(Element::new("div")
        .class(class_list("node-markdown", node))
        .child(ctx.markdown(source))
        .into())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{ERROR_CLASS, Registry, render};

    #[test]
    fn test_markdown() {
        let registry = Registry::with_builtins();
        let node = json!({
            "type": "markdown",
            "attributes": {"content": "# Title\n\n```rust\nlet x = 1;\n```"}
        });

        let html = render(&node, &registry).render_to_string();
        assert!(html.starts_with(r#"<div class="node-markdown">"#));
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<pre"));
    }

    #[test]
    fn test_empty_content_is_allowed() {
        let registry = Registry::with_builtins();
        let html = render(&json!({"type": "markdown", "attributes": {"content": ""}}), &registry)
            .render_to_string();
        assert_eq!(html, r#"<div class="node-markdown"></div>"#);
    }

    #[test]
    fn test_missing_content_is_inline_error() {
        let registry = Registry::with_builtins();
        let html = render(&json!({"type": "markdown"}), &registry).render_to_string();
        assert!(html.contains(ERROR_CLASS));

        let html = render(&json!({"type": "markdown", "attributes": {"content": 5}}), &registry)
            .render_to_string();
        assert!(html.contains("must be a string"));
    }
}
