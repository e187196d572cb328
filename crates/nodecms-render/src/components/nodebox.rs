//! `box`: a styled container. `preset` selects a `nodebox--<preset>`
//! modifier class.

use nodecms_core::{Markup, Node, NodeExt, markup::Element};

use super::{class_list, render_children};
use crate::{Result, renderer::RenderContext};

pub(super) fn render(node: &Node, ctx: &RenderContext<'_>) -> Result<Markup> {
    let preset = node
        .attr_str("preset")
        .filter(|p| !p.trim().is_empty())
        .unwrap_or("default");
    let class = format!("{} nodebox--{preset}", class_list("nodebox", node));

    Ok(Element::new("div")
        .class(class)
        .child(render_children(node, ctx))
        .into())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{Registry, render};

    #[test]
    fn test_box_classes() {
        let registry = Registry::with_builtins();

        let html = render(&json!({"type": "box"}), &registry).render_to_string();
        assert_eq!(html, r#"<div class="nodebox nodebox--default"></div>"#);

        let node = json!({"type": "box", "attributes": {"class": "hero", "preset": "dark"}});
        let html = render(&node, &registry).render_to_string();
        assert_eq!(html, r#"<div class="nodebox hero nodebox--dark"></div>"#);
    }

    #[test]
    fn test_box_children() {
        let registry = Registry::with_builtins();
        let node = json!({
            "type": "box",
            "children": [{"type": "box", "attributes": {"preset": "inner"}}]
        });

        let html = render(&node, &registry).render_to_string();
        assert_eq!(
            html,
            r#"<div class="nodebox nodebox--default"><div class="nodebox nodebox--inner"></div></div>"#
        );
    }
}
