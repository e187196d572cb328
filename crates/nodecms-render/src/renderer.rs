//! Type-dispatching node renderer.
//!
//! The dispatcher never fails: a node it cannot render becomes an inline
//! error fragment marked with [`ERROR_CLASS`], so one bad node never takes
//! the rest of the page down with it.

use nodecms_core::{HeadCollector, Markup, Node, NodeExt, markup::Element};
use serde_json::Value;
use tracing::warn;

use crate::registry::Registry;

/// CSS class carried by every inline error fragment.
pub const ERROR_CLASS: &str = "node-error";

/// What a component sees besides its own node.
pub struct RenderContext<'a> {
    registry: &'a Registry,
    head: &'a HeadCollector,
}

impl<'a> RenderContext<'a> {
    /// Create a context bound to a registry and head collector.
    pub fn new(registry: &'a Registry, head: &'a HeadCollector) -> Self {
        Self { registry, head }
    }

    /// Render a child node (or array of nodes) with the same registry and
    /// head collector.
    pub fn render(&self, node: &Node) -> Markup {
        dispatch(node, self)
    }

    /// The registry in use.
    pub fn registry(&self) -> &Registry {
        self.registry
    }

    /// Head collector for the page being rendered.
    pub fn head(&self) -> &HeadCollector {
        self.head
    }

    /// Convert Markdown source to raw HTML markup.
    pub fn markdown(&self, source: &str) -> Markup {
        Markup::Raw(self.registry.markdown().render(source))
    }
}

/// Render a node tree, discarding head tags.
pub fn render(node: &Node, registry: &Registry) -> Markup {
    let head = HeadCollector::new();
    render_with_head(node, registry, &head)
}

/// Render a node tree, collecting head tags into `head`.
pub fn render_with_head(node: &Node, registry: &Registry, head: &HeadCollector) -> Markup {
    dispatch(node, &RenderContext::new(registry, head))
}

fn dispatch(node: &Node, ctx: &RenderContext<'_>) -> Markup {
    match node {
        Value::Null => return Markup::Empty,
        Value::Array(items) => {
            return Markup::Fragment(items.iter().map(|item| dispatch(item, ctx)).collect());
        }
        _ => {}
    }

    let Some(node_type) = node.node_type() else {
        warn!(kind = node.kind_name(), "Content node has no type");
        return error_fragment(
            vec![Markup::text("!!! ERROR Content node has no 'type'.")],
            node,
        );
    };

    let Some(component) = ctx.registry.lookup(node_type) else {
        let available = ctx.registry.types().join(", ");
        warn!(node_type, %available, "Component type is not registered");
        return error_fragment(
            vec![
                Markup::text(format!(
                    "!!! ERROR Component for type '{node_type}' is not registered."
                )),
                Markup::text(format!("Available types: {available}")),
                Markup::text("Data:"),
            ],
            node,
        );
    };

    let Some(render_fn) = component.render_fn() else {
        warn!(node_type, "Component is declared but has no render function");
        return error_fragment(
            vec![Markup::text(format!(
                "!!! ERROR Component for type '{node_type}' is not a function."
            ))],
            node,
        );
    };

    match render_fn(node, ctx) {
        Ok(markup) => markup,
        Err(err) => {
            warn!(node_type, error = %err, "Component failed to render node");
            error_fragment(
                vec![Markup::text(format!(
                    "!!! ERROR Component for type '{node_type}' failed: {err}"
                ))],
                node,
            )
        }
    }
}

fn error_fragment(lines: Vec<Markup>, node: &Node) -> Markup {
    let dump = serde_json::to_string_pretty(node).unwrap_or_else(|_| node.to_string());

    Element::new("div")
        .class(ERROR_CLASS)
        .children(lines.into_iter().map(|line| Element::new("p").child(line)))
        .child(Element::new("pre").text(dump))
        .into()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{RenderError, registry::Component};

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register(Component::new("echo", |node: &Node, _: &RenderContext<'_>| {
            Ok(Element::new("span")
                .text(node.attr_str("text").unwrap_or_default())
                .into())
        }));
        registry.register(Component::new("wrap", |node: &Node, ctx: &RenderContext<'_>| {
            let children = node.children().map(|c| ctx.render(c)).unwrap_or_default();
            Ok(Element::new("section").child(children).into())
        }));
        registry.register(Component::new("strict", |_: &Node, _: &RenderContext<'_>| {
            Err(RenderError::missing("strict", "value"))
        }));
        registry.register(Component::declared("ghost"));
        registry
    }

    fn html(node: &Node) -> String {
        render(node, &registry()).render_to_string()
    }

    #[test]
    fn test_null_renders_nothing() {
        assert_eq!(render(&Value::Null, &registry()), Markup::Empty);
    }

    #[test]
    fn test_registered_type() {
        let out = html(&json!({"type": "echo", "attributes": {"text": "hi"}}));
        assert_eq!(out, "<span>hi</span>");
        assert!(!out.contains(ERROR_CLASS));
    }

    #[test]
    fn test_nested_children() {
        let out = html(&json!({
            "type": "wrap",
            "attributes": {"content": [
                {"type": "echo", "attributes": {"text": "a"}},
                {"type": "wrap", "attributes": {"content": {"type": "echo", "attributes": {"text": "b"}}}}
            ]}
        }));
        assert_eq!(out, "<section><span>a</span><section><span>b</span></section></section>");
    }

    #[test]
    fn test_unregistered_type() {
        let out = html(&json!({"type": "video", "attributes": {}}));

        assert!(out.contains(ERROR_CLASS));
        assert!(out.contains("Component for type 'video' is not registered."));
        assert!(out.contains("Available types: echo, ghost, strict, wrap"));
        assert!(out.contains(r#""type": "video""#));
    }

    #[test]
    fn test_missing_type() {
        let out = html(&json!({"attributes": {"text": "orphan"}}));
        assert!(out.contains(ERROR_CLASS));
        assert!(out.contains("has no"));
    }

    #[test]
    fn test_declared_type_is_not_callable() {
        let out = html(&json!({"type": "ghost"}));
        assert!(out.contains(ERROR_CLASS));
        assert!(out.contains("is not a function."));
    }

    #[test]
    fn test_component_error_is_inline() {
        let out = html(&json!({"type": "strict"}));
        assert!(out.contains(ERROR_CLASS));
        assert!(out.contains("requires the"));
    }

    #[test]
    fn test_one_bad_node_in_sequence() {
        let nodes = json!([
            {"type": "echo", "attributes": {"text": "1"}},
            {"type": "echo", "attributes": {"text": "2"}},
            {"type": "nope"},
            {"type": "echo", "attributes": {"text": "4"}},
        ]);

        let Markup::Fragment(items) = render(&nodes, &registry()) else {
            panic!("array should render to a fragment");
        };
        assert_eq!(items.len(), 4);

        let errors = items
            .iter()
            .filter(|m| m.render_to_string().contains(ERROR_CLASS))
            .count();
        assert_eq!(errors, 1);
        assert_eq!(items[3].render_to_string(), "<span>4</span>");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let node: Node = serde_json::from_str(
            r#"{"type": "wrap", "children": [{"type": "echo", "attributes": {"text": "x"}}, {"type": "missing"}]}"#,
        )
        .expect("parse");

        assert_eq!(html(&node), html(&node));
    }

    #[test]
    fn test_head_is_shared_with_components() {
        let mut registry = Registry::new();
        registry.register(Component::new("titled", |node: &Node, ctx: &RenderContext<'_>| {
            if let Some(title) = node.attr_str("title") {
                ctx.head().set_title(title);
            }
            Ok(Markup::Empty)
        }));

        let head = HeadCollector::new();
        render_with_head(
            &json!([{"type": "titled", "attributes": {"title": "Hello"}}]),
            &registry,
            &head,
        );

        let tags = head.finish().expect("finish");
        assert_eq!(tags.title.as_deref(), Some("Hello"));
    }
}
