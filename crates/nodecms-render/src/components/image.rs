//! `image`: a picture from the media store with an optional caption.
//!
//! Images are addressed by content `hash` and `filename`; the store path
//! encodes the processing chain, always ending in a 1500px resize.

use nodecms_core::{Markup, Node, NodeExt, markup::Element};

use super::class_list;
use crate::{RenderError, Result, renderer::RenderContext};

const MEDIA_ROOT: &str = "./assets/media";
const RESIZE: &str = "resize@width:1500;";

/// Media store path for an image.
pub(crate) fn media_path(hash: &str, configuration: Option<&str>, filename: &str) -> String {
    let config = format!("{}{RESIZE}", configuration.unwrap_or_default());
    format!("{MEDIA_ROOT}/{hash}/{config}/{filename}.jpg")
}

pub(super) fn render(node: &Node, ctx: &RenderContext<'_>) -> Result<Markup> {
    let hash = node
        .attr_text("hash")
        .ok_or_else(|| RenderError::missing("image", "hash"))?;
    let filename = node
        .attr_text("filename")
        .ok_or_else(|| RenderError::missing("image", "filename"))?;
    let caption = node.attr_str("caption").filter(|c| !c.trim().is_empty());
    let alt = node
        .attr_str("alt")
        .filter(|a| !a.is_empty())
        .or(caption)
        .unwrap_or("picture");

    let mut figure = Element::new("div").class(class_list("node-image", node)).child(
        Element::new("img")
            .attr("src", media_path(&hash, node.attr_str("configuration"), &filename))
            .attr("alt", alt),
    );

    if let Some(caption) = caption {
        figure = figure.child(
            Element::new("div")
                .class("node-image__caption")
                .child(Element::new("div").class("node-markdown").child(ctx.markdown(caption))),
        );
    }

    Ok(figure.into())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{ERROR_CLASS, Registry, render};

    #[test]
    fn test_media_path() {
        assert_eq!(
            media_path("ab12", None, "cat"),
            "./assets/media/ab12/resize@width:1500;/cat.jpg"
        );
        assert_eq!(
            media_path("ab12", Some("crop@x:10;"), "cat"),
            "./assets/media/ab12/crop@x:10;resize@width:1500;/cat.jpg"
        );
    }

    #[test]
    fn test_image_with_caption() {
        let registry = Registry::with_builtins();
        let node = json!({
            "type": "image",
            "attributes": {"hash": "ab12", "filename": "cat", "caption": "A *cat*"}
        });

        let html = render(&node, &registry).render_to_string();
        assert!(html.starts_with(r#"<div class="node-image"><img src="./assets/media/ab12/resize@width:1500;/cat.jpg" alt="A *cat*">"#));
        assert!(html.contains(r#"<div class="node-image__caption">"#));
        assert!(html.contains("<em>cat</em>"));
    }

    #[test]
    fn test_alt_fallback() {
        let registry = Registry::with_builtins();
        let node = json!({"type": "image", "attributes": {"hash": "h", "filename": "f"}});

        let html = render(&node, &registry).render_to_string();
        assert!(html.contains(r#"alt="picture""#));
        assert!(!html.contains("node-image__caption"));
    }

    #[test]
    fn test_missing_filename() {
        let registry = Registry::with_builtins();
        let node = json!({"type": "image", "attributes": {"hash": "h"}});

        let html = render(&node, &registry).render_to_string();
        assert!(html.contains(ERROR_CLASS));
        assert!(html.contains("filename"));
    }
}
