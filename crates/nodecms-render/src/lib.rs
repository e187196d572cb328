//! nodecms Render Library
//!
//! Turns content nodes into markup. A [`Registry`] maps `type` tags to
//! component render functions; the dispatcher in [`renderer`] walks a node
//! tree, looks each node up and invokes the matching component. Nodes that
//! cannot be rendered degrade to inline error markup instead of failing the
//! page.

pub mod components;
pub mod markdown;
pub mod registry;
pub mod renderer;
pub mod syntax;

pub use markdown::MarkdownRenderer;
pub use registry::{Component, Registry, RenderFn};
pub use renderer::{ERROR_CLASS, RenderContext, render, render_with_head};
pub use syntax::SyntaxHighlighter;
use thiserror::Error;

/// Errors a component can report for the node it was given.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A required attribute is absent.
    #[error("'{node_type}' requires the '{attribute}' attribute")]
    MissingAttribute {
        node_type: String,
        attribute: &'static str,
    },

    /// An attribute has the wrong shape.
    #[error("'{node_type}' attribute '{attribute}' must be {expected}")]
    InvalidAttribute {
        node_type: String,
        attribute: &'static str,
        expected: &'static str,
    },

    /// Any other component failure.
    #[error("{0}")]
    Message(String),
}

impl RenderError {
    /// Create a missing attribute error.
    pub fn missing(node_type: impl Into<String>, attribute: &'static str) -> Self {
        Self::MissingAttribute {
            node_type: node_type.into(),
            attribute,
        }
    }

    /// Create an invalid attribute error.
    pub fn invalid(
        node_type: impl Into<String>,
        attribute: &'static str,
        expected: &'static str,
    ) -> Self {
        Self::InvalidAttribute {
            node_type: node_type.into(),
            attribute,
            expected,
        }
    }
}

/// Result type for component render functions.
pub type Result<T> = std::result::Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_messages() {
        let err = RenderError::missing("image", "filename");
        assert_eq!(err.to_string(), "'image' requires the 'filename' attribute");

        let err = RenderError::invalid("grid", "content", "an array of nodes");
        assert_eq!(
            err.to_string(),
            "'grid' attribute 'content' must be an array of nodes"
        );
    }
}
