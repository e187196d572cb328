//! Component registry.

use std::{collections::BTreeMap, fmt, sync::Arc};

use nodecms_core::{Markup, Node};
use tracing::{debug, warn};

use crate::{Result, components, markdown::MarkdownRenderer, renderer::RenderContext};

/// Signature shared by every component render function.
pub type RenderFn = dyn Fn(&Node, &RenderContext<'_>) -> Result<Markup> + Send + Sync;

/// A registration record: a type tag and, optionally, its render function.
///
/// A record without a render function is *declared*: the type is known (for
/// example because the configuration lists it) but nothing can render it.
#[derive(Clone)]
pub struct Component {
    type_name: String,
    render: Option<Arc<RenderFn>>,
}

impl Component {
    /// Create a component from a render function.
    pub fn new<F>(type_name: impl Into<String>, render: F) -> Self
    where
        F: Fn(&Node, &RenderContext<'_>) -> Result<Markup> + Send + Sync + 'static,
    {
        let render: Arc<RenderFn> = Arc::new(render);
        Self {
            type_name: type_name.into(),
            render: Some(render),
        }
    }

    /// Declare a type without a render function.
    pub fn declared(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            render: None,
        }
    }

    /// The type tag this component handles.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The render function, if the component has one.
    pub fn render_fn(&self) -> Option<&RenderFn> {
        self.render.as_deref()
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("type_name", &self.type_name)
            .field("callable", &self.render.is_some())
            .finish()
    }
}

/// Mapping from `type` tag to component.
///
/// Built once before a build and only read while rendering. Types are kept
/// sorted so listings are deterministic.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    components: BTreeMap<String, Component>,
    markdown: MarkdownRenderer,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in component.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_all(components::builtins());
        registry
    }

    /// Create a registry from a list of component names.
    ///
    /// Known names register the matching built-in. Unknown names are declared
    /// without a render function. An empty list registers every built-in.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        if names.is_empty() {
            return Self::with_builtins();
        }

        let mut registry = Self::new();
        for name in names {
            let name = name.as_ref();
            match components::builtin(name) {
                Some(component) => registry.register(component),
                None => {
                    warn!(component = name, "No built-in component with this name, declaring it");
                    registry.register(Component::declared(name));
                }
            }
        }
        registry
    }

    /// Use a different syntax theme for Markdown code blocks.
    pub fn with_syntax_theme(mut self, theme: &str) -> Self {
        self.markdown = MarkdownRenderer::with_theme(theme);
        self
    }

    /// Register a component. Empty type names are rejected with a warning;
    /// an existing registration for the same type is replaced.
    pub fn register(&mut self, component: Component) {
        if component.type_name.is_empty() {
            warn!("Attempted to register a component without a type");
            return;
        }

        let type_name = component.type_name.clone();
        if self.components.insert(type_name.clone(), component).is_some() {
            warn!(component = %type_name, "Component type is already registered, overriding");
        } else {
            debug!(component = %type_name, "Registered component");
        }
    }

    /// Register components in order; later entries win on collision.
    pub fn register_all(&mut self, components: impl IntoIterator<Item = Component>) {
        for component in components {
            self.register(component);
        }
    }

    /// Look up the component for a type tag.
    pub fn lookup(&self, type_name: &str) -> Option<&Component> {
        self.components.get(type_name)
    }

    /// Whether a type tag is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.components.contains_key(type_name)
    }

    /// Registered type tags in sorted order.
    pub fn types(&self) -> Vec<&str> {
        self.components.keys().map(String::as_str).collect()
    }

    /// Number of registered components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Markdown renderer shared by components.
    pub fn markdown(&self) -> &MarkdownRenderer {
        &self.markdown
    }
}
