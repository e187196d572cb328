//! Markup tree and HTML serialization.

use std::fmt;

/// Elements that never carry children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A rendered fragment of HTML.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Markup {
    /// Renders nothing.
    #[default]
    Empty,
    /// Text content, escaped on output.
    Text(String),
    /// Pre-rendered HTML, emitted verbatim.
    Raw(String),
    /// An element with attributes and children.
    Element(Element),
    /// A sequence of siblings.
    Fragment(Vec<Markup>),
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Markup>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute. Attributes keep insertion order.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Shorthand for the `class` attribute.
    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    /// Append one child.
    pub fn child(mut self, child: impl Into<Markup>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    pub fn children<I, M>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Markup>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Append an escaped text child.
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Markup::Text(text.into()))
    }

    fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            html_escape::encode_double_quoted_attribute_to_string(value, out);
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            child.write_to(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

impl Markup {
    /// Escaped text.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Verbatim HTML.
    pub fn raw(html: impl Into<String>) -> Self {
        Self::Raw(html.into())
    }

    /// A fragment of siblings.
    pub fn fragment<I, M>(items: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<Markup>,
    {
        Self::Fragment(items.into_iter().map(Into::into).collect())
    }

    /// Serialize to an HTML string.
    pub fn render_to_string(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Self::Empty => {}
            Self::Text(text) => {
                html_escape::encode_text_to_string(text, out);
            }
            Self::Raw(html) => out.push_str(html),
            Self::Element(el) => el.write_to(out),
            Self::Fragment(items) => {
                for item in items {
                    item.write_to(out);
                }
            }
        }
    }
}

impl From<Element> for Markup {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

impl From<Vec<Markup>> for Markup {
    fn from(items: Vec<Markup>) -> Self {
        Self::Fragment(items)
    }
}

impl From<&str> for Markup {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Markup {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_to_string())
    }
}
