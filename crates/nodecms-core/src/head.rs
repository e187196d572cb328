//! Document head collection.
//!
//! Components do not render `<title>`, `<meta>`, `<link>` or `<script>` tags
//! in place.
//! They push them into a [`HeadCollector`] that lives for one page render;
//! the page builder then places the collected tags in the document head.

use std::cell::RefCell;

use thiserror::Error;

use crate::markup::{Element, Markup};

/// Invalid tags found when the head is finished.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeadError {
    /// A `<link>` without a usable `href`.
    #[error("<link rel=\"{rel}\"> is missing an href")]
    LinkWithoutHref { rel: String },

    /// A `<meta>` without content.
    #[error("<meta name=\"{name}\"> is missing content")]
    MetaWithoutContent { name: String },

    /// A `<script>` without a usable `src`.
    #[error("<script> is missing a src")]
    ScriptWithoutSrc,
}

/// A `<meta name=.. content=..>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

/// A `<link rel=.. href=..>` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTag {
    pub rel: String,
    pub href: String,
}

/// Validated head contents for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadTags {
    pub lang: Option<String>,
    pub title: Option<String>,
    pub meta: Vec<MetaTag>,
    pub links: Vec<LinkTag>,
    /// External script sources.
    pub scripts: Vec<String>,
}

impl HeadTags {
    /// Render title, meta, link and script tags in that order.
    pub fn to_markup(&self) -> Markup {
        let mut items = Vec::new();

        if let Some(title) = &self.title {
            items.push(Markup::from(Element::new("title").text(title.as_str())));
        }
        for meta in &self.meta {
            items.push(
                Element::new("meta")
                    .attr("name", meta.name.as_str())
                    .attr("content", meta.content.as_str())
                    .into(),
            );
        }
        for link in &self.links {
            items.push(
                Element::new("link")
                    .attr("rel", link.rel.as_str())
                    .attr("href", link.href.as_str())
                    .into(),
            );
        }
        for src in &self.scripts {
            items.push(Element::new("script").attr("src", src.as_str()).into());
        }

        Markup::Fragment(items)
    }
}

#[derive(Debug, Default)]
struct Pending {
    lang: Option<String>,
    title: Option<String>,
    meta: Vec<(String, Option<String>)>,
    links: Vec<(String, Option<String>)>,
    scripts: Vec<Option<String>>,
}

/// Per-render side channel for head tags.
///
/// Shared by reference with every component of one render, so mutation goes
/// through interior mutability.
#[derive(Debug, Default)]
pub struct HeadCollector {
    pending: RefCell<Pending>,
}

impl HeadCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document language. The last call wins.
    pub fn set_lang(&self, lang: impl Into<String>) {
        self.pending.borrow_mut().lang = Some(lang.into());
    }

    /// Set the document title. The last call wins.
    pub fn set_title(&self, title: impl Into<String>) {
        self.pending.borrow_mut().title = Some(title.into());
    }

    /// Queue a `<meta>` tag.
    pub fn add_meta(&self, name: impl Into<String>, content: Option<String>) {
        self.pending.borrow_mut().meta.push((name.into(), content));
    }

    /// Queue a `<link>` tag. Exact duplicates are dropped.
    pub fn add_link(&self, rel: impl Into<String>, href: Option<String>) {
        let entry = (rel.into(), href);
        let mut pending = self.pending.borrow_mut();
        if !pending.links.contains(&entry) {
            pending.links.push(entry);
        }
    }

    /// Queue an external `<script>`. Exact duplicates are dropped.
    pub fn add_script(&self, src: Option<String>) {
        let mut pending = self.pending.borrow_mut();
        if !pending.scripts.contains(&src) {
            pending.scripts.push(src);
        }
    }

    /// Validate the collected tags and hand them over.
    pub fn finish(self) -> Result<HeadTags, HeadError> {
        let pending = self.pending.into_inner();

        let meta = pending
            .meta
            .into_iter()
            .map(|(name, content)| match content {
                Some(content) => Ok(MetaTag { name, content }),
                None => Err(HeadError::MetaWithoutContent { name }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let links = pending
            .links
            .into_iter()
            .map(|(rel, href)| match href {
                Some(href) if !href.trim().is_empty() => Ok(LinkTag { rel, href }),
                _ => Err(HeadError::LinkWithoutHref { rel }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let scripts = pending
            .scripts
            .into_iter()
            .map(|src| match src {
                Some(src) if !src.trim().is_empty() => Ok(src),
                _ => Err(HeadError::ScriptWithoutSrc),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(HeadTags {
            lang: pending.lang,
            title: pending.title,
            meta,
            links,
            scripts,
        })
    }
}
