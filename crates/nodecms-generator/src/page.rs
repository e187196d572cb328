//! Single page builds.
//!
//! A page build loads one content file, renders it and writes the HTML
//! document to a path mirroring the source layout. Every failure is reported
//! as a [`BuildError`] tagged with the step that failed.

use std::{
    any::Any,
    fs,
    panic::{self, AssertUnwindSafe},
    path::{Path, PathBuf},
    sync::Arc,
};

use nodecms_core::{BuildError, HeadCollector, Node, NodeExt, Phase};
use nodecms_parser::load_content;
use nodecms_render::{Registry, render_with_head};
use tracing::{debug, info};

use crate::template::{Template, TemplateContext};

/// Result type for page builds.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Script injected into pages served by the development server.
pub const LIVERELOAD_SCRIPT: &str = r#"<script>
(function() {
    const source = new EventSource('/__livereload');
    source.onmessage = function(event) {
        if (event.data === 'reload') {
            window.location.reload();
        } else if (event.data === 'css-reload') {
            document.querySelectorAll('link[rel="stylesheet"]').forEach(function(link) {
                const href = link.href.split('?')[0];
                link.href = href + '?v=' + Date.now();
            });
        }
    };
    source.onerror = function() {
        console.log('[livereload] Connection lost, retrying...');
    };
})();
</script>"#;

/// Where a content file comes from and where its HTML goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSource {
    /// File name without extension.
    pub filename: String,
    /// Mirrored output path with an `.html` extension.
    pub output_path: PathBuf,
    /// Extension of the source file, without the dot.
    pub source_extension: String,
}

impl PageSource {
    /// Derive the descriptor for `source` below `base_dir`.
    ///
    /// Sources outside `base_dir` land directly in the output root.
    pub fn new(source: &Path, base_dir: &Path, output_dir: &Path) -> Self {
        let filename = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let source_extension = source
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();

        let relative_dir = relative_to(source, base_dir)
            .and_then(|rel| rel.parent().map(Path::to_path_buf))
            .unwrap_or_default();

        let output_path = output_dir
            .join(relative_dir)
            .join(format!("{filename}.html"));

        Self {
            filename,
            output_path,
            source_extension,
        }
    }
}

/// `source` relative to `base_dir`, retrying with canonical paths so that
/// absolute watcher paths match a relative content root.
pub(crate) fn relative_to(source: &Path, base_dir: &Path) -> Option<PathBuf> {
    if let Ok(rel) = source.strip_prefix(base_dir) {
        return Some(rel.to_path_buf());
    }

    let source = source.canonicalize().ok()?;
    let base_dir = base_dir.canonicalize().ok()?;
    source
        .strip_prefix(&base_dir)
        .ok()
        .map(Path::to_path_buf)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Builds pages from content files.
#[derive(Debug, Clone)]
pub struct PageBuilder {
    registry: Arc<Registry>,
    base_dir: PathBuf,
    output_dir: PathBuf,
    stylesheet_href: String,
    live_reload: bool,
}

impl PageBuilder {
    /// Create a page builder.
    #[must_use]
    pub fn new(
        registry: Arc<Registry>,
        base_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry,
            base_dir: base_dir.into(),
            output_dir: output_dir.into(),
            stylesheet_href: "/assets/styles.css".to_string(),
            live_reload: false,
        }
    }

    /// Set the stylesheet URL linked from every page.
    #[must_use]
    pub fn with_stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheet_href = href.into();
        self
    }

    /// Write pages below another output root.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Inject the live reload script into every page.
    #[must_use]
    pub fn with_live_reload(mut self, enabled: bool) -> Self {
        self.live_reload = enabled;
        self
    }

    /// The registry pages are rendered with.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Output root.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Descriptor for a source file.
    pub fn source(&self, path: &Path) -> PageSource {
        PageSource::new(path, &self.base_dir, &self.output_dir)
    }

    /// Build one content file and return the written output path.
    ///
    /// A panic outside the render step is reported as a `Page Processing`
    /// error.
    pub fn build(&self, path: &Path) -> Result<PathBuf> {
        panic::catch_unwind(AssertUnwindSafe(|| self.build_file(path))).unwrap_or_else(|payload| {
            Err(BuildError::new(
                Phase::PageProcessing,
                path,
                format!("Unexpected failure: {}", panic_message(payload.as_ref())),
            ))
        })
    }

    fn build_file(&self, path: &Path) -> Result<PathBuf> {
        let node = load_content(path)?;
        let source = self.source(path);
        self.write_page(&node, path, &source.output_path)
    }

    /// Build a page from an in-memory node, written to `output_path`.
    /// `origin` names the content the node was derived from in errors.
    pub fn build_node(&self, node: &Node, origin: &Path, output_path: &Path) -> Result<PathBuf> {
        panic::catch_unwind(AssertUnwindSafe(|| {
            self.write_page(node, origin, output_path)
        }))
        .unwrap_or_else(|payload| {
            Err(BuildError::new(
                Phase::PageProcessing,
                origin,
                format!("Unexpected failure: {}", panic_message(payload.as_ref())),
            ))
        })
    }

    fn write_page(&self, node: &Node, origin: &Path, output_path: &Path) -> Result<PathBuf> {
        if !node.is_object() {
            return Err(BuildError::new(
                Phase::DataValidation,
                origin,
                format!(
                    "Invalid page data: expected an object, got {}",
                    node.kind_name()
                ),
            ));
        }

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                BuildError::caused_by(
                    Phase::DirectoryCreation,
                    origin,
                    format!("Failed to create output directory {}", parent.display()),
                    e,
                )
            })?;
        }

        let html = self.render_document(node, origin)?;

        fs::write(output_path, html).map_err(|e| {
            BuildError::caused_by(
                Phase::FileWriting,
                origin,
                format!("Failed to write {}", output_path.display()),
                e,
            )
        })?;

        info!(
            source = %origin.display(),
            output = %output_path.display(),
            "Generated page"
        );
        Ok(output_path.to_path_buf())
    }

    /// Render a node into a complete HTML document without writing it.
    pub fn render_document(&self, node: &Node, origin: &Path) -> Result<String> {
        let head = HeadCollector::new();

        let body = panic::catch_unwind(AssertUnwindSafe(|| {
            render_with_head(node, &self.registry, &head)
        }))
        .map_err(|payload| {
            BuildError::new(
                Phase::SsrRendering,
                origin,
                format!("Rendering panicked: {}", panic_message(payload.as_ref())),
            )
        })?;

        let head = head.finish().map_err(|e| {
            BuildError::caused_by(
                Phase::HeadMetadataProcessing,
                origin,
                "Invalid document head",
                e,
            )
        })?;

        let lang = head.lang.as_deref().unwrap_or("en");
        let mut context = TemplateContext::new()
            .with_var("lang", html_escape::encode_double_quoted_attribute(lang))
            .with_var("head", head.to_markup().render_to_string())
            .with_var(
                "stylesheet",
                html_escape::encode_double_quoted_attribute(&self.stylesheet_href),
            )
            .with_var("body", body.render_to_string());
        if self.live_reload {
            context.insert("scripts", LIVERELOAD_SCRIPT);
        }

        let html = Template::document().render(&context).map_err(|e| {
            BuildError::caused_by(
                Phase::HtmlGeneration,
                origin,
                "Failed to assemble HTML document",
                e,
            )
        })?;

        debug!(source = %origin.display(), bytes = html.len(), "Rendered document");
        Ok(html)
    }
}
