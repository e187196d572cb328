//! Build orchestration.
//!
//! Discovers content files, builds them one by one and collects every
//! failure instead of stopping at the first one.

use std::{
    path::{Component, Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use glob::{MatchOptions, Pattern};
use nodecms_core::{BuildError, Config, Phase};
use nodecms_parser::load_content;
use nodecms_render::Registry;
use tracing::{debug, error, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::{
    assets::write_stylesheet,
    collection::{collect_items, overview_node},
    page::{PageBuilder, relative_to},
};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Outcome of a full build.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Written pages, in build order.
    pub outputs: Vec<PathBuf>,
    /// Written asset files.
    pub assets: Vec<PathBuf>,
    /// Every failure, in the order it happened.
    pub errors: Vec<BuildError>,
    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

impl BuildReport {
    /// Whether the build finished without errors.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Log the outcome and return the outputs, or the first error.
    pub fn into_result(self) -> Result<Vec<PathBuf>, BuildError> {
        let total = self.errors.len();
        let mut errors = self.errors.into_iter();

        let Some(first) = errors.next() else {
            info!(
                pages = self.outputs.len(),
                assets = self.assets.len(),
                duration_ms = self.duration_ms,
                "build complete"
            );
            return Ok(self.outputs);
        };

        error!(count = total, "BUILD FAILED WITH {total} ERROR(S)");
        error!("{}", first.report());
        for err in errors {
            error!("{}", err.report());
        }
        Err(first)
    }
}

fn is_skipped(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || name == "node_modules")
}

fn is_skipped_component(component: Component<'_>) -> bool {
    match component {
        Component::Normal(name) => name
            .to_str()
            .is_some_and(|name| name.starts_with('.') || name == "node_modules"),
        _ => false,
    }
}

/// Site builder.
#[derive(Debug, Clone)]
pub struct Builder {
    config: Config,
    base_dir: PathBuf,
    output_dir: PathBuf,
    pages: PageBuilder,
}

impl Builder {
    /// Create a builder rendering with `registry`.
    #[must_use]
    pub fn new(config: Config, registry: Registry) -> Self {
        let base_dir = config.content_dir();
        let output_dir = config.output_dir();
        let pages = PageBuilder::new(Arc::new(registry), &base_dir, &output_dir)
            .with_stylesheet(config.stylesheet_href());

        Self {
            config,
            base_dir,
            output_dir,
            pages,
        }
    }

    /// Create a builder with the components named in the configuration.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let registry = Registry::from_names(&config.components)
            .with_syntax_theme(&config.build.syntax_theme);
        Self::new(config, registry)
    }

    /// Write output somewhere other than the configured directory.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self.pages = self.pages.with_output_dir(&self.output_dir);
        self
    }

    /// Inject the live reload script into generated pages.
    #[must_use]
    pub fn with_live_reload(mut self, enabled: bool) -> Self {
        self.pages = self.pages.with_live_reload(enabled);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        self.pages.registry()
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn pattern(&self) -> Result<Pattern, BuildError> {
        Pattern::new(&self.config.content.pattern).map_err(|e| {
            BuildError::caused_by(
                Phase::FileDiscovery,
                &self.base_dir,
                format!("Invalid content pattern '{}'", self.config.content.pattern),
                e,
            )
        })
    }

    /// Content files below the base directory matching the configured
    /// pattern, sorted, along with the errors for any subdirectory that
    /// could not be read. Only an unreadable base directory is fatal.
    pub fn discover(&self) -> Result<(Vec<PathBuf>, Vec<BuildError>), BuildError> {
        let pattern = self.pattern()?;
        let mut files = Vec::new();
        let mut errors = Vec::new();

        for entry in WalkDir::new(&self.base_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !is_skipped(e))
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let root = e.depth() == 0;
                    let path = e
                        .path()
                        .map_or_else(|| self.base_dir.clone(), Path::to_path_buf);
                    let err = BuildError::caused_by(
                        Phase::FileDiscovery,
                        path,
                        "Failed to read content directory",
                        e,
                    );
                    if root {
                        return Err(err);
                    }
                    debug!(error = %err, "skipping unreadable entry");
                    errors.push(err);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.base_dir) else {
                continue;
            };
            if pattern.matches_path_with(relative, MATCH_OPTIONS) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        debug!(
            base = %self.base_dir.display(),
            pattern = %self.config.content.pattern,
            count = files.len(),
            skipped = errors.len(),
            "discovered content files"
        );
        Ok((files, errors))
    }

    /// Whether `path` is a content file this builder would build.
    pub fn matches(&self, path: &Path) -> bool {
        let Ok(pattern) = self.pattern() else {
            return false;
        };

        relative_to(path, &self.base_dir).is_some_and(|relative| {
            !relative.components().any(is_skipped_component)
                && pattern.matches_path_with(&relative, MATCH_OPTIONS)
        })
    }

    /// Build a single content file.
    pub fn build_file(&self, path: &Path) -> Result<PathBuf, BuildError> {
        self.pages.build(path)
    }

    /// Render a content file to its HTML document without writing it.
    pub fn render_file(&self, path: &Path) -> Result<String, BuildError> {
        let node = load_content(path)?;
        self.pages.render_document(&node, path)
    }

    /// Write the stylesheet below the output directory.
    pub fn write_assets(&self) -> Result<PathBuf, BuildError> {
        let source = self.config.build.stylesheet_source.as_deref().map(Path::new);
        write_stylesheet(&self.output_dir, &self.config.build.stylesheet, source)
    }

    /// Build the overview page of every configured collection.
    pub fn build_collections(&self) -> (Vec<PathBuf>, Vec<BuildError>) {
        let root = self.config.collections_dir();
        let mut outputs = Vec::new();
        let mut errors = Vec::new();

        for name in &self.config.collections.names {
            let items = match collect_items(&root, name) {
                Ok(Some(items)) => items,
                Ok(None) => {
                    warn!(collection = %name, root = %root.display(), "collection not found");
                    continue;
                }
                Err(e) => {
                    errors.push(e);
                    continue;
                }
            };

            let output = self.output_dir.join(format!("{name}.html"));
            match self
                .pages
                .build_node(&overview_node(name, &items), &root.join(name), &output)
            {
                Ok(path) => outputs.push(path),
                Err(e) => errors.push(e),
            }
        }

        (outputs, errors)
    }

    /// Build every page, the stylesheet and the collection overviews,
    /// collecting all failures.
    pub fn build_report(&self) -> BuildReport {
        let start = Instant::now();
        let mut report = BuildReport::default();

        info!(
            content = %self.base_dir.display(),
            output = %self.output_dir.display(),
            "starting build"
        );

        let files = match self.discover() {
            Ok((files, errors)) => {
                report.errors.extend(errors);
                files
            }
            Err(e) => {
                report.errors.push(e);
                report.duration_ms = start.elapsed().as_millis() as u64;
                return report;
            }
        };

        if files.is_empty() {
            warn!(
                base = %self.base_dir.display(),
                pattern = %self.config.content.pattern,
                "no content files found"
            );
            report.duration_ms = start.elapsed().as_millis() as u64;
            return report;
        }

        info!(count = files.len(), "building pages");
        for file in &files {
            match self.pages.build(file) {
                Ok(output) => report.outputs.push(output),
                Err(e) => {
                    debug!(path = %file.display(), error = %e, "page failed");
                    report.errors.push(e);
                }
            }
        }

        match self.write_assets() {
            Ok(path) => report.assets.push(path),
            Err(e) => report.errors.push(e),
        }

        let (overviews, errors) = self.build_collections();
        report.outputs.extend(overviews);
        report.errors.extend(errors);

        report.duration_ms = start.elapsed().as_millis() as u64;
        report
    }

    /// Build the whole site. Fails with the first error after logging all
    /// of them.
    pub fn build_all(&self) -> Result<Vec<PathBuf>, BuildError> {
        self.build_report().into_result()
    }
}
