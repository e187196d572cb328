//! Stylesheet output.

use std::{
    fs,
    path::{Path, PathBuf},
};

use nodecms_core::{BuildError, Phase};
use tracing::{debug, info};

/// Stylesheet written when no custom source is configured. Covers the
/// class names and custom properties emitted by the built-in components.
pub const DEFAULT_STYLESHEET: &str = r#"*,
*::before,
*::after {
    box-sizing: border-box;
}

body {
    margin: 0;
    font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif;
    line-height: 1.6;
    color: #1f2328;
}

#root {
    max-width: 72rem;
    margin: 0 auto;
    padding: 2rem 1rem;
}

.node-grid {
    display: flex;
    flex-wrap: wrap;
    gap: 1.5rem;
}

.node-grid-column {
    --node-grid-column--count: 12;
    display: grid;
    grid-template-columns: repeat(var(--node-grid-column--count), minmax(0, 1fr));
    gap: 1rem;
    flex: 1 1 0;
}

.node-grid-item {
    --node-grid-item--column-span: 6;
    grid-column: span var(--node-grid-item--column-span);
}

.nodebox {
    padding: 1.5rem;
    border-radius: 0.5rem;
}

.nodebox--default {
    background: #f6f8fa;
}

.nodebox--highlight {
    background: #fff8c5;
}

.node-image img {
    display: block;
    max-width: 100%;
    height: auto;
}

.node-image__caption {
    font-size: 0.875rem;
    color: #59636e;
}

.node-markdown pre {
    overflow-x: auto;
    padding: 1rem;
    border-radius: 0.375rem;
}

.node-error {
    padding: 1rem;
    border: 2px solid #cf222e;
    background: #ffebe9;
    color: #82071e;
    font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
}

.node-error pre {
    white-space: pre-wrap;
}

.overview-items {
    display: grid;
    gap: 1.5rem;
}

.overview-item h2 {
    margin-bottom: 0.25rem;
}

.overview-date {
    font-size: 0.875rem;
    color: #59636e;
}

.overview-empty {
    font-style: italic;
}
"#;

/// Write the site stylesheet to `output_dir/relative`.
///
/// Copies `source` when given, otherwise writes [`DEFAULT_STYLESHEET`].
pub fn write_stylesheet(
    output_dir: &Path,
    relative: &str,
    source: Option<&Path>,
) -> Result<PathBuf, BuildError> {
    let target = output_dir.join(relative.trim_start_matches('/'));
    let origin = source.unwrap_or(target.as_path());

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            BuildError::caused_by(
                Phase::AssetCopying,
                origin,
                format!("Failed to create asset directory {}", parent.display()),
                e,
            )
        })?;
    }

    match source {
        Some(source) => {
            fs::copy(source, &target).map_err(|e| {
                BuildError::caused_by(
                    Phase::AssetCopying,
                    source,
                    format!("Failed to copy stylesheet to {}", target.display()),
                    e,
                )
            })?;
            info!(from = %source.display(), to = %target.display(), "Copied stylesheet");
        }
        None => {
            fs::write(&target, DEFAULT_STYLESHEET).map_err(|e| {
                BuildError::caused_by(
                    Phase::AssetCopying,
                    &target,
                    "Failed to write default stylesheet",
                    e,
                )
            })?;
            debug!(to = %target.display(), "Wrote default stylesheet");
        }
    }

    Ok(target)
}
