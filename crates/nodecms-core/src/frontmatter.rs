//! Frontmatter parsing for Markdown content files.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{CoreError, Result};

/// Frontmatter fields as a JSON object, in document order.
pub type Frontmatter = Map<String, Value>;

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
///
/// The opening delimiter must be the first line and the closing delimiter
/// must sit on a line of its own. Returns `None` when there is no complete
/// frontmatter block.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start_matches('\u{feff}');

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };
    let delimiter = format.delimiter();

    let first_line_end = content.find('\n')?;
    if content[..first_line_end].trim_end() != delimiter {
        return None;
    }
    let rest = &content[first_line_end + 1..];

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == delimiter {
            let frontmatter = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Some((format, frontmatter, body));
        }
        offset += line.len();
    }

    None
}

/// Parse frontmatter from a string.
///
/// Content without frontmatter yields an empty map and the full content as
/// body.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(Frontmatter, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((Frontmatter::new(), content.to_string()));
    };

    if fm_str.trim().is_empty() {
        return Ok((Frontmatter::new(), body.to_string()));
    }

    let frontmatter = match format {
        FrontmatterFormat::Yaml => serde_yaml::from_str::<Option<Frontmatter>>(fm_str)
            .map_err(|e| CoreError::frontmatter(path, e.to_string()))?
            .unwrap_or_default(),
        FrontmatterFormat::Toml => {
            let table: toml::Table =
                toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?;
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect()
        }
    };

    Ok((frontmatter, body.to_string()))
}

/// Convert a TOML value to JSON. Datetimes become their RFC 3339 text.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
