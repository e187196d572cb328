//! JSON content loader.

use std::path::Path;

use nodecms_core::{BuildError, Node, NodeExt, Phase};

use crate::Result;

/// Read and parse a JSON content file.
pub fn load_json(path: &Path) -> Result<Node> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        BuildError::caused_by(Phase::JsonParsing, path, "Failed to read JSON file", e)
    })?;
    parse_json(&content, path)
}

/// Parse JSON content. The top level must be an object.
pub fn parse_json(content: &str, path: &Path) -> Result<Node> {
    let node: Node = serde_json::from_str(content).map_err(|e| {
        BuildError::caused_by(Phase::JsonParsing, path, "Failed to parse JSON", e)
    })?;

    if !node.is_object() {
        return Err(BuildError::new(
            Phase::DataValidation,
            path,
            format!(
                "Invalid page data: expected an object, got {}",
                node.kind_name()
            ),
        ));
    }

    Ok(node)
}
