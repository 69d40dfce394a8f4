//! Serialization module for writing Swagger documents as JSON or YAML.
//!
//! These functions accept any serializable document, so they work for both the resource
//! listing and per-resource API declarations.

use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serializes a document to YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
///
/// # Example
///
/// ```
/// use route_swagger::config::DocsConfig;
/// use route_swagger::document::DocumentAssembler;
/// use route_swagger::markdown::CommonMarkRenderer;
/// use route_swagger::registry::ResourceRegistry;
/// use route_swagger::serializer::serialize_yaml;
///
/// let config = DocsConfig::default();
/// let doc = DocumentAssembler::new(&config, &CommonMarkRenderer)
///     .index_document(&ResourceRegistry::default(), "http://localhost");
/// let yaml = serialize_yaml(&doc).unwrap();
/// assert!(yaml.contains("swaggerVersion"));
/// ```
pub fn serialize_yaml<T: Serialize>(doc: &T) -> Result<String> {
    debug!("Serializing document to YAML");
    serde_yaml::to_string(doc).context("Failed to serialize document to YAML")
}

/// Serializes a document to pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn serialize_json<T: Serialize>(doc: &T) -> Result<String> {
    debug!("Serializing document to JSON");
    serde_json::to_string_pretty(doc).context("Failed to serialize document to JSON")
}

/// Writes string content to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
