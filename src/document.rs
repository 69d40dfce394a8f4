//! Swagger document assembly.
//!
//! [`DocumentAssembler`] answers the two documentation queries over a registry snapshot:
//! the resource listing ([`IndexDocument`]) and the API declaration of one resource
//! ([`ResourceDocument`]). Both are recomputed on every call.

use crate::config::DocsConfig;
use crate::error::Result;
use crate::markdown::MarkdownRenderer;
use crate::normalizer::{Operation, RouteNormalizer};
use crate::path_template::{rewrite, FORMAT_SUFFIX, FORMAT_TEMPLATE};
use crate::registry::ResourceRegistry;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// Swagger version reported by every document.
pub const SWAGGER_VERSION: &str = "1.1";

/// Resource listing: one stub per resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDocument {
    pub api_version: String,
    pub swagger_version: String,
    pub base_path: String,
    /// Always empty
    pub operations: Vec<Operation>,
    pub apis: Vec<ApiStub>,
}

/// Reference to a resource's API declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStub {
    pub path: String,
}

/// API declaration of one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDocument {
    pub api_version: String,
    pub swagger_version: String,
    pub base_path: String,
    pub resource_path: String,
    /// Empty when the resource is unknown
    pub apis: Vec<ApiDescription>,
}

/// All operations documented for one resolved path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiDescription {
    pub path: String,
    pub operations: Vec<Operation>,
}

/// Builds documents from a registry according to a [`DocsConfig`].
pub struct DocumentAssembler<'a> {
    config: &'a DocsConfig,
    renderer: &'a dyn MarkdownRenderer,
}

impl<'a> DocumentAssembler<'a> {
    /// `renderer` is only consulted when Markdown is enabled in `config`.
    pub fn new(config: &'a DocsConfig, renderer: &'a dyn MarkdownRenderer) -> Self {
        Self { config, renderer }
    }

    /// Builds the resource listing.
    ///
    /// Each resource becomes a stub `<mount path>/<key>` (plus `.{format}` unless hidden).
    /// With `hide_documentation_path` set, the resource holding the endpoint's own routes and
    /// resources living under the mount path are left out.
    pub fn index_document(&self, registry: &ResourceRegistry, base_path: &str) -> IndexDocument {
        let config = self.config;
        let mount = rewrite(
            &config.mount_path.replace(FORMAT_SUFFIX, ""),
            None,
            config.hide_format,
        );
        let docs_prefix = format!("{}/", mount);
        let docs_key = config.docs_resource_key();
        let suffix = if config.hide_format { "" } else { FORMAT_TEMPLATE };

        let is_docs = |key: &str| {
            docs_key.as_deref() == Some(key) || format!("/{}/", key).starts_with(&docs_prefix)
        };

        let apis: Vec<ApiStub> = registry
            .keys()
            .filter(|key| !(config.hide_documentation_path && is_docs(*key)))
            .map(|key| ApiStub {
                path: format!("{}/{}{}", mount, key, suffix),
            })
            .collect();

        debug!("Index document lists {} of {} resources", apis.len(), registry.len());

        IndexDocument {
            api_version: config.api_version.clone(),
            swagger_version: SWAGGER_VERSION.to_string(),
            base_path: base_path.to_string(),
            operations: Vec::new(),
            apis,
        }
    }

    /// Builds the API declaration of the resource named exactly `name`.
    ///
    /// Suppressed routes are skipped. Operations are grouped by resolved path, paths in the
    /// order they are first seen. An unknown resource yields an empty `apis` list.
    ///
    /// # Errors
    ///
    /// Propagates Markdown rendering failures.
    pub fn resource_document(
        &self,
        registry: &ResourceRegistry,
        name: &str,
        base_path: &str,
    ) -> Result<ResourceDocument> {
        let config = self.config;
        let mut normalizer = RouteNormalizer::new().with_object_fields(config.display_object_fields);
        if config.markdown {
            normalizer = normalizer.with_markdown(self.renderer);
        }

        let mut grouped: IndexMap<String, Vec<Operation>> = IndexMap::new();
        for route in registry.routes(name) {
            if let Some(operation) = normalizer.normalize(route)? {
                let path = rewrite(&route.path, Some(&config.api_version), config.hide_format);
                grouped.entry(path).or_default().push(operation);
            }
        }

        debug!("Resource '{}' documents {} paths", name, grouped.len());

        Ok(ResourceDocument {
            api_version: config.api_version.clone(),
            swagger_version: SWAGGER_VERSION.to_string(),
            base_path: base_path.to_string(),
            resource_path: String::new(),
            apis: grouped
                .into_iter()
                .map(|(path, operations)| ApiDescription { path, operations })
                .collect(),
        })
    }
}
