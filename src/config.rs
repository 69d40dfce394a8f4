//! Documentation configuration

use crate::endpoint::DocRequest;
use crate::error::{Error, Result};
use crate::path_template::FORMAT_SUFFIX;
use crate::registry::KeyStrategy;
use crate::route::{HttpMethod, RouteDescriptor};
use std::fmt;
use std::sync::Arc;

/// Default path the documentation endpoint is mounted at.
pub const DEFAULT_MOUNT_PATH: &str = "/swagger_doc";

/// Default `apiVersion` of generated documents.
pub const DEFAULT_API_VERSION: &str = "0.1";

/// The `basePath` advertised in documents.
#[derive(Clone)]
pub enum BasePath {
    /// A fixed base path
    Literal(String),
    /// Computed from each request; `None` falls back to the request's base URL
    Dynamic(Arc<dyn Fn(&DocRequest) -> Option<String> + Send + Sync>),
}

impl BasePath {
    /// Wrap a closure computing the base path from the request.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(&DocRequest) -> Option<String> + Send + Sync + 'static,
    {
        BasePath::Dynamic(Arc::new(f))
    }
}

impl fmt::Debug for BasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasePath::Literal(path) => f.debug_tuple("Literal").field(path).finish(),
            BasePath::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

/// Configuration of the documentation endpoint
#[derive(Debug, Clone)]
pub struct DocsConfig {
    /// Path the documentation endpoint is mounted at
    pub mount_path: String,
    /// Advertised base path; the request base URL when unset
    pub base_path: Option<BasePath>,
    /// `apiVersion` of generated documents, also substituted for `{version}`
    pub api_version: String,
    /// Render route notes from Markdown to HTML
    pub markdown: bool,
    /// Leave the documentation endpoint out of its own index
    pub hide_documentation_path: bool,
    /// Drop the `.{format}` suffix from paths
    pub hide_format: bool,
    /// Append response-field documentation to operation notes
    pub display_object_fields: bool,
    /// How routes are grouped into resources
    pub key_strategy: KeyStrategy,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            mount_path: DEFAULT_MOUNT_PATH.to_string(),
            base_path: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            markdown: false,
            hide_documentation_path: false,
            hide_format: false,
            display_object_fields: false,
            key_strategy: KeyStrategy::default(),
        }
    }
}

impl DocsConfig {
    /// Create a configuration with every option at its default
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mount path
    pub fn mount_path(mut self, path: impl Into<String>) -> Self {
        self.mount_path = path.into();
        self
    }

    /// Set a fixed base path
    pub fn base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = Some(BasePath::Literal(path.into()));
        self
    }

    /// Compute the base path from each request
    pub fn base_path_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&DocRequest) -> Option<String> + Send + Sync + 'static,
    {
        self.base_path = Some(BasePath::dynamic(f));
        self
    }

    /// Set the API version
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Enable Markdown rendering of notes
    pub fn markdown(mut self, enabled: bool) -> Self {
        self.markdown = enabled;
        self
    }

    /// Hide the documentation endpoint from its own index
    pub fn hide_documentation_path(mut self, hide: bool) -> Self {
        self.hide_documentation_path = hide;
        self
    }

    /// Hide the `.{format}` suffix
    pub fn hide_format(mut self, hide: bool) -> Self {
        self.hide_format = hide;
        self
    }

    /// Include response-field documentation in notes
    pub fn display_object_fields(mut self, display: bool) -> Self {
        self.display_object_fields = display;
        self
    }

    /// Set the resource grouping strategy
    pub fn key_strategy(mut self, strategy: KeyStrategy) -> Self {
        self.key_strategy = strategy;
        self
    }

    /// Route descriptor of the resource listing route, namespaced under the mount path.
    pub fn index_route(&self) -> RouteDescriptor {
        RouteDescriptor::new(format!("{}{}", self.mount_path, FORMAT_SUFFIX), HttpMethod::Get)
            .in_namespace(self.mount_path.as_str())
    }

    /// Key of the resource holding the documentation endpoint's own routes.
    pub fn docs_resource_key(&self) -> Option<String> {
        self.key_strategy.resource_key(&self.index_route())
    }

    /// Resolves the advertised base path for `request`.
    pub fn resolve_base_path(&self, request: &DocRequest) -> String {
        let configured = match &self.base_path {
            Some(BasePath::Literal(path)) => Some(path.clone()),
            Some(BasePath::Dynamic(f)) => f(request),
            None => None,
        };
        configured.unwrap_or_else(|| request.base_url.clone())
    }

    /// Checks that the mount path is an absolute path without a trailing slash.
    pub fn validate(&self) -> Result<()> {
        if !self.mount_path.starts_with('/') {
            return Err(Error::InvalidArgument(format!(
                "mount path must start with '/': {}",
                self.mount_path
            )));
        }
        if self.mount_path.ends_with('/') {
            return Err(Error::InvalidArgument(format!(
                "mount path must not end with '/': {}",
                self.mount_path
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DocRequest {
        DocRequest::get("/swagger_doc", "https://api.example.com")
    }

    #[test]
    fn test_defaults() {
        let config = DocsConfig::default();
        assert_eq!(config.mount_path, "/swagger_doc");
        assert_eq!(config.api_version, "0.1");
        assert!(config.base_path.is_none());
        assert!(!config.markdown);
        assert!(!config.hide_documentation_path);
        assert!(!config.hide_format);
        assert!(!config.display_object_fields);
        assert_eq!(config.key_strategy, KeyStrategy::Namespace);
    }

    #[test]
    fn test_builder() {
        let config = DocsConfig::new()
            .mount_path("/docs")
            .api_version("v2")
            .markdown(true)
            .hide_format(true);
        assert_eq!(config.mount_path, "/docs");
        assert_eq!(config.api_version, "v2");
        assert!(config.markdown);
        assert!(config.hide_format);
    }

    #[test]
    fn test_base_path_falls_back_to_request() {
        assert_eq!(
            DocsConfig::default().resolve_base_path(&request()),
            "https://api.example.com"
        );
    }

    #[test]
    fn test_literal_base_path() {
        let config = DocsConfig::new().base_path("https://docs.example.com/api");
        assert_eq!(config.resolve_base_path(&request()), "https://docs.example.com/api");
    }

    #[test]
    fn test_dynamic_base_path() {
        let config = DocsConfig::new().base_path_fn(|req| Some(format!("{}/v1", req.base_url)));
        assert_eq!(config.resolve_base_path(&request()), "https://api.example.com/v1");

        let declining = DocsConfig::new().base_path_fn(|_| None);
        assert_eq!(declining.resolve_base_path(&request()), "https://api.example.com");
    }

    #[test]
    fn test_validate_mount_path() {
        assert!(DocsConfig::default().validate().is_ok());
        assert!(matches!(
            DocsConfig::new().mount_path("docs").validate(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(DocsConfig::new().mount_path("/docs/").validate().is_err());
        assert!(matches!(
            DocsConfig::new().mount_path("/").validate(),
            Err(Error::InvalidArgument(_))
        ));
        assert!(DocsConfig::new().mount_path("/api/docs").validate().is_ok());
    }

    #[test]
    fn test_docs_resource_key() {
        assert_eq!(DocsConfig::default().docs_resource_key(), Some("swagger_doc".to_string()));
        assert_eq!(
            DocsConfig::new().mount_path("/api/Docs").docs_resource_key(),
            Some("apidocs".to_string())
        );
        assert_eq!(
            DocsConfig::new()
                .mount_path("/api/docs")
                .key_strategy(KeyStrategy::FirstPathSegment)
                .docs_resource_key(),
            Some("api".to_string())
        );
    }
}
