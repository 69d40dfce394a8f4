//! Documentation endpoint.
//!
//! A transport-agnostic handler for the two documentation routes:
//!
//! - `GET <mount path>` returns the resource listing
//! - `GET <mount path>/:name` returns the API declaration of resource `name`
//!
//! The host framework translates its own request into a [`DocRequest`], calls
//! [`DocsEndpoint::handle`] and writes the returned [`DocResponse`] back. Requests for any other
//! path are declined with `None` so the host can continue its own dispatch.

use crate::config::DocsConfig;
use crate::document::DocumentAssembler;
use crate::error::{Error, Result};
use crate::markdown::{CommonMarkRenderer, MarkdownRenderer};
use crate::path_template::FORMAT_SUFFIX;
use crate::registry::SharedRegistry;
use crate::route::{HttpMethod, ParamDeclaration, ParamSpec, RouteDescriptor};
use log::debug;
use std::sync::Arc;

const JSON_EXTENSION: &str = ".json";

/// Headers set on every documentation response.
pub const CORS_HEADERS: [(&str, &str); 2] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Request-Method", "*"),
];

/// The parts of an incoming request the endpoint looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRequest {
    pub method: HttpMethod,
    /// Request path, optionally with a query string
    pub path: String,
    /// Scheme and host as seen by the server, e.g. `https://api.example.com`
    pub base_url: String,
}

impl DocRequest {
    /// A GET request for `path`.
    pub fn get(path: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            base_url: base_url.into(),
        }
    }
}

/// A JSON response ready to be written by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct DocResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: serde_json::Value,
}

impl DocResponse {
    fn json(body: serde_json::Value) -> Self {
        let mut headers: Vec<(String, String)> = CORS_HEADERS
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        headers.push(("Content-Type".to_string(), "application/json".to_string()));

        Self {
            status: 200,
            headers,
            body,
        }
    }

    /// Value of the header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Which document a request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DocTarget<'r> {
    Index,
    Resource(&'r str),
}

/// Serves documentation for the routes mounted in a [`SharedRegistry`].
pub struct DocsEndpoint {
    config: DocsConfig,
    registry: Arc<SharedRegistry>,
    renderer: Box<dyn MarkdownRenderer>,
}

impl DocsEndpoint {
    /// Creates an endpoint with its own empty registry and the CommonMark renderer.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the configured mount path is malformed.
    pub fn new(config: DocsConfig) -> Result<Self> {
        let registry = Arc::new(SharedRegistry::new(config.key_strategy));
        Self::with_registry(config, registry)
    }

    /// Creates an endpoint serving an existing registry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the mount path is malformed or when the registry groups
    /// routes with a different key strategy than `config`.
    pub fn with_registry(config: DocsConfig, registry: Arc<SharedRegistry>) -> Result<Self> {
        config.validate()?;
        if registry.strategy() != config.key_strategy {
            return Err(Error::InvalidArgument(format!(
                "registry uses {:?} keys but the configuration asks for {:?}",
                registry.strategy(),
                config.key_strategy
            )));
        }
        Ok(Self {
            config,
            registry,
            renderer: Box::new(CommonMarkRenderer),
        })
    }

    /// Replaces the Markdown renderer.
    pub fn with_renderer<R>(mut self, renderer: R) -> Self
    where
        R: MarkdownRenderer + 'static,
    {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn config(&self) -> &DocsConfig {
        &self.config
    }

    /// The registry routes are mounted into.
    pub fn registry(&self) -> &Arc<SharedRegistry> {
        &self.registry
    }

    /// Route descriptors of the endpoint's own two routes, namespaced under the mount path.
    pub fn own_routes(&self) -> Vec<RouteDescriptor> {
        let mount = &self.config.mount_path;

        let index = self.config.index_route().described("Swagger compatible API description");

        let mut resource =
            RouteDescriptor::new(format!("{}/:name{}", mount, FORMAT_SUFFIX), HttpMethod::Get)
                .in_namespace(mount.as_str())
                .described("Swagger compatible API description for specific API");
        resource.params.insert(
            "name".to_string(),
            ParamDeclaration::Declared(ParamSpec {
                data_type: Some("string".to_string()),
                desc: Some("Resource name of mounted API".to_string()),
                required: true,
                ..Default::default()
            }),
        );

        vec![index, resource]
    }

    /// Mounts the endpoint's own routes into its registry.
    pub fn mount_self(&self) {
        self.registry.mount(self.own_routes());
    }

    /// Answers a documentation request, or returns `None` if the request is not addressed
    /// to this endpoint.
    ///
    /// # Errors
    ///
    /// Propagates Markdown rendering and serialization failures.
    pub fn handle(&self, request: &DocRequest) -> Result<Option<DocResponse>> {
        if request.method != HttpMethod::Get {
            return Ok(None);
        }
        let Some(target) = self.target(&request.path) else {
            return Ok(None);
        };

        let snapshot = self.registry.snapshot();
        let base_path = self.config.resolve_base_path(request);
        let assembler = DocumentAssembler::new(&self.config, self.renderer.as_ref());

        let body = match target {
            DocTarget::Index => {
                debug!("Serving resource listing");
                serde_json::to_value(assembler.index_document(&snapshot, &base_path))?
            }
            DocTarget::Resource(name) => {
                debug!("Serving API declaration for '{}'", name);
                serde_json::to_value(assembler.resource_document(&snapshot, name, &base_path)?)?
            }
        };

        Ok(Some(DocResponse::json(body)))
    }

    fn target<'r>(&self, path: &'r str) -> Option<DocTarget<'r>> {
        let path = path.split('?').next().unwrap_or(path);
        let rest = path.strip_prefix(self.config.mount_path.as_str())?;

        if rest.is_empty() || rest == JSON_EXTENSION {
            return Some(DocTarget::Index);
        }

        let name = rest.strip_prefix('/')?;
        let name = name.strip_suffix(JSON_EXTENSION).unwrap_or(name);
        if name.is_empty() || name.contains('/') {
            None
        } else {
            Some(DocTarget::Resource(name))
        }
    }
}
