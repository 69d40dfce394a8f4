//! Route Swagger - Swagger 1.1 documents from web framework route metadata.
//!
//! Given the routes registered with a web framework (path, method, parameters, headers,
//! documented status codes and free-text notes), this library produces the two documents
//! Swagger UI consumes: a resource listing with one entry per resource, and a per-resource
//! API declaration describing every operation.
//!
//! # Architecture
//!
//! 1. [`route`] - Route descriptors as supplied by the host framework
//! 2. [`path_template`] - Rewrites `:param(.:format)` paths into `{param}.{format}` templates
//! 3. [`params`] - Classifies parameters as path, query, form or header parameters
//! 4. [`markdown`] - Markdown rendering of route notes
//! 5. [`normalizer`] - Turns one route into a Swagger operation
//! 6. [`registry`] - Groups routes into resources and publishes registry snapshots atomically
//! 7. [`document`] - Assembles the resource listing and API declarations
//! 8. [`endpoint`] - Serves both documents for a host framework
//!
//! Route manifests on disk are found by [`scanner`], loaded by [`parser`] and the resulting
//! documents written by [`serializer`].
//!
//! # Example Usage
//!
//! ```
//! use route_swagger::config::DocsConfig;
//! use route_swagger::endpoint::{DocRequest, DocsEndpoint};
//! use route_swagger::route::{HttpMethod, RouteDescriptor};
//!
//! let endpoint = DocsEndpoint::new(DocsConfig::new().api_version("v1")).unwrap();
//! endpoint.registry().mount(vec![
//!     RouteDescriptor::new("/widgets/:id(.:format)", HttpMethod::Get)
//!         .in_namespace("/widgets")
//!         .described("Fetch a widget"),
//! ]);
//!
//! let request = DocRequest::get("/swagger_doc/widgets", "http://localhost:3000");
//! let response = endpoint.handle(&request).unwrap().unwrap();
//! assert_eq!(response.body["apis"][0]["path"], "/widgets/{id}.{format}");
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod config;
pub mod document;
pub mod endpoint;
pub mod error;
pub mod markdown;
pub mod normalizer;
pub mod params;
pub mod parser;
pub mod path_template;
pub mod registry;
pub mod route;
pub mod scanner;
pub mod serializer;
