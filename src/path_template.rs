//! Rewrites framework path patterns into Swagger path templates.
//!
//! Framework routes use colon-prefixed parameters and an optional `(.:format)` suffix
//! (`/widgets/:id(.:format)`); Swagger expects brace templates (`/widgets/{id}.{format}`).

use regex::Regex;
use std::sync::LazyLock;

/// The optional format suffix appended to framework routes.
pub const FORMAT_SUFFIX: &str = "(.:format)";

/// The Swagger form of [`FORMAT_SUFFIX`].
pub const FORMAT_TEMPLATE: &str = ".{format}";

const VERSION_PLACEHOLDER: &str = "{version}";

static COLON_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)").expect("valid parameter pattern"));

/// Converts a framework path pattern to a Swagger template.
///
/// 1. `(.:format)` becomes `.{format}`, or is removed when `hide_format` is set.
/// 2. Every `:name` token becomes `{name}`.
/// 3. `{version}` is replaced by `version` when one is given.
///
/// ```
/// use route_swagger::path_template::rewrite;
///
/// assert_eq!(rewrite("/widgets/:id(.:format)", Some("v1"), false), "/widgets/{id}.{format}");
/// assert_eq!(rewrite("/widgets/:id(.:format)", Some("v1"), true), "/widgets/{id}");
/// ```
pub fn rewrite(path: &str, version: Option<&str>, hide_format: bool) -> String {
    let replacement = if hide_format { "" } else { FORMAT_TEMPLATE };
    let formatted = path.replace(FORMAT_SUFFIX, replacement);
    let templated = COLON_PARAM.replace_all(&formatted, "{$1}").into_owned();

    match version {
        Some(version) => templated.replace(VERSION_PLACEHOLDER, version),
        None => templated,
    }
}

/// Whether `path` contains the literal `:name` token.
///
/// This is a substring test, so `:id` also matches inside `:identifier`.
pub fn has_path_param(path: &str, name: &str) -> bool {
    path.contains(&format!(":{}", name))
}
