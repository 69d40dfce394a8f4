//! Route normalization.
//!
//! Converts one [`RouteDescriptor`] into the Swagger [`Operation`] record: summary, notes
//! (optionally rendered from Markdown), a synthetic nickname, the HTTP method, the classified
//! parameters and the documented error responses.

use crate::error::Result;
use crate::markdown::{strip_common_indent, MarkdownRenderer};
use crate::params::{classify_all, classify_headers, NormalizedParameter};
use crate::route::{ObjectField, RouteDescriptor};
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// Heading of the generated response-field block.
const SUCCESS_RESPONSE_TITLE: &str = "Success Response";

/// A documented non-success status code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub reason: String,
}

/// Swagger operation describing one route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Notes, HTML when Markdown rendering is on
    pub notes: Option<String>,
    pub summary: String,
    /// Method and sanitized path, e.g. `GET-widgets--id---format-`
    pub nickname: String,
    pub http_method: String,
    /// Header parameters first, then request parameters
    pub parameters: Vec<NormalizedParameter>,
    /// Omitted entirely when the route documents no status codes
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_responses: Option<Vec<ErrorResponse>>,
}

/// Builds [`Operation`]s from routes.
#[derive(Clone, Copy, Default)]
pub struct RouteNormalizer<'a> {
    markdown: Option<&'a dyn MarkdownRenderer>,
    include_object_fields: bool,
}

impl<'a> RouteNormalizer<'a> {
    /// A normalizer that leaves notes as plain text and ignores response fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render notes through `renderer`.
    pub fn with_markdown(mut self, renderer: &'a dyn MarkdownRenderer) -> Self {
        self.markdown = Some(renderer);
        self
    }

    /// Append the documented response fields to the notes.
    pub fn with_object_fields(mut self, include: bool) -> Self {
        self.include_object_fields = include;
        self
    }

    /// Normalizes `route`, returning `None` for routes suppressed from documentation.
    ///
    /// # Errors
    ///
    /// Returns the renderer's error if Markdown rendering fails.
    pub fn normalize(&self, route: &RouteDescriptor) -> Result<Option<Operation>> {
        if route.no_doc {
            debug!("Skipping undocumented route: {}", route.path);
            return Ok(None);
        }

        let mut notes = match (&route.notes, self.markdown) {
            (Some(text), Some(renderer)) => Some(renderer.render(&strip_common_indent(text))?),
            (notes, None) => notes.clone(),
            (None, Some(_)) => None,
        };

        if self.include_object_fields {
            let fields = describe_object_fields(&route.object_fields, SUCCESS_RESPONSE_TITLE);
            if !fields.is_empty() {
                notes.get_or_insert_with(String::new).push_str(&fields);
            }
        }

        let http_method = route.method_string();
        let mut parameters = classify_headers(&route.headers);
        parameters.extend(classify_all(&route.params, &route.path, &http_method));

        let error_responses = if route.http_codes.is_empty() {
            None
        } else {
            Some(
                route
                    .http_codes
                    .iter()
                    .map(|(code, reason)| ErrorResponse {
                        code: *code,
                        reason: reason.clone(),
                    })
                    .collect(),
            )
        };

        Ok(Some(Operation {
            notes,
            summary: route.description.clone().unwrap_or_default(),
            nickname: nickname(&http_method, &route.path),
            http_method,
            parameters,
            error_responses,
        }))
    }
}

/// `method` followed by `path` with every `/`, `:`, `(`, `)` and `.` replaced by `-`.
pub fn nickname(method: &str, path: &str) -> String {
    let sanitized: String = path
        .chars()
        .map(|c| match c {
            '/' | ':' | '(' | ')' | '.' => '-',
            other => other,
        })
        .collect();
    format!("{}{}", method, sanitized)
}

/// Renders response-field documentation as an HTML block, or an empty string when there
/// are no fields.
pub fn describe_object_fields(fields: &IndexMap<String, ObjectField>, title: &str) -> String {
    if fields.is_empty() {
        return String::new();
    }

    let mut html = format!("<h4>{}</h4><pre>{{<br/>", title);
    for (name, field) in fields {
        html.push_str(&format!(
            "  {} [{}]: {}<br/>",
            name,
            capitalize(&field.data_type),
            field.desc
        ));
    }
    html.push_str("}</pre>");
    html
}

/// Upper-cases the first character and lower-cases the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::params::ParamType;
    use crate::route::{HttpMethod, ParamDeclaration, ParamSpec};
    use pretty_assertions::assert_eq;

    fn widget_route() -> RouteDescriptor {
        let mut route = RouteDescriptor::new("/widgets/:id(.:format)", HttpMethod::Get)
            .in_namespace("/widgets")
            .described("Fetch a widget");
        route.params.insert(
            "id".to_string(),
            ParamDeclaration::Declared(ParamSpec {
                data_type: Some("Integer".to_string()),
                required: true,
                ..Default::default()
            }),
        );
        route
    }

    #[test]
    fn test_normalize_basic_route() {
        let operation = RouteNormalizer::new().normalize(&widget_route()).unwrap().unwrap();

        assert_eq!(operation.summary, "Fetch a widget");
        assert_eq!(operation.http_method, "GET");
        assert_eq!(operation.nickname, "GET-widgets--id---format-");
        assert_eq!(operation.notes, None);
        assert_eq!(operation.parameters.len(), 1);
        assert_eq!(operation.parameters[0].param_type, ParamType::Path);
        assert!(operation.error_responses.is_none());
    }

    #[test]
    fn test_normalize_suppressed_route() {
        let mut route = widget_route();
        route.no_doc = true;
        assert!(RouteNormalizer::new().normalize(&route).unwrap().is_none());
    }

    #[test]
    fn test_normalize_no_params_gives_empty_list() {
        let route = RouteDescriptor::new("/ping", HttpMethod::Get);
        let operation = RouteNormalizer::new().normalize(&route).unwrap().unwrap();
        assert!(operation.parameters.is_empty());
        assert_eq!(operation.summary, "");

        let json = serde_json::to_value(&operation).unwrap();
        assert_eq!(json["parameters"], serde_json::json!([]));
        assert!(json.get("errorResponses").is_none());
    }

    #[test]
    fn test_headers_come_first() {
        let mut route = RouteDescriptor::new("/widgets", HttpMethod::Post);
        route
            .params
            .insert("name".to_string(), ParamDeclaration::Simple("String".to_string()));
        route.headers.insert(
            "X-Api-Key".to_string(),
            ParamDeclaration::Declared(ParamSpec {
                description: Some("Key".to_string()),
                required: true,
                ..Default::default()
            }),
        );

        let operation = RouteNormalizer::new().normalize(&route).unwrap().unwrap();
        let kinds: Vec<_> = operation.parameters.iter().map(|p| p.param_type).collect();
        assert_eq!(kinds, vec![ParamType::Header, ParamType::Form]);
        assert_eq!(operation.parameters[0].name, "X-Api-Key");
    }

    #[test]
    fn test_allowed_methods_in_nickname() {
        let mut route = RouteDescriptor::new("/widgets", HttpMethod::Get);
        route.method = None;
        route.allowed_methods = Some(vec![HttpMethod::Get, HttpMethod::Head]);
        let operation = RouteNormalizer::new().normalize(&route).unwrap().unwrap();
        assert_eq!(operation.http_method, "GET,HEAD");
        assert_eq!(operation.nickname, "GET,HEAD-widgets");
    }

    #[test]
    fn test_error_responses_keep_order() {
        let mut route = widget_route();
        route.http_codes.insert(404, "Widget not found".to_string());
        route.http_codes.insert(400, "Bad id".to_string());

        let operation = RouteNormalizer::new().normalize(&route).unwrap().unwrap();
        assert_eq!(
            operation.error_responses,
            Some(vec![
                ErrorResponse { code: 404, reason: "Widget not found".to_string() },
                ErrorResponse { code: 400, reason: "Bad id".to_string() },
            ])
        );
    }

    #[test]
    fn test_markdown_notes_are_dedented_then_rendered() {
        let mut route = widget_route();
        route.notes = Some("\n    # Widget\n    details\n".to_string());
        let renderer = |text: &str| -> Result<String> { Ok(format!("[{}]", text)) };

        let operation = RouteNormalizer::new()
            .with_markdown(&renderer)
            .normalize(&route)
            .unwrap()
            .unwrap();
        assert_eq!(operation.notes.as_deref(), Some("[\n# Widget\ndetails\n]"));
    }

    #[test]
    fn test_markdown_failure_propagates() {
        let mut route = widget_route();
        route.notes = Some("broken".to_string());
        let renderer = |_: &str| -> Result<String> { Err(Error::RenderError("boom".to_string())) };

        let result = RouteNormalizer::new().with_markdown(&renderer).normalize(&route);
        assert!(matches!(result, Err(Error::RenderError(_))));
    }

    #[test]
    fn test_object_fields_appended_to_notes() {
        let mut route = widget_route();
        route.notes = Some("Returns a widget.".to_string());
        route.object_fields.insert(
            "id".to_string(),
            ObjectField { data_type: "integer".to_string(), desc: "Identifier".to_string() },
        );
        route.object_fields.insert(
            "name".to_string(),
            ObjectField { data_type: "STRING".to_string(), desc: "Display name".to_string() },
        );

        let operation = RouteNormalizer::new()
            .with_object_fields(true)
            .normalize(&route)
            .unwrap()
            .unwrap();
        assert_eq!(
            operation.notes.as_deref(),
            Some(
                "Returns a widget.<h4>Success Response</h4><pre>{<br/>  id [Integer]: Identifier<br/>  \
                 name [String]: Display name<br/>}</pre>"
            )
        );
    }

    #[test]
    fn test_object_fields_without_notes() {
        let mut route = widget_route();
        route.object_fields.insert("id".to_string(), ObjectField::default());
        let operation = RouteNormalizer::new()
            .with_object_fields(true)
            .normalize(&route)
            .unwrap()
            .unwrap();
        assert_eq!(
            operation.notes.as_deref(),
            Some("<h4>Success Response</h4><pre>{<br/>  id []: <br/>}</pre>")
        );
    }

    #[test]
    fn test_object_fields_ignored_when_disabled() {
        let mut route = widget_route();
        route.object_fields.insert("id".to_string(), ObjectField::default());
        let operation = RouteNormalizer::new().normalize(&route).unwrap().unwrap();
        assert_eq!(operation.notes, None);
    }
}
