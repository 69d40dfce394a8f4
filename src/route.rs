//! Route descriptor data model.
//!
//! A [`RouteDescriptor`] is the read-only description of one registered HTTP route, as supplied
//! by the host framework's route registry (or loaded from a route manifest by [`crate::parser`]).
//! It carries everything the documentation generator needs: the raw path pattern, the HTTP
//! method(s), the namespace used for grouping, free-text documentation and the declared
//! parameters, headers, response fields and status codes.
//!
//! # Example
//!
//! ```
//! use route_swagger::route::{HttpMethod, ParamDeclaration, RouteDescriptor};
//!
//! let mut route = RouteDescriptor::new("/widgets/:id(.:format)", HttpMethod::Get)
//!     .in_namespace("/widgets");
//! route.params.insert("id".to_string(), ParamDeclaration::Simple("Integer".to_string()));
//! assert_eq!(route.method_string(), "GET");
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// HTTP methods a route can be registered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP PATCH method
    Patch,
    /// HTTP OPTIONS method
    Options,
    /// HTTP HEAD method
    Head,
}

impl HttpMethod {
    /// Returns the upper-case wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declaration of a single request or header parameter.
///
/// Route metadata declares parameters either with a bare type name or with a full
/// declaration object. In manifests a plain string deserializes to [`ParamDeclaration::Simple`]
/// and an object to [`ParamDeclaration::Declared`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamDeclaration {
    /// Only a type name is known
    Simple(String),
    /// Type, description, required-ness and an optional display name
    Declared(ParamSpec),
}

impl<'de> Deserialize<'de> for ParamDeclaration {
    /// A string is a bare type name; anything else is read as a declaration, with fields
    /// that are missing or of the wrong shape left at their defaults.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(data_type) => ParamDeclaration::Simple(data_type),
            other => ParamDeclaration::Declared(ParamSpec::from_value(&other)),
        })
    }
}

/// Full parameter declaration. Every field is optional; missing fields degrade to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    /// Declared type name (e.g. "Integer")
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Short description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Long description, used when `desc` is absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the parameter must be supplied
    pub required: bool,
    /// Fully qualified name (e.g. "widget[name]") shown instead of the key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl ParamSpec {
    /// Reads a declaration object. Non-objects yield the default declaration.
    ///
    /// Numbers and booleans in text fields are kept in their textual form; other non-string
    /// values are ignored. `required` is true for any value other than `null` or `false`.
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(fields) = value else {
            return Self::default();
        };

        Self {
            data_type: text_field(fields.get("type")),
            desc: text_field(fields.get("desc")),
            description: text_field(fields.get("description")),
            required: !matches!(
                fields.get("required"),
                None | Some(Value::Null | Value::Bool(false))
            ),
            full_name: text_field(fields.get("full_name")),
        }
    }
}

/// Documentation for one field of a route's success response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObjectField {
    /// Field type name
    #[serde(rename = "type")]
    pub data_type: String,
    /// Field description
    pub desc: String,
}

impl<'de> Deserialize<'de> for ObjectField {
    /// Accepts `desc` or `description`; anything that is not an object is an empty field.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let Value::Object(fields) = value else {
            return Ok(Self::default());
        };

        Ok(Self {
            data_type: text_field(fields.get("type")).unwrap_or_default(),
            desc: text_field(fields.get("desc"))
                .or_else(|| text_field(fields.get("description")))
                .unwrap_or_default(),
        })
    }
}

fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// One registered route as described by the host framework.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteDescriptor {
    /// Raw path pattern, e.g. `/:version/widgets/:id(.:format)`
    pub path: String,
    /// Explicit HTTP method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
    /// Methods accepted when no single method is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_methods: Option<Vec<HttpMethod>>,
    /// Namespace the route was declared in, e.g. `/widgets`
    #[serde(default)]
    pub namespace: String,
    /// One-line description, used as the operation summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-text notes, optionally Markdown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Declared request parameters in declaration order
    #[serde(default)]
    pub params: IndexMap<String, ParamDeclaration>,
    /// Declared header parameters in declaration order
    #[serde(default)]
    pub headers: IndexMap<String, ParamDeclaration>,
    /// Documentation of the success response fields
    #[serde(default)]
    pub object_fields: IndexMap<String, ObjectField>,
    /// Documented status codes and their reasons
    #[serde(default, deserialize_with = "deserialize_status_codes")]
    pub http_codes: IndexMap<u16, String>,
    /// Suppress the route from generated documentation
    #[serde(default, alias = "hidden")]
    pub no_doc: bool,
}

impl RouteDescriptor {
    /// Create a route with a path and a single method; everything else empty.
    pub fn new(path: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: path.into(),
            method: Some(method),
            ..Default::default()
        }
    }

    /// Set the namespace the route belongs to.
    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the one-line description.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The method string used in documents: the explicit method, else the comma-joined
    /// allowed methods, else `GET`.
    pub fn method_string(&self) -> String {
        if let Some(method) = self.method {
            return method.as_str().to_string();
        }
        match &self.allowed_methods {
            Some(methods) if !methods.is_empty() => methods
                .iter()
                .map(HttpMethod::as_str)
                .collect::<Vec<_>>()
                .join(","),
            _ => HttpMethod::Get.as_str().to_string(),
        }
    }
}

/// Status codes appear as integer keys in YAML and as string keys in JSON.
fn deserialize_status_codes<'de, D>(deserializer: D) -> Result<IndexMap<u16, String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize, PartialEq, Eq, Hash)]
    #[serde(untagged)]
    enum CodeKey {
        Number(u16),
        Text(String),
    }

    let raw = IndexMap::<CodeKey, String>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, reason)| {
            let code = match key {
                CodeKey::Number(code) => code,
                CodeKey::Text(text) => text.trim().parse().map_err(|_| {
                    <D::Error as serde::de::Error>::custom(format!("invalid HTTP status code: {}", text))
                })?,
            };
            Ok((code, reason))
        })
        .collect()
}
