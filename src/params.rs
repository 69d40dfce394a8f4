//! Parameter classification.
//!
//! Turns the parameter declarations of a route into uniform Swagger parameter records,
//! deciding for each one whether it travels in the path, the query string, the form body
//! or a header.

use crate::path_template::has_path_param;
use crate::route::{ParamDeclaration, ParamSpec};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Data type used when a declaration carries none.
pub const DEFAULT_DATA_TYPE: &str = "string";

/// Type names that denote an uploaded file.
const UPLOADED_FILE_TYPES: &[&str] = &["UploadedFile", "Rack::Multipart::UploadedFile"];

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Embedded in the URL path (`/widgets/{id}`)
    Path,
    /// Query string parameter
    Query,
    /// Form field of a POST body
    Form,
    /// HTTP header
    Header,
}

/// A parameter as it appears in an operation's `parameters` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedParameter {
    pub param_type: ParamType,
    pub name: String,
    pub description: String,
    pub data_type: String,
    pub required: bool,
}

/// Classifies one request parameter of a route.
///
/// `http_method` is compared case-sensitively against `POST`; a comma-joined method list
/// never counts as POST.
pub fn classify(
    name: &str,
    declaration: &ParamDeclaration,
    path: &str,
    http_method: &str,
) -> NormalizedParameter {
    let param_type = if has_path_param(path, name) {
        ParamType::Path
    } else if http_method == "POST" {
        ParamType::Form
    } else {
        ParamType::Query
    };

    match declaration {
        ParamDeclaration::Simple(data_type) => NormalizedParameter {
            param_type,
            name: name.to_string(),
            description: String::new(),
            data_type: normalize_data_type(Some(data_type)),
            required: false,
        },
        ParamDeclaration::Declared(spec) => NormalizedParameter {
            param_type,
            name: spec.full_name.clone().unwrap_or_else(|| name.to_string()),
            description: description_of(spec),
            data_type: normalize_data_type(spec.data_type.as_deref()),
            required: spec.required,
        },
    }
}

/// Classifies one header parameter. Headers are always strings.
pub fn classify_header(name: &str, declaration: &ParamDeclaration) -> NormalizedParameter {
    let (description, required) = match declaration {
        ParamDeclaration::Simple(_) => (String::new(), false),
        ParamDeclaration::Declared(spec) => (description_of(spec), spec.required),
    };

    NormalizedParameter {
        param_type: ParamType::Header,
        name: name.to_string(),
        description,
        data_type: DEFAULT_DATA_TYPE.to_string(),
        required,
    }
}

/// Classifies every declared request parameter, keeping declaration order.
pub fn classify_all(
    params: &IndexMap<String, ParamDeclaration>,
    path: &str,
    http_method: &str,
) -> Vec<NormalizedParameter> {
    params
        .iter()
        .map(|(name, declaration)| classify(name, declaration, path, http_method))
        .collect()
}

/// Classifies every declared header parameter, keeping declaration order.
pub fn classify_headers(headers: &IndexMap<String, ParamDeclaration>) -> Vec<NormalizedParameter> {
    headers
        .iter()
        .map(|(name, declaration)| classify_header(name, declaration))
        .collect()
}

fn normalize_data_type(declared: Option<&str>) -> String {
    match declared {
        Some(t) if UPLOADED_FILE_TYPES.contains(&t) => "file".to_string(),
        Some(t) if !t.is_empty() => t.to_string(),
        _ => DEFAULT_DATA_TYPE.to_string(),
    }
}

fn description_of(spec: &ParamSpec) -> String {
    spec.desc
        .as_ref()
        .or(spec.description.as_ref())
        .cloned()
        .unwrap_or_default()
}
