use crate::error::{Error, Result};
use crate::route::RouteDescriptor;
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Loader for route manifests.
///
/// A route manifest describes the routes of one mounted sub-API, as exported by the host
/// framework. It is either a bare list of routes or an object with a `routes` list, written
/// in JSON (`.json`) or YAML (any other extension).
///
/// # Example
///
/// ```no_run
/// use route_swagger::parser::ManifestParser;
/// use std::path::Path;
///
/// let manifest = ManifestParser::parse_file(Path::new("routes/widgets.yaml")).unwrap();
/// println!("Loaded {} routes", manifest.routes.len());
/// ```
pub struct ManifestParser;

/// A successfully loaded manifest.
#[derive(Debug)]
pub struct Manifest {
    /// Path to the manifest file
    pub path: PathBuf,
    /// Routes in declaration order
    pub routes: Vec<RouteDescriptor>,
}

#[derive(Deserialize)]
struct WrappedManifest {
    routes: Vec<RouteDescriptor>,
}

impl ManifestParser {
    /// Loads a single manifest file.
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read and `ManifestError` if its content is not
    /// a valid manifest.
    pub fn parse_file(path: &Path) -> Result<Manifest> {
        debug!("Loading manifest: {}", path.display());

        let content = fs::read_to_string(path)?;
        let is_json = path.extension().and_then(|s| s.to_str()) == Some("json");
        let routes = Self::parse_str(&content, is_json).map_err(|message| Error::ManifestError {
            file: path.to_path_buf(),
            message,
        })?;

        debug!("Loaded {} routes from {}", routes.len(), path.display());

        Ok(Manifest {
            path: path.to_path_buf(),
            routes,
        })
    }

    /// Parses manifest content. JSON when `is_json`, YAML otherwise.
    pub fn parse_str(content: &str, is_json: bool) -> std::result::Result<Vec<RouteDescriptor>, String> {
        if is_json {
            let value: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
            if value.is_array() {
                serde_json::from_value(value).map_err(|e| e.to_string())
            } else {
                serde_json::from_value::<WrappedManifest>(value)
                    .map(|m| m.routes)
                    .map_err(|e| e.to_string())
            }
        } else {
            let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
            if value.is_sequence() {
                serde_yaml::from_value(value).map_err(|e| e.to_string())
            } else {
                serde_yaml::from_value::<WrappedManifest>(value)
                    .map(|m| m.routes)
                    .map_err(|e| e.to_string())
            }
        }
    }

    /// Loads several manifests, continuing past failures.
    ///
    /// Failures are logged as warnings and returned in place, so callers can mount whatever
    /// loaded successfully.
    pub fn parse_files(paths: &[PathBuf]) -> Vec<Result<Manifest>> {
        debug!("Loading {} manifests", paths.len());

        let results: Vec<Result<Manifest>> = paths
            .iter()
            .map(|path| {
                Self::parse_file(path).inspect_err(|e| warn!("Failed to load {}: {}", path.display(), e))
            })
            .collect();

        let success_count = results.iter().filter(|r| r.is_ok()).count();
        debug!(
            "Loading complete: {} succeeded, {} failed",
            success_count,
            results.len() - success_count
        );

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{HttpMethod, ParamDeclaration};
    use std::io::Write;
    use tempfile::TempDir;

    /// Helper function to create a temporary file with content
    fn create_temp_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let file_path = dir.path().join(name);
        let mut file = fs::File::create(&file_path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file_path
    }

    #[test]
    fn test_parse_yaml_list() {
        let temp_dir = TempDir::new().unwrap();
        let yaml = r#"
- path: /widgets(.:format)
  method: GET
  namespace: /widgets
  description: List widgets
- path: /widgets/:id(.:format)
  method: GET
  namespace: /widgets
  params:
    id:
      type: Integer
      desc: Widget id
      required: true
"#;
        let file_path = create_temp_file(&temp_dir, "widgets.yaml", yaml);
        let manifest = ManifestParser::parse_file(&file_path).unwrap();

        assert_eq!(manifest.path, file_path);
        assert_eq!(manifest.routes.len(), 2);
        assert_eq!(manifest.routes[0].method, Some(HttpMethod::Get));
        assert_eq!(manifest.routes[0].description.as_deref(), Some("List widgets"));
        assert!(matches!(manifest.routes[1].params["id"], ParamDeclaration::Declared(_)));
    }

    #[test]
    fn test_parse_json_wrapped() {
        let temp_dir = TempDir::new().unwrap();
        let json = r#"{"routes": [
            {"path": "/gadgets", "allowed_methods": ["GET", "HEAD"], "namespace": "gadgets"}
        ]}"#;
        let file_path = create_temp_file(&temp_dir, "gadgets.json", json);
        let manifest = ManifestParser::parse_file(&file_path).unwrap();

        assert_eq!(manifest.routes.len(), 1);
        assert_eq!(manifest.routes[0].method_string(), "GET,HEAD");
    }

    #[test]
    fn test_parse_tolerates_malformed_param_metadata() {
        let routes = ManifestParser::parse_str(
            "- path: /widgets\n  namespace: /widgets\n  params:\n    page:\n",
            false,
        )
        .unwrap();
        assert_eq!(routes.len(), 1);
        assert!(matches!(routes[0].params["page"], ParamDeclaration::Declared(_)));

        let routes =
            ManifestParser::parse_str(r#"{"routes": [{"path": "/n", "params": {"n": {"type": 5}}}]}"#, true)
                .unwrap();
        match &routes[0].params["n"] {
            ParamDeclaration::Declared(spec) => assert_eq!(spec.data_type.as_deref(), Some("5")),
            other => panic!("expected a full declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_invalid_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = create_temp_file(&temp_dir, "broken.json", r#"[{"method": "GET"}]"#);
        let result = ManifestParser::parse_file(&file_path);

        match result {
            Err(Error::ManifestError { file, .. }) => assert_eq!(file, file_path),
            other => panic!("expected a manifest error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_nonexistent_file() {
        let result = ManifestParser::parse_file(Path::new("/nonexistent/routes.json"));
        assert!(matches!(result, Err(Error::IoError(_))));
    }

    #[test]
    fn test_parse_files_batch() {
        let temp_dir = TempDir::new().unwrap();
        let file1 = create_temp_file(&temp_dir, "a.yaml", "- path: /a\n");
        let file2 = create_temp_file(&temp_dir, "b.json", "not json");
        let file3 = create_temp_file(&temp_dir, "c.yml", "routes: []\n");

        let results = ManifestParser::parse_files(&[file1.clone(), file2, file3]);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().path, file1);
        assert!(results[1].is_err());
        assert!(results[2].as_ref().unwrap().routes.is_empty());
    }
}
