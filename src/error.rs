use std::path::PathBuf;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the library
#[derive(Debug)]
pub enum Error {
    IoError(std::io::Error),
    ManifestError { file: PathBuf, message: String },
    RenderError(String),
    InvalidArgument(String),
    SerializationError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::IoError(e) => write!(f, "IO error: {}", e),
            Error::ManifestError { file, message } => {
                write!(f, "invalid route manifest {}: {}", file.display(), message)
            }
            Error::RenderError(msg) => write!(f, "failed to render notes: {}", msg),
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Error::SerializationError(msg) => write!(f, "serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerializationError(format!("JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(err, Error::SerializationError(_)));
        assert!(err.to_string().starts_with("serialization error: JSON:"));
    }

    #[test]
    fn test_manifest_error_display() {
        let err = Error::ManifestError {
            file: PathBuf::from("routes/widgets.yaml"),
            message: "missing field `path`".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid route manifest routes/widgets.yaml: missing field `path`"
        );
    }
}
