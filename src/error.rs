//! Domain-specific error types for cognitive-fortress

use thiserror::Error;

/// Main error type for the cognitive fortress library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CognitiveFortressError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Unknown defense module: {name}")]
    InvalidModule { name: String },

    #[error("Module '{module}' failed: {message}")]
    ModuleProcessing { module: String, message: String },

    #[error("Configuration mismatch for '{module}': ignored keys {keys:?}")]
    ConfigurationMismatch { module: String, keys: Vec<String> },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<anyhow::Error> for CognitiveFortressError {
    fn from(err: anyhow::Error) -> Self {
        CognitiveFortressError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CognitiveFortressError {
    fn from(err: serde_json::Error) -> Self {
        CognitiveFortressError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for CognitiveFortressError {
    fn from(err: toml::de::Error) -> Self {
        CognitiveFortressError::Config {
            message: format!("TOML parse error: {}", err),
        }
    }
}

impl From<std::io::Error> for CognitiveFortressError {
    fn from(err: std::io::Error) -> Self {
        CognitiveFortressError::Config {
            message: format!("I/O error: {}", err),
        }
    }
}

/// Result type alias for cognitive fortress operations
pub type Result<T> = std::result::Result<T, CognitiveFortressError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_processing_message() {
        let err = CognitiveFortressError::ModuleProcessing {
            module: "awareness".into(),
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "Module 'awareness' failed: boom");
    }

    #[test]
    fn test_from_serde_json() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: CognitiveFortressError = parse.unwrap_err().into();
        assert!(matches!(err, CognitiveFortressError::Serialization { .. }));
    }
}
