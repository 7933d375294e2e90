//! Error types and result aliases for depinfo operations.
//!
//! Registry lookups never produce these errors: their failures are returned as
//! lookup outcomes and handled by the resolution policy. `DepinfoError` covers
//! everything around the pipeline (configuration, the inventory service,
//! report writing) with actionable error messages.

use thiserror::Error;

/// Unified error type for all depinfo operations
#[derive(Error, Debug)]
pub enum DepinfoError {
    // Config errors
    #[error("Required setting '{name}' is missing")]
    ConfigMissing { name: String },

    #[error("Unable to parse {source_name}: {message}")]
    ConfigParse {
        source_name: String,
        message: String,
    },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    #[error("Failed to parse JSON: {message}")]
    JsonParse { message: String },

    // Service errors
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Inventory service returned status {status}: {body}")]
    Inventory { status: u16, body: String },

    // Output errors
    #[error("Failed to write report: {message}")]
    Report { message: String },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for depinfo operations
pub type DepinfoResult<T> = Result<T, DepinfoError>;

impl DepinfoError {
    /// Create a network error from any error type
    pub fn network<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Create a missing-setting error
    pub fn config_missing(name: impl Into<String>) -> Self {
        Self::ConfigMissing { name: name.into() }
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            DepinfoError::ConfigMissing { name } if name == "repo" => {
                Some("Pass --repo or set \"repo\" in SOCKET_API or depinfo.toml")
            },
            DepinfoError::ConfigMissing { .. } => {
                Some("Set SOCKET_API to a JSON object such as {\"key\": \"...\"} or pass --api-key")
            },
            DepinfoError::ConfigParse { .. } => {
                Some("Check that the value is a valid JSON object or TOML document")
            },
            DepinfoError::Network { .. } => Some("Check your internet connection and try again"),
            DepinfoError::Inventory { status: 401 | 403, .. } => {
                Some("Check that the API key is valid and has access to the organization")
            },
            DepinfoError::Report { .. } => {
                Some("Check that the output path is writable")
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DepinfoError::config_missing("SOCKET_API");
        assert_eq!(err.to_string(), "Required setting 'SOCKET_API' is missing");

        let err = DepinfoError::Inventory {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "Inventory service returned status 500: boom");
    }

    #[test]
    fn test_suggestions() {
        assert!(DepinfoError::config_missing("SOCKET_API").suggestion().is_some());

        let unauthorized = DepinfoError::Inventory {
            status: 401,
            body: String::new(),
        };
        assert!(unauthorized.suggestion().is_some());

        let server = DepinfoError::Inventory {
            status: 500,
            body: String::new(),
        };
        assert!(server.suggestion().is_none());
    }
}
