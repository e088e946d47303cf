//! Error types for optimization-galaxy.
//!
//! No failure is fatal to the page: every variant maps either to a toast or
//! to a log line, and the component that raised it stays re-triggerable.

use thiserror::Error;

/// Result type alias for galaxy operations.
pub type GalaxyResult<T> = Result<T, GalaxyError>;

/// Unified error type for all galaxy operations.
#[derive(Debug, Error)]
pub enum GalaxyError {
    // ===== User Input =====
    /// Rejected user input (empty strategy selection, bad file type).
    #[error("Validation error: {0}")]
    Validation(String),

    // ===== Network =====
    /// Request to a backend endpoint failed.
    #[error("Network error: {0}")]
    Network(String),

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Schema validation error.
    #[error("Config validation error: {0}")]
    ConfigValidation(#[from] validator::ValidationErrors),

    /// JSON payload error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ===== Host Page =====
    /// Missing or mistyped DOM hook, or a failed browser call.
    #[error("DOM error: {0}")]
    Dom(String),
}

impl GalaxyError {
    /// Create a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a DOM error.
    #[must_use]
    pub fn dom(message: impl Into<String>) -> Self {
        Self::Dom(message.into())
    }

    /// Whether this error came from user input and should surface as a toast.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(feature = "wasm")]
impl From<GalaxyError> for wasm_bindgen::JsValue {
    fn from(err: GalaxyError) -> Self {
        Self::from_str(&err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_is_user_facing() {
        let err = GalaxyError::validation("no strategy selected");
        assert!(err.is_user_facing());
        let msg = err.to_string();
        assert!(msg.contains("Validation error"));
        assert!(msg.contains("no strategy selected"));
    }

    #[test]
    fn test_network_error_display() {
        let err = GalaxyError::network("connection refused");
        assert!(!err.is_user_facing());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_error_config() {
        let err = GalaxyError::config("max_steps must be positive");
        assert!(!err.is_user_facing());
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("max_steps"));
    }

    #[test]
    fn test_error_dom() {
        let err = GalaxyError::dom("missing #problem-canvas");
        assert!(err.to_string().contains("#problem-canvas"));
    }

    #[test]
    fn test_json_error_from() {
        let parse: Result<Vec<u32>, _> = serde_json::from_str("not json");
        let err: GalaxyError = parse.unwrap_err().into();
        assert!(matches!(err, GalaxyError::Json(_)));
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_yaml_error_from() {
        let parse: Result<Vec<u32>, _> = serde_yaml::from_str("{ unclosed");
        let err: GalaxyError = parse.unwrap_err().into();
        assert!(matches!(err, GalaxyError::YamlParse(_)));
    }

    #[test]
    fn test_error_debug() {
        let err = GalaxyError::config("test");
        let debug = format!("{err:?}");
        assert!(debug.contains("Config"));
    }
}
