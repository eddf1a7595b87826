//! Error types for the API client

use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// The service returned an error response
    #[error("API error ({status}): {message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Error message extracted from the response body
        message: String,
    },

    /// Request timeout
    #[error("Request timeout after {0:?}")]
    Timeout(std::time::Duration),

    /// All retry attempts exhausted
    #[error("All {attempts} retry attempts failed: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made
        attempts: u32,
        /// Last error message
        last_error: String,
    },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Reading or writing the local session cache failed
    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing env var error
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnvVar(var.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Build an API response error from a raw error body
    #[must_use]
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("HTTP {status}")
            } else {
                trimmed.to_string()
            }
        });
        Self::api_response(status, message)
    }

    /// The text to show a user
    ///
    /// Service errors surface their own message verbatim; everything else
    /// falls back to the display form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ApiResponse { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Check if this error is retryable
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(e) => e.is_connect() || e.is_timeout(),
            Self::ApiResponse { status, .. } => *status >= 500 || *status == 429,
            Self::Timeout(_) => true,
            Self::Config(_)
            | Self::MissingEnvVar(_)
            | Self::Json(_)
            | Self::InvalidUrl(_)
            | Self::Storage(_)
            | Self::RetriesExhausted { .. } => false,
        }
    }

    /// Check if the service rejected our credentials or token
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::ApiResponse { status: 401 | 403, .. })
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }
}

/// Pull a human readable message out of an auth or REST error body
///
/// Auth errors use `msg` or `error_description`, REST errors use `message`.
#[must_use]
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_auth_message() {
        let body = r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#;
        assert_eq!(extract_message(body).as_deref(), Some("Invalid login credentials"));

        let legacy = r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#;
        assert_eq!(extract_message(legacy).as_deref(), Some("Email not confirmed"));
    }

    #[test]
    fn test_extract_rest_message() {
        let body = r#"{"code":"42501","details":null,"hint":null,"message":"new row violates row-level security policy for table \"pets\""}"#;
        assert_eq!(
            extract_message(body).as_deref(),
            Some("new row violates row-level security policy for table \"pets\"")
        );
    }

    #[test]
    fn test_from_body_fallbacks() {
        assert_eq!(ApiError::from_body(502, "Bad Gateway").user_message(), "Bad Gateway");
        assert_eq!(ApiError::from_body(500, "  ").user_message(), "HTTP 500");
        assert_eq!(ApiError::from_body(400, "{}").user_message(), "{}");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ApiError::api_response(503, "down").is_retryable());
        assert!(ApiError::api_response(429, "slow down").is_retryable());
        assert!(!ApiError::api_response(400, "bad").is_retryable());
        assert!(!ApiError::config("x").is_retryable());
    }

    #[test]
    fn test_unauthorized() {
        assert!(ApiError::api_response(401, "jwt expired").is_unauthorized());
        assert!(ApiError::api_response(403, "forbidden").is_unauthorized());
        assert!(!ApiError::api_response(400, "bad").is_unauthorized());
        assert!(ApiError::api_response(400, "bad").is_client_error());
        assert!(ApiError::api_response(500, "boom").is_server_error());
    }
}
