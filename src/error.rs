use thiserror::Error;

/// Error types that can occur when talking to an upstream provider or to the relay.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request/response errors without a usable status code
    #[error("HTTP Error: {0}")]
    HttpError(String),
    /// Authentication and authorization errors
    #[error("Auth Error: {0}")]
    AuthError(String),
    /// Invalid request parameters or format
    #[error("Invalid Request: {0}")]
    InvalidRequest(String),
    /// The provider answered with a non-success status code
    #[error("{message}")]
    UpstreamStatus { status: u16, message: String },
    /// A response body that could not be decoded
    #[error("{message}: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
    /// JSON serialization/deserialization errors
    #[error("JSON Parse Error: {0}")]
    JsonError(String),
    #[error("{0}")]
    Generic(String),
}

/// Converts reqwest HTTP errors into LLMErrors
impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => LLMError::UpstreamStatus {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => LLMError::HttpError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for LLMError {
    fn from(err: serde_json::Error) -> Self {
        LLMError::JsonError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_displays_provider_message_only() {
        let err = LLMError::UpstreamStatus {
            status: 401,
            message: "Incorrect API key provided".into(),
        };
        assert_eq!(err.to_string(), "Incorrect API key provided");
    }

    #[test]
    fn json_errors_convert() {
        let err: LLMError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, LLMError::JsonError(_)));
    }
}
