use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::types::ErrorBody;
use crate::error::LLMError;

/// Failure of a single relay request. Every variant ends that turn only.
#[derive(Debug, Error)]
pub enum RelayError {
    /// No upstream credential is configured
    #[error("{0}")]
    Configuration(String),
    /// The request body is malformed
    #[error("{0}")]
    Validation(String),
    /// The upstream provider call failed
    #[error("{message}")]
    Upstream { status: u16, message: String },
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl From<LLMError> for RelayError {
    fn from(err: LLMError) -> Self {
        match err {
            LLMError::UpstreamStatus { status, message } => RelayError::Upstream { status, message },
            other => RelayError::Upstream {
                status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                message: other.to_string(),
            },
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            RelayError::Configuration("no key".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RelayError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::Upstream {
                status: 429,
                message: "slow down".into()
            }
            .status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn non_error_upstream_status_becomes_500() {
        let err = RelayError::Upstream {
            status: 200,
            message: "odd".into(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn transport_errors_map_to_500_with_message() {
        let err: RelayError = LLMError::HttpError("connection refused".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "HTTP Error: connection refused");

        let err: RelayError = LLMError::UpstreamStatus {
            status: 401,
            message: "Invalid API Key".into(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.to_string(), "Invalid API Key");
    }
}
