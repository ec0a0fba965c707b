use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure of an outbound proxy call, shared by the translator and the
/// text corrector.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("network failure: {0}")]
    NetworkFailure(#[source] reqwest::Error),

    #[error("upstream request timed out")]
    Timeout,

    #[error("upstream request cancelled")]
    Cancelled,

    #[error("upstream returned {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("invalid response shape: {0}")]
    InvalidResponseShape(String),
}

impl From<reqwest::Error> for ProxyError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ProxyError::Timeout
        } else {
            ProxyError::NetworkFailure(e)
        }
    }
}

impl ProxyError {
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::NetworkFailure(_) => "network_failure",
            ProxyError::Timeout => "timeout",
            ProxyError::Cancelled => "cancelled",
            ProxyError::UpstreamError { .. } => "upstream_error",
            ProxyError::InvalidResponseShape(_) => "invalid_response_shape",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::NetworkFailure(_)
            | ProxyError::UpstreamError { .. }
            | ProxyError::InvalidResponseShape(_) => StatusCode::BAD_GATEWAY,
            ProxyError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// The `"Error: <code>"` string older clients expect in place of a
    /// translation: the upstream status when there is one, otherwise the
    /// status this error maps to.
    pub fn legacy_message(&self) -> String {
        match self {
            ProxyError::UpstreamError { status, .. } => format!("Error: {}", status),
            _ => format!("Error: {}", self.status_code().as_u16()),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(json!({
                "error": self.to_string(),
                "kind": self.kind(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_has_legacy_message() {
        let err = ProxyError::UpstreamError {
            status: 401,
            body: "unauthorized".to_string(),
        };
        assert_eq!(err.legacy_message(), "Error: 401");
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.kind(), "upstream_error");
    }

    #[test]
    fn other_failures_use_their_mapped_status() {
        assert_eq!(ProxyError::Timeout.legacy_message(), "Error: 504");
        assert_eq!(ProxyError::Cancelled.legacy_message(), "Error: 503");
        assert_eq!(
            ProxyError::InvalidResponseShape("empty".into()).legacy_message(),
            "Error: 502"
        );
    }

    #[test]
    fn status_mapping() {
        assert_eq!(ProxyError::Timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            ProxyError::Cancelled.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ProxyError::InvalidResponseShape("no translations".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[tokio::test]
    async fn into_response_carries_kind() {
        let response = ProxyError::Timeout.into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["kind"], "timeout");
        assert_eq!(value["error"], "upstream request timed out");
    }
}
