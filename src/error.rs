use thiserror::Error;

/// Status codes the invoker treats as retryable.
pub const TRANSIENT_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum AppError {
    #[error("Failed to load credentials from {path}: {reason}")]
    CredentialLoadError { path: String, reason: String },

    #[error("Failed to load API reference from {path}: {reason}")]
    CatalogLoadError { path: String, reason: String },

    #[error("Endpoint not found for {method} {path}")]
    EndpointNotFound { method: String, path: String },

    #[error("Token exchange failed with status {status}: {body}")]
    AuthExchangeError { status: u16, body: String },

    #[error(
        "Token response missing access_token; verify the token exchange contract for this tenant"
    )]
    TokenFieldMissing,

    #[error("Request failed with status {status}: {body}")]
    InvocationError { status: u16, body: String },

    #[error("HTTP transport error: {0}")]
    TransportError(String),

    #[error("Invalid response body: {0}")]
    ResponseDecodeError(String),

    #[error("Invalid input: {0}")]
    ValidationError(String),
}

impl AppError {
    /// HTTP status carried by the error, if the remote side produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::AuthExchangeError { status, .. } | AppError::InvocationError { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }
}

pub fn is_transient_status(status: u16) -> bool {
    TRANSIENT_STATUSES.contains(&status)
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::TransportError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        for status in [429, 500, 502, 503, 504] {
            assert!(is_transient_status(status), "{status} should be transient");
        }
        for status in [200, 400, 401, 403, 404, 501] {
            assert!(!is_transient_status(status), "{status} should be terminal");
        }
    }

    #[test]
    fn test_endpoint_not_found_message_names_request() {
        let err = AppError::EndpointNotFound {
            method: "GET".into(),
            path: "/api/missing".into(),
        };
        assert_eq!(err.to_string(), "Endpoint not found for GET /api/missing");
    }

    #[test]
    fn test_status_only_on_http_variants() {
        let invocation = AppError::InvocationError {
            status: 503,
            body: "busy".into(),
        };
        assert_eq!(invocation.status(), Some(503));

        let transport = AppError::TransportError("connection refused".into());
        assert_eq!(transport.status(), None);
    }

    #[test]
    fn test_token_field_missing_mentions_contract() {
        let msg = AppError::TokenFieldMissing.to_string();
        assert!(msg.contains("access_token"));
        assert!(msg.contains("verify"));
    }
}
