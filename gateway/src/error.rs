use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

/// Failures surfaced by a [`crate::ContactsGateway`].
///
/// `Transport` means no response arrived; `Status` and `Decode` mean the
/// server answered but not with what was asked for.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} request failed: {status} - {body}")]
    Status {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("{operation} response could not be decoded: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid gateway base url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
}

impl GatewayError {
    pub fn status(operation: &'static str, status: StatusCode, body: impl Into<String>) -> Self {
        GatewayError::Status {
            operation,
            status,
            body: body.into(),
        }
    }

    /// HTTP status reported by the server, if the request got that far.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(StatusCode::NOT_FOUND)
    }
}
