// Core error types
//
// User-facing errors from fluente-core. Consumers never see raw HTTP
// status codes or JSON parse failures directly; the `From` impl below
// translates transport-layer errors into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Cannot reach the school backend: {reason}")]
    ConnectionFailed { reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Session expired -- log in again")]
    SessionExpired,

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("Backend rejected the request: {message}")]
    Rejected { message: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<fluente_api::Error> for CoreError {
    fn from(err: fluente_api::Error) -> Self {
        match err {
            fluente_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            fluente_api::Error::SessionExpired => CoreError::SessionExpired,
            fluente_api::Error::Transport(ref e) => {
                if e.is_timeout() || e.is_connect() {
                    CoreError::ConnectionFailed {
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            fluente_api::Error::Api { status, message } => match status {
                404 => CoreError::NotFound {
                    entity: "resource".into(),
                    identifier: message,
                },
                400 | 409 | 422 => CoreError::Rejected { message },
                _ => CoreError::Api {
                    message,
                    status: Some(status),
                },
            },
            fluente_api::Error::Deserialization { message } => {
                CoreError::Internal(format!("unexpected response: {message}"))
            }
            fluente_api::Error::InvalidUrl(e) => CoreError::Internal(format!("invalid URL: {e}")),
        }
    }
}
