// API error types
//
// Transport-layer errors for the Fluente backend. Consumers that want
// domain-appropriate errors should go through `fluente_core::CoreError`,
// which translates these.

use thiserror::Error;

/// Unified error type for the API crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying HTTP failure (connect, timeout, TLS, ...).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Login rejected or token invalid.
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// A request was made with an expired or missing session token.
    #[error("session expired -- re-authentication required")]
    SessionExpired,

    /// The backend rejected the request with a structured error body.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response body: {message}")]
    Deserialization { message: String },

    /// Base URL or path construction failed.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Error body the backend returns on failures: `{ "error": ..., "message": ... }`.
///
/// Either field may be absent; `message` is preferred for display.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ApiErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Best human-readable message from the body, or a fallback.
    pub fn display_message(&self, fallback: &str) -> String {
        self.message
            .clone()
            .or_else(|| self.error.clone())
            .unwrap_or_else(|| fallback.to_owned())
    }
}
