//! Error taxonomy shared by the mix resolver and the stream relay

use serde::Deserialize;
use thiserror::Error;

/// Result alias used across the library
pub type Result<T> = std::result::Result<T, RadioMixError>;

/// Errors surfaced to the caller boundary
#[derive(Error, Debug)]
pub enum RadioMixError {
    /// Bad or missing input, detected before any network call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The search yielded nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// A provider call failed (transport, auth, quota...), message kept verbatim
    #[error("Provider error: {0}")]
    Provider(String),

    /// Missing API key or unreadable configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RadioMixError {
    /// Build a provider error from a non-success HTTP response body.
    ///
    /// Google-style bodies (`{"error": {"message": ...}}`) surface their own
    /// message, anything else falls back to the status line.
    pub fn from_provider_body(status: reqwest::StatusCode, body: &str) -> Self {
        #[derive(Deserialize)]
        struct Envelope {
            error: ErrorBody,
        }

        #[derive(Deserialize)]
        struct ErrorBody {
            message: String,
        }

        match serde_json::from_str::<Envelope>(body) {
            Ok(envelope) if !envelope.error.message.is_empty() => {
                Self::Provider(envelope.error.message)
            }
            _ => Self::Provider(format!("HTTP {}", status)),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<reqwest::Error> for RadioMixError {
    fn from(err: reqwest::Error) -> Self {
        Self::Provider(err.to_string())
    }
}
