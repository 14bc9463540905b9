//! Error types for the Vultr gateway.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by [`super::VultrClient`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum VultrError {
    /// Raised when the client configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),
    /// Raised when the API answers with a non-success status.
    #[error("{message} (HTTP {status})")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message from the error body, or the raw body when it is not the
        /// documented error envelope.
        message: String,
    },
    /// Raised when the request never produced a response.
    #[error("request failed: {message}")]
    Transport {
        /// Message from the HTTP client.
        message: String,
    },
    /// Raised when a success body does not match the expected shape.
    #[error("unexpected response body: {message}")]
    Decode {
        /// Message from the JSON decoder.
        message: String,
    },
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: String,
}

impl VultrError {
    /// Builds an [`VultrError::Api`] from a failed response.
    ///
    /// The message comes from the error envelope, then the raw body, then the
    /// status line's reason phrase when the body is blank.
    pub(super) fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let detail = serde_json::from_slice::<ApiErrorBody>(body)
            .ok()
            .map(|parsed| parsed.error)
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_owned());
        let message = if detail.is_empty() {
            status
                .canonical_reason()
                .map_or_else(|| String::from("no error message"), str::to_owned)
        } else {
            detail
        };
        Self::Api {
            status: status.as_u16(),
            message,
        }
    }
}

impl From<reqwest::Error> for VultrError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport {
            message: value.to_string(),
        }
    }
}

impl From<ConfigError> for VultrError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value.to_string())
    }
}
