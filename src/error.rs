//! Error handling for the Pinjam client

use std::fmt;
use thiserror::Error;

/// Message shown when the backend could not be reached or answered without a
/// structured error body.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error or unexpected issue while contacting the server.";

/// Unified error type for the Pinjam client
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure: the request produced no usable response
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Error reported by the backend: an HTTP error status plus the
    /// `{message}` body, verbatim
    #[error("{message}")]
    Api {
        /// HTTP status code of the response
        status: u16,
        /// Backend-provided message, or [`NETWORK_ERROR_MESSAGE`] when the
        /// body carried none
        message: String,
    },

    /// Input rejected client-side; no network call was made
    #[error("{0}")]
    Validation(String),

    /// A protected endpoint was called without an authenticated session
    #[error("Not logged in")]
    NotAuthenticated,

    /// Session persistence failures
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Create a new backend-reported error
    pub fn api<T: fmt::Display>(status: u16, message: T) -> Self {
        Error::Api {
            status,
            message: message.to_string(),
        }
    }

    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new session storage error
    pub fn storage<T: fmt::Display>(msg: T) -> Self {
        Error::Storage(msg.to_string())
    }

    /// The string a user-facing shell should display for this error.
    ///
    /// Backend-reported messages surface verbatim; transport failures
    /// collapse into [`NETWORK_ERROR_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            Error::Api { message, .. } => message.clone(),
            Error::Http(_) => NETWORK_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status of the backend response, when there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error was raised before any request went out
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
