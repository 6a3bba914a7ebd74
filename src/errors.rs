//! Typed error hierarchy for the habitual client.
//!
//! Three types cover the three layers that can fail before a command does:
//! - `ClientError`: HTTP calls against the habits API
//! - `SessionError`: the locally stored bearer token
//! - `ValidationErrors`: client-side form checks, see [`crate::validation`]

use reqwest::StatusCode;
use thiserror::Error;

pub use crate::validation::{FieldError, ValidationErrors};

/// Errors from the REST client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not authorized: the session is missing or has expired")]
    Unauthorized,

    #[error("Invalid username/e-mail or password")]
    InvalidCredentials,

    #[error("Not found: {path}")]
    NotFound { path: String },

    #[error("API returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid API base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// True when the API rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}

/// Errors from the session store.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not logged in. Run `habitual login` first.")]
    NotLoggedIn,

    #[error("Failed to access session file at {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file at {path} is corrupt: {source}")]
    Corrupt {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Pull a human readable message out of an error body.
///
/// APIs in the wild disagree on the key, so `error`, `message` and `detail`
/// are tried in order before falling back to the raw text.
pub fn extract_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "message", "detail"] {
            match value.get(key) {
                Some(serde_json::Value::String(s)) => return s.clone(),
                Some(other) if !other.is_null() => return other.to_string(),
                _ => {}
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no details provided".to_string()
    } else {
        trimmed.to_string()
    }
}
