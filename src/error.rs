//! Error types shared by the sync controller and its collaborators.
//!
//! Collaborator failures (network, HTTP status, malformed payloads, rejected
//! deletes) are converted into [`Error`] at the controller boundary and stored
//! as state; they never escape into rendering code. Errors are `Clone` so they
//! can travel inside `bubbletea-rs` messages.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a collection client or event channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The remote service could not be reached.
    #[error("network error: {0}")]
    Network(String),

    /// The remote service answered with a non-success status.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The server processed a delete but reported `success: false`.
    #[error("delete rejected: {0}")]
    Rejected(String),

    /// The realtime event channel is closed or could not be opened.
    #[error("event channel disconnected: {0}")]
    Disconnected(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Error::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::Status {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "request failed with status 503: unavailable"
        );
        assert_eq!(
            Error::Rejected("locked".into()).to_string(),
            "delete rejected: locked"
        );
    }

    #[test]
    fn test_json_errors_become_decode_errors() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Decode(_)));
    }
}
