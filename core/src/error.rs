//! Error types for the todo API client and store.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging. Connection failures never reach the
//! status check and surface as `Transport`.

use thiserror::Error;

/// Errors returned by the API client and transports.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404; the requested todo does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    /// True for connection failures and unexpected server statuses.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::HttpError { .. } | ApiError::Transport(_))
    }
}

/// Failures recorded by `TodoStore`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Rejected locally, no request was sent.
    #[error("todo body must not be empty")]
    EmptyBody,

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_class_covers_transport_and_status() {
        assert!(ApiError::Transport("refused".into()).is_network());
        assert!(ApiError::HttpError { status: 502, body: String::new() }.is_network());
        assert!(!ApiError::NotFound.is_network());
        assert!(!ApiError::DeserializationError("eof".into()).is_network());
    }

    #[test]
    fn store_error_displays_inner_api_error() {
        let err = StoreError::from(ApiError::NotFound);
        assert_eq!(err.to_string(), "resource not found");
    }
}
