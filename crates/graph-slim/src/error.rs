//! Error types for the graph-slim library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, upstream response, and input validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for graph-slim operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
/// No failure is retried internally; the first error aborts the
/// in-progress fetch and is handed to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout, decoding).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (the token endpoint rejected the credentials).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// A non-OK HTTP response received while paginating.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] UpstreamError),

    /// Input validation errors (unsupported API version, bad endpoint URL,
    /// missing configuration). Detected before any network activity.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Response body could not be decoded as JSON.
    #[error("malformed response body: {message}")]
    Decode { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            TransportError::Decode {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint rejected the token request.
    #[error("token request failed: HTTP {status}: {detail}")]
    TokenRejected { status: u16, detail: String },
}

/// A non-OK HTTP response received from the resource API.
///
/// Carries the raw response body as diagnostic detail. The same body is
/// retained by the client and remains inspectable after failure via
/// [`GraphClient::last_response`](crate::GraphClient::last_response).
#[derive(Debug)]
pub struct UpstreamError {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body (JSON, or a string when the body was not JSON).
    pub body: serde_json::Value,
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.body)
    }
}

impl std::error::Error for UpstreamError {}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Unsupported Graph API version.
    #[error("unsupported API version '{value}': supported versions are \"v1.0\" and \"beta\"")]
    ApiVersion { value: String },

    /// Invalid Graph endpoint URL.
    #[error("invalid Graph endpoint '{value}': {reason}")]
    Endpoint { value: String, reason: String },

    /// A credential was neither supplied nor present in the environment.
    #[error("missing environment variable {name}")]
    MissingEnv { name: &'static str },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upstream_error_display_includes_status_and_body() {
        let err = UpstreamError {
            status: 404,
            body: json!({"error": {"message": "Not Found"}}),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("404"));
        assert!(rendered.contains("Not Found"));
    }

    #[test]
    fn upstream_error_display_includes_raw_text_body() {
        let err = UpstreamError {
            status: 502,
            body: serde_json::Value::String("Bad Gateway".to_string()),
        };
        assert!(err.to_string().contains("Bad Gateway"));
    }
}
