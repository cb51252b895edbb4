//! Error model.
//!
//! `DomainError` covers deterministic parse/validation failures of local
//! values. `ApiError` is the tagged result of talking to the remote API; every
//! controller surfaces it as state or a notification, never as a panic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used for local domain values.
pub type DomainResult<T> = Result<T, DomainError>;

/// Result type used across the API boundary.
pub type ApiResult<T> = Result<T, ApiError>;

/// Domain-level error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A status string is not part of the resource's status enum.
    #[error("unknown status `{value}` (expected one of: {expected})")]
    UnknownStatus { value: String, expected: String },

    /// A resource name did not match any known resource kind.
    #[error("unknown resource `{0}`")]
    UnknownResource(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

/// Field-keyed validation messages (`{ "productName": "required" }`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Coarse classification of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Validation,
    Server,
    Decode,
    Busy,
}

/// Error observed by the client when calling the remote API.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The API answered with a non-2xx status.
    #[error("server error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },

    /// Client-side validation blocked the request before it was sent.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),

    /// A 2xx response body did not have the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The same operation is already in flight.
    #[error("operation already in progress")]
    Busy,
}

impl ApiError {
    pub fn server(status: u16, message: Option<String>) -> Self {
        Self::Server { status, message }
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Server { .. } => ErrorKind::Server,
            ApiError::Validation(_) => ErrorKind::Validation,
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::Busy => ErrorKind::Busy,
        }
    }

    /// Message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref().filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }

    /// Text shown to the operator: the server's message verbatim, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::server(400, Some("Product code already exists".into()));
        assert_eq!(err.user_message("Failed to create product"), "Product code already exists");
        assert_eq!(err.kind(), ErrorKind::Server);
    }

    #[test]
    fn user_message_falls_back_when_absent_or_blank() {
        let blank = ApiError::server(500, Some("   ".into()));
        assert_eq!(blank.user_message("Failed to fetch orders"), "Failed to fetch orders");

        let network = ApiError::network("connection refused");
        assert_eq!(network.user_message("Failed to fetch orders"), "Failed to fetch orders");
        assert_eq!(network.kind(), ErrorKind::Network);
    }

    #[test]
    fn field_errors_are_ordered_by_field() {
        let mut errors = FieldErrors::new();
        errors.insert("productPrice", "required");
        errors.insert("productName", "required");
        let keys: Vec<_> = errors.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["productName", "productPrice"]);
        assert_eq!(ApiError::Validation(errors).to_string(), "validation failed for 2 field(s)");
    }
}
