//! Error types for the registration form.
//!
//! # Design
//! `ApiError` covers what can go wrong while building a request. A
//! `Rejection` is the server's non-2xx answer; it keeps the status and the
//! server's message so the form can display it verbatim. `SubmitBlocked` is
//! returned before any request exists, and `TransportError` is what a
//! `Transport` reports when no response was obtained at all.

use crate::validate::ValidationErrors;

/// Errors returned by `RegistrationClient::build_submit`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The record could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// The server answered a submission with a non-2xx status.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("submission rejected (HTTP {status}): {message}")]
pub struct Rejection {
    pub status: u16,
    pub message: String,
}

/// Errors raised while editing a form.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The value's type does not fit the field, e.g. text for an integer field.
    #[error("{field} expects {expected}")]
    KindMismatch { field: String, expected: &'static str },
}

/// Reasons a submit action never produced a request.
#[derive(Debug, thiserror::Error)]
pub enum SubmitBlocked {
    /// One or more required fields are blank.
    #[error("{} field(s) need attention", .0.len())]
    Invalid(ValidationErrors),

    /// A submission from this form is still outstanding.
    #[error("a submission is already in progress")]
    InFlight,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// No response was obtained: connection refused, DNS failure, timeout, ...
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("transport failure: {0}")]
pub struct TransportError(pub String);

impl TransportError {
    pub fn new(reason: impl std::fmt::Display) -> Self {
        Self(reason.to_string())
    }
}
