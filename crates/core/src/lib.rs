//! Shared primitives for all Rust crates in roledeck.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across roledeck crates.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Failure categories for a single console operation chain.
///
/// Every operation resolves to exactly one of these; none is fatal to the
/// process and none is retried automatically. The previously presented
/// snapshot stays on screen when a chain fails.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Invalid or missing operator input, caught before any request is sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// The role service was reached and answered with a failure status.
    /// The message is the server-provided `error` field when present.
    #[error("role service error (status {status}): {message}")]
    Remote {
        /// HTTP status code returned by the role service.
        status: u16,
        /// Server-provided failure message, or a generic fallback.
        message: String,
    },

    /// The role service could not be reached, timed out, or returned a body
    /// that could not be decoded.
    #[error("transport error: {0}")]
    Transport(String),
}

impl ConsoleError {
    /// Generic message used when a failure response carries no `error` field.
    pub const GENERIC_REMOTE_MESSAGE: &'static str = "network response was not ok";
}

/// A validated non-empty UTF-8 string, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string, trimming surrounding whitespace.
    pub fn new(value: impl Into<String>) -> ConsoleResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ConsoleError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
