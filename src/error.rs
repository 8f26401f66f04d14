//! Error types for the named-events library.

use thiserror::Error;

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for named-events.
///
/// The taxonomy is deliberately small: registration and removal against
/// unknown events degrade to no-ops rather than erroring, so the only
/// failure surface left is calling a proxy method that its event map never
/// defined.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The proxy exposes no method under this name
    #[error("no proxy method named `{method}`")]
    UnknownMethod {
        /// The method name that was looked up
        method: String,
    },
}

impl Error {
    /// Create an [`Error::UnknownMethod`] for the given method name
    pub fn unknown_method(method: impl Into<String>) -> Self {
        Error::UnknownMethod {
            method: method.into(),
        }
    }
}
