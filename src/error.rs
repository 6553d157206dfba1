//! Error types for the builder.
//!
//! Every fallible builder operation returns [`Result`], whose error type is
//! [`BuilderError`]. Errors are raised at the call that broke a composition
//! rule; nothing is caught or retried inside the library.
//!
//! # Examples
//!
//! ```
//! use elastic_builder::error::{BuilderError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(BuilderError::unsupported("format is not supported in IpRangeAggregation"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::node::Family;

/// The main error type for builder operations.
#[derive(Error, Debug)]
pub enum BuilderError {
    /// A nested value does not belong to the clause family its slot requires.
    #[error("Type mismatch: expected a {expected} clause, got {found}")]
    TypeMismatch { expected: Family, found: String },

    /// A value was outside a fixed permitted set.
    #[error("Invalid value for '{param}': got '{value}', expected one of {allowed:?}")]
    InvalidEnumValue {
        param: String,
        value: String,
        allowed: Vec<String>,
    },

    /// A composite entry lacks every key from its required set.
    #[error("Missing required keys in {context}: at least one of {keys:?} must be present")]
    MissingRequiredKeys { context: String, keys: Vec<String> },

    /// The method is disabled on this clause variant.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// An argument had the wrong shape.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// I/O errors (CLI output files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with BuilderError.
pub type Result<T> = std::result::Result<T, BuilderError>;

impl BuilderError {
    /// Create a new type mismatch error.
    pub fn type_mismatch<S: Into<String>>(expected: Family, found: S) -> Self {
        BuilderError::TypeMismatch {
            expected,
            found: found.into(),
        }
    }

    /// Create a new invalid enum value error.
    pub fn invalid_enum<P, V>(param: P, value: V, allowed: &[&str]) -> Self
    where
        P: Into<String>,
        V: Into<String>,
    {
        BuilderError::InvalidEnumValue {
            param: param.into(),
            value: value.into(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Create a new missing required keys error.
    pub fn missing_keys<S: Into<String>>(context: S, keys: &[&str]) -> Self {
        BuilderError::MissingRequiredKeys {
            context: context.into(),
            keys: keys.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Create a new unsupported operation error.
    pub fn unsupported<S: Into<String>>(msg: S) -> Self {
        BuilderError::UnsupportedOperation(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        BuilderError::InvalidArgument(msg.into())
    }
}
