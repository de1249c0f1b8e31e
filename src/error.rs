//! Error types for the rbo library.
//!
//! All fallible operations return [`RboError`] through the [`Result`] alias.
//! Precondition failures are reported eagerly, before any computation starts,
//! so a failed call never produces a partial result.
//!
//! # Examples
//!
//! ```
//! use rbo::error::{RboError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(RboError::invalid_parameter("p must be in (0, 1)"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for rbo operations.
#[derive(Error, Debug)]
pub enum RboError {
    /// A ranked list is not valid (e.g. it contains a duplicate element).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A call-time parameter is out of range (e.g. the weight `p`).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O errors (reading configuration files from the CLI)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with RboError.
pub type Result<T> = std::result::Result<T, RboError>;

impl RboError {
    /// Create a new invalid input error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        RboError::InvalidInput(msg.into())
    }

    /// Create a new invalid parameter error.
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        RboError::InvalidParameter(msg.into())
    }
}
