//! Error types for the intentbot library.
//!
//! All errors are represented by the [`IntentBotError`] enum. The catalog,
//! data and tag variants are startup failures: once a model has been fitted,
//! classification itself cannot fail.
//!
//! # Examples
//!
//! ```
//! use intentbot::error::{IntentBotError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(IntentBotError::malformed_catalog("intent #0 has no patterns"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for intentbot operations.
#[derive(Error, Debug)]
pub enum IntentBotError {
    /// The catalog definition is missing fields, has duplicated tags, or
    /// contains an intent without patterns or responses.
    #[error("Malformed catalog: {0}")]
    MalformedCatalog(String),

    /// The catalog cannot support a classifier with two or more classes.
    #[error("Insufficient training data: {0}")]
    InsufficientData(String),

    /// A tag was requested that the catalog does not define.
    #[error("Unknown tag: {0}")]
    UnknownTag(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid configuration values.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with IntentBotError.
pub type Result<T> = std::result::Result<T, IntentBotError>;

impl IntentBotError {
    /// Create a new malformed catalog error.
    pub fn malformed_catalog<S: Into<String>>(msg: S) -> Self {
        IntentBotError::MalformedCatalog(msg.into())
    }

    /// Create a new insufficient data error.
    pub fn insufficient_data<S: Into<String>>(msg: S) -> Self {
        IntentBotError::InsufficientData(msg.into())
    }

    /// Create a new unknown tag error.
    pub fn unknown_tag<S: Into<String>>(tag: S) -> Self {
        IntentBotError::UnknownTag(tag.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        IntentBotError::Analysis(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        IntentBotError::InvalidConfig(msg.into())
    }
}
