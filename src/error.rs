//! Error types for the bayesian library.
//!
//! All errors are represented by the [`BayesError`] enum. Misuse of the
//! classifier lifecycle (bad class sets, scoring before TF-IDF conversion,
//! converting twice) is reported through it instead of panicking.
//!
//! # Examples
//!
//! ```
//! use bayesian::error::{BayesError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(BayesError::invalid_operation("already converted"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// Signals that probability-space scoring disagreed with log-space scoring.
///
/// Returned alongside the untrusted probability scores by
/// [`Classifier::safe_prob_scores`](crate::classifier::Classifier::safe_prob_scores).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("possible underflow detected")]
pub struct UnderflowError;

/// The main error type for bayesian operations.
#[derive(Error, Debug)]
pub enum BayesError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The class set given at construction is malformed
    #[error("Invalid classes: {0}")]
    InvalidClasses(String),

    /// A class label that is not part of the classifier's class set
    #[error("Unknown class: {0}")]
    UnknownClass(String),

    /// Scoring a TF-IDF classifier before its frequencies were converted
    #[error("TF-IDF classifier has not been converted; call convert_tf_idf before scoring")]
    NotConverted,

    /// Lifecycle misuse such as converting twice
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Probability-space scores are not consistent with log-space scores
    #[error("Underflow: {0}")]
    Underflow(#[from] UnderflowError),

    /// Classifier state could not be encoded
    #[error("Encode error: {0}")]
    Encode(String),

    /// Persisted state is malformed, truncated or structurally invalid
    #[error("Decode error: {0}")]
    Decode(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with BayesError.
pub type Result<T> = std::result::Result<T, BayesError>;

impl BayesError {
    /// Create a new invalid classes error.
    pub fn invalid_classes<S: Into<String>>(msg: S) -> Self {
        BayesError::InvalidClasses(msg.into())
    }

    /// Create a new unknown class error.
    pub fn unknown_class<S: Into<String>>(class: S) -> Self {
        BayesError::UnknownClass(class.into())
    }

    /// Create a new invalid operation error.
    pub fn invalid_operation<S: Into<String>>(msg: S) -> Self {
        BayesError::InvalidOperation(msg.into())
    }

    /// Create a new encode error.
    pub fn encode<S: Into<String>>(msg: S) -> Self {
        BayesError::Encode(msg.into())
    }

    /// Create a new decode error.
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        BayesError::Decode(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        BayesError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        BayesError::Other(format!("Invalid argument: {}", msg.into()))
    }

    /// Whether this error reports a detected underflow.
    pub fn is_underflow(&self) -> bool {
        matches!(self, BayesError::Underflow(_))
    }
}
