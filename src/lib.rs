//! # bayesian
//!
//! A Naive Bayes text classifier for Rust.
//!
//! ## Features
//!
//! - Frequency and TF-IDF word weighting
//! - Log-space, probability and underflow-checked scoring
//! - Thread-safe sharing with concurrent scoring
//! - Binary and JSON persistence, whole-model or per class
//! - Text analysis pipeline for turning raw text into words
//!
//! ## Example
//!
//! ```
//! use bayesian::prelude::*;
//!
//! # fn main() -> bayesian::error::Result<()> {
//! let mut classifier = Classifier::new(["good", "bad"])?;
//! classifier.learn(&["tall", "handsome", "rich"], "good")?;
//! classifier.learn(&["bald", "poor", "ugly"], "bad")?;
//!
//! let scores = classifier.log_scores(&["tall", "girl"])?;
//! assert_eq!(scores.best_class(classifier.classes()).as_str(), "good");
//! assert!(scores.strict);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod error;
pub mod storage;

pub mod prelude {
    pub use crate::analysis::{Analyzer, SimpleAnalyzer, StandardAnalyzer};
    pub use crate::classifier::{
        Class, Classifier, ClassifierConfig, Mode, Phase, SafeScores, Scores, SharedClassifier,
    };
    pub use crate::error::{BayesError, Result};
    pub use crate::storage::Format;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
