//! Analyzers combine a tokenizer with filters.
//!
//! - [`StandardAnalyzer`](standard::StandardAnalyzer) - Unicode words, lowercased
//! - [`SimpleAnalyzer`](simple::SimpleAnalyzer) - Whitespace split, text kept as is
//!
//! # Examples
//!
//! ```
//! use bayesian::analysis::{Analyzer, StandardAnalyzer};
//!
//! let analyzer = StandardAnalyzer::new();
//! let words = analyzer.words("Free MONEY, now!").unwrap();
//! assert_eq!(words, vec!["free", "money", "now"]);
//! ```

pub mod simple;
pub mod standard;

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Full text processing pipeline.
pub trait Analyzer: Send + Sync {
    /// Analyze text into a token stream.
    fn analyze(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;

    /// Analyze text into the word list a classifier learns or scores.
    fn words(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }
}
