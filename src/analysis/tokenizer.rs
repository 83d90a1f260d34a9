//! Tokenizers split text into tokens.
//!
//! - [`unicode_word::UnicodeWordTokenizer`] - Unicode word boundaries, drops punctuation
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace only
//!
//! # Examples
//!
//! ```
//! use bayesian::analysis::tokenizer::Tokenizer;
//! use bayesian::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

pub mod unicode_word;
pub mod whitespace;

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Converts text into a stream of tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
