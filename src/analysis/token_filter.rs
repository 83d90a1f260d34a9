//! Token filters transform a token stream after tokenization.

pub mod lowercase;

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Transforms a token stream.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}
