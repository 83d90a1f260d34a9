//! Standard analyzer: Unicode word tokenization followed by lowercasing.

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
use crate::error::Result;

/// Splits on Unicode word boundaries, drops punctuation, lowercases.
#[derive(Clone, Debug, Default)]
pub struct StandardAnalyzer {
    tokenizer: UnicodeWordTokenizer,
    lowercase: LowercaseFilter,
}

impl StandardAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        let tokens = self.tokenizer.tokenize(text)?;
        self.lowercase.filter(tokens)
    }

    fn name(&self) -> &'static str {
        "standard"
    }
}
