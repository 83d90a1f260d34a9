//! Simple analyzer: whitespace tokenization only.

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// Splits on whitespace and leaves tokens untouched.
///
/// Useful when documents were already normalized upstream.
#[derive(Clone, Debug, Default)]
pub struct SimpleAnalyzer {
    tokenizer: WhitespaceTokenizer,
}

impl SimpleAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Analyzer for SimpleAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.tokenizer.tokenize(text)
    }

    fn name(&self) -> &'static str {
        "simple"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_analyzer_keeps_case_and_punctuation() {
        let analyzer = SimpleAnalyzer::new();
        assert_eq!(
            analyzer.words("Free money!").unwrap(),
            vec!["Free", "money!"]
        );
    }
}
