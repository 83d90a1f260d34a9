//! Text analysis: turning raw text into the word lists the classifier learns.
//!
//! The classifier itself works on pre-tokenized documents. This module offers
//! a small pipeline for callers holding raw text:
//!
//! ```text
//! Raw Text → Tokenizer → Filter 1 … Filter N → Vec<String>
//! ```

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::Analyzer;
pub use analyzer::simple::SimpleAnalyzer;
pub use analyzer::standard::StandardAnalyzer;
