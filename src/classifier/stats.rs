//! Per-class word statistics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{BayesError, Result};

/// Probability assigned to a word never observed in a class.
///
/// Only the numerator is floored; the denominator is never smoothed.
pub const UNSEEN_WORD_PROBABILITY: f64 = 0.00000000001;

/// Word-frequency table of one class.
///
/// Field names on the wire are `freqs`, `freqTfs` and `total`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassStatistics {
    /// Accumulated weight per word: a count, or a TF-IDF sum after conversion.
    #[serde(rename = "freqs")]
    pub(crate) frequencies: HashMap<String, f64>,
    /// Per-document term frequencies, recorded only while training TF-IDF.
    #[serde(rename = "freqTfs", default)]
    pub(crate) tf_samples: HashMap<String, Vec<f64>>,
    /// Sum of all word weights observed for the class.
    pub(crate) total: u64,
}

impl ClassStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// P(word | class), or [`UNSEEN_WORD_PROBABILITY`] for unseen words.
    pub fn word_probability(&self, word: &str) -> f64 {
        match self.frequencies.get(word) {
            Some(value) => value / self.total as f64,
            None => UNSEEN_WORD_PROBABILITY,
        }
    }

    /// P(document | class) as the product of word probabilities.
    ///
    /// Prone to underflow for long documents. An empty document yields 1.
    pub fn document_probability<S: AsRef<str>>(&self, words: &[S]) -> f64 {
        words
            .iter()
            .map(|word| self.word_probability(word.as_ref()))
            .product()
    }

    /// Accumulated weight of a word, if it was observed.
    pub fn frequency(&self, word: &str) -> Option<f64> {
        self.frequencies.get(word).copied()
    }

    /// Term-frequency samples of a word (TF-IDF weights once converted).
    pub fn tf_samples(&self, word: &str) -> Option<&[f64]> {
        self.tf_samples.get(word).map(Vec::as_slice)
    }

    /// Sum of all word weights observed for the class.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct words observed.
    pub fn vocabulary_size(&self) -> usize {
        self.frequencies.len()
    }

    /// Every observed word with its probability in this class.
    pub fn word_probabilities(&self) -> HashMap<String, f64> {
        let total = self.total as f64;
        self.frequencies
            .iter()
            .map(|(word, value)| (word.clone(), value / total))
            .collect()
    }

    /// Count every token of a document, repeats included.
    ///
    /// Fails without changing anything if the class total would overflow.
    pub(crate) fn add_document<S: AsRef<str>>(&mut self, document: &[S]) -> Result<()> {
        self.total = self.checked_total(document.len() as u64)?;
        for word in document {
            *self
                .frequencies
                .entry(word.as_ref().to_string())
                .or_insert(0.0) += 1.0;
        }
        Ok(())
    }

    /// Add a pre-aggregated count for a word.
    ///
    /// Fails without changing anything if the class total would overflow.
    pub(crate) fn add_count(&mut self, word: &str, count: u64) -> Result<()> {
        self.total = self.checked_total(count)?;
        *self.frequencies.entry(word.to_string()).or_insert(0.0) += count as f64;
        Ok(())
    }

    fn checked_total(&self, count: u64) -> Result<u64> {
        self.total.checked_add(count).ok_or_else(|| {
            BayesError::invalid_operation(format!(
                "class total {} cannot grow by {} without overflowing",
                self.total, count
            ))
        })
    }

    /// Append `occurrences / document_length` of every distinct word.
    pub(crate) fn record_term_frequencies<S: AsRef<str>>(&mut self, document: &[S]) {
        if document.is_empty() {
            return;
        }

        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for word in document {
            *occurrences.entry(word.as_ref()).or_insert(0) += 1;
        }

        let length = document.len() as f64;
        for (word, count) in occurrences {
            self.tf_samples
                .entry(word.to_string())
                .or_default()
                .push(count as f64 / length);
        }
    }
}
