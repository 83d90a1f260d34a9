//! Naive Bayes classifier over word-frequency statistics.
//!
//! A [`Classifier`] owns a fixed, ordered set of [`Class`] labels and one
//! [`ClassStatistics`] table per class. Documents are learned into those
//! tables and later scored against every class with one of three strategies:
//!
//! - [`Classifier::log_scores`]: log-space, robust against underflow
//! - [`Classifier::prob_scores`]: normalized probabilities, may underflow
//! - [`Classifier::safe_prob_scores`]: probabilities checked against log-space
//!
//! In TF-IDF mode the classifier is a two-state machine: documents are learned
//! while [`Phase::Training`], [`Classifier::convert_tf_idf`] moves it to
//! [`Phase::Converted`] exactly once, and only then may it score.
//!
//! # Example
//!
//! ```
//! use bayesian::classifier::Classifier;
//!
//! # fn main() -> bayesian::error::Result<()> {
//! let mut classifier = Classifier::new(["good", "bad"])?;
//! classifier.learn(&["free", "money"], "bad")?;
//! classifier.learn(&["hello", "world"], "good")?;
//!
//! let scores = classifier.log_scores(&["free", "money"])?;
//! assert_eq!(classifier.classes()[scores.best].as_str(), "bad");
//! assert!(scores.strict);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod learning;
pub mod mode;
pub mod scoring;
pub mod shared;
pub mod stats;
pub mod tfidf;

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::{BayesError, Result};

pub use config::ClassifierConfig;
pub use mode::{Mode, Phase};
pub use scoring::{SafeScores, Scores, find_max};
pub use shared::SharedClassifier;
pub use stats::{ClassStatistics, UNSEEN_WORD_PROBABILITY};
pub use tfidf::tf_idf_weight;

/// A label the classifier discriminates among.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Class(String);

impl Class {
    /// Create a new class label.
    pub fn new<S: Into<String>>(label: S) -> Self {
        Class(label.into())
    }

    /// The label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Class {
    fn from(label: &str) -> Self {
        Class(label.to_string())
    }
}

impl From<String> for Class {
    fn from(label: String) -> Self {
        Class(label)
    }
}

impl From<&Class> for Class {
    fn from(class: &Class) -> Self {
        class.clone()
    }
}

impl AsRef<str> for Class {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Class {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Naive Bayes classifier.
///
/// Learning requires `&mut self`; scoring only needs `&self`, so a trained
/// classifier can be shared between threads and scored concurrently. The
/// count of scored documents is the only state scoring mutates and it is kept
/// in an atomic owned by the instance.
#[derive(Debug)]
pub struct Classifier {
    /// Class labels in result-vector order.
    classes: Vec<Class>,
    /// Word statistics per class.
    stats: HashMap<Class, ClassStatistics>,
    /// Documents submitted to `learn` (plus per-class reloads).
    documents_learned: u64,
    /// Documents scored by any strategy.
    documents_seen: AtomicU64,
    /// Frequency or TF-IDF, and the TF-IDF phase.
    mode: Mode,
}

impl Classifier {
    /// Create a raw-frequency classifier.
    ///
    /// At least two unique classes are required.
    pub fn new<I, C>(classes: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Class>,
    {
        Self::with_mode(classes, Mode::Frequency)
    }

    /// Create a TF-IDF classifier in its training phase.
    ///
    /// At least two unique classes are required.
    pub fn new_tf_idf<I, C>(classes: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Class>,
    {
        Self::with_mode(classes, Mode::TfIdf(Phase::Training))
    }

    /// Create a classifier from a configuration.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self> {
        config.validate()?;
        let mode = if config.tf_idf {
            Mode::TfIdf(Phase::Training)
        } else {
            Mode::Frequency
        };
        Self::with_mode(config.classes.iter(), mode)
    }

    fn with_mode<I, C>(classes: I, mode: Mode) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Class>,
    {
        let classes: Vec<Class> = classes.into_iter().map(Into::into).collect();
        validate_classes(&classes)?;

        let stats = classes
            .iter()
            .map(|class| (class.clone(), ClassStatistics::new()))
            .collect();

        Ok(Classifier {
            classes,
            stats,
            documents_learned: 0,
            documents_seen: AtomicU64::new(0),
            mode,
        })
    }

    /// Reassemble a classifier from already validated parts.
    pub(crate) fn from_parts(
        classes: Vec<Class>,
        stats: HashMap<Class, ClassStatistics>,
        documents_learned: u64,
        documents_seen: u64,
        mode: Mode,
    ) -> Self {
        Classifier {
            classes,
            stats,
            documents_learned,
            documents_seen: AtomicU64::new(documents_seen),
            mode,
        }
    }

    /// Class labels in result-vector order.
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    /// Number of documents learned in the lifetime of this classifier.
    pub fn documents_learned(&self) -> u64 {
        self.documents_learned
    }

    /// Number of documents scored in the lifetime of this classifier.
    pub fn documents_seen(&self) -> u64 {
        self.documents_seen.load(Ordering::Relaxed)
    }

    /// Whether this classifier weights words by TF-IDF.
    pub fn is_tf_idf(&self) -> bool {
        self.mode.is_tf_idf()
    }

    /// Whether the one-shot TF-IDF conversion has run.
    pub fn is_converted(&self) -> bool {
        self.mode.is_converted()
    }

    /// Current mode and TF-IDF phase.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Total word weight learned per class, in class order.
    pub fn word_count(&self) -> Vec<u64> {
        self.classes
            .iter()
            .map(|class| self.stats[class].total)
            .collect()
    }

    /// Statistics of a single class.
    pub fn class_statistics(&self, class: &str) -> Result<&ClassStatistics> {
        self.stats
            .get(class)
            .ok_or_else(|| BayesError::unknown_class(class))
    }

    pub(crate) fn class_statistics_mut(&mut self, class: &str) -> Result<&mut ClassStatistics> {
        self.stats
            .get_mut(class)
            .ok_or_else(|| BayesError::unknown_class(class))
    }

    /// Swap in reloaded statistics for a class; counts as one learned document.
    pub(crate) fn replace_class_statistics(
        &mut self,
        class: &str,
        stats: ClassStatistics,
    ) -> Result<()> {
        *self.class_statistics_mut(class)? = stats;
        self.documents_learned += 1;
        Ok(())
    }

    /// Statistics in class order.
    pub(crate) fn ordered_statistics(&self) -> impl Iterator<Item = &ClassStatistics> {
        self.classes.iter().map(|class| &self.stats[class])
    }

    pub(crate) fn statistics(&self) -> &HashMap<Class, ClassStatistics> {
        &self.stats
    }

    pub(crate) fn mark_seen(&self) {
        self.documents_seen.fetch_add(1, Ordering::Relaxed);
    }

    /// Word probabilities per class for the given words.
    ///
    /// `matrix[i][j]` is the probability of the j-th word within the i-th class.
    pub fn word_frequencies<S: AsRef<str>>(&self, words: &[S]) -> Vec<Vec<f64>> {
        self.ordered_statistics()
            .map(|stats| {
                words
                    .iter()
                    .map(|word| stats.word_probability(word.as_ref()))
                    .collect()
            })
            .collect()
    }

    /// Every word observed in a class with its probability in that class.
    pub fn words_by_class(&self, class: &str) -> Result<HashMap<String, f64>> {
        Ok(self.class_statistics(class)?.word_probabilities())
    }
}

impl Clone for Classifier {
    fn clone(&self) -> Self {
        Classifier::from_parts(
            self.classes.clone(),
            self.stats.clone(),
            self.documents_learned,
            self.documents_seen(),
            self.mode,
        )
    }
}

/// Check that a class set has at least two labels and no duplicates.
pub(crate) fn validate_classes(classes: &[Class]) -> Result<()> {
    if classes.len() < 2 {
        return Err(BayesError::invalid_classes("provide at least two classes"));
    }

    let mut unique = HashSet::with_capacity(classes.len());
    for class in classes {
        if !unique.insert(class) {
            return Err(BayesError::invalid_classes(format!(
                "classes must be unique, '{class}' appears more than once"
            )));
        }
    }

    Ok(())
}
