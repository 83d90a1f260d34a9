//! A classifier shared between writers and concurrent scorers.
//!
//! Learning and converting mutate the frequency tables without any internal
//! synchronization, so a live system that keeps learning while it scores
//! must serialize access. [`SharedClassifier`] does this with a readers-writer
//! lock: learning takes the write lock, scoring the read lock.

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::classifier::{Classifier, SafeScores, Scores};
use crate::error::Result;

/// Cloneable handle to a classifier behind a readers-writer lock.
#[derive(Debug, Clone)]
pub struct SharedClassifier {
    inner: Arc<RwLock<Classifier>>,
}

impl SharedClassifier {
    pub fn new(classifier: Classifier) -> Self {
        SharedClassifier {
            inner: Arc::new(RwLock::new(classifier)),
        }
    }

    pub fn learn<S: AsRef<str>>(&self, document: &[S], class: &str) -> Result<()> {
        self.inner.write().learn(document, class)
    }

    pub fn observe(&self, word: &str, count: u64, class: &str) -> Result<()> {
        self.inner.write().observe(word, count, class)
    }

    pub fn convert_tf_idf(&self) -> Result<()> {
        self.inner.write().convert_tf_idf()
    }

    pub fn log_scores<S: AsRef<str>>(&self, document: &[S]) -> Result<Scores> {
        self.inner.read().log_scores(document)
    }

    pub fn prob_scores<S: AsRef<str>>(&self, document: &[S]) -> Result<Scores> {
        self.inner.read().prob_scores(document)
    }

    pub fn safe_prob_scores<S: AsRef<str>>(&self, document: &[S]) -> Result<SafeScores> {
        self.inner.read().safe_prob_scores(document)
    }

    pub fn documents_learned(&self) -> u64 {
        self.inner.read().documents_learned()
    }

    pub fn documents_seen(&self) -> u64 {
        self.inner.read().documents_seen()
    }

    /// Hold the read lock for several read-only operations.
    pub fn read(&self) -> RwLockReadGuard<'_, Classifier> {
        self.inner.read()
    }

    /// Hold the write lock for several mutations.
    pub fn write(&self) -> RwLockWriteGuard<'_, Classifier> {
        self.inner.write()
    }

    /// Unwrap the classifier if this is the last handle.
    pub fn try_unwrap(self) -> std::result::Result<Classifier, SharedClassifier> {
        Arc::try_unwrap(self.inner)
            .map(|lock| lock.into_inner())
            .map_err(|inner| SharedClassifier { inner })
    }
}

impl From<Classifier> for SharedClassifier {
    fn from(classifier: Classifier) -> Self {
        SharedClassifier::new(classifier)
    }
}
