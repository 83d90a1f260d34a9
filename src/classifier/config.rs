//! Configuration for building a classifier.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classifier::{Class, validate_classes};
use crate::error::Result;

/// Configuration for a [`Classifier`](crate::classifier::Classifier).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Class labels in result-vector order. At least two, all unique.
    pub classes: Vec<Class>,

    /// Weight words by TF-IDF instead of raw counts.
    #[serde(default)]
    pub tf_idf: bool,
}

impl ClassifierConfig {
    pub fn new<I, C>(classes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Class>,
    {
        ClassifierConfig {
            classes: classes.into_iter().map(Into::into).collect(),
            tf_idf: false,
        }
    }

    pub fn with_tf_idf(mut self, tf_idf: bool) -> Self {
        self.tf_idf = tf_idf;
        self
    }

    /// Check the class set.
    pub fn validate(&self) -> Result<()> {
        validate_classes(&self.classes)
    }

    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ClassifierConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}
