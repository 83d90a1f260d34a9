//! Accumulating training documents and pre-aggregated counts.

use log::{debug, trace};

use crate::classifier::Classifier;
use crate::error::Result;

impl Classifier {
    /// Learn a training document for the given class.
    ///
    /// Every token increments its word count and the class total, repeats
    /// counted multiply. Learning the same document twice doubles the counts.
    /// While a TF-IDF classifier is training, the document's term frequencies
    /// are sampled before counts are merged.
    ///
    /// Fails for an unknown class, or for a TF-IDF classifier that was
    /// already converted.
    pub fn learn<S: AsRef<str>>(&mut self, document: &[S], class: &str) -> Result<()> {
        self.mode.ensure_learnable()?;
        let sample = self.mode.samples_term_frequencies();

        let stats = self.class_statistics_mut(class)?;
        stats.add_document(document)?;
        if sample {
            stats.record_term_frequencies(document);
        }

        self.documents_learned += 1;
        trace!(
            "learned document of {} words as '{}' ({} learned)",
            document.len(),
            class,
            self.documents_learned
        );

        Ok(())
    }

    /// Add an externally aggregated word count to a class.
    ///
    /// Intended for merging precomputed statistics: no term-frequency sample
    /// is recorded and the learned document count is unchanged.
    pub fn observe(&mut self, word: &str, count: u64, class: &str) -> Result<()> {
        self.mode.ensure_learnable()?;
        self.class_statistics_mut(class)?.add_count(word, count)
    }

    /// Learn a batch of `(document, class)` pairs in order.
    ///
    /// Stops at the first failing pair; pairs before it stay learned.
    pub fn learn_all<'a, D, S>(&mut self, samples: D) -> Result<()>
    where
        D: IntoIterator<Item = (&'a [S], &'a str)>,
        S: AsRef<str> + 'a,
    {
        let before = self.documents_learned;
        for (document, class) in samples {
            self.learn(document, class)?;
        }
        debug!(
            "learned {} documents ({} total)",
            self.documents_learned - before,
            self.documents_learned
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::classifier::Classifier;
    use crate::error::BayesError;

    #[test]
    fn test_learn_counts_words() {
        let mut classifier = Classifier::new(["good", "bad"]).unwrap();
        classifier.learn(&["free", "money", "free"], "bad").unwrap();

        let stats = classifier.class_statistics("bad").unwrap();
        assert_eq!(stats.frequency("free"), Some(2.0));
        assert_eq!(stats.frequency("money"), Some(1.0));
        assert_eq!(stats.total(), 3);
        assert_eq!(classifier.word_count(), vec![0, 3]);
        assert_eq!(classifier.documents_learned(), 1);
    }

    #[test]
    fn test_learning_twice_doubles() {
        let mut classifier = Classifier::new(["good", "bad"]).unwrap();
        let doc = ["hello", "world", "hello"];
        classifier.learn(&doc, "good").unwrap();
        let once = classifier.class_statistics("good").unwrap().clone();

        classifier.learn(&doc, "good").unwrap();
        let twice = classifier.class_statistics("good").unwrap();

        assert_eq!(classifier.documents_learned(), 2);
        assert_eq!(twice.total(), once.total() * 2);
        for word in ["hello", "world"] {
            assert_eq!(
                twice.frequency(word).unwrap(),
                once.frequency(word).unwrap() * 2.0
            );
        }
    }

    #[test]
    fn test_learn_unknown_class() {
        let mut classifier = Classifier::new(["good", "bad"]).unwrap();
        let err = classifier.learn(&["x"], "ugly").unwrap_err();
        assert!(matches!(err, BayesError::UnknownClass(_)));
        assert_eq!(classifier.documents_learned(), 0);
    }

    #[test]
    fn test_tf_idf_learning_samples_term_frequencies() {
        let mut classifier = Classifier::new_tf_idf(["good", "bad"]).unwrap();
        classifier.learn(&["a", "b", "a", "a"], "good").unwrap();

        let stats = classifier.class_statistics("good").unwrap();
        assert_eq!(stats.tf_samples("a"), Some(&[0.75][..]));
        assert_eq!(stats.tf_samples("b"), Some(&[0.25][..]));
        assert_eq!(stats.frequency("a"), Some(3.0));
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn test_frequency_learning_does_not_sample() {
        let mut classifier = Classifier::new(["good", "bad"]).unwrap();
        classifier.learn(&["a", "b"], "good").unwrap();
        assert_eq!(
            classifier.class_statistics("good").unwrap().tf_samples("a"),
            None
        );
    }

    #[test]
    fn test_learn_after_conversion_fails() {
        let mut classifier = Classifier::new_tf_idf(["good", "bad"]).unwrap();
        classifier.learn(&["a"], "good").unwrap();
        classifier.convert_tf_idf().unwrap();

        let err = classifier.learn(&["a"], "good").unwrap_err();
        assert!(matches!(err, BayesError::InvalidOperation(_)));
        let err = classifier.observe("a", 3, "good").unwrap_err();
        assert!(matches!(err, BayesError::InvalidOperation(_)));
        assert_eq!(classifier.documents_learned(), 1);
    }

    #[test]
    fn test_observe() {
        let mut classifier = Classifier::new(["good", "bad"]).unwrap();
        classifier.observe("cheap", 7, "bad").unwrap();
        classifier.observe("cheap", 3, "bad").unwrap();

        let stats = classifier.class_statistics("bad").unwrap();
        assert_eq!(stats.frequency("cheap"), Some(10.0));
        assert_eq!(stats.total(), 10);
        assert_eq!(classifier.documents_learned(), 0);
    }

    #[test]
    fn test_observe_overflow_leaves_class_untouched() {
        let mut classifier = Classifier::new(["good", "bad"]).unwrap();
        classifier.observe("w", u64::MAX, "good").unwrap();

        let err = classifier.observe("w", 1, "good").unwrap_err();
        assert!(matches!(err, BayesError::InvalidOperation(_)));
        let err = classifier.learn(&["w"], "good").unwrap_err();
        assert!(matches!(err, BayesError::InvalidOperation(_)));

        assert_eq!(classifier.word_count(), vec![u64::MAX, 0]);
        assert_eq!(classifier.documents_learned(), 0);
    }

    #[test]
    fn test_observe_skips_sampling_in_tf_idf_mode() {
        let mut classifier = Classifier::new_tf_idf(["good", "bad"]).unwrap();
        classifier.observe("cheap", 5, "bad").unwrap();
        let stats = classifier.class_statistics("bad").unwrap();
        assert_eq!(stats.tf_samples("cheap"), None);
        assert_eq!(stats.frequency("cheap"), Some(5.0));
    }

    #[test]
    fn test_learn_all() {
        let mut classifier = Classifier::new(["good", "bad"]).unwrap();
        let spam = vec!["buy", "now"];
        let ham = vec!["see", "you"];
        classifier
            .learn_all([(spam.as_slice(), "bad"), (ham.as_slice(), "good")])
            .unwrap();
        assert_eq!(classifier.documents_learned(), 2);
        assert_eq!(classifier.word_count(), vec![2, 2]);
    }
}
