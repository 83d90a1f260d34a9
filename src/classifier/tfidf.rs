//! One-shot conversion of term-frequency samples into TF-IDF weights.
//!
//! Each sampled term frequency `tf` becomes
//! `ln(1 + tf) * ln(1 + documents_learned / class_total)` and the weights of
//! a word are summed into its class frequency, replacing the raw count.
//!
//! The inverse part divides by the class's raw token total, not by the number
//! of documents containing the word. The class total itself is left as is, so
//! converted word probabilities divide a TF-IDF sum by a token count.

use log::debug;

use crate::classifier::Classifier;
use crate::classifier::stats::ClassStatistics;
use crate::error::Result;

/// TF-IDF weight of one term-frequency sample.
pub fn tf_idf_weight(tf: f64, documents_learned: u64, class_total: u64) -> f64 {
    tf.ln_1p() * (documents_learned as f64 / class_total as f64).ln_1p()
}

impl ClassStatistics {
    /// Rewrite samples in place and store their sums as word frequencies.
    fn apply_tf_idf(&mut self, documents_learned: u64) {
        let total = self.total;
        for (word, samples) in self.tf_samples.iter_mut() {
            let mut sum = 0.0;
            for sample in samples.iter_mut() {
                *sample = tf_idf_weight(*sample, documents_learned, total);
                sum += *sample;
            }
            self.frequencies.insert(word.clone(), sum);
        }
    }
}

impl Classifier {
    /// Convert every class's term-frequency samples to TF-IDF weights.
    ///
    /// Call once, after all training documents were learned. Afterwards the
    /// classifier can score but no longer learn. Fails on a second call and on
    /// a frequency classifier.
    pub fn convert_tf_idf(&mut self) -> Result<()> {
        self.mode.convert()?;

        let learned = self.documents_learned;
        let mut words = 0;
        for stats in self.stats.values_mut() {
            stats.apply_tf_idf(learned);
            words += stats.tf_samples.len();
        }

        debug!(
            "converted {} sampled words to TF-IDF over {} documents",
            words, learned
        );
        Ok(())
    }
}
