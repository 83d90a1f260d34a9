//! Scoring documents against every class.
//!
//! Priors are each class's share of the accumulated word weight and are
//! recomputed from current totals on every call. Three strategies are
//! offered:
//!
//! - log-space scores, which cannot underflow
//! - normalized probabilities, which can collapse to zero on long documents
//!   or many unseen words
//! - probabilities cross-checked against log-space, which report an
//!   [`UnderflowError`] whenever the two disagree on the best class or on
//!   whether it is a strict maximum
//!
//! Every scoring call counts one seen document.

use log::warn;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::classifier::{Class, Classifier};
use crate::error::{BayesError, Result, UnderflowError};

/// Scores of one document, indexed like [`Classifier::classes`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    /// One score per class.
    pub scores: Vec<f64>,
    /// Index of the first maximal score.
    pub best: usize,
    /// False when another class ties the best score.
    pub strict: bool,
}

impl Scores {
    fn from_scores(scores: Vec<f64>) -> Self {
        let (best, strict) = find_max(&scores);
        Scores {
            scores,
            best,
            strict,
        }
    }

    /// Label of the best class.
    pub fn best_class<'a>(&self, classes: &'a [Class]) -> &'a Class {
        &classes[self.best]
    }
}

/// Result of [`Classifier::safe_prob_scores`].
///
/// The probability scores are returned even when underflow is detected, but
/// they should not be trusted then; `log_scores` holds the underflow-free
/// ranking to fall back on.
#[derive(Debug, Clone, PartialEq)]
pub struct SafeScores {
    /// Normalized probability scores.
    pub scores: Scores,
    /// Log-space scores of the same document.
    pub log_scores: Scores,
    /// Set when the two representations disagree.
    pub underflow: Option<UnderflowError>,
}

impl SafeScores {
    pub fn is_underflow(&self) -> bool {
        self.underflow.is_some()
    }

    /// The probability scores, or the underflow error.
    pub fn into_result(self) -> Result<Scores> {
        match self.underflow {
            Some(err) => Err(BayesError::Underflow(err)),
            None => Ok(self.scores),
        }
    }
}

/// Index of the first maximum and whether it is unique.
///
/// A later strictly greater value takes over and resets `strict`; a later
/// equal value only clears `strict`.
pub fn find_max(scores: &[f64]) -> (usize, bool) {
    let mut best = 0;
    let mut strict = true;
    for i in 1..scores.len() {
        if scores[best] < scores[i] {
            best = i;
            strict = true;
        } else if scores[best] == scores[i] {
            strict = false;
        }
    }
    (best, strict)
}

impl Classifier {
    /// P(class) for every class, or all zeros before anything was learned.
    pub fn priors(&self) -> Vec<f64> {
        let totals: Vec<f64> = self
            .ordered_statistics()
            .map(|stats| stats.total as f64)
            .collect();
        let sum: f64 = totals.iter().sum();
        if sum == 0.0 {
            return totals;
        }
        totals.into_iter().map(|total| total / sum).collect()
    }

    /// Log-likelihood scores: `ln P(class) + Σ ln P(word | class)`.
    ///
    /// Scores are negative but proportional to the likelihood that the
    /// document belongs to each class.
    pub fn log_scores<S: AsRef<str>>(&self, document: &[S]) -> Result<Scores> {
        self.mode.ensure_scorable()?;

        let scores = self
            .ordered_statistics()
            .zip(self.priors())
            .map(|(stats, prior)| {
                document.iter().fold(prior.ln(), |score, word| {
                    score + stats.word_probability(word.as_ref()).ln()
                })
            })
            .collect();

        self.mark_seen();
        Ok(Scores::from_scores(scores))
    }

    /// Normalized probabilities: `P(class) * Π P(word | class)`, divided by
    /// their sum.
    ///
    /// Many small word probabilities can underflow to zero and reorder the
    /// classes; see [`Classifier::safe_prob_scores`].
    pub fn prob_scores<S: AsRef<str>>(&self, document: &[S]) -> Result<Scores> {
        self.mode.ensure_scorable()?;

        let raw: Vec<f64> = self
            .ordered_statistics()
            .zip(self.priors())
            .map(|(stats, prior)| prior * stats.document_probability(document))
            .collect();

        self.mark_seen();
        Ok(Scores::from_scores(normalize(raw)))
    }

    /// Probability scores checked against log-space scores in the same pass.
    ///
    /// Whenever no underflow is reported, the probability classification
    /// matches the underflow-free log-space classification.
    pub fn safe_prob_scores<S: AsRef<str>>(&self, document: &[S]) -> Result<SafeScores> {
        self.mode.ensure_scorable()?;

        let priors = self.priors();
        let mut raw = Vec::with_capacity(priors.len());
        let mut logs = Vec::with_capacity(priors.len());
        for (stats, prior) in self.ordered_statistics().zip(priors) {
            let mut score = prior;
            let mut log_score = prior.ln();
            for word in document {
                let p = stats.word_probability(word.as_ref());
                score *= p;
                log_score += p.ln();
            }
            raw.push(score);
            logs.push(log_score);
        }

        let scores = Scores::from_scores(normalize(raw));
        let log_scores = Scores::from_scores(logs);

        let underflow = if scores.best != log_scores.best || scores.strict != log_scores.strict {
            warn!(
                "possible underflow scoring {} words: probability picks {} (strict: {}), log-space picks {} (strict: {})",
                document.len(),
                scores.best,
                scores.strict,
                log_scores.best,
                log_scores.strict
            );
            Some(UnderflowError)
        } else {
            None
        };

        self.mark_seen();
        Ok(SafeScores {
            scores,
            log_scores,
            underflow,
        })
    }

    /// Best class of a document by log-space score.
    pub fn classify<S: AsRef<str>>(&self, document: &[S]) -> Result<(&Class, bool)> {
        let scores = self.log_scores(document)?;
        Ok((scores.best_class(&self.classes), scores.strict))
    }

    /// Log-space scores for many documents, scored in parallel.
    pub fn log_scores_batch<D, S>(&self, documents: &[D]) -> Result<Vec<Scores>>
    where
        D: AsRef<[S]> + Sync,
        S: AsRef<str>,
    {
        documents
            .par_iter()
            .map(|document| self.log_scores(document.as_ref()))
            .collect()
    }

    /// Probability scores for many documents, scored in parallel.
    pub fn prob_scores_batch<D, S>(&self, documents: &[D]) -> Result<Vec<Scores>>
    where
        D: AsRef<[S]> + Sync,
        S: AsRef<str>,
    {
        documents
            .par_iter()
            .map(|document| self.prob_scores(document.as_ref()))
            .collect()
    }
}

fn normalize(mut scores: Vec<f64>) -> Vec<f64> {
    let sum: f64 = scores.iter().sum();
    for score in scores.iter_mut() {
        *score /= sum;
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::UNSEEN_WORD_PROBABILITY as UNSEEN;

    fn trained() -> Classifier {
        let mut classifier = Classifier::new(["good", "bad"]).unwrap();
        classifier
            .learn(&["tall", "handsome", "rich"], "good")
            .unwrap();
        classifier.learn(&["bald", "poor", "ugly", "poor"], "bad").unwrap();
        classifier
    }

    #[test]
    fn test_find_max() {
        assert_eq!(find_max(&[3.0, 5.0, 5.0, 1.0]), (1, false));
        assert_eq!(find_max(&[1.0, 2.0, 3.0]), (2, true));
        assert_eq!(find_max(&[4.0, 4.0, 9.0]), (2, true));
        assert_eq!(find_max(&[7.0]), (0, true));
    }

    #[test]
    fn test_priors() {
        let classifier = Classifier::new(["good", "bad", "ugly"]).unwrap();
        assert_eq!(classifier.priors(), vec![0.0, 0.0, 0.0]);

        let classifier = trained();
        let priors = classifier.priors();
        assert!((priors[0] - 3.0 / 7.0).abs() < 1e-12);
        assert!((priors[1] - 4.0 / 7.0).abs() < 1e-12);
        assert!((priors.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_log_scores() {
        let classifier = trained();
        let scores = classifier.log_scores(&["tall", "girl"]).unwrap();

        let expected_good =
            (3.0f64 / 7.0).ln() + (1.0f64 / 3.0).ln() + UNSEEN.ln();
        let expected_bad = (4.0f64 / 7.0).ln() + UNSEEN.ln() + UNSEEN.ln();
        assert!((scores.scores[0] - expected_good).abs() < 1e-9);
        assert!((scores.scores[1] - expected_bad).abs() < 1e-9);
        assert_eq!(scores.best, 0);
        assert!(scores.strict);
        assert_eq!(classifier.documents_seen(), 1);
    }

    #[test]
    fn test_prob_scores_normalized() {
        let classifier = trained();
        let scores = classifier.prob_scores(&["poor", "rich"]).unwrap();
        assert!((scores.scores.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(scores.best, 1);
        assert!(scores.strict);

        let logs = classifier.log_scores(&["poor", "rich"]).unwrap();
        assert_eq!(logs.best, scores.best);
        assert_eq!(classifier.documents_seen(), 2);
    }

    #[test]
    fn test_safe_prob_scores_agrees_on_short_document() {
        let classifier = trained();
        let safe = classifier.safe_prob_scores(&["tall", "rich"]).unwrap();
        assert!(!safe.is_underflow());
        assert_eq!(safe.scores.best, 0);
        assert_eq!(safe.log_scores.best, 0);
        assert_eq!(safe.clone().into_result().unwrap(), safe.scores);
        assert_eq!(classifier.documents_seen(), 1);
    }

    #[test]
    fn test_safe_prob_scores_detects_underflow() {
        let classifier = trained();
        // Every class multiplies down to 0.0, so all probabilities become NaN
        // while log-space still prefers the class with the larger prior.
        let document = vec!["unseen"; 40];

        let probs = classifier.prob_scores(&document).unwrap();
        let logs = classifier.log_scores(&document).unwrap();
        assert_eq!(logs.best, 1);
        assert!(logs.strict);
        assert_ne!(probs.best, logs.best);

        let safe = classifier.safe_prob_scores(&document).unwrap();
        assert!(safe.is_underflow());
        assert_eq!(safe.log_scores.best, 1);
        assert!(safe.into_result().unwrap_err().is_underflow());
    }

    #[test]
    fn test_classify() {
        let classifier = trained();
        let (class, strict) = classifier.classify(&["bald", "poor"]).unwrap();
        assert_eq!(class.as_str(), "bad");
        assert!(strict);
    }

    #[test]
    fn test_scoring_requires_conversion() {
        let mut classifier = Classifier::new_tf_idf(["good", "bad"]).unwrap();
        classifier.learn(&["a"], "good").unwrap();
        classifier.learn(&["b"], "bad").unwrap();

        assert!(matches!(
            classifier.log_scores(&["a"]),
            Err(BayesError::NotConverted)
        ));
        assert!(matches!(
            classifier.prob_scores(&["a"]),
            Err(BayesError::NotConverted)
        ));
        assert!(matches!(
            classifier.safe_prob_scores(&["a"]),
            Err(BayesError::NotConverted)
        ));
        assert_eq!(classifier.documents_seen(), 0);

        classifier.convert_tf_idf().unwrap();
        let scores = classifier.log_scores(&["a"]).unwrap();
        assert_eq!(scores.best, 0);
        assert_eq!(classifier.documents_seen(), 1);
    }

    #[test]
    fn test_batch_scoring() {
        let classifier = trained();
        let documents = vec![vec!["tall", "rich"], vec!["poor", "bald"], vec!["rich"]];

        let scores = classifier.log_scores_batch(&documents).unwrap();
        let best: Vec<usize> = scores.iter().map(|s| s.best).collect();
        assert_eq!(best, vec![0, 1, 0]);

        let probs = classifier.prob_scores_batch(&documents).unwrap();
        assert_eq!(probs.len(), 3);
        assert_eq!(classifier.documents_seen(), 6);
    }
}
