//! Learning mode and the one-way TF-IDF phase transition.

use serde::{Deserialize, Serialize};

use crate::error::{BayesError, Result};

/// Phase of a TF-IDF classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Documents are being learned and term frequencies sampled.
    Training,
    /// Samples were converted to TF-IDF weights; scoring is allowed.
    Converted,
}

/// How word weights are accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Raw word counts. Learning and scoring may interleave freely.
    Frequency,
    /// TF-IDF weights, learned first and converted once before scoring.
    TfIdf(Phase),
}

impl Mode {
    /// Rebuild a mode from the persisted `tf_idf` / `did_convert_tf_idf` flags.
    ///
    /// The conversion flag has no meaning for a frequency classifier and is ignored.
    pub fn from_flags(tf_idf: bool, converted: bool) -> Self {
        match (tf_idf, converted) {
            (false, _) => Mode::Frequency,
            (true, false) => Mode::TfIdf(Phase::Training),
            (true, true) => Mode::TfIdf(Phase::Converted),
        }
    }

    pub fn is_tf_idf(&self) -> bool {
        matches!(self, Mode::TfIdf(_))
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, Mode::TfIdf(Phase::Converted))
    }

    /// Whether learned documents must also record term-frequency samples.
    pub fn samples_term_frequencies(&self) -> bool {
        matches!(self, Mode::TfIdf(Phase::Training))
    }

    /// Fail unless documents or counts may still be added.
    pub fn ensure_learnable(&self) -> Result<()> {
        match self {
            Mode::TfIdf(Phase::Converted) => Err(BayesError::invalid_operation(
                "cannot learn after TF-IDF conversion; build a new classifier and relearn to reconvert",
            )),
            _ => Ok(()),
        }
    }

    /// Fail unless documents may be scored.
    pub fn ensure_scorable(&self) -> Result<()> {
        match self {
            Mode::TfIdf(Phase::Training) => Err(BayesError::NotConverted),
            _ => Ok(()),
        }
    }

    /// Move from `Training` to `Converted`. There is no way back.
    pub(crate) fn convert(&mut self) -> Result<()> {
        match self {
            Mode::Frequency => Err(BayesError::invalid_operation(
                "TF-IDF conversion requires a TF-IDF classifier",
            )),
            Mode::TfIdf(Phase::Converted) => Err(BayesError::invalid_operation(
                "cannot convert term frequencies to TF-IDF more than once; build a new classifier and relearn to reconvert",
            )),
            Mode::TfIdf(Phase::Training) => {
                *self = Mode::TfIdf(Phase::Converted);
                Ok(())
            }
        }
    }
}
