//! Command line argument parsing for the bayesian CLI using clap.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::{Analyzer, SimpleAnalyzer, StandardAnalyzer};
use crate::storage::Format;

/// bayesian - Naive Bayes text classification
#[derive(Parser, Debug, Clone)]
#[command(name = "bayesian")]
#[command(about = "Train and apply Naive Bayes text classifiers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct BayesianArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl BayesianArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a classifier from labeled samples and save it
    Train(TrainArgs),

    /// Score a text against a saved classifier
    Classify(ClassifyArgs),

    /// Show classifier statistics
    Stats(StatsArgs),

    /// Write every class of a classifier to its own file
    #[command(name = "export-classes")]
    ExportClasses(ExportClassesArgs),

    /// Replace one class of a classifier with a previously exported class file
    #[command(name = "import-class")]
    ImportClass(ImportClassArgs),
}

/// Arguments for training
#[derive(Parser, Debug, Clone)]
pub struct TrainArgs {
    /// Training samples (JSONL, one {"class": ..., "text": ...} per line)
    #[arg(value_name = "SAMPLES_FILE")]
    pub samples: PathBuf,

    /// Where to write the trained model
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Classifier configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", conflicts_with_all = ["class", "tf_idf"])]
    pub config: Option<PathBuf>,

    /// Class label; repeat to fix the class order (default: order of first appearance)
    #[arg(short, long = "class", value_name = "CLASS")]
    pub class: Vec<String>,

    /// Weight words by TF-IDF instead of raw counts
    #[arg(long)]
    pub tf_idf: bool,

    /// Model encoding (default: from the file extension)
    #[arg(long, value_name = "FORMAT")]
    pub model_format: Option<ModelFormat>,

    /// Analyzer used to split sample text into words
    #[arg(long, default_value = "standard")]
    pub analyzer: AnalyzerKind,
}

/// Arguments for classification
#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    /// Saved model
    #[arg(value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Text to classify
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Scoring strategy
    #[arg(short, long, default_value = "log")]
    pub method: ScoreMethod,

    /// Model encoding (default: from the file extension)
    #[arg(long, value_name = "FORMAT")]
    pub model_format: Option<ModelFormat>,

    /// Analyzer used to split the text into words
    #[arg(long, default_value = "standard")]
    pub analyzer: AnalyzerKind,
}

/// Arguments for showing statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Saved model
    #[arg(value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Model encoding (default: from the file extension)
    #[arg(long, value_name = "FORMAT")]
    pub model_format: Option<ModelFormat>,
}

/// Arguments for exporting classes
#[derive(Parser, Debug, Clone)]
pub struct ExportClassesArgs {
    /// Saved model
    #[arg(value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Directory receiving one file per class
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Create the directory if it doesn't exist
    #[arg(long)]
    pub create_dirs: bool,

    /// Model encoding (default: from the file extension)
    #[arg(long, value_name = "FORMAT")]
    pub model_format: Option<ModelFormat>,
}

/// Arguments for importing a class
#[derive(Parser, Debug, Clone)]
pub struct ImportClassArgs {
    /// Saved model, rewritten in place unless --output is given
    #[arg(value_name = "MODEL_FILE")]
    pub model: PathBuf,

    /// Class to replace
    #[arg(value_name = "CLASS")]
    pub class: String,

    /// Directory holding the exported class file
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Write the updated model here instead
    #[arg(short, long, value_name = "MODEL_FILE")]
    pub output: Option<PathBuf>,

    /// Model encoding (default: from the file extension)
    #[arg(long, value_name = "FORMAT")]
    pub model_format: Option<ModelFormat>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

/// Model file encodings
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Binary,
    Json,
}

impl ModelFormat {
    /// Resolve an optional explicit format against the model path.
    pub fn resolve(format: Option<ModelFormat>, path: &Path) -> Format {
        match format {
            Some(ModelFormat::Binary) => Format::Binary,
            Some(ModelFormat::Json) => Format::Json,
            None => Format::from_path(path),
        }
    }
}

/// Scoring strategies
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreMethod {
    /// Log-space scores
    Log,
    /// Normalized probabilities
    Prob,
    /// Probabilities checked for underflow
    Safe,
}

/// Text analyzers
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerKind {
    /// Unicode words, lowercased
    Standard,
    /// Whitespace split only
    Simple,
}

impl AnalyzerKind {
    pub fn build(self) -> Box<dyn Analyzer> {
        match self {
            AnalyzerKind::Standard => Box::new(StandardAnalyzer::new()),
            AnalyzerKind::Simple => Box::new(SimpleAnalyzer::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_train() {
        let args = BayesianArgs::try_parse_from([
            "bayesian", "-vv", "train", "samples.jsonl", "-m", "model.json", "-c", "spam", "-c",
            "ham", "--tf-idf",
        ])
        .unwrap();
        assert_eq!(args.verbosity(), 2);

        match args.command {
            Command::Train(train) => {
                assert_eq!(train.class, vec!["spam", "ham"]);
                assert!(train.tf_idf);
                assert_eq!(
                    ModelFormat::resolve(train.model_format, &train.model),
                    Format::Json
                );
                assert_eq!(train.analyzer, AnalyzerKind::Standard);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_config_conflicts_with_flags() {
        let result = BayesianArgs::try_parse_from([
            "bayesian", "train", "s.jsonl", "-m", "m.bin", "--config", "c.json", "--tf-idf",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_classify() {
        let args = BayesianArgs::try_parse_from([
            "bayesian", "-q", "-f", "json", "classify", "model.bin", "free money", "-m", "safe",
        ])
        .unwrap();
        assert_eq!(args.verbosity(), 0);
        assert_eq!(args.output_format, OutputFormat::Json);
        match args.command {
            Command::Classify(classify) => {
                assert_eq!(classify.method, ScoreMethod::Safe);
                assert_eq!(classify.text, "free money");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
