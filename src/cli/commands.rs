//! Command implementations for the bayesian CLI.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use log::{debug, info, warn};
use serde::Deserialize;

use crate::analysis::Analyzer;
use crate::classifier::{Class, Classifier, ClassifierConfig};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::{BayesError, Result};

/// Execute a CLI command.
pub fn execute_command(args: BayesianArgs) -> Result<()> {
    match &args.command {
        Command::Train(train_args) => train(train_args.clone(), &args),
        Command::Classify(classify_args) => classify(classify_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
        Command::ExportClasses(export_args) => export_classes(export_args.clone(), &args),
        Command::ImportClass(import_args) => import_class(import_args.clone(), &args),
    }
}

/// One line of a training file.
///
/// Either `text`, analyzed into words, or an already split `words` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrainingSample {
    pub class: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub words: Option<Vec<String>>,
}

impl TrainingSample {
    fn into_words(self, analyzer: &dyn Analyzer) -> Result<(Vec<String>, String)> {
        let words = match (self.words, self.text) {
            (Some(words), _) => words,
            (None, Some(text)) => analyzer.words(&text)?,
            (None, None) => {
                return Err(BayesError::invalid_argument(format!(
                    "sample for class '{}' has neither text nor words",
                    self.class
                )));
            }
        };
        Ok((words, self.class))
    }
}

/// Read training samples from a JSONL file, skipping blank lines.
pub fn load_samples<P: AsRef<Path>>(path: P) -> Result<Vec<TrainingSample>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let mut samples = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let sample: TrainingSample = serde_json::from_str(&line).map_err(|e| {
            BayesError::invalid_argument(format!(
                "{}:{}: invalid sample: {}",
                path.display(),
                line_num + 1,
                e
            ))
        })?;
        samples.push(sample);
    }

    Ok(samples)
}

/// Class labels in order of first appearance.
fn classes_from_samples(samples: &[(Vec<String>, String)]) -> Vec<Class> {
    let mut classes: Vec<Class> = Vec::new();
    for (_, class) in samples {
        if !classes.iter().any(|c| c.as_str() == class) {
            classes.push(Class::from(class.as_str()));
        }
    }
    classes
}

/// Build and train a classifier. TF-IDF classifiers come back converted.
///
/// Without a configuration the classes are taken from the samples in order
/// of first appearance.
pub fn train_classifier(
    samples: Vec<TrainingSample>,
    config: Option<ClassifierConfig>,
    tf_idf: bool,
    analyzer: &dyn Analyzer,
) -> Result<Classifier> {
    let documents = samples
        .into_iter()
        .map(|sample| sample.into_words(analyzer))
        .collect::<Result<Vec<_>>>()?;

    let config = config.unwrap_or_else(|| ClassifierConfig {
        classes: classes_from_samples(&documents),
        tf_idf,
    });

    let mut classifier = Classifier::from_config(&config)?;
    classifier.learn_all(
        documents
            .iter()
            .map(|(words, class)| (words.as_slice(), class.as_str())),
    )?;

    if classifier.is_tf_idf() {
        classifier.convert_tf_idf()?;
    }

    Ok(classifier)
}

/// Train a classifier from a samples file and save it.
fn train(args: TrainArgs, cli_args: &BayesianArgs) -> Result<()> {
    let start_time = Instant::now();

    let config = if let Some(config_file) = &args.config {
        if cli_args.verbosity() > 1 {
            println!("Loading configuration from: {}", config_file.display());
        }
        Some(ClassifierConfig::from_file(config_file)?)
    } else if !args.class.is_empty() {
        Some(ClassifierConfig::new(args.class.iter().map(String::as_str)).with_tf_idf(args.tf_idf))
    } else {
        None
    };

    let samples = load_samples(&args.samples)?;
    info!(
        "loaded {} samples from {}",
        samples.len(),
        args.samples.display()
    );

    let analyzer = args.analyzer.build();
    let classifier = train_classifier(samples, config, args.tf_idf, analyzer.as_ref())?;

    let format = ModelFormat::resolve(args.model_format, &args.model);
    classifier.write_to_file(&args.model, format)?;

    let duration = start_time.elapsed();
    output_result(
        "Classifier trained successfully",
        &TrainResult {
            model: args.model.to_string_lossy().to_string(),
            format: format.to_string(),
            classes: class_names(&classifier),
            documents_learned: classifier.documents_learned(),
            word_counts: classifier.word_count(),
            tf_idf: classifier.is_tf_idf(),
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Score a text against a saved classifier.
fn classify(args: ClassifyArgs, cli_args: &BayesianArgs) -> Result<()> {
    let format = ModelFormat::resolve(args.model_format, &args.model);
    let classifier = Classifier::from_file(&args.model, format)?;

    let words = args.analyzer.build().words(&args.text)?;
    debug!("classifying {} words", words.len());

    let result = score_words(&classifier, &words, args.method)?;
    output_result("Classification", &result, cli_args)
}

/// Score analyzed words with the chosen method.
pub fn score_words(
    classifier: &Classifier,
    words: &[String],
    method: ScoreMethod,
) -> Result<ClassifyResult> {
    let (scores, underflow) = match method {
        ScoreMethod::Log => (classifier.log_scores(words)?, false),
        ScoreMethod::Prob => (classifier.prob_scores(words)?, false),
        ScoreMethod::Safe => {
            let safe = classifier.safe_prob_scores(words)?;
            if safe.is_underflow() {
                warn!("probability scores underflowed, reporting log scores");
                (safe.log_scores, true)
            } else {
                (safe.scores, false)
            }
        }
    };

    let classes = classifier.classes();
    Ok(ClassifyResult {
        class: scores.best_class(classes).to_string(),
        strict: scores.strict,
        method,
        underflow,
        scores: classes
            .iter()
            .zip(&scores.scores)
            .map(|(class, score)| ClassScore {
                class: class.to_string(),
                score: *score,
            })
            .collect(),
    })
}

/// Show classifier statistics.
fn show_stats(args: StatsArgs, cli_args: &BayesianArgs) -> Result<()> {
    let format = ModelFormat::resolve(args.model_format, &args.model);
    let classifier = Classifier::from_file(&args.model, format)?;
    output_result("Classifier Statistics", &collect_stats(&classifier)?, cli_args)
}

/// Summarize a classifier.
pub fn collect_stats(classifier: &Classifier) -> Result<StatsResult> {
    let priors = classifier.priors();
    let classes = classifier
        .classes()
        .iter()
        .zip(priors)
        .map(|(class, prior)| {
            let stats = classifier.class_statistics(class.as_str())?;
            Ok(ClassStats {
                class: class.to_string(),
                total: stats.total(),
                vocabulary: stats.vocabulary_size(),
                prior,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(StatsResult {
        classes,
        documents_learned: classifier.documents_learned(),
        documents_seen: classifier.documents_seen(),
        tf_idf: classifier.is_tf_idf(),
        converted: classifier.is_converted(),
    })
}

/// Write every class to its own file.
fn export_classes(args: ExportClassesArgs, cli_args: &BayesianArgs) -> Result<()> {
    let format = ModelFormat::resolve(args.model_format, &args.model);
    let classifier = Classifier::from_file(&args.model, format)?;

    if args.create_dirs {
        fs::create_dir_all(&args.dir)?;
    }
    if !args.dir.is_dir() {
        return Err(BayesError::invalid_argument(format!(
            "not a directory: {}",
            args.dir.display()
        )));
    }

    classifier.write_classes_to_file(&args.dir)?;

    output_result(
        "Classes exported successfully",
        &ExportResult {
            dir: args.dir.to_string_lossy().to_string(),
            classes: class_names(&classifier),
        },
        cli_args,
    )
}

/// Replace one class from its exported file and save the model.
fn import_class(args: ImportClassArgs, cli_args: &BayesianArgs) -> Result<()> {
    let format = ModelFormat::resolve(args.model_format, &args.model);
    let mut classifier = Classifier::from_file(&args.model, format)?;

    classifier.read_class_from_file(&args.class, &args.dir)?;

    let output = args.output.unwrap_or(args.model);
    classifier.write_to_file(&output, format)?;

    let stats = classifier.class_statistics(&args.class)?;
    output_result(
        "Class imported successfully",
        &ImportResult {
            model: output.to_string_lossy().to_string(),
            class: args.class.clone(),
            total: stats.total(),
            documents_learned: classifier.documents_learned(),
        },
        cli_args,
    )
}

fn class_names(classifier: &Classifier) -> Vec<String> {
    classifier.classes().iter().map(ToString::to_string).collect()
}
