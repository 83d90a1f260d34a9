//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{BayesianArgs, OutputFormat, ScoreMethod};
use crate::error::Result;

/// Result structure for training.
#[derive(Debug, Serialize, Deserialize)]
pub struct TrainResult {
    pub model: String,
    pub format: String,
    pub classes: Vec<String>,
    pub documents_learned: u64,
    pub word_counts: Vec<u64>,
    pub tf_idf: bool,
    pub duration_ms: u64,
}

/// Result structure for classification.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifyResult {
    pub class: String,
    pub strict: bool,
    pub method: ScoreMethod,
    pub underflow: bool,
    pub scores: Vec<ClassScore>,
}

/// Score of one class.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassScore {
    pub class: String,
    pub score: f64,
}

/// Classifier statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResult {
    pub classes: Vec<ClassStats>,
    pub documents_learned: u64,
    pub documents_seen: u64,
    pub tf_idf: bool,
    pub converted: bool,
}

/// Class-specific statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassStats {
    pub class: String,
    pub total: u64,
    pub vocabulary: usize,
    pub prior: f64,
}

/// Result structure for exporting classes.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportResult {
    pub dir: String,
    pub classes: Vec<String>,
}

/// Result structure for importing a class.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResult {
    pub model: String,
    pub class: String,
    pub total: u64,
    pub documents_learned: u64,
}

/// Output a result in the requested format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &BayesianArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &BayesianArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    // Convert to JSON value for easier manipulation
    let value = serde_json::to_value(result)?;

    if value.get("scores").is_some_and(|s| s.is_array()) {
        output_classify_human(&value)
    } else if value.get("documents_seen").is_some() {
        output_stats_human(&value)
    } else {
        output_generic_human(&value)
    }
}

/// Output classification scores in human format.
fn output_classify_human(value: &serde_json::Value) -> Result<()> {
    let class = value.get("class").and_then(|c| c.as_str()).unwrap_or("unknown");
    let strict = value.get("strict").and_then(|s| s.as_bool()).unwrap_or(false);

    if strict {
        println!("Class: {class}");
    } else {
        println!("Class: {class} (tied)");
    }
    if value.get("underflow").and_then(|u| u.as_bool()) == Some(true) {
        println!("Warning: probabilities underflowed, showing log scores");
    }

    println!();
    println!("Scores:");
    println!("═══════");
    if let Some(scores) = value.get("scores").and_then(|s| s.as_array()) {
        for score in scores {
            let label = score.get("class").and_then(|c| c.as_str()).unwrap_or("unknown");
            match score.get("score").and_then(|s| s.as_f64()) {
                Some(score) => println!("  {label}: {score:.6}"),
                None => println!("  {label}: -inf"),
            }
        }
    }
    Ok(())
}

/// Output classifier statistics in human format.
fn output_stats_human(value: &serde_json::Value) -> Result<()> {
    if let Some(obj) = value.as_object() {
        println!("Classifier Statistics:");
        println!("═════════════════════");

        if let Some(learned) = obj.get("documents_learned").and_then(|d| d.as_u64()) {
            println!("Documents learned: {learned}");
        }
        if let Some(seen) = obj.get("documents_seen").and_then(|d| d.as_u64()) {
            println!("Documents seen: {seen}");
        }
        let tf_idf = obj.get("tf_idf").and_then(|t| t.as_bool()).unwrap_or(false);
        let converted = obj.get("converted").and_then(|c| c.as_bool()).unwrap_or(false);
        let mode = match (tf_idf, converted) {
            (false, _) => "frequency",
            (true, false) => "tf-idf (training)",
            (true, true) => "tf-idf (converted)",
        };
        println!("Mode: {mode}");

        if let Some(classes) = obj.get("classes").and_then(|c| c.as_array()) {
            println!();
            println!("Class Statistics:");
            println!("────────────────");

            for stats in classes {
                println!();
                let label = stats.get("class").and_then(|c| c.as_str()).unwrap_or("unknown");
                println!("Class: {label}");

                if let Some(total) = stats.get("total").and_then(|t| t.as_u64()) {
                    println!("  Total words: {total}");
                }
                if let Some(vocabulary) = stats.get("vocabulary").and_then(|v| v.as_u64()) {
                    println!("  Distinct words: {vocabulary}");
                }
                if let Some(prior) = stats.get("prior").and_then(|p| p.as_f64()) {
                    println!("  Prior: {prior:.4}");
                }
            }
        }
    }
    Ok(())
}

/// Output generic data in human format.
fn output_generic_human(value: &serde_json::Value) -> Result<()> {
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                let formatted_val = format_value(val);
                println!("{key}: {formatted_val}");
            }
        }
        _ => {
            let formatted_value = format_value(value);
            println!("{formatted_value}");
        }
    }
    Ok(())
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &BayesianArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(
            format_value(&serde_json::Value::String("spam".to_string())),
            "spam"
        );
        assert_eq!(
            format_value(&serde_json::Value::Number(serde_json::Number::from(42))),
            "42"
        );
        assert_eq!(format_value(&serde_json::Value::Bool(false)), "false");
        assert_eq!(format_value(&serde_json::json!(["a", 1])), "[a, 1]");
        assert_eq!(format_value(&serde_json::Value::Null), "null");
    }

    #[test]
    fn test_classify_result_serialization() {
        let result = ClassifyResult {
            class: "bad".to_string(),
            strict: true,
            method: ScoreMethod::Safe,
            underflow: false,
            scores: vec![
                ClassScore {
                    class: "good".to_string(),
                    score: 0.25,
                },
                ClassScore {
                    class: "bad".to_string(),
                    score: 0.75,
                },
            ],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["method"], "safe");
        assert_eq!(value["scores"][1]["score"], 0.75);
    }

    #[test]
    fn test_non_finite_scores_serialize_as_null() {
        let score = ClassScore {
            class: "good".to_string(),
            score: f64::NEG_INFINITY,
        };
        let value = serde_json::to_value(&score).unwrap();
        assert!(value["score"].is_null());
    }
}
