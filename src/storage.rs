//! Persistence for classifiers.
//!
//! A classifier is saved as a [`ClassifierSnapshot`] in one of two encodings
//! carrying the same content:
//!
//! - **Binary**: compact `bincode` encoding
//! - **JSON**: `serde_json`, readable and diffable
//!
//! A single class's statistics can also be written and reloaded on their own,
//! see [`class_file`].
//!
//! Decoding never returns a partial classifier: truncated or malformed input
//! and structurally invalid snapshots fail with [`BayesError::Decode`].
//!
//! # Example
//!
//! ```
//! use bayesian::classifier::Classifier;
//!
//! # fn main() -> bayesian::error::Result<()> {
//! let mut classifier = Classifier::new(["good", "bad"])?;
//! classifier.learn(&["hello"], "good")?;
//!
//! let json = classifier.to_json()?;
//! let restored = Classifier::from_json(&json)?;
//! assert_eq!(restored.documents_learned(), 1);
//! # Ok(())
//! # }
//! ```

pub mod class_file;
pub mod snapshot;

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::classifier::Classifier;
use crate::error::{BayesError, Result};

pub use snapshot::ClassifierSnapshot;

/// Encoding of persisted classifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Binary,
    Json,
}

impl Format {
    /// `Json` for a `.json` extension, `Binary` otherwise.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Binary,
        }
    }
}

impl FromStr for Format {
    type Err = BayesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "binary" | "bin" => Ok(Format::Binary),
            "json" => Ok(Format::Json),
            other => Err(BayesError::invalid_argument(format!(
                "unknown format '{other}', expected 'binary' or 'json'"
            ))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Binary => f.write_str("binary"),
            Format::Json => f.write_str("json"),
        }
    }
}

/// Upper bound on the bytes a single binary decode may claim.
///
/// Length prefixes are checked against it before anything is allocated, so a
/// corrupted prefix fails as a decode error.
pub const MAX_BINARY_SIZE: usize = 1 << 30;

fn binary_config() -> impl bincode::config::Config {
    bincode::config::standard().with_limit::<MAX_BINARY_SIZE>()
}

pub(crate) fn encode_binary<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    bincode::serde::encode_to_vec(value, binary_config())
        .map_err(|e| BayesError::encode(format!("Failed to serialize classifier: {}", e)))
}

pub(crate) fn decode_binary<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    let (value, _): (T, _) = bincode::serde::decode_from_slice(data, binary_config())
        .map_err(|e| BayesError::decode(format!("Failed to deserialize classifier: {}", e)))?;
    Ok(value)
}

pub(crate) fn write_binary<T: Serialize, W: Write>(value: &T, writer: &mut W) -> Result<usize> {
    bincode::serde::encode_into_std_write(value, writer, binary_config())
        .map_err(|e| BayesError::encode(format!("Failed to serialize classifier: {}", e)))
}

pub(crate) fn read_binary<T: DeserializeOwned, R: Read>(reader: &mut R) -> Result<T> {
    bincode::serde::decode_from_std_read(reader, binary_config())
        .map_err(|e| BayesError::decode(format!("Failed to deserialize classifier: {}", e)))
}

impl Classifier {
    /// Plain image of the current state.
    pub fn snapshot(&self) -> ClassifierSnapshot {
        ClassifierSnapshot::from(self)
    }

    /// Restore a classifier from a snapshot.
    pub fn from_snapshot(snapshot: ClassifierSnapshot) -> Result<Self> {
        Classifier::try_from(snapshot)
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.snapshot())?)
    }

    /// Encode as indented JSON.
    pub fn to_json_pretty(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.snapshot())?)
    }

    /// Decode from JSON.
    pub fn from_json(data: &[u8]) -> Result<Self> {
        let snapshot: ClassifierSnapshot = serde_json::from_slice(data)
            .map_err(|e| BayesError::decode(format!("Failed to parse classifier JSON: {}", e)))?;
        Classifier::from_snapshot(snapshot)
    }

    /// Encode in the binary format.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encode_binary(&self.snapshot())
    }

    /// Decode from the binary format.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Classifier::from_snapshot(decode_binary(data)?)
    }

    /// Write the binary encoding to a writer and return the bytes written.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<usize> {
        write_binary(&self.snapshot(), &mut writer)
    }

    /// Read a binary-encoded classifier from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        Classifier::from_snapshot(read_binary(&mut reader)?)
    }

    /// Save to a file, replacing any existing content.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P, format: Format) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        match format {
            Format::Binary => {
                self.write_to(&mut writer)?;
            }
            Format::Json => {
                serde_json::to_writer(&mut writer, &self.snapshot())?;
            }
        }
        writer.flush()?;

        debug!(
            "wrote {} classifier ({} documents learned) to {}",
            format,
            self.documents_learned(),
            path.display()
        );
        Ok(())
    }

    /// Load a classifier saved with [`Classifier::write_to_file`].
    pub fn from_file<P: AsRef<Path>>(path: P, format: Format) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = BufReader::new(File::open(path)?);
        let classifier = match format {
            Format::Binary => Classifier::from_reader(&mut reader)?,
            Format::Json => {
                let mut data = Vec::new();
                reader.read_to_end(&mut data)?;
                Classifier::from_json(&data)?
            }
        };

        debug!(
            "loaded {} classifier with {} classes from {}",
            format,
            classifier.classes().len(),
            path.display()
        );
        Ok(classifier)
    }
}
