//! Saving and reloading the statistics of a single class.
//!
//! Each class is stored in its own binary file named after the class label
//! inside a directory. Reloading a class replaces its statistics wholesale
//! and counts as one learned document, however many documents the stored
//! statistics represent.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Component, Path, PathBuf};

use log::debug;

use crate::classifier::{ClassStatistics, Classifier};
use crate::error::{BayesError, Result};
use crate::storage::{read_binary, write_binary};

/// Path of a class's statistics file inside `dir`.
///
/// The label must be a single plain path component; labels that would leave
/// `dir` or name a subdirectory are rejected.
pub fn class_file_path<P: AsRef<Path>>(dir: P, class: &str) -> Result<PathBuf> {
    let mut components = Path::new(class).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == class => Ok(dir.as_ref().join(class)),
        _ => Err(BayesError::invalid_argument(format!(
            "class '{class}' cannot be used as a file name"
        ))),
    }
}

impl Classifier {
    /// Write one class's statistics to a writer.
    pub fn write_class_to<W: Write>(&self, class: &str, mut writer: W) -> Result<usize> {
        write_binary(self.class_statistics(class)?, &mut writer)
    }

    /// Replace one class's statistics with ones read from a reader.
    ///
    /// The statistics are decoded completely before anything changes; on
    /// success the learned document count grows by one.
    pub fn read_class_from<R: Read>(&mut self, class: &str, reader: R) -> Result<()> {
        // fail on unknown classes before reading anything
        self.class_statistics(class)?;
        self.load_class(class, reader)
    }

    fn load_class<R: Read>(&mut self, class: &str, mut reader: R) -> Result<()> {
        let stats: ClassStatistics = read_binary(&mut reader)?;
        self.replace_class_statistics(class, stats)
    }

    /// Write one class's statistics to `dir/<class>`.
    pub fn write_class_to_file<P: AsRef<Path>>(&self, class: &str, dir: P) -> Result<()> {
        let path = class_file_path(dir, class)?;
        let stats = self.class_statistics(class)?;
        let mut writer = BufWriter::new(File::create(&path)?);
        write_binary(stats, &mut writer)?;
        writer.flush()?;
        debug!("wrote class '{}' to {}", class, path.display());
        Ok(())
    }

    /// Write every class to its own file in `dir`.
    pub fn write_classes_to_file<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        for class in self.classes() {
            self.write_class_to_file(class.as_str(), dir)?;
        }
        Ok(())
    }

    /// Replace one class's statistics with those stored in `dir/<class>`.
    pub fn read_class_from_file<P: AsRef<Path>>(&mut self, class: &str, dir: P) -> Result<()> {
        self.class_statistics(class)?;
        let path = class_file_path(dir, class)?;
        let reader = BufReader::new(File::open(&path)?);
        self.load_class(class, reader)?;
        debug!("read class '{}' from {}", class, path.display());
        Ok(())
    }
}
