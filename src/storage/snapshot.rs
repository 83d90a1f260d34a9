//! Plain, serializable image of a classifier.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::classifier::{ClassStatistics, Class, Classifier, Mode, validate_classes};
use crate::error::{BayesError, Result};

/// Everything persisted for a classifier.
///
/// Both the binary and the JSON encoding carry exactly these fields. The seen
/// counter is stored as a plain integer snapshot.
///
/// `did_convert_tf_idf` only means something together with `tf_idf`. A
/// snapshot with `tf_idf = false` and `did_convert_tf_idf = true` loads as a
/// frequency classifier and is written back with both flags cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSnapshot {
    pub classes: Vec<Class>,
    pub learned: u64,
    pub seen: u64,
    pub datas: HashMap<Class, ClassStatistics>,
    pub tf_idf: bool,
    pub did_convert_tf_idf: bool,
}

impl From<&Classifier> for ClassifierSnapshot {
    fn from(classifier: &Classifier) -> Self {
        let mode = classifier.mode();
        ClassifierSnapshot {
            classes: classifier.classes().to_vec(),
            learned: classifier.documents_learned(),
            seen: classifier.documents_seen(),
            datas: classifier.statistics().clone(),
            tf_idf: mode.is_tf_idf(),
            did_convert_tf_idf: mode.is_converted(),
        }
    }
}

impl TryFrom<ClassifierSnapshot> for Classifier {
    type Error = BayesError;

    fn try_from(snapshot: ClassifierSnapshot) -> Result<Self> {
        validate_classes(&snapshot.classes).map_err(|e| BayesError::decode(e.to_string()))?;

        if let Some(class) = snapshot.classes.iter().find(|c| !snapshot.datas.contains_key(*c)) {
            return Err(BayesError::decode(format!(
                "missing statistics for class '{class}'"
            )));
        }
        if snapshot.datas.len() != snapshot.classes.len() {
            return Err(BayesError::decode(
                "statistics present for classes outside the class set",
            ));
        }

        Ok(Classifier::from_parts(
            snapshot.classes,
            snapshot.datas,
            snapshot.learned,
            snapshot.seen,
            Mode::from_flags(snapshot.tf_idf, snapshot.did_convert_tf_idf),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ClassifierSnapshot {
        let mut classifier = Classifier::new(["good", "bad"]).unwrap();
        classifier.learn(&["hi"], "good").unwrap();
        ClassifierSnapshot::from(&classifier)
    }

    #[test]
    fn test_snapshot_fields() {
        let snapshot = snapshot();
        assert_eq!(snapshot.learned, 1);
        assert_eq!(snapshot.seen, 0);
        assert!(!snapshot.tf_idf);
        assert_eq!(snapshot.datas[&Class::from("good")].total(), 1);
    }

    #[test]
    fn test_missing_statistics_rejected() {
        let mut snapshot = snapshot();
        snapshot.datas.remove("bad");
        let err = Classifier::try_from(snapshot).unwrap_err();
        assert!(matches!(err, BayesError::Decode(_)));
    }

    #[test]
    fn test_extra_statistics_rejected() {
        let mut snapshot = snapshot();
        snapshot
            .datas
            .insert(Class::from("ugly"), ClassStatistics::new());
        assert!(matches!(
            Classifier::try_from(snapshot),
            Err(BayesError::Decode(_))
        ));
    }

    #[test]
    fn test_bad_class_set_rejected() {
        let mut snapshot = snapshot();
        snapshot.classes = vec![Class::from("good"), Class::from("good")];
        assert!(matches!(
            Classifier::try_from(snapshot),
            Err(BayesError::Decode(_))
        ));
    }

    #[test]
    fn test_conversion_flag_without_tf_idf_loads_as_frequency() {
        let mut snapshot = snapshot();
        snapshot.did_convert_tf_idf = true;

        let classifier = Classifier::try_from(snapshot).unwrap();
        assert_eq!(classifier.mode(), Mode::Frequency);
        assert!(classifier.log_scores(&["hi"]).is_ok());

        let written = ClassifierSnapshot::from(&classifier);
        assert!(!written.tf_idf);
        assert!(!written.did_convert_tf_idf);
    }
}
