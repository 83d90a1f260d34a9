//! End-to-end classification scenarios.

use bayesian::classifier::{Classifier, UNSEEN_WORD_PROBABILITY, find_max, tf_idf_weight};
use bayesian::error::BayesError;

fn good_bad() -> Classifier {
    let mut classifier = Classifier::new(["good", "bad"]).unwrap();
    classifier
        .learn(&["tall", "handsome", "rich"], "good")
        .unwrap();
    classifier.learn(&["bald", "poor", "ugly"], "bad").unwrap();
    classifier
}

#[test]
fn test_good_bad_log_scores() {
    let classifier = good_bad();
    let scores = classifier.log_scores(&["tall", "girl"]).unwrap();

    let unseen = UNSEEN_WORD_PROBABILITY.ln();
    let expected_good = 0.5f64.ln() + (1.0f64 / 3.0).ln() + unseen;
    let expected_bad = 0.5f64.ln() + 2.0 * unseen;
    assert!((scores.scores[0] - expected_good).abs() < 1e-9);
    assert!((scores.scores[1] - expected_bad).abs() < 1e-9);
    assert_eq!(scores.best, 0);
    assert!(scores.strict);
    assert_eq!(scores.best_class(classifier.classes()).as_str(), "good");
}

#[test]
fn test_good_bad_prob_scores() {
    let classifier = good_bad();
    let scores = classifier.prob_scores(&["bald", "poor"]).unwrap();

    assert_eq!(scores.best, 1);
    assert!(scores.strict);
    let sum: f64 = scores.scores.iter().sum();
    assert!((sum - 1.0).abs() < 1e-12);
    assert!(scores.scores[1] > 0.999);
}

#[test]
fn test_tie_is_not_strict() {
    let classifier = good_bad();
    // neither class has seen these words and the priors are equal
    let scores = classifier.log_scores(&["foo", "bar"]).unwrap();
    assert_eq!(scores.best, 0);
    assert!(!scores.strict);

    let (class, strict) = classifier.classify(&["foo"]).unwrap();
    assert_eq!(class.as_str(), "good");
    assert!(!strict);
}

#[test]
fn test_find_max_tie_break() {
    assert_eq!(find_max(&[0.1, 0.5, 0.5, 0.2]), (1, false));
    assert_eq!(find_max(&[0.5, 0.5, 0.7]), (2, true));
    assert_eq!(find_max(&[0.9]), (0, true));
}

#[test]
fn test_documents_seen_counts_every_strategy() {
    let classifier = good_bad();
    classifier.log_scores(&["tall"]).unwrap();
    classifier.prob_scores(&["tall"]).unwrap();
    classifier.safe_prob_scores(&["tall"]).unwrap();
    classifier.classify(&["tall"]).unwrap();
    classifier
        .log_scores_batch(&[vec!["rich"], vec!["poor"]])
        .unwrap();

    assert_eq!(classifier.documents_seen(), 6);
    assert_eq!(classifier.documents_learned(), 2);
}

#[test]
fn test_safe_scores_agree_with_log_scores() {
    let classifier = good_bad();
    let documents: [&[&str]; 4] = [
        &["tall"],
        &["ugly", "poor", "rich"],
        &["handsome", "handsome", "bald"],
        &["unknown"],
    ];

    for document in documents {
        let safe = classifier.safe_prob_scores(document).unwrap();
        let log = classifier.log_scores(document).unwrap();
        let prob = classifier.prob_scores(document).unwrap();

        assert!(!safe.is_underflow(), "unexpected underflow for {document:?}");
        assert_eq!(safe.scores.best, log.best);
        assert_eq!(safe.scores.strict, log.strict);
        assert_eq!(prob.best, log.best);
        assert_eq!(safe.log_scores, log);
    }
}

#[test]
fn test_underflow_is_reported_with_scores() {
    let mut classifier = Classifier::new(["good", "bad"]).unwrap();
    classifier.learn(&["common"], "good").unwrap();
    classifier.learn(&["common", "spam"], "bad").unwrap();

    let mut document = vec!["spam"];
    document.extend(std::iter::repeat_n("zzz", 40));

    let safe = classifier.safe_prob_scores(&document).unwrap();
    assert!(safe.is_underflow());
    assert_eq!(safe.log_scores.best, 1);
    assert!(safe.log_scores.strict);
    assert_eq!(safe.scores.scores.len(), 2);

    let err = safe.into_result().unwrap_err();
    assert!(err.is_underflow());
}

#[test]
fn test_tf_idf_lifecycle() {
    let mut classifier = Classifier::new_tf_idf(["good", "bad"]).unwrap();
    classifier.learn(&["a", "a", "b"], "good").unwrap();
    classifier.learn(&["c"], "bad").unwrap();

    assert!(matches!(
        classifier.log_scores(&["a"]),
        Err(BayesError::NotConverted)
    ));
    assert!(matches!(
        classifier.prob_scores(&["a"]),
        Err(BayesError::NotConverted)
    ));
    assert_eq!(classifier.documents_seen(), 0);

    classifier.convert_tf_idf().unwrap();
    assert!(classifier.is_converted());

    let good = classifier.class_statistics("good").unwrap();
    let expected_a = tf_idf_weight(2.0 / 3.0, 2, 3);
    assert!((good.frequency("a").unwrap() - expected_a).abs() < 1e-12);
    assert_eq!(good.total(), 3);

    let scores = classifier.log_scores(&["a"]).unwrap();
    assert_eq!(scores.best, 0);

    assert!(matches!(
        classifier.learn(&["d"], "bad"),
        Err(BayesError::InvalidOperation(_))
    ));
    assert!(matches!(
        classifier.convert_tf_idf(),
        Err(BayesError::InvalidOperation(_))
    ));
}

#[test]
fn test_invalid_construction_and_unknown_class() {
    assert!(matches!(
        Classifier::new(["only"]),
        Err(BayesError::InvalidClasses(_))
    ));
    assert!(matches!(
        Classifier::new(["same", "same"]),
        Err(BayesError::InvalidClasses(_))
    ));

    let mut classifier = good_bad();
    assert!(matches!(
        classifier.learn(&["x"], "ugly"),
        Err(BayesError::UnknownClass(_))
    ));
    assert_eq!(classifier.documents_learned(), 2);
}

#[test]
fn test_untrained_classifier_scores() {
    let classifier = Classifier::new(["good", "bad"]).unwrap();
    assert_eq!(classifier.priors(), vec![0.0, 0.0]);

    let scores = classifier.log_scores(&["anything"]).unwrap();
    assert!(scores.scores.iter().all(|s| *s == f64::NEG_INFINITY));
    assert!(!scores.strict);
}
