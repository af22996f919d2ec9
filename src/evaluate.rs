use crate::{
    classify::{IntentClassifier, PromptSet},
    corpus::LabeledExample,
    error::IntentError,
};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationMetrics {
    pub accuracy: f64,
    /// Support weighted over the ground truth classes.
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub evaluated: usize,
}

impl std::fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "EvaluationMetrics:")?;
        writeln!(f, "    evaluated: {}", self.evaluated)?;
        writeln!(f, "    accuracy: {:.4}", self.accuracy)?;
        writeln!(f, "    precision: {:.4}", self.precision)?;
        writeln!(f, "    recall: {:.4}", self.recall)?;
        writeln!(f, "    f1: {:.4}", self.f1)
    }
}

/// Classifies the first `limit` test examples one at a time and scores the top label of each.
///
/// An input with no prediction counts as the empty label. Backend failures abort the run.
pub async fn evaluate(
    classifier: &IntentClassifier,
    prompt_set: &PromptSet,
    test_examples: &[LabeledExample],
    limit: usize,
) -> Result<EvaluationMetrics, IntentError> {
    let start_time = std::time::Instant::now();
    let mut pairs: Vec<(String, String)> = Vec::with_capacity(limit.min(test_examples.len()));

    for (i, example) in test_examples.iter().take(limit).enumerate() {
        let predictions = classifier.classify(prompt_set, &example.input).await?;
        let predicted = predictions
            .into_iter()
            .next()
            .map(|p| p.label)
            .unwrap_or_default();
        crate::debug!(i, expected = %example.intent, %predicted, "evaluated example");
        pairs.push((example.intent.clone(), predicted));
    }

    let metrics = score(&pairs);
    crate::info!(elapsed = ?start_time.elapsed(), "{}", metrics);
    Ok(metrics)
}

/// Scores `(expected, predicted)` pairs.
///
/// Per class precision and recall are weighted by how often the class appears as the expected
/// label. A class that is never predicted has precision 0.0.
pub fn score<S: AsRef<str>>(pairs: &[(S, S)]) -> EvaluationMetrics {
    if pairs.is_empty() {
        return EvaluationMetrics {
            accuracy: 0.0,
            precision: 0.0,
            recall: 0.0,
            f1: 0.0,
            evaluated: 0,
        };
    }

    #[derive(Default)]
    struct Counts {
        true_positive: usize,
        predicted: usize,
        support: usize,
    }

    let mut counts: HashMap<&str, Counts> = HashMap::new();
    let mut correct = 0;
    for (expected, predicted) in pairs {
        let (expected, predicted) = (expected.as_ref(), predicted.as_ref());
        counts.entry(expected).or_default().support += 1;
        counts.entry(predicted).or_default().predicted += 1;
        if expected == predicted {
            correct += 1;
            counts.entry(expected).or_default().true_positive += 1;
        }
    }

    let total = pairs.len() as f64;
    let (mut precision, mut recall, mut f1) = (0.0, 0.0, 0.0);
    for c in counts.values().filter(|c| c.support > 0) {
        let weight = c.support as f64 / total;
        let p = ratio(c.true_positive, c.predicted);
        let r = ratio(c.true_positive, c.support);
        let f = if p + r > 0.0 {
            2.0 * p * r / (p + r)
        } else {
            0.0
        };
        precision += weight * p;
        recall += weight * r;
        f1 += weight * f;
    }

    EvaluationMetrics {
        accuracy: correct as f64 / total,
        precision,
        recall,
        f1,
        evaluated: pairs.len(),
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
