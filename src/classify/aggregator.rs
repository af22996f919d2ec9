use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_TOP_K: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
}

impl Prediction {
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// Majority vote over extracted labels.
///
/// Labels are ranked by descending count. Equal counts keep the order in which each label
/// was first seen, so the result only depends on the order the labels are presented in.
/// Labels are compared verbatim and are not checked against any taxonomy.
pub fn aggregate_votes<I, S>(labels: I, k: usize) -> Vec<Prediction>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tallies: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for label in labels {
        let label = label.as_ref();
        match positions.get(label) {
            Some(&i) => tallies[i].1 += 1,
            None => {
                positions.insert(label.to_owned(), tallies.len());
                tallies.push((label.to_owned(), 1));
            }
        }
    }

    // Stable, so ties stay in first-seen order.
    tallies.sort_by(|a, b| b.1.cmp(&a.1));
    tracing::debug!(?tallies, "vote tallies");

    tallies
        .into_iter()
        .take(k)
        .map(|(label, _)| Prediction { label })
        .collect()
}
