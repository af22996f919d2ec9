use crate::error::IntentError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One line of the training or test corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub input: String,
    pub intent: String,
}

impl LabeledExample {
    pub fn new<S: Into<String>, T: Into<String>>(input: S, intent: T) -> Self {
        Self {
            input: input.into(),
            intent: intent.into(),
        }
    }
}

/// Reads a header-less, tab-delimited corpus: text in column one, intent in column two.
/// Columns past the second are ignored.
pub fn read_corpus<P: AsRef<Path>>(path: P) -> Result<Vec<LabeledExample>, IntentError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        IntentError::Corpus(format!("failed to open {}: {}", path.display(), e))
    })?;
    let examples = parse_corpus(file)?;
    crate::info!(path = %path.display(), examples = examples.len(), "loaded corpus");
    Ok(examples)
}

pub fn parse_corpus<R: std::io::Read>(reader: R) -> Result<Vec<LabeledExample>, IntentError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(reader);

    let mut examples = Vec::new();
    for result in reader.records() {
        let record = result?;
        match (record.get(0), record.get(1)) {
            (Some(input), Some(intent)) => examples.push(LabeledExample::new(input, intent)),
            _ => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                return Err(IntentError::Corpus(format!(
                    "line {} has {} column(s), expected text<TAB>intent",
                    line,
                    record.len()
                )));
            }
        }
    }
    Ok(examples)
}
