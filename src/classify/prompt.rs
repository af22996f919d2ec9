use crate::{corpus::LabeledExample, error::IntentError};

pub const ATIS_PREFIX: &str =
    "The following are examples of various intents related to Airline Travel Information Systems:\n";
pub const ATIS_SUFFIX: &str =
    "\nBased on the above examples, classify the following input:\nInput: {input}\nIntent:";
pub const EXAMPLE_SEPARATOR: &str = "\n\n";
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// The fixed text around the examples of every few-shot prompt.
///
/// The rendered prompt is the prefix, each example as `Intent: {intent}\nExample: {input}`,
/// then the suffix, with empty pieces skipped and the rest joined by the separator.
/// The suffix must contain [`INPUT_PLACEHOLDER`] exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct FewShotTemplate {
    pub prefix: String,
    pub suffix: String,
    pub example_separator: String,
}

impl Default for FewShotTemplate {
    fn default() -> Self {
        Self {
            prefix: ATIS_PREFIX.to_string(),
            suffix: ATIS_SUFFIX.to_string(),
            example_separator: EXAMPLE_SEPARATOR.to_string(),
        }
    }
}

impl FewShotTemplate {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn suffix<S: Into<String>>(mut self, suffix: S) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn example_separator<S: Into<String>>(mut self, example_separator: S) -> Self {
        self.example_separator = example_separator.into();
        self
    }

    /// Renders one chunk. The input text is left unbound until [`FewShotPrompt::render`].
    pub fn build(&self, chunk: &[LabeledExample]) -> Result<FewShotPrompt, IntentError> {
        let (suffix_head, suffix_tail) = self.split_suffix()?;

        let mut pieces: Vec<String> = Vec::with_capacity(chunk.len() + 2);
        if !self.prefix.is_empty() {
            pieces.push(self.prefix.clone());
        }
        pieces.extend(
            chunk
                .iter()
                .map(|e| format!("Intent: {}\nExample: {}", e.intent, e.input)),
        );
        pieces.push(suffix_head.to_string());

        Ok(FewShotPrompt {
            head: pieces.join(&self.example_separator),
            tail: suffix_tail.to_string(),
            example_count: chunk.len(),
        })
    }

    fn split_suffix(&self) -> Result<(&str, &str), IntentError> {
        if self.suffix.matches(INPUT_PLACEHOLDER).count() != 1 {
            return Err(IntentError::InvalidConfiguration(format!(
                "prompt suffix must contain {} exactly once",
                INPUT_PLACEHOLDER
            )));
        }
        self.suffix.split_once(INPUT_PLACEHOLDER).ok_or_else(|| {
            IntentError::InvalidConfiguration("prompt suffix has no input placeholder".to_string())
        })
    }
}

/// One chunk's prompt, split around where the input text goes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FewShotPrompt {
    head: String,
    tail: String,
    example_count: usize,
}

impl FewShotPrompt {
    /// Binds the input text. Example text that happens to contain `{input}` is left alone.
    pub fn render(&self, input: &str) -> String {
        let mut prompt = String::with_capacity(self.head.len() + input.len() + self.tail.len());
        prompt.push_str(&self.head);
        prompt.push_str(input);
        prompt.push_str(&self.tail);
        prompt
    }

    pub fn example_count(&self) -> usize {
        self.example_count
    }

    /// The prompt with the placeholder still in it.
    pub fn template_text(&self) -> String {
        self.render(INPUT_PLACEHOLDER)
    }
}

impl std::fmt::Display for FewShotPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.template_text())
    }
}

/// Every chunk's prompt, in chunk order. Build it once per corpus and chunk size, then share it.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptSet {
    prompts: Vec<FewShotPrompt>,
    chunk_size: usize,
}

impl PromptSet {
    pub(crate) fn new(prompts: Vec<FewShotPrompt>, chunk_size: usize) -> Self {
        Self {
            prompts,
            chunk_size,
        }
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FewShotPrompt> {
        self.prompts.iter()
    }

    pub fn get(&self, index: usize) -> Option<&FewShotPrompt> {
        self.prompts.get(index)
    }

    /// `cl100k_base` token count of each template, placeholder included.
    pub fn token_counts(&self) -> Vec<Option<usize>> {
        self.prompts
            .iter()
            .map(|p| crate::text_utils::token_count(&p.template_text()))
            .collect()
    }
}

impl<'a> IntoIterator for &'a PromptSet {
    type Item = &'a FewShotPrompt;
    type IntoIter = std::slice::Iter<'a, FewShotPrompt>;

    fn into_iter(self) -> Self::IntoIter {
        self.prompts.iter()
    }
}
