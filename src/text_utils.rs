use tiktoken_rs::{cl100k_base, CoreBPE};

lazy_static! {
    static ref CL100K: Option<CoreBPE> = match cl100k_base() {
        Ok(bpe) => Some(bpe),
        Err(e) => {
            tracing::warn!("cl100k_base tokenizer unavailable: {}", e);
            None
        }
    };
}

/// Number of `cl100k_base` tokens in `text`.
///
/// Used to size few-shot prompts against a model's context window before any
/// request is sent. Returns `None` if the tokenizer could not be loaded.
pub fn token_count(text: &str) -> Option<usize> {
    CL100K
        .as_ref()
        .map(|bpe| bpe.encode_with_special_tokens(text).len())
}
