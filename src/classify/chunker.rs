use crate::error::IntentError;

/// Contiguous, order preserving groups of at most `size` items. The last group may be shorter.
///
/// Cloning restarts the sequence from wherever the clone was taken; the source slice is never touched.
#[derive(Debug)]
pub struct Chunks<'a, T> {
    inner: std::slice::Chunks<'a, T>,
}

impl<T> Clone for Chunks<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Chunks<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Chunks<'_, T> {}

pub fn chunk_examples<T>(examples: &[T], size: usize) -> Result<Chunks<'_, T>, IntentError> {
    if size == 0 {
        return Err(IntentError::InvalidConfiguration(
            "chunk size must be at least 1".to_string(),
        ));
    }
    Ok(Chunks {
        inner: examples.chunks(size),
    })
}
