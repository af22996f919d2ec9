use intent_client::{
    llms::ClientError,
    requests::{CompletionError, CompletionFinishReason, CompletionRequest, CompletionResponse},
    CompletionBackend,
};
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

#[derive(Clone)]
pub enum StubReply {
    Text(String),
    Delayed(String, Duration),
    Fail,
}

/// Answers each prompt with the reply of the first marker it contains.
pub struct StubBackend {
    replies: Vec<(String, StubReply)>,
    fallback: StubReply,
    ready: bool,
    pub calls: AtomicUsize,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl StubBackend {
    pub fn new() -> Self {
        Self {
            replies: vec![],
            fallback: StubReply::Text("flight\n".to_string()),
            ready: true,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            prompts: Mutex::new(vec![]),
        }
    }

    pub fn reply<S: Into<String>>(mut self, marker: S, reply: StubReply) -> Self {
        self.replies.push((marker.into(), reply));
        self
    }

    pub fn fallback(mut self, reply: StubReply) -> Self {
        self.fallback = reply;
        self
    }

    pub fn not_ready(mut self) -> Self {
        self.ready = false;
        self
    }

    fn reply_for(&self, prompt: &str) -> StubReply {
        self.replies
            .iter()
            .find(|(marker, _)| prompt.contains(marker.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait::async_trait]
impl CompletionBackend for StubBackend {
    async fn completion(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let res = match self.reply_for(&request.prompt) {
            StubReply::Text(content) => Ok(content),
            StubReply::Delayed(content, delay) => {
                tokio::time::sleep(delay).await;
                Ok(content)
            }
            StubReply::Fail => Err(CompletionError::ClientError(ClientError::HttpStatus {
                status: 503,
                body: "service unavailable".to_string(),
            })),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        res.map(|content| CompletionResponse {
            id: "stub".to_string(),
            content,
            finish_reason: CompletionFinishReason::Eos,
            token_usage: Default::default(),
        })
    }

    fn model_id(&self) -> &str {
        "stub"
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}
