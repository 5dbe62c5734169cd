use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::application::CompletionClient;
use crate::domain::{CompletionReply, CompletionRequest, DomainError, ErrorKind};

enum Script {
    Reply(Value),
    Fail(ErrorKind, String),
}

/// In-process [`CompletionClient`] that returns a fixed reply or failure,
/// counts calls and remembers the last request it saw.
pub struct MockCompletionClient {
    script: Script,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockCompletionClient {
    fn with_script(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Reply with the given raw JSON body.
    pub fn replying_with(raw: Value) -> Self {
        Self::with_script(Script::Reply(raw))
    }

    /// Reply with a single text block.
    pub fn replying_with_text(text: impl Into<String>) -> Self {
        Self::replying_with(json!({
            "id": "msg_mock",
            "type": "message",
            "role": "assistant",
            "model": "mock-completion",
            "content": [{"type": "text", "text": text.into()}],
            "stop_reason": "end_turn"
        }))
    }

    pub fn failing_with(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::with_script(Script::Fail(kind, message.into()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn create_message(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionReply, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        match &self.script {
            Script::Reply(raw) => CompletionReply::from_value(raw.clone()),
            Script::Fail(kind, message) => Err(DomainError::from_kind(*kind, message.clone())),
        }
    }

    fn provider_name(&self) -> &str {
        "mock-completion"
    }
}
