use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use crate::application::ChatClient;
use crate::domain::{
    ChatMessage, Completion, CompletionOptions, CompletionPurpose, DomainError,
};

/// A completion request as seen by [`MockChatClient`].
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub messages: Vec<ChatMessage>,
    pub options: CompletionOptions,
}

/// In-process [`ChatClient`] that never touches the network.
///
/// Scripted responses are returned in order; once the script is exhausted a
/// canned response matching the request's purpose is returned. Every call is
/// recorded.
pub struct MockChatClient {
    script: Mutex<VecDeque<Result<Completion, DomainError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(self, completion: Completion) -> Self {
        self.push(Ok(completion));
        self
    }

    pub fn with_error(self, error: DomainError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, entry: Result<Completion, DomainError>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(entry);
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    fn canned(purpose: CompletionPurpose) -> Completion {
        let value = match purpose {
            CompletionPurpose::PanicPlan => json!({
                "version": 1,
                "title": "Quick Reset",
                "steps": [
                    {"type": "breathing", "pattern": "box", "seconds": 60},
                    {"type": "grounding", "prompt": "Name five things you can see", "seconds": 45},
                    {"type": "affirmation", "text": "This feeling will pass."}
                ]
            }),
            CompletionPurpose::Classification => json!({
                "severity": 1,
                "reason": "Some stress mentioned, no risk language.",
                "suggested_path": "exercise"
            }),
            CompletionPurpose::Exercise => json!({
                "title": "Shoulder drop",
                "duration_sec": 45,
                "steps": [
                    "Lift your shoulders toward your ears",
                    "Hold for three breaths",
                    "Let them fall and notice the difference"
                ]
            }),
        };
        Completion::Json(value)
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: CompletionOptions,
    ) -> Result<Completion, DomainError> {
        let mut calls = self
            .calls
            .lock()
            .map_err(|_| DomainError::internal("mock call log poisoned"))?;
        calls.push(RecordedCall {
            messages: messages.to_vec(),
            options,
        });
        drop(calls);

        let next = self
            .script
            .lock()
            .map_err(|_| DomainError::internal("mock script poisoned"))?
            .pop_front();

        next.unwrap_or_else(|| Ok(Self::canned(options.purpose())))
    }

    fn model_name(&self) -> &str {
        "mock-chat"
    }
}
