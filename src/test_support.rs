//! Test helpers shared by unit tests.

use crate::ai::client::CompletionBackend;
use crate::core::request::GenerationSettings;
use crate::error::{AssistError, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub user: String,
    pub settings: GenerationSettings,
}

#[derive(Default)]
struct State {
    replies: VecDeque<Result<String>>,
    calls: Vec<RecordedCall>,
}

/// Scripted completion backend. Replies are handed out in order; once they
/// run out every call fails with a malformed-response error.
#[derive(Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<State>>,
}

impl FakeBackend {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                replies: replies.into(),
                calls: Vec::new(),
            })),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }
}

impl CompletionBackend for FakeBackend {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        settings: GenerationSettings,
    ) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(RecordedCall {
            system: system_prompt.to_string(),
            user: user_prompt.to_string(),
            settings,
        });
        state
            .replies
            .pop_front()
            .unwrap_or_else(|| Err(AssistError::MalformedResponse("no scripted reply".into())))
    }
}
