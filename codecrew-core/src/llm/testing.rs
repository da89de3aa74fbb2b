//! Scripted backend for unit tests

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::{Error, Result};

use super::{Completion, CompletionRequest, Llm, ModelBackend};

/// Backend that replays canned replies and records every request
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<Completion>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedBackend {
    /// Replies with a line naming the persona to every request
    pub(crate) fn echoing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Replies with `replies` in order, then echoes
    pub(crate) fn with_replies(replies: Vec<Result<Completion>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
        self.requests.lock().unwrap().push(request.clone());
        match self.replies.lock().unwrap().pop_front() {
            Some(reply) => reply,
            None => Ok(Completion::text(format!(
                "reviewed by: {}",
                request.system.lines().next().unwrap_or("")
            ))),
        }
    }
}

/// Build a shared client over `backend`
pub(crate) fn llm_over(backend: Arc<ScriptedBackend>) -> Arc<Llm> {
    Arc::new(Llm::new("gemini/gemini-2.0-flash".parse().unwrap(), backend))
}

/// A provider failure for scripting
pub(crate) fn provider_error(msg: &str) -> Result<Completion> {
    Err(Error::Provider(msg.to_string()))
}
