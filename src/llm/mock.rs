use parking_lot::Mutex;

use super::LanguageModel;
use super::error::LlmError;

/// Scripted [`LanguageModel`] for tests.
///
/// Replies come from the first rule whose marker occurs in the prompt, else the default
/// reply. Every call is recorded.
#[derive(Default)]
pub struct MockLanguageModel {
    rules: Vec<(String, String)>,
    default_reply: Option<String>,
    failing: bool,
    calls: Mutex<Vec<(String, u32)>>,
}

impl MockLanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers `reply` to any prompt containing `marker`.
    pub fn respond_when(mut self, marker: impl Into<String>, reply: impl Into<String>) -> Self {
        self.rules.push((marker.into(), reply.into()));
        self
    }

    pub fn with_default_reply(mut self, reply: impl Into<String>) -> Self {
        self.default_reply = Some(reply.into());
        self
    }

    /// Every call fails with [`LlmError::RequestFailed`].
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    /// `(prompt, max_tokens)` pairs received so far.
    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl LanguageModel for MockLanguageModel {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        self.calls.lock().push((prompt.to_string(), max_tokens));

        if self.failing {
            return Err(LlmError::RequestFailed {
                reason: "mock failure".to_string(),
            });
        }

        self.rules
            .iter()
            .find(|(marker, _)| prompt.contains(marker.as_str()))
            .map(|(_, reply)| reply.clone())
            .or_else(|| self.default_reply.clone())
            .ok_or(LlmError::EmptyResponse)
    }
}
