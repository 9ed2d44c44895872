use genai::Client;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest};
use tracing::{debug, error};

use super::LanguageModel;
use super::config::LlmConfig;
use super::error::LlmError;

/// [`LanguageModel`] over any provider `genai` can reach.
///
/// Provider credentials come from the environment the way `genai` resolves them
/// (`OPENAI_API_KEY`, a local Ollama, ...).
pub struct GenaiLanguageModel {
    client: Client,
    config: LlmConfig,
}

impl std::fmt::Debug for GenaiLanguageModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenaiLanguageModel")
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl GenaiLanguageModel {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        config.validate()?;
        Ok(Self {
            client: Client::default(),
            config,
        })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }
}

impl LanguageModel for GenaiLanguageModel {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        let request = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        let options = ChatOptions::default()
            .with_max_tokens(max_tokens)
            .with_temperature(self.config.temperature);

        let response = self
            .client
            .exec_chat(&self.config.model, request, Some(&options))
            .await
            .map_err(|e| {
                error!(model = %self.config.model, "Provider error: {}", e);
                LlmError::RequestFailed {
                    reason: e.to_string(),
                }
            })?;

        let text = response.first_text().unwrap_or_default().trim().to_string();
        if text.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        debug!(model = %self.config.model, chars = text.len(), "Completion received");
        Ok(text)
    }
}
