//! Text-completion backend used for query analysis and explanations.
//!
//! The model is optional everywhere it is used: callers hold an `Option<&L>` and fall
//! back to deterministic rules when it is absent or fails.

pub mod client;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use client::GenaiLanguageModel;
pub use config::LlmConfig;
pub use error::LlmError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockLanguageModel;

/// Single-turn completion.
pub trait LanguageModel: Send + Sync {
    /// Completes `prompt`, generating at most `max_tokens` tokens.
    fn complete(
        &self,
        prompt: &str,
        max_tokens: u32,
    ) -> impl std::future::Future<Output = Result<String, LlmError>> + Send;
}
