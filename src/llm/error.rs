use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by language model backends.
pub enum LlmError {
    /// Provider call failed.
    #[error("language model request failed: {reason}")]
    RequestFailed { reason: String },

    /// Provider answered without any text.
    #[error("language model returned no text")]
    EmptyResponse,

    #[error("invalid language model configuration: {reason}")]
    InvalidConfig { reason: String },
}
