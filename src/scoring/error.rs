use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid scoring configuration: {reason}")]
    InvalidConfig { reason: String },
}
