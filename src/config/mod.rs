//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `EMSAL_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::constants::{
    DEFAULT_ANALYSIS_MAX_TOKENS, DEFAULT_BUSY_TIMEOUT_SECS, DEFAULT_EXPLAIN_MAX_TOKENS,
    DEFAULT_TOP_N, MAX_TOP_N,
};
use crate::embedding::EmbedderConfig;
use crate::llm::LlmConfig;
use crate::scoring::ScoringConfig;

/// Default location of the decision database.
pub const DEFAULT_DB_PATH: &str = "data/decisions.sqlite";
/// Default location of the chunk index.
pub const DEFAULT_INDEX_PATH: &str = "data/chunks.index";
/// Default location of the chunk metadata.
pub const DEFAULT_META_PATH: &str = "data/meta.json";

/// Retrieval engine configuration.
///
/// Use [`Config::from_env`] to read `EMSAL_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite decision store. Default: `data/decisions.sqlite`.
    pub db_path: PathBuf,

    /// Flat inner-product chunk index. Default: `data/chunks.index`.
    pub index_path: PathBuf,

    /// Chunk metadata aligned with the index. Default: `data/meta.json`.
    pub meta_path: PathBuf,

    /// Sentence model directory. `None` runs the stub embedder.
    pub embedder_path: Option<PathBuf>,

    /// `genai` model name. `None` disables the language model.
    pub llm_model: Option<String>,

    /// Token cap for keyword and intent prompts. Default: `200`.
    pub analysis_max_tokens: u32,

    /// Token cap for the explanation prompt. Default: `800`.
    pub explain_max_tokens: u32,

    /// Size of the browse set; retrieval fetches three times as many. Default: `20`.
    pub top_n: usize,

    /// SQLite busy timeout in seconds. Default: `30`.
    pub busy_timeout_secs: u64,

    /// Calibration and fusion parameters (not read from the environment).
    pub scoring: ScoringConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
            meta_path: PathBuf::from(DEFAULT_META_PATH),
            embedder_path: None,
            llm_model: None,
            analysis_max_tokens: DEFAULT_ANALYSIS_MAX_TOKENS,
            explain_max_tokens: DEFAULT_EXPLAIN_MAX_TOKENS,
            top_n: DEFAULT_TOP_N,
            busy_timeout_secs: DEFAULT_BUSY_TIMEOUT_SECS,
            scoring: ScoringConfig::default(),
        }
    }
}

impl Config {
    const ENV_DB_PATH: &'static str = "EMSAL_DB_PATH";
    const ENV_INDEX_PATH: &'static str = "EMSAL_INDEX_PATH";
    const ENV_META_PATH: &'static str = "EMSAL_META_PATH";
    const ENV_EMBEDDER_PATH: &'static str = "EMSAL_EMBEDDER_PATH";
    const ENV_LLM_MODEL: &'static str = "EMSAL_LLM_MODEL";
    const ENV_ANALYSIS_MAX_TOKENS: &'static str = "EMSAL_LLM_MAX_TOKENS_ANALYSIS";
    const ENV_EXPLAIN_MAX_TOKENS: &'static str = "EMSAL_LLM_MAX_TOKENS_EXPLAIN";
    const ENV_TOP_N: &'static str = "EMSAL_TOP_N";
    const ENV_BUSY_TIMEOUT_SECS: &'static str = "EMSAL_BUSY_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            db_path: Self::parse_path_from_env(Self::ENV_DB_PATH, defaults.db_path),
            index_path: Self::parse_path_from_env(Self::ENV_INDEX_PATH, defaults.index_path),
            meta_path: Self::parse_path_from_env(Self::ENV_META_PATH, defaults.meta_path),
            embedder_path: Self::parse_optional_path_from_env(Self::ENV_EMBEDDER_PATH),
            llm_model: Self::parse_optional_string_from_env(Self::ENV_LLM_MODEL),
            analysis_max_tokens: Self::parse_number_from_env(
                Self::ENV_ANALYSIS_MAX_TOKENS,
                defaults.analysis_max_tokens,
            )?,
            explain_max_tokens: Self::parse_number_from_env(
                Self::ENV_EXPLAIN_MAX_TOKENS,
                defaults.explain_max_tokens,
            )?,
            top_n: Self::parse_number_from_env(Self::ENV_TOP_N, defaults.top_n)?,
            busy_timeout_secs: Self::parse_number_from_env(
                Self::ENV_BUSY_TIMEOUT_SECS,
                defaults.busy_timeout_secs,
            )?,
            scoring: defaults.scoring,
        })
    }

    /// Validates paths and basic invariants (no side effects).
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require_file(&self.db_path)?;
        Self::require_file(&self.index_path)?;
        Self::require_file(&self.meta_path)?;

        if let Some(ref path) = self.embedder_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if !(1..=MAX_TOP_N).contains(&self.top_n) {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_TOP_N,
                reason: format!("must be between 1 and {MAX_TOP_N}, got {}", self.top_n),
            });
        }
        if self.analysis_max_tokens == 0 || self.explain_max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_ANALYSIS_MAX_TOKENS,
                reason: "token budgets must be positive".to_string(),
            });
        }

        self.scoring.validate()?;
        Ok(())
    }

    /// Embedder settings; stub mode when no model directory is configured.
    pub fn embedder_config(&self) -> EmbedderConfig {
        match &self.embedder_path {
            Some(dir) => EmbedderConfig::new(dir),
            None => EmbedderConfig::stub(),
        }
    }

    /// Language model settings, or `None` when no model is configured.
    pub fn llm_config(&self) -> Option<LlmConfig> {
        self.llm_model.as_ref().map(|model| {
            LlmConfig::new(model)
                .with_max_tokens(self.analysis_max_tokens, self.explain_max_tokens)
        })
    }

    fn require_file(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_file() {
            return Err(ConfigError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        Self::parse_optional_string_from_env(var_name).map(PathBuf::from)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_number_from_env<T>(var_name: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr<Err = std::num::ParseIntError>,
    {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|source| ConfigError::NumberParseError {
                    name: var_name,
                    value,
                    source,
                }),
            Err(_) => Ok(default),
        }
    }
}
