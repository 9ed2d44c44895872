//! Decision records keyed by the id carried in chunk metadata.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod sqlite;


pub use error::StoreError;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockDecisionStore;
pub use sqlite::SqliteDecisionStore;

use serde::{Deserialize, Serialize};

use crate::constants::UNKNOWN_FIELD;

/// One court decision as stored. Every column except the id may be null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub id: i64,
    /// Issuing chamber (`daire`).
    pub chamber: Option<String>,
    pub esas: Option<String>,
    pub karar: Option<String>,
    pub date: Option<String>,
    pub text: Option<String>,
}

impl DecisionRecord {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn with_chamber(mut self, chamber: impl Into<String>) -> Self {
        self.chamber = Some(chamber.into());
        self
    }

    pub fn with_numbers(mut self, esas: impl Into<String>, karar: impl Into<String>) -> Self {
        self.esas = Some(esas.into());
        self.karar = Some(karar.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn chamber_or_unknown(&self) -> &str {
        display_field(&self.chamber)
    }

    pub fn esas_or_unknown(&self) -> &str {
        display_field(&self.esas)
    }

    pub fn karar_or_unknown(&self) -> &str {
        display_field(&self.karar)
    }

    pub fn date_or_unknown(&self) -> &str {
        display_field(&self.date)
    }

    /// Full text, or `""` when the column is null.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

fn display_field(field: &Option<String>) -> &str {
    match field.as_deref() {
        Some(value) if !value.trim().is_empty() => value,
        _ => UNKNOWN_FIELD,
    }
}

/// Point lookups of decisions by id.
pub trait DecisionStore: Send + Sync {
    /// Returns `Ok(None)` when no row has this id.
    fn fetch(&self, id: i64) -> Result<Option<DecisionRecord>, StoreError>;
}
