use serde::Serialize;

use super::fallback::fallback_search_terms;

/// Label used when no case type could be determined.
pub const GENERAL_CATEGORY_LABEL: &str = "Genel";

/// Substring of a case-type label that marks a criminal case.
pub const CRIMINAL_LABEL: &str = "Ceza";

/// Legal field of a case, as reported by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CaseCategory {
    /// Ceza
    Criminal,
    /// Aile
    Family,
    /// Medeni
    Civil,
    /// İş
    Labor,
    /// İdari
    Administrative,
    /// Genel, or unknown.
    General,
    /// Any other label, kept verbatim.
    Other(String),
}

impl CaseCategory {
    /// Maps a free-text label onto a category, ignoring case and trailing words
    /// like "hukuku".
    pub fn from_label(label: &str) -> Self {
        let folded = fold_turkish(label.trim());
        if folded.is_empty() {
            return CaseCategory::General;
        }

        if folded.contains("ceza") {
            CaseCategory::Criminal
        } else if folded.contains("aile") {
            CaseCategory::Family
        } else if folded.contains("medeni") {
            CaseCategory::Civil
        } else if folded.contains("idari") || folded.contains("idare") {
            CaseCategory::Administrative
        } else if folded == "iş" || folded.starts_with("iş ") {
            CaseCategory::Labor
        } else if folded.contains("genel") {
            CaseCategory::General
        } else {
            CaseCategory::Other(label.trim().to_string())
        }
    }
}

/// Lowercases with Turkish dotted/dotless `i` rules.
fn fold_turkish(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'İ' => 'i',
            'I' => 'ı',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .collect()
}

/// Structured summary of a case description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryIntent {
    pub category: CaseCategory,
    /// The label as the model wrote it (`"Genel"` when unknown).
    pub category_label: String,
    pub main_topic: String,
    pub search_terms: Vec<String>,
    pub is_criminal: bool,
}

impl QueryIntent {
    pub fn new(
        category_label: impl Into<String>,
        main_topic: impl Into<String>,
        search_terms: Vec<String>,
    ) -> Self {
        let category_label = category_label.into();
        Self {
            category: CaseCategory::from_label(&category_label),
            is_criminal: category_label.contains(CRIMINAL_LABEL),
            category_label,
            main_topic: main_topic.into(),
            search_terms,
        }
    }

    /// Intent used when the model is unavailable or its answer is unusable: general
    /// category, empty topic, and the first five words of the query as search terms.
    pub fn fallback(query: &str) -> Self {
        Self {
            category: CaseCategory::General,
            category_label: GENERAL_CATEGORY_LABEL.to_string(),
            main_topic: String::new(),
            search_terms: fallback_search_terms(query),
            is_criminal: false,
        }
    }
}
