//! Deterministic keyword extraction used when the model gives nothing usable.

/// Tier 1: in-domain legal terms.
pub const LEGAL_TERMS: &[&str] = &[
    "nafaka",
    "boşanma",
    "velayet",
    "tazminat",
    "aile",
    "evlilik",
    "eş",
    "kasten",
    "öldürme",
    "yaralama",
    "meşru müdafaa",
    "ceza",
    "hapis",
    "iş kazası",
    "işveren",
    "güvenlik",
    "sorumluluk",
    "borç",
    "alacak",
    "sözleşme",
    "miras",
    "taşınmaz",
    "mülkiyet",
    "hırsızlık",
    "dolandırıcılık",
];

/// Tier 2: generic case vocabulary.
pub const GENERIC_CASE_TERMS: &[&str] =
    &["nafaka", "boşanma", "dava", "karar", "emsal", "miktar", "konu"];

/// Words dropped by tier 3.
pub const STOP_WORDS: &[&str] = &[
    "ve",
    "ile",
    "için",
    "konusunda",
    "arasında",
    "hakkında",
    "davası",
    "karar",
    "emsal",
    "arıyorum",
    "bul",
    "istiyorum",
];

const MIN_TOKEN_CHARS: usize = 4;
const MAX_FALLBACK_TOKENS: usize = 5;

/// Runs the three fallback tiers in order and returns the first non-empty result.
///
/// 1. vocabulary terms from [`LEGAL_TERMS`] contained in the lowercased query
/// 2. vocabulary terms from [`GENERIC_CASE_TERMS`] contained in the lowercased query
/// 3. the first five query words longer than three characters that are not stop words
pub fn fallback_keywords(query: &str) -> Vec<String> {
    let query_lower = query.to_lowercase();

    let legal = vocabulary_hits(&query_lower, LEGAL_TERMS);
    if !legal.is_empty() {
        return legal;
    }

    let generic = vocabulary_hits(&query_lower, GENERIC_CASE_TERMS);
    if !generic.is_empty() {
        return generic;
    }

    query_lower
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|word| !STOP_WORDS.contains(word) && word.chars().count() >= MIN_TOKEN_CHARS)
        .take(MAX_FALLBACK_TOKENS)
        .map(str::to_string)
        .collect()
}

/// First five whitespace-separated words of the raw query.
pub fn fallback_search_terms(query: &str) -> Vec<String> {
    query
        .split_whitespace()
        .take(MAX_FALLBACK_TOKENS)
        .map(str::to_string)
        .collect()
}

fn vocabulary_hits(query_lower: &str, vocabulary: &[&str]) -> Vec<String> {
    vocabulary
        .iter()
        .filter(|term| query_lower.contains(*term))
        .map(|term| term.to_string())
        .collect()
}
