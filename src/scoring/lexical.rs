/// Fraction of `keywords` that occur in `decision_text` as case-insensitive substrings.
///
/// Returns `0.0` for an empty keyword list. Matching is literal containment with no
/// tokenization, so multi-word terms like `"meşru müdafaa"` count as a single hit.
pub fn keyword_match_score<S: AsRef<str>>(decision_text: &str, keywords: &[S]) -> f32 {
    if keywords.is_empty() {
        return 0.0;
    }

    let text_lower = decision_text.to_lowercase();
    let matches = keywords
        .iter()
        .filter(|keyword| text_lower.contains(&keyword.as_ref().to_lowercase()))
        .count();

    matches as f32 / keywords.len() as f32
}
