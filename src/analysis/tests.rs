use super::*;
use crate::llm::MockLanguageModel;

const NAFAKA_QUERY: &str = "Boşanma sonrası nafaka miktarının artırılması davası";

fn no_llm() -> Option<&'static MockLanguageModel> {
    None
}

// Parser

#[test]
fn test_parse_keywords_well_formed() {
    let outcome = parse_keywords("KEYWORDS: nafaka, boşanma , velayet,, aile hukuku");
    assert_eq!(
        outcome,
        ParseOutcome::WellFormed(vec![
            "nafaka".to_string(),
            "boşanma".to_string(),
            "velayet".to_string(),
            "aile hukuku".to_string(),
        ])
    );
}

#[test]
fn test_parse_keywords_uses_first_marker_line_only() {
    let answer = "Tabii.\nKEYWORDS: [iş kazası, tazminat]\nKEYWORDS: başka, liste";
    let keywords = parse_keywords(answer).into_option().unwrap();
    assert_eq!(keywords, ["iş kazası", "tazminat"]);
}

#[test]
fn test_parse_keywords_malformed() {
    assert!(!parse_keywords("nafaka, boşanma").is_well_formed());
    assert!(!parse_keywords("KEYWORDS:   , ,").is_well_formed());
    assert!(!parse_keywords("").is_well_formed());
}

#[test]
fn test_parse_intent_numbered_block() {
    let answer = "1. Dava türü: Aile\n2. Ana konu: Nafaka artırımı talebi.\n3. Arama terimleri: nafaka, artırım, boşanma";
    let parsed = parse_intent(answer).into_option().unwrap();

    assert_eq!(parsed.case_type.as_deref(), Some("Aile"));
    assert_eq!(parsed.main_topic.as_deref(), Some("Nafaka artırımı talebi"));
    assert_eq!(
        parsed.search_terms.unwrap(),
        ["nafaka", "artırım", "boşanma"]
    );
}

#[test]
fn test_parse_intent_partial_block() {
    let parsed = parse_intent("Dava türü: [Ceza]").into_option().unwrap();
    assert_eq!(parsed.case_type.as_deref(), Some("Ceza"));
    assert!(parsed.main_topic.is_none());
    assert!(parsed.search_terms.is_none());
}

#[test]
fn test_parse_intent_malformed() {
    assert!(!parse_intent("Bilmiyorum.").is_well_formed());
    assert!(!parse_intent("Dava türü:\nAna konu:   ").is_well_formed());
}

// Fallback tiers

#[test]
fn test_fallback_tier_one_legal_terms() {
    let keywords = fallback_keywords(NAFAKA_QUERY);
    assert_eq!(keywords, ["nafaka", "boşanma"]);
}

#[test]
fn test_fallback_tier_one_multi_word_term() {
    let keywords = fallback_keywords("iş kazası sonucu maluliyet");
    assert_eq!(keywords, ["iş kazası"]);
}

#[test]
fn test_fallback_tier_two_generic_terms() {
    let keywords = fallback_keywords("Bu konu hakkında emsal karar lazım");
    assert_eq!(keywords, ["karar", "emsal", "konu"]);
}

#[test]
fn test_fallback_tier_three_tokens() {
    let keywords = fallback_keywords("Kiracı tahliye talebi kira bedeli ödenmedi, hakkında bilgi");
    assert_eq!(keywords, ["kiracı", "tahliye", "talebi", "kira", "bedeli"]);
}

#[test]
fn test_fallback_tier_three_drops_stop_words_and_short_tokens() {
    let keywords = fallback_keywords("ve ile bul istiyorum kira");
    assert_eq!(keywords, ["kira"]);
}

#[test]
fn test_fallback_search_terms_first_five_words() {
    let terms = fallback_search_terms("a b c d e f g");
    assert_eq!(terms, ["a", "b", "c", "d", "e"]);
}

// Intent

#[test]
fn test_case_category_from_label() {
    assert_eq!(CaseCategory::from_label("Ceza"), CaseCategory::Criminal);
    assert_eq!(CaseCategory::from_label("Aile Hukuku"), CaseCategory::Family);
    assert_eq!(CaseCategory::from_label("medeni"), CaseCategory::Civil);
    assert_eq!(CaseCategory::from_label("İş"), CaseCategory::Labor);
    assert_eq!(CaseCategory::from_label("İŞ HUKUKU"), CaseCategory::Labor);
    assert_eq!(CaseCategory::from_label("İdari"), CaseCategory::Administrative);
    assert_eq!(CaseCategory::from_label("Genel"), CaseCategory::General);
    assert_eq!(CaseCategory::from_label(""), CaseCategory::General);
    assert_eq!(
        CaseCategory::from_label("Ticaret"),
        CaseCategory::Other("Ticaret".to_string())
    );
}

#[test]
fn test_intent_is_criminal_is_literal_label_check() {
    assert!(QueryIntent::new("Ceza", "", vec![]).is_criminal);
    assert!(QueryIntent::new("Ağır Ceza", "", vec![]).is_criminal);
    assert!(!QueryIntent::new("ceza", "", vec![]).is_criminal);
    assert!(!QueryIntent::new("Aile", "", vec![]).is_criminal);
}

#[test]
fn test_intent_fallback_shape() {
    let intent = QueryIntent::fallback(NAFAKA_QUERY);
    assert_eq!(intent.category, CaseCategory::General);
    assert_eq!(intent.category_label, "Genel");
    assert!(intent.main_topic.is_empty());
    assert_eq!(intent.search_terms.len(), 5);
    assert!(!intent.is_criminal);
}

// Cache

#[test]
fn test_cache_fields_are_independent() {
    let cache = AnalysisCache::new();
    cache.insert_keywords("q", vec!["nafaka".to_string()]);

    assert_eq!(cache.keywords("q").unwrap(), ["nafaka"]);
    assert!(cache.intent("q").is_none());

    cache.insert_intent("q", QueryIntent::fallback("q"));
    assert!(cache.intent("q").is_some());
    assert_eq!(cache.keywords("q").unwrap(), ["nafaka"]);
}

#[test]
fn test_cache_keyed_by_exact_query() {
    let cache = AnalysisCache::new();
    cache.insert_keywords("nafaka", vec!["a".to_string()]);

    assert!(cache.keywords("nafaka ").is_none());
    assert!(cache.keywords("Nafaka").is_none());
    assert!(cache.contains_query("nafaka"));
}

#[test]
fn test_cache_clear() {
    let cache = AnalysisCache::new();
    cache.insert_keywords("a", vec!["x".to_string()]);
    cache.insert_intent("b", QueryIntent::fallback("b"));

    cache.clear();
    cache.run_pending_tasks();

    assert!(cache.keywords("a").is_none());
    assert!(cache.intent("b").is_none());
    assert!(!cache.contains_query("a"));
}

// Analyzer

#[tokio::test]
async fn test_extract_keywords_from_model() {
    let llm = MockLanguageModel::new().respond_when("KEYWORDS", "KEYWORDS: nafaka artırımı, boşanma");
    let cache = AnalysisCache::new();
    let analyzer = QueryAnalyzer::default();

    let keywords = analyzer.extract_keywords(NAFAKA_QUERY, &cache, Some(&llm)).await;

    assert_eq!(keywords, ["nafaka artırımı", "boşanma"]);
    assert_eq!(llm.calls()[0].1, 200);
}

#[tokio::test]
async fn test_extract_keywords_cached_within_scope() {
    let llm = MockLanguageModel::new().respond_when("KEYWORDS", "KEYWORDS: nafaka");
    let cache = AnalysisCache::new();
    let analyzer = QueryAnalyzer::default();

    analyzer.extract_keywords(NAFAKA_QUERY, &cache, Some(&llm)).await;
    analyzer.extract_keywords(NAFAKA_QUERY, &cache, Some(&llm)).await;

    assert_eq!(llm.call_count(), 1);
}

#[tokio::test]
async fn test_extract_keywords_model_failure_falls_back() {
    let llm = MockLanguageModel::failing();
    let cache = AnalysisCache::new();

    let keywords = QueryAnalyzer::default()
        .extract_keywords(NAFAKA_QUERY, &cache, Some(&llm))
        .await;

    assert_eq!(keywords, ["nafaka", "boşanma"]);
}

#[tokio::test]
async fn test_extract_keywords_malformed_answer_falls_back() {
    let llm = MockLanguageModel::new().with_default_reply("Üzgünüm, yardımcı olamam.");
    let cache = AnalysisCache::new();

    let keywords = QueryAnalyzer::default()
        .extract_keywords(NAFAKA_QUERY, &cache, Some(&llm))
        .await;

    assert_eq!(keywords, ["nafaka", "boşanma"]);
}

#[tokio::test]
async fn test_extract_keywords_without_model_never_empty() {
    let cache = AnalysisCache::new();
    let analyzer = QueryAnalyzer::default();

    for query in [
        NAFAKA_QUERY,
        "emsal karar",
        "Kiracının tahliyesi",
        "komşunun ağacı bahçeme taştı",
    ] {
        let keywords = analyzer.extract_keywords(query, &cache, no_llm()).await;
        assert!(!keywords.is_empty(), "no keywords for {query:?}");
    }
}

#[tokio::test]
async fn test_extract_intent_from_model() {
    let llm = MockLanguageModel::new().respond_when(
        "Dava türü",
        "1. Dava türü: Ceza\n2. Ana konu: Meşru müdafaa\n3. Arama terimleri: meşru müdafaa, kasten öldürme",
    );
    let cache = AnalysisCache::new();

    let intent = QueryAnalyzer::default()
        .extract_intent("Kendimi savunurken...", &cache, Some(&llm))
        .await;

    assert_eq!(intent.category, CaseCategory::Criminal);
    assert!(intent.is_criminal);
    assert_eq!(intent.main_topic, "Meşru müdafaa");
    assert_eq!(intent.search_terms, ["meşru müdafaa", "kasten öldürme"]);
}

#[tokio::test]
async fn test_extract_intent_partial_answer_defaults_missing_fields() {
    let llm = MockLanguageModel::new().respond_when("Dava türü", "Ana konu: Kira tespiti");
    let cache = AnalysisCache::new();

    let intent = QueryAnalyzer::default()
        .extract_intent("kira bedeli", &cache, Some(&llm))
        .await;

    assert_eq!(intent.category_label, "Genel");
    assert_eq!(intent.main_topic, "Kira tespiti");
    assert!(intent.search_terms.is_empty());
}

#[tokio::test]
async fn test_extract_intent_without_model_uses_fallback() {
    let cache = AnalysisCache::new();
    let intent = QueryAnalyzer::default()
        .extract_intent(NAFAKA_QUERY, &cache, no_llm())
        .await;

    assert_eq!(intent, QueryIntent::fallback(NAFAKA_QUERY));
}

#[tokio::test]
async fn test_keywords_and_intent_share_cache_entry() {
    let llm = MockLanguageModel::new()
        .respond_when("KEYWORDS", "KEYWORDS: nafaka")
        .respond_when("Dava türü", "Dava türü: Aile");
    let cache = AnalysisCache::new();
    let analyzer = QueryAnalyzer::default();

    analyzer.extract_keywords(NAFAKA_QUERY, &cache, Some(&llm)).await;
    let intent = analyzer.extract_intent(NAFAKA_QUERY, &cache, Some(&llm)).await;

    assert_eq!(intent.category, CaseCategory::Family);
    assert_eq!(llm.call_count(), 2);
    assert_eq!(cache.keywords(NAFAKA_QUERY).unwrap(), ["nafaka"]);
}
