//! Rule-based "how citable is this decision" heuristic.
//!
//! The model is additive and capped so every point of the score can be traced back
//! to a vocabulary hit or a court-level rule:
//!
//! - `+0.10` per positive-outcome term found in the decision text
//! - `+0.05` per legal-principle term found in the decision text
//! - court hierarchy, evaluated once: `+0.30` for a general assembly or the
//!   constitutional court, else `+0.20` for Yargıtay / Danıştay
//! - `+0.10` when the court string mentions 2023 or 2024
//!
//! The sum is clamped to `[0, 1]`.

const POSITIVE_OUTCOME_WEIGHT: f32 = 0.1;
const LEGAL_PRINCIPLE_WEIGHT: f32 = 0.05;
const SUPREME_ASSEMBLY_BONUS: f32 = 0.3;
const TOP_COURT_BONUS: f32 = 0.2;
const RECENCY_BONUS: f32 = 0.1;

const POSITIVE_OUTCOMES: &[&str] = &[
    "kabul",
    "uygun",
    "doğru",
    "geçerli",
    "haklı",
    "yerinde",
    "onaylandı",
    "desteklendi",
    "kabul edildi",
    "uygun bulundu",
    "doğru bulundu",
    "hukuka uygun",
    "adil",
    "hakkaniyetli",
    "memnuniyet verici",
];

const LEGAL_PRINCIPLES: &[&str] = &[
    "prensip",
    "kural",
    "esas",
    "hukuki",
    "yasal",
    "mevzuat",
    "kanun",
    "yönetmelik",
    "tüzük",
    "anayasa",
    "temel hak",
    "insan hakları",
];

const COURT_HIERARCHY: &[&str] = &[
    "yargıtay",
    "danıştay",
    "anayasa mahkemesi",
    "genel kurul",
    "büyük genel kurul",
    "hukuk genel kurul",
    "ceza genel kurul",
];

const SUPREME_ASSEMBLY_MARKERS: &[&str] = &["genel kurul", "anayasa"];
const TOP_COURT_MARKERS: &[&str] = &["yargıtay", "danıştay"];
const RECENT_YEARS: &[&str] = &["2023", "2024"];

/// Term lists driving the [`BenefitScorer`]. All entries must be lowercase.
#[derive(Debug, Clone)]
pub struct BenefitVocabulary {
    pub positive_outcomes: Vec<String>,
    pub legal_principles: Vec<String>,
    /// A court string must mention one of these before any hierarchy bonus applies.
    pub court_hierarchy: Vec<String>,
    pub supreme_assembly_markers: Vec<String>,
    pub top_court_markers: Vec<String>,
    pub recent_years: Vec<String>,
}

impl Default for BenefitVocabulary {
    fn default() -> Self {
        fn owned(terms: &[&str]) -> Vec<String> {
            terms.iter().map(|t| t.to_string()).collect()
        }

        Self {
            positive_outcomes: owned(POSITIVE_OUTCOMES),
            legal_principles: owned(LEGAL_PRINCIPLES),
            court_hierarchy: owned(COURT_HIERARCHY),
            supreme_assembly_markers: owned(SUPREME_ASSEMBLY_MARKERS),
            top_court_markers: owned(TOP_COURT_MARKERS),
            recent_years: owned(RECENT_YEARS),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BenefitScorer {
    vocabulary: BenefitVocabulary,
}

impl BenefitScorer {
    pub fn new(vocabulary: BenefitVocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &BenefitVocabulary {
        &self.vocabulary
    }

    /// Scores a decision from its text and the issuing-court string. Result is in `[0, 1]`.
    pub fn score(&self, decision_text: &str, court_info: &str) -> f32 {
        let text_lower = decision_text.to_lowercase();
        let court_lower = court_info.to_lowercase();

        let positive = count_hits(&text_lower, &self.vocabulary.positive_outcomes);
        let principles = count_hits(&text_lower, &self.vocabulary.legal_principles);

        let mut score = positive as f32 * POSITIVE_OUTCOME_WEIGHT
            + principles as f32 * LEGAL_PRINCIPLE_WEIGHT
            + self.hierarchy_bonus(&court_lower);

        // Years are digits, so the raw string is checked as-is.
        if contains_any(court_info, &self.vocabulary.recent_years) {
            score += RECENCY_BONUS;
        }

        score.clamp(0.0, 1.0)
    }

    fn hierarchy_bonus(&self, court_lower: &str) -> f32 {
        if !contains_any(court_lower, &self.vocabulary.court_hierarchy) {
            return 0.0;
        }

        if contains_any(court_lower, &self.vocabulary.supreme_assembly_markers) {
            SUPREME_ASSEMBLY_BONUS
        } else if contains_any(court_lower, &self.vocabulary.top_court_markers) {
            TOP_COURT_BONUS
        } else {
            0.0
        }
    }
}

fn count_hits(haystack: &str, terms: &[String]) -> usize {
    terms
        .iter()
        .filter(|term| haystack.contains(term.as_str()))
        .count()
}

fn contains_any(haystack: &str, terms: &[String]) -> bool {
    terms.iter().any(|term| haystack.contains(term.as_str()))
}
