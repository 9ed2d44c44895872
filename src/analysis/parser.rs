//! Line-oriented parsers for model answers.
//!
//! Both parsers scan the answer once, line by line, and report either a well-formed
//! result or the reason it was rejected. They never panic on arbitrary input.

/// Marker that introduces the keyword list.
pub const KEYWORDS_MARKER: &str = "KEYWORDS:";

pub const CASE_TYPE_MARKER: &str = "Dava türü:";
pub const MAIN_TOPIC_MARKER: &str = "Ana konu:";
pub const SEARCH_TERMS_MARKER: &str = "Arama terimleri:";

/// Result of parsing a model answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    WellFormed(T),
    Malformed { reason: &'static str },
}

impl<T> ParseOutcome<T> {
    pub fn is_well_formed(&self) -> bool {
        matches!(self, ParseOutcome::WellFormed(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            ParseOutcome::WellFormed(value) => Some(value),
            ParseOutcome::Malformed { .. } => None,
        }
    }
}

/// Fields found in an intent answer. Absent fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedIntent {
    pub case_type: Option<String>,
    pub main_topic: Option<String>,
    pub search_terms: Option<Vec<String>>,
}

/// Parses the first `KEYWORDS:` line into a comma-separated term list.
///
/// Terms are trimmed, stripped of list brackets, and empty ones dropped. An answer
/// with no marker or with no terms after it is malformed.
pub fn parse_keywords(answer: &str) -> ParseOutcome<Vec<String>> {
    let Some(rest) = answer
        .lines()
        .find_map(|line| line.split_once(KEYWORDS_MARKER).map(|(_, rest)| rest))
    else {
        return ParseOutcome::Malformed {
            reason: "missing KEYWORDS marker",
        };
    };

    let keywords = split_terms(rest);
    if keywords.is_empty() {
        ParseOutcome::Malformed {
            reason: "empty keyword list",
        }
    } else {
        ParseOutcome::WellFormed(keywords)
    }
}

#[derive(Clone, Copy)]
enum IntentField {
    CaseType,
    MainTopic,
    SearchTerms,
}

const INTENT_FIELDS: [(&str, IntentField); 3] = [
    (CASE_TYPE_MARKER, IntentField::CaseType),
    (MAIN_TOPIC_MARKER, IntentField::MainTopic),
    (SEARCH_TERMS_MARKER, IntentField::SearchTerms),
];

/// Parses the three-line intent block.
///
/// Lines may carry numbering (`1. Dava türü: Aile`); the first occurrence of each
/// field wins. An answer in which no field carries a value is malformed.
pub fn parse_intent(answer: &str) -> ParseOutcome<ParsedIntent> {
    let mut parsed = ParsedIntent::default();

    for line in answer.lines() {
        let Some((field, value)) = INTENT_FIELDS
            .iter()
            .find_map(|(marker, field)| line.split_once(marker).map(|(_, v)| (*field, v)))
        else {
            continue;
        };

        match field {
            IntentField::CaseType if parsed.case_type.is_none() => {
                parsed.case_type = non_empty(clean_value(value));
            }
            IntentField::MainTopic if parsed.main_topic.is_none() => {
                parsed.main_topic = non_empty(clean_value(value));
            }
            IntentField::SearchTerms if parsed.search_terms.is_none() => {
                let terms = split_terms(value);
                parsed.search_terms = (!terms.is_empty()).then_some(terms);
            }
            _ => {}
        }
    }

    if parsed == ParsedIntent::default() {
        ParseOutcome::Malformed {
            reason: "no intent fields found",
        }
    } else {
        ParseOutcome::WellFormed(parsed)
    }
}

fn split_terms(list: &str) -> Vec<String> {
    list.split(',')
        .map(clean_value)
        .filter(|term| !term.is_empty())
        .collect()
}

fn clean_value(value: &str) -> String {
    value
        .trim()
        .trim_matches(|c: char| matches!(c, '[' | ']' | '"' | '.'))
        .trim()
        .to_string()
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
