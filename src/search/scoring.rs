//! Keyword scoring against a record's searchable text.

use crate::catalog::EndpointRecord;
use regex::Regex;

/// Points for a term appearing anywhere in the haystack.
pub const SUBSTRING_WEIGHT: u32 = 3;

/// Extra points when the term also stands as a whole word.
pub const WHOLE_WORD_WEIGHT: u32 = 2;

/// One lower-cased query term with its whole-word pattern.
#[derive(Debug, Clone)]
pub struct TermMatcher {
    term: String,
    word: Option<Regex>,
}

impl TermMatcher {
    /// Returns None for terms that are empty after trimming.
    pub fn new(term: &str) -> Option<Self> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return None;
        }

        let pattern = format!(r"\b{}\b", regex::escape(&term));
        let word = match Regex::new(&pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(
                    term = %term,
                    error = %e,
                    "Whole-word pattern rejected; substring scoring only"
                );
                None
            }
        };

        Some(Self { term, word })
    }

    /// Score contribution of this term against a lower-cased haystack.
    pub fn score(&self, haystack: &str) -> u32 {
        let mut score = 0;
        if haystack.contains(&self.term) {
            score += SUBSTRING_WEIGHT;
        }
        if self.word.as_ref().is_some_and(|re| re.is_match(haystack)) {
            score += WHOLE_WORD_WEIGHT;
        }
        score
    }
}

/// Build matchers for `terms`, dropping empty ones.
pub fn compile_terms<S: AsRef<str>>(terms: &[S]) -> Vec<TermMatcher> {
    terms
        .iter()
        .filter_map(|t| TermMatcher::new(t.as_ref()))
        .collect()
}

/// Lower-cased `name category method path description`, space-joined.
pub fn haystack(record: &EndpointRecord) -> String {
    [
        record.name.as_str(),
        record.category.as_str(),
        record.method.as_str(),
        record.path.as_str(),
        record.description.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Cumulative score of `record` over all matchers.
pub fn score_record(record: &EndpointRecord, matchers: &[TermMatcher]) -> u32 {
    let text = haystack(record);
    matchers.iter().map(|m| m.score(&text)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_description(description: &str) -> EndpointRecord {
        EndpointRecord {
            description: description.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_whole_word_scores_five() {
        let record = record_with_description("Manage blocked senders list");
        assert_eq!(score_record(&record, &compile_terms(&["blocked"])), 5);
    }

    #[test]
    fn test_substring_only_scores_three() {
        let record = record_with_description("Manage blocked senders list");
        assert_eq!(score_record(&record, &compile_terms(&["lock"])), 3);
    }

    #[test]
    fn test_terms_accumulate() {
        let record = record_with_description("Manage blocked senders list");
        assert_eq!(
            score_record(&record, &compile_terms(&["blocked", "sender", "list"])),
            5 + 3 + 5
        );
    }

    #[test]
    fn test_no_match_scores_zero() {
        let record = record_with_description("Manage blocked senders list");
        assert_eq!(score_record(&record, &compile_terms(&["archive"])), 0);
    }

    #[test]
    fn test_haystack_is_case_folded() {
        let record = EndpointRecord {
            name: "Get Blocked Senders".into(),
            category: "Gateway".into(),
            method: "GET".into(),
            path: "/api/Policy/blocked-sender".into(),
            description: "".into(),
            ..Default::default()
        };

        assert_eq!(
            haystack(&record),
            "get blocked senders gateway get /api/policy/blocked-sender "
        );
        assert_eq!(score_record(&record, &compile_terms(&["BLOCKED"])), 5);
    }

    #[test]
    fn test_path_separators_are_word_boundaries() {
        let record = EndpointRecord {
            path: "/api/account/cloud-gateway/v1/emergency-contact".into(),
            ..Default::default()
        };
        assert_eq!(score_record(&record, &compile_terms(&["emergency"])), 5);
        assert_eq!(score_record(&record, &compile_terms(&["gate"])), 3);
    }

    #[test]
    fn test_empty_terms_are_dropped() {
        assert!(compile_terms(&["", "   "]).is_empty());
        assert!(compile_terms::<&str>(&[]).is_empty());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let record = record_with_description("supports c++ and .net clients");
        assert_eq!(score_record(&record, &compile_terms(&["c++"])), 3);
        assert_eq!(score_record(&record, &compile_terms(&["a.d"])), 0);
    }
}
