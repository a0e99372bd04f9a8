//! Named-target extraction.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use safety_gate::text::normalize_name;

/// Finds the people and organizations a text talks about.
///
/// The default implementation is a capitalization heuristic; a real NER
/// backend can stand in without touching the detector.
pub trait TargetExtractor {
    /// Candidate names in order of first appearance, without duplicates.
    fn extract_candidate_targets(&self, text: &str) -> Vec<String>;
}

static CAPITALIZED_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b[A-Z][a-zA-Z'-]{1,30}(?:\s{1,3}(?:(?:of|the|and|bin|ibn)\s{1,3})?[A-Z][a-zA-Z'-]{1,30}){1,4}\b",
    )
    .expect("Invalid capitalized phrase regex")
});

/// Runs of two to five capitalized tokens, optionally joined by
/// `of`/`the`/`and`/`bin`/`ibn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapitalizedPhraseExtractor;

impl TargetExtractor for CapitalizedPhraseExtractor {
    fn extract_candidate_targets(&self, text: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        CAPITALIZED_PHRASE
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .filter(|name| seen.insert(normalize_name(name)))
            .collect()
    }
}

/// Entries of `names` that occur in `sentence`, ignoring case, deduplicated
/// by normalized name.
pub(crate) fn targets_in_sentence<'a>(
    sentence: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let haystack = sentence.to_lowercase();
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| !name.trim().is_empty())
        .filter(|name| haystack.contains(&name.trim().to_lowercase()))
        .filter(|name| seen.insert(normalize_name(name)))
        .map(|name| name.trim().to_string())
        .collect()
}
