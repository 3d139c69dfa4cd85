use std::collections::BTreeSet;

use crate::nlp::resources::LanguageResources;
use crate::nlp::tokenize::{is_punctuation, tokenize};

/// Distinct lowercase tokens that are not punctuation, not stop words and
/// longer than two characters.
pub fn extract_keywords(text: &str, resources: &LanguageResources) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    tokenize(&lower)
        .into_iter()
        .map(|t| t.text)
        .filter(|t| !is_punctuation(t) && !resources.is_stop_word(t) && t.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// Lowercases, strips ASCII punctuation and collapses whitespace runs.
pub fn preprocess_text(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}
