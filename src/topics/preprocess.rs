//! Text normalization for the topic pipeline.
//!
//! Each article body goes through the same deterministic, stateless steps:
//! lowercase, strip everything but ASCII letters and whitespace, split on
//! whitespace, drop stopwords and tokens of length <= 1.
//!
//! The stopword set is the English list from the `stop-words` crate plus a
//! curated list of news-corpus noise, optionally extended per run from
//! configuration.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Anything that is not an ASCII lowercase letter or whitespace, stripped
/// after lowercasing.
static STRIP_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z\s]").unwrap());

/// Corpus-specific noise words applied on top of the English stopword list.
const DOMAIN_STOPWORDS: &[&str] = &[
    "according", "said", "also", "new", "percent", "th", "i", "me", "my", "myself", "we", "our",
    "ours", "ourselves", "you", "your", "yours", "yourself", "yourselves", "he", "him", "his",
    "himself", "she", "her", "hers", "herself", "it", "its", "itself", "they", "them", "their",
    "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "these", "those",
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "doing", "a", "an", "the", "but", "if", "or", "because", "as", "until",
    "while", "of", "at", "by", "for", "with", "about", "against", "between", "into", "through",
    "during", "before", "after", "above", "below", "to", "from", "up", "down", "in", "out", "on",
    "off", "over", "under", "again", "further", "then", "once", "here", "there", "when", "where",
    "why", "how", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "should", "now", "two", "day", "week", "three", "month", "research",
    "showed", "year", "held", "first", "many", "open", "last", "monday", "one",
];

static BASE_STOPWORDS: Lazy<HashSet<String>> = Lazy::new(|| {
    let mut set: HashSet<String> = stop_words::get(stop_words::LANGUAGE::English)
        .into_iter()
        .collect();
    set.extend(DOMAIN_STOPWORDS.iter().map(|word| word.to_string()));
    set
});

/// Build the effective stopword set for a run.
///
/// `extra` comes from the configuration file and is unioned with the
/// built-in set.
pub fn stopword_set(extra: &[String]) -> HashSet<String> {
    let mut set = BASE_STOPWORDS.clone();
    set.extend(extra.iter().cloned());
    set
}

/// Normalize one article body into tokens.
///
/// # Examples
///
/// ```ignore
/// let stopwords = stopword_set(&[]);
/// assert_eq!(normalize("The RESEARCH Showed 123 Results!", &stopwords), vec!["results"]);
/// ```
pub fn normalize(text: &str, stopwords: &HashSet<String>) -> Vec<String> {
    let lowered = text.to_lowercase();
    let stripped = STRIP_PATTERN.replace_all(&lowered, "");
    stripped
        .split_whitespace()
        .filter(|token| token.len() > 1 && !stopwords.contains(*token))
        .map(|token| token.to_string())
        .collect()
}
