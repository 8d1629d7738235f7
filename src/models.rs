//! Data models for scraped article records and topic-model reporting.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ArticleRow`]: One raw CSV row of article text as produced by the scraper
//!   pipeline and consumed by the topic pipeline
//! - [`DocumentMeta`]: Per-document metadata carried alongside the token lists
//! - [`TopicSummary`], [`WordWeight`], [`RankedArticle`]: Per-topic report entries
//! - [`TopicModelReport`]: The full report written to the console and, optionally,
//!   to a JSON file

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the article CSV consumed by the `model-topics` subcommand.
///
/// The `content` and `date` columns must be present in the header; `title`
/// is optional. Empty cells deserialize to `None`.
#[derive(Debug, Deserialize)]
pub struct ArticleRow {
    /// The article body text. An empty or missing cell yields an empty document.
    pub content: Option<String>,
    /// The publication date string, in one of the two accepted formats.
    pub date: Option<String>,
    /// The article title. Rows without one get a positional fallback title.
    #[serde(default)]
    pub title: Option<String>,
}

/// Metadata for one document, aligned with the token lists by index.
///
/// Invariant: preprocessing produces exactly one `DocumentMeta` per input
/// row, so `documents.len() == metadata.len()` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMeta {
    /// Parsed publication date, or `None` if the date string matched neither
    /// accepted format.
    pub date: Option<NaiveDate>,
    /// The article title, falling back to `Untitled Article {index}`.
    pub title: String,
}

/// A word and its weight in a topic's word distribution.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WordWeight {
    pub word: String,
    pub weight: f64,
}

/// An article title ranked within a topic by association probability.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankedArticle {
    pub title: String,
    pub probability: f64,
}

/// The report entry for a single topic.
///
/// `top_articles` is sorted by descending probability and truncated to the
/// configured top-N; `article_count` counts every document whose topic
/// probability cleared the association threshold, not just the listed ones.
#[derive(Debug, Deserialize, Serialize)]
pub struct TopicSummary {
    /// Topic index in `0..num_topics`.
    pub topic_id: usize,
    /// Highest-weight words for this topic, descending.
    pub top_words: Vec<WordWeight>,
    /// Number of documents associated with this topic.
    pub article_count: usize,
    /// Top article titles for this topic, by descending association probability.
    pub top_articles: Vec<RankedArticle>,
}

/// The complete output of one `model-topics` run.
///
/// Printed to the console in the fixed plain-text format and optionally
/// serialized to `{json_output_dir}/{date}/topics.json`.
#[derive(Debug, Deserialize, Serialize)]
pub struct TopicModelReport {
    /// Number of topics the model was fitted with.
    pub num_topics: usize,
    /// Average UMass coherence over all topics.
    pub coherence: f64,
    /// Per-topic summaries, indexed by `topic_id`.
    pub topics: Vec<TopicSummary>,
}
