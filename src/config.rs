//! Runtime configuration, optionally loaded from a YAML file.
//!
//! Both pipelines run fine with no configuration file at all: every field has
//! a default matching the constants the tool shipped with. A YAML file passed
//! via `--config` may override any subset of fields:
//!
//! ```yaml
//! scrape:
//!   keyword: "日本"
//!   max_pages: 50
//! topics:
//!   num_topics: 12
//!   extra_stopwords: ["xinhua"]
//! ```
//!
//! Command-line flags take precedence over file values.

use serde::Deserialize;
use std::error::Error;
use tracing::info;

/// Top-level configuration, one section per subcommand.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scrape: ScrapeConfig,
    pub topics: TopicsConfig,
}

/// Settings for the `scrape-urls` pipeline.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Listing page the session opens first.
    pub start_url: String,
    /// Keyword that must appear in the anchor text or the adjacent snippet.
    pub keyword: String,
    /// CSV file URLs are appended to.
    pub output: String,
    /// Upper bound on the number of listing pages scraped in one run.
    pub max_pages: u32,
    /// Fixed delay before parsing each fetched page, in seconds.
    pub page_delay_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            start_url: "http://en.people.cn/518256/index.html".to_string(),
            keyword: "朝鲜".to_string(),
            output: "article_urls.csv".to_string(),
            max_pages: 100,
            page_delay_secs: 5,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                         AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/89.0.4389.82 Safari/537.36"
                .to_string(),
        }
    }
}

/// Hyperparameters and report sizes for the `model-topics` pipeline.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TopicsConfig {
    /// Number of topics to fit.
    pub num_topics: usize,
    /// Full Gibbs sweeps over the corpus.
    pub passes: usize,
    /// RNG seed; runs with the same seed and corpus are identical.
    pub seed: u64,
    /// Symmetric document-topic prior.
    pub alpha: f64,
    /// Symmetric topic-word prior.
    pub beta: f64,
    /// Tokens in fewer documents than this are dropped from the dictionary.
    pub no_below: usize,
    /// Tokens in more than this fraction of documents are dropped.
    pub no_above: f64,
    /// Words shown per topic in the report.
    pub top_words: usize,
    /// Article titles shown per topic in the report.
    pub top_articles: usize,
    /// Minimum probability for a document to count as associated with a topic.
    pub min_topic_probability: f64,
    /// Stopwords applied on top of the built-in set.
    pub extra_stopwords: Vec<String>,
}

impl Default for TopicsConfig {
    fn default() -> Self {
        Self {
            num_topics: 10,
            passes: 10,
            seed: 42,
            alpha: 0.1,
            beta: 0.01,
            no_below: 5,
            no_above: 0.45,
            top_words: 10,
            top_articles: 10,
            min_topic_probability: 0.01,
            extra_stopwords: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, or return defaults when no path is given.
    pub fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
        match path {
            Some(p) => {
                let text = std::fs::read_to_string(p)?;
                let config: AppConfig = serde_yaml::from_str(&text)?;
                info!(path = %p, "Loaded configuration");
                Ok(config)
            }
            None => Ok(AppConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.scrape.start_url, "http://en.people.cn/518256/index.html");
        assert_eq!(config.scrape.max_pages, 100);
        assert_eq!(config.scrape.page_delay_secs, 5);
        assert_eq!(config.topics.num_topics, 10);
        assert_eq!(config.topics.passes, 10);
        assert_eq!(config.topics.seed, 42);
        assert_eq!(config.topics.no_below, 5);
        assert_eq!(config.topics.no_above, 0.45);
        assert_eq!(config.topics.top_articles, 10);
    }

    #[test]
    fn test_partial_yaml_override() {
        let yaml = r#"
scrape:
  keyword: "日本"
  max_pages: 50
topics:
  num_topics: 12
  extra_stopwords: ["xinhua"]
"#;
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.scrape.keyword, "日本");
        assert_eq!(config.scrape.max_pages, 50);
        // Untouched fields keep their defaults.
        assert_eq!(config.scrape.page_delay_secs, 5);
        assert_eq!(config.topics.num_topics, 12);
        assert_eq!(config.topics.passes, 10);
        assert_eq!(config.topics.extra_stopwords, vec!["xinhua".to_string()]);
    }

    #[test]
    fn test_load_without_path_gives_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.topics.num_topics, 10);
    }
}
