//! Per-run scrape session: HTTP client, dedup state, pacing.

use std::collections::HashSet;
use std::error::Error;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, instrument};

/// Context object threaded through one scraping run.
///
/// Holds the HTTP client and the seen-URL set, the only mutable state the
/// scraper has. URLs are deduplicated by exact string for the lifetime of
/// the session; no normalization is applied.
pub struct ScrapeSession {
    client: reqwest::Client,
    /// URLs already emitted this run.
    pub seen: HashSet<String>,
    page_delay: Duration,
}

impl ScrapeSession {
    /// Build a session with the given user agent and page delay.
    pub fn new(user_agent: &str, page_delay: Duration) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            seen: HashSet::new(),
            page_delay,
        })
    }

    /// Fetch a listing page and return its body.
    ///
    /// Sleeps the fixed page delay first to let the page settle; the delay
    /// is the only wait strategy, and failed fetches are not retried.
    #[instrument(level = "info", skip(self))]
    pub async fn fetch_listing(&self, url: &str) -> Result<String, Box<dyn Error>> {
        sleep(self.page_delay).await;
        let body = self.client.get(url).send().await?.text().await?;
        info!(bytes = body.len(), "Fetched listing page");
        Ok(body)
    }
}
