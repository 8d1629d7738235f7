//! Command-line interface definitions for press_topics.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The two pipelines are exposed as independent subcommands; options that
//! mirror a configuration-file field are optional here and win over the file
//! value when given.

use clap::{Parser, Subcommand};

/// Command-line arguments for the press_topics application.
///
/// # Examples
///
/// ```sh
/// # Scrape keyword-matched URLs, prompting between pages
/// press_topics scrape-urls --keyword 朝鲜 --output article_urls.csv
///
/// # Fit the topic model over a scraped-and-cleaned corpus
/// press_topics model-topics --input articles.csv
///
/// # Same, also writing the report as JSON
/// press_topics model-topics --input articles.csv --json-output-dir ./json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML configuration file
    #[arg(short, long, env = "PRESS_TOPICS_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// The two pipelines.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect keyword-matched article URLs from a news listing site into a CSV
    ScrapeUrls {
        /// Listing page to open first
        #[arg(long)]
        start_url: Option<String>,

        /// Keyword the anchor text or adjacent snippet must contain
        #[arg(short, long)]
        keyword: Option<String>,

        /// CSV file to append collected URLs to
        #[arg(short, long)]
        output: Option<String>,

        /// Maximum number of listing pages to scrape this run
        #[arg(long)]
        max_pages: Option<u32>,
    },

    /// Fit an LDA topic model over a CSV of article text and print the report
    ModelTopics {
        /// Input CSV with `content`, `date`, and optional `title` columns
        #[arg(short, long)]
        input: String,

        /// Number of topics to fit
        #[arg(short = 't', long)]
        num_topics: Option<usize>,

        /// Directory to also write the report to as JSON
        #[arg(short, long)]
        json_output_dir: Option<String>,
    },
}
