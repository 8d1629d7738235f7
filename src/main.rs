//! # press_topics
//!
//! A two-part research tool for studying news coverage of a topic:
//!
//! - **scrape-urls** collects article URLs from a People's Daily listing page
//!   whenever the target keyword appears in the anchor text or the adjacent
//!   snippet, appending them to a CSV while a human drives pagination from
//!   the keyboard
//! - **model-topics** loads a CSV of article text, fits a seeded LDA topic
//!   model over the normalized corpus, and reports top words, per-topic
//!   article counts, and the most-associated article titles
//!
//! ## Usage
//!
//! ```sh
//! press_topics scrape-urls --keyword 朝鲜 --output article_urls.csv
//! press_topics model-topics --input articles.csv
//! ```
//!
//! ## Architecture
//!
//! The pipelines are independent and strictly sequential:
//!
//! 1. **Scrape**: fetch a listing page, extract keyword-matched links,
//!    append them to the CSV, then ask the human whether to continue and
//!    where the next page is, bounded by the page limit
//! 2. **Model**: load the CSV, normalize rows into token documents, build
//!    and filter the dictionary, vectorize, fit the seeded LDA model, score
//!    coherence, rank articles per topic, and print the report (with an
//!    optional JSON mirror)

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

mod cli;
mod config;
mod models;
mod outputs;
mod scrapers;
mod topics;
mod utils;

use cli::{Cli, Command};
use config::AppConfig;
use models::{TopicModelReport, TopicSummary, WordWeight};
use scrapers::session::ScrapeSession;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("press_topics starting up");

    let args = Cli::parse();
    debug!(?args.config, "Parsed CLI arguments");
    let config = AppConfig::load(args.config.as_deref())?;

    match args.command {
        Command::ScrapeUrls {
            start_url,
            keyword,
            output,
            max_pages,
        } => {
            run_scrape(&config, start_url, keyword, output, max_pages).await?;
        }
        Command::ModelTopics {
            input,
            num_topics,
            json_output_dir,
        } => {
            run_topics(&config, &input, num_topics, json_output_dir.as_deref()).await?;
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}

/// Run the human-gated URL scraping loop.
async fn run_scrape(
    config: &AppConfig,
    start_url: Option<String>,
    keyword: Option<String>,
    output: Option<String>,
    max_pages: Option<u32>,
) -> Result<(), Box<dyn Error>> {
    let scrape = &config.scrape;
    let start_url = start_url.unwrap_or_else(|| scrape.start_url.clone());
    let keyword = keyword.unwrap_or_else(|| scrape.keyword.clone());
    let output = output.unwrap_or_else(|| scrape.output.clone());
    let max_pages = max_pages.unwrap_or(scrape.max_pages);

    info!(%start_url, %keyword, %output, max_pages, "Starting scraping session");

    let mut session = ScrapeSession::new(
        &scrape.user_agent,
        Duration::from_secs(scrape.page_delay_secs),
    )?;

    println!("Opening the main article listing page...");
    println!("Listing: {start_url}");
    let mut current_url = prompt_page_url(
        "Navigate to the first page you want to scrape, then enter its URL \
         (or press Enter to use the listing): ",
        Some(&start_url),
    )?;

    let mut page_number = 1u32;
    let mut total_urls = 0usize;
    while page_number <= max_pages {
        println!("Scraping page {page_number}...");
        let html = session.fetch_listing(&current_url).await?;
        let links = scrapers::peoples_daily::extract_article_links(&html, &keyword, &mut session.seen);

        total_urls += links.len();
        outputs::csv::append_urls(&output, &links)?;
        println!("URLs added to {output}");

        let answer =
            utils::prompt_line("Continue to next page? Type 'yes' to continue or 'no' to stop: ")?;
        if utils::answer_means_stop(&answer) {
            println!("Stopping the scraping process...");
            break;
        }

        current_url = prompt_page_url(
            "Manually advance to the next page in your browser, then enter its URL: ",
            None,
        )?;
        page_number += 1;
    }

    info!(
        pages = page_number.min(max_pages),
        urls = total_urls,
        "Scraping session finished"
    );
    Ok(())
}

/// Prompt until the human enters a parseable URL.
///
/// An empty answer returns `default` when one is given.
fn prompt_page_url(message: &str, default: Option<&str>) -> Result<String, Box<dyn Error>> {
    loop {
        let input = utils::prompt_line(message)?;
        if input.is_empty() {
            if let Some(default) = default {
                return Ok(default.to_string());
            }
        } else {
            match Url::parse(&input) {
                Ok(_) => return Ok(input),
                Err(e) => warn!(error = %e, input = %input, "Not a valid URL"),
            }
        }
        println!("That doesn't look like a URL, try again.");
    }
}

/// Run the topic-model pipeline over an article CSV.
async fn run_topics(
    config: &AppConfig,
    input: &str,
    num_topics_override: Option<usize>,
    json_output_dir: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    let topics_config = &config.topics;
    let num_topics = num_topics_override.unwrap_or(topics_config.num_topics);

    // ---- Load and preprocess ----
    let stopwords = topics::preprocess::stopword_set(&topics_config.extra_stopwords);
    let (documents, metadata) = topics::corpus::load_and_preprocess(input, &stopwords)?;
    let dated = metadata.iter().filter(|meta| meta.date.is_some()).count();
    debug!(
        documents = documents.len(),
        dated, "Rows with a parseable date"
    );

    // ---- Dictionary and corpus ----
    let dictionary = topics::corpus::Dictionary::build(&documents)
        .filter_extremes(topics_config.no_below, topics_config.no_above);
    let corpus = topics::corpus::build_corpus(&dictionary, &documents);
    info!(
        documents = corpus.len(),
        vocabulary = dictionary.len(),
        "Corpus vectorized"
    );

    // ---- Fit ----
    println!("\nRunning LDA with {num_topics} topics...");
    let params = topics::lda::LdaParams {
        num_topics,
        passes: topics_config.passes,
        alpha: topics_config.alpha,
        beta: topics_config.beta,
        seed: topics_config.seed,
    };
    let model = topics::lda::LdaModel::fit(&corpus, dictionary.len(), &params);

    // ---- Top words per topic ----
    let top_words: Vec<Vec<WordWeight>> = (0..model.num_topics())
        .map(|topic| {
            model
                .top_words(topic, topics_config.top_words)
                .into_iter()
                .map(|(id, weight)| WordWeight {
                    word: dictionary.token(id).to_string(),
                    weight,
                })
                .collect()
        })
        .collect();

    // ---- Coherence ----
    let word_lists: Vec<Vec<String>> = top_words
        .iter()
        .map(|words| words.iter().map(|w| w.word.clone()).collect())
        .collect();
    let scores = topics::coherence::umass_coherence(&word_lists, &documents);
    let coherence = topics::coherence::average_coherence(&scores);

    // ---- Article ranking ----
    let doc_topics: Vec<Vec<(usize, f64)>> = (0..model.num_documents())
        .map(|doc| {
            model
                .document_topics(doc)
                .into_iter()
                .enumerate()
                .filter(|&(_, probability)| probability >= topics_config.min_topic_probability)
                .collect()
        })
        .collect();
    let ranked = outputs::report::rank_articles(
        &doc_topics,
        &metadata,
        num_topics,
        topics_config.top_articles,
    );

    let report = TopicModelReport {
        num_topics,
        coherence,
        topics: top_words
            .into_iter()
            .zip(ranked)
            .enumerate()
            .map(|(topic_id, (words, (article_count, top_articles)))| TopicSummary {
                topic_id,
                top_words: words,
                article_count,
                top_articles,
            })
            .collect(),
    };

    outputs::report::print_report(&report, topics_config.top_articles);

    if let Some(dir) = json_output_dir {
        utils::ensure_writable_dir(dir).await?;
        outputs::report::write_report_json(&report, dir).await?;
    }

    Ok(())
}
