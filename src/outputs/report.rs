//! Topic-model reporting: article ranking, console output, JSON mirror.
//!
//! The console format is fixed plain text with no machine-readable contract;
//! the optional JSON file carries the same content for anything that wants
//! to consume it programmatically.

use crate::models::{DocumentMeta, RankedArticle, TopicModelReport};
use itertools::Itertools;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Collect per-topic article associations from per-document topic
/// distributions.
///
/// `doc_topics[d]` holds the `(topic, probability)` pairs document `d` is
/// associated with. For each topic the full association count is kept, then
/// articles are sorted by descending probability and truncated to `top_n`.
pub fn rank_articles(
    doc_topics: &[Vec<(usize, f64)>],
    metadata: &[DocumentMeta],
    num_topics: usize,
    top_n: usize,
) -> Vec<(usize, Vec<RankedArticle>)> {
    let mut per_topic: Vec<Vec<(usize, f64)>> = vec![Vec::new(); num_topics];
    for (doc_index, topics) in doc_topics.iter().enumerate() {
        for &(topic_id, probability) in topics {
            per_topic[topic_id].push((doc_index, probability));
        }
    }

    per_topic
        .into_iter()
        .map(|mut associated| {
            let article_count = associated.len();
            associated.sort_by(|a, b| b.1.total_cmp(&a.1));
            associated.truncate(top_n);
            let ranked = associated
                .into_iter()
                .map(|(doc_index, probability)| RankedArticle {
                    title: metadata[doc_index].title.clone(),
                    probability,
                })
                .collect();
            (article_count, ranked)
        })
        .collect()
}

/// Print the report in the fixed console format.
///
/// `top_n` is the configured list size; topics with fewer associated
/// articles print shorter lists.
pub fn print_report(report: &TopicModelReport, top_n: usize) {
    for topic in &report.topics {
        let words = topic.top_words.iter().map(|w| w.word.as_str()).join(", ");
        println!("Topic {}: {}", topic.topic_id, words);
    }

    println!();
    println!(
        "Coherence Score for {} topics: {:.4}",
        report.num_topics, report.coherence
    );
    println!();

    for topic in &report.topics {
        println!(
            "Topic {} is associated with {} articles",
            topic.topic_id, topic.article_count
        );
    }

    for topic in &report.topics {
        println!();
        println!("Top {} article titles for Topic {}:", top_n, topic.topic_id);
        for article in &topic.top_articles {
            println!(
                " - {} (association score: {:.4})",
                article.title, article.probability
            );
        }
    }
}

/// Write the report as JSON under a date-named directory.
///
/// The file lands at `{json_output_dir}/{date}/topics.json`.
#[instrument(level = "info", skip(report))]
pub async fn write_report_json(
    report: &TopicModelReport,
    json_output_dir: &str,
) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string(report)?;

    let local_date = chrono::Local::now().date_naive().to_string();
    let full_dir = format!("{json_output_dir}/{local_date}");
    fs::create_dir_all(&full_dir).await?;

    let output_path = format!("{full_dir}/topics.json");
    fs::write(&output_path, json).await?;
    info!(path = %output_path, "Wrote topic report JSON");

    Ok(())
}
