//! Output generation for the two pipelines.
//!
//! # Submodules
//!
//! - [`csv`]: appends scraped URLs to the single-column output CSV
//! - [`report`]: per-topic article ranking, the fixed-format console report,
//!   and its optional JSON mirror
//!
//! # Output Structure
//!
//! ```text
//! article_urls.csv          # scrape-urls: one `url` column, appended across runs
//!
//! json_output_dir/
//! └── 2025-05-06/
//!     └── topics.json       # model-topics: serialized TopicModelReport
//! ```

pub mod csv;
pub mod report;
