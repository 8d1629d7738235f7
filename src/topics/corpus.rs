//! Corpus loading, dictionary construction, and bag-of-words vectorization.
//!
//! [`load_and_preprocess`] turns the input CSV into one token document and
//! one [`DocumentMeta`] per row, positionally aligned. [`Dictionary`] maps
//! tokens to dense integer ids, drops extreme document frequencies, and
//! vectorizes documents via [`Dictionary::doc2bow`].
//!
//! Token ids are assigned in first-appearance order over the corpus, so the
//! dictionary (and everything downstream of it, including the seeded model
//! fit) is reproducible for a given input file.

use crate::models::{ArticleRow, DocumentMeta};
use crate::topics::preprocess;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use tracing::{info, instrument};

/// Accepted `date` column formats, tried in order.
const DATE_WITH_TIME_FORMAT: &str = "%H:%M, %B %d, %Y";
const DATE_ONLY_FORMAT: &str = "%B %d, %Y";

/// Parse an article date string, degrading to `None` on any failure.
pub fn parse_article_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(with_time) = NaiveDateTime::parse_from_str(raw, DATE_WITH_TIME_FORMAT) {
        return Some(with_time.date());
    }
    NaiveDate::parse_from_str(raw, DATE_ONLY_FORMAT).ok()
}

/// Load the article CSV and preprocess every row into a token document.
///
/// Returns one document and one metadata entry per row. Rows with an empty
/// or missing `content` cell become empty documents but still occupy their
/// index, so `documents.len() == metadata.len()` holds for every input.
///
/// # Errors
///
/// Fails if the file cannot be opened or a row cannot be deserialized
/// (missing `content`/`date` columns, malformed quoting).
#[instrument(level = "info", skip(stopwords))]
pub fn load_and_preprocess(
    path: &str,
    stopwords: &HashSet<String>,
) -> Result<(Vec<Vec<String>>, Vec<DocumentMeta>), Box<dyn Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut documents = Vec::new();
    let mut metadata = Vec::new();

    for (index, result) in reader.deserialize::<ArticleRow>().enumerate() {
        let row = result?;

        let date = row.date.as_deref().and_then(parse_article_date);
        let title = match row.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => format!("Untitled Article {index}"),
        };
        metadata.push(DocumentMeta { date, title });

        let tokens = row
            .content
            .as_deref()
            .map(|content| preprocess::normalize(content, stopwords))
            .unwrap_or_default();
        documents.push(tokens);
    }

    info!(documents = documents.len(), path, "Loaded and preprocessed corpus");
    Ok((documents, metadata))
}

/// Token-to-id mapping with per-token document frequencies.
///
/// Built once over the full corpus with [`Dictionary::build`], optionally
/// narrowed with [`Dictionary::filter_extremes`], then used read-only.
#[derive(Debug)]
pub struct Dictionary {
    token_to_id: HashMap<String, u32>,
    id_to_token: Vec<String>,
    doc_freq: Vec<u32>,
    num_docs: usize,
}

impl Dictionary {
    /// Build a dictionary over all documents.
    ///
    /// Ids are dense and assigned in first-appearance order; `doc_freq`
    /// counts the number of documents containing each token at least once.
    pub fn build(documents: &[Vec<String>]) -> Self {
        let mut token_to_id: HashMap<String, u32> = HashMap::new();
        let mut id_to_token: Vec<String> = Vec::new();
        let mut doc_freq: Vec<u32> = Vec::new();

        for document in documents {
            let mut seen_in_doc: HashSet<&str> = HashSet::new();
            for token in document {
                if !seen_in_doc.insert(token.as_str()) {
                    continue;
                }
                let id = match token_to_id.get(token) {
                    Some(&id) => id,
                    None => {
                        let id = id_to_token.len() as u32;
                        token_to_id.insert(token.clone(), id);
                        id_to_token.push(token.clone());
                        doc_freq.push(0);
                        id
                    }
                };
                doc_freq[id as usize] += 1;
            }
        }

        Self {
            token_to_id,
            id_to_token,
            doc_freq,
            num_docs: documents.len(),
        }
    }

    /// Drop extreme-frequency tokens and recompact ids.
    ///
    /// A token survives when it appears in at least `no_below` documents and
    /// in at most `no_above` (a fraction) of all documents. Surviving tokens
    /// keep their relative order and get fresh dense ids.
    pub fn filter_extremes(self, no_below: usize, no_above: f64) -> Self {
        let max_docs = no_above * self.num_docs as f64;

        let mut token_to_id: HashMap<String, u32> = HashMap::new();
        let mut id_to_token: Vec<String> = Vec::new();
        let mut doc_freq: Vec<u32> = Vec::new();

        for (id, token) in self.id_to_token.into_iter().enumerate() {
            let df = self.doc_freq[id];
            if (df as usize) < no_below || df as f64 > max_docs {
                continue;
            }
            let new_id = id_to_token.len() as u32;
            token_to_id.insert(token.clone(), new_id);
            id_to_token.push(token);
            doc_freq.push(df);
        }

        info!(
            kept = id_to_token.len(),
            no_below,
            no_above,
            "Filtered dictionary extremes"
        );

        Self {
            token_to_id,
            id_to_token,
            doc_freq,
            num_docs: self.num_docs,
        }
    }

    /// Number of tokens in the dictionary.
    pub fn len(&self) -> usize {
        self.id_to_token.len()
    }

    /// The token for `id`. Panics on an out-of-range id.
    pub fn token(&self, id: u32) -> &str {
        &self.id_to_token[id as usize]
    }

    /// The id for `token`, if it survived filtering.
    pub fn id(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    /// Vectorize one document into sparse `(token id, count)` pairs.
    ///
    /// Tokens absent from the dictionary are dropped; pairs are sorted by id.
    pub fn doc2bow(&self, document: &[String]) -> Vec<(u32, u32)> {
        let mut counts: HashMap<u32, u32> = HashMap::new();
        for token in document {
            if let Some(id) = self.id(token) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        let mut bow: Vec<(u32, u32)> = counts.into_iter().collect();
        bow.sort_unstable_by_key(|&(id, _)| id);
        bow
    }
}

/// Vectorize every document, preserving order and length.
pub fn build_corpus(dictionary: &Dictionary, documents: &[Vec<String>]) -> Vec<Vec<(u32, u32)>> {
    documents
        .iter()
        .map(|document| dictionary.doc2bow(document))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topics::preprocess::stopword_set;
    use std::io::Write;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn write_temp_csv(name: &str, data: &str) -> String {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(data.as_bytes()).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_parse_article_date_both_formats() {
        assert_eq!(
            parse_article_date("16:23, March 05, 2021"),
            NaiveDate::from_ymd_opt(2021, 3, 5)
        );
        assert_eq!(
            parse_article_date("March 05, 2021"),
            NaiveDate::from_ymd_opt(2021, 3, 5)
        );
    }

    #[test]
    fn test_parse_article_date_rejects_other_formats() {
        assert_eq!(parse_article_date("2021-03-05"), None);
        assert_eq!(parse_article_date("last Tuesday"), None);
        assert_eq!(parse_article_date(""), None);
    }

    #[test]
    fn test_documents_and_metadata_stay_aligned() {
        let data = "content,date,title\n\
                    Trade talks resumed today,\"March 05, 2021\",Talks\n\
                    ,,\n\
                    Summit diplomacy continues,bad date,\n";
        let path = write_temp_csv("press_topics_corpus_align.csv", data);

        let stopwords = stopword_set(&[]);
        let (documents, metadata) = load_and_preprocess(&path, &stopwords).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(documents.len(), 3);
        assert_eq!(documents.len(), metadata.len());
        // Empty content row stays in place as an empty document
        assert!(documents[1].is_empty());
        assert_eq!(metadata[1].title, "Untitled Article 1");
        // Unparseable date degrades to None, row survives
        assert_eq!(metadata[2].date, None);
        assert_eq!(metadata[2].title, "Untitled Article 2");
        assert_eq!(metadata[0].date, NaiveDate::from_ymd_opt(2021, 3, 5));
        assert_eq!(metadata[0].title, "Talks");
    }

    #[test]
    fn test_dictionary_build_counts_document_frequency() {
        let documents = vec![
            tokens(&["trade", "talks", "trade"]),
            tokens(&["trade", "summit"]),
        ];
        let dictionary = Dictionary::build(&documents);

        assert_eq!(dictionary.len(), 3);
        // "trade" appears twice in doc 0 but counts once per document
        let trade = dictionary.id("trade").unwrap();
        assert_eq!(dictionary.doc_freq[trade as usize], 2);
        let talks = dictionary.id("talks").unwrap();
        assert_eq!(dictionary.doc_freq[talks as usize], 1);
    }

    #[test]
    fn test_filter_extremes_drops_rare_and_ubiquitous() {
        // "common" in every doc, "mid" in half, "rare" in one
        let documents: Vec<Vec<String>> = (0..10)
            .map(|i| {
                let mut doc = tokens(&["common"]);
                if i % 2 == 0 {
                    doc.push("mid".to_string());
                }
                if i == 0 {
                    doc.push("rare".to_string());
                }
                doc
            })
            .collect();

        let dictionary = Dictionary::build(&documents).filter_extremes(2, 0.6);

        assert_eq!(dictionary.id("rare"), None); // below no_below
        assert_eq!(dictionary.id("common"), None); // above no_above
        assert!(dictionary.id("mid").is_some());
        // Surviving ids are recompacted densely
        assert_eq!(dictionary.len(), 1);
        assert_eq!(dictionary.id("mid"), Some(0));
        assert_eq!(dictionary.token(0), "mid");
    }

    #[test]
    fn test_doc2bow_sorted_and_drops_unknown_tokens() {
        let documents = vec![
            tokens(&["alpha", "beta", "gamma"]),
            tokens(&["alpha", "beta"]),
        ];
        let dictionary = Dictionary::build(&documents).filter_extremes(2, 1.0);

        let bow = dictionary.doc2bow(&tokens(&["beta", "alpha", "beta", "gamma", "unknown"]));
        // "gamma" was filtered out (df 1 < 2), "unknown" never existed
        assert_eq!(bow.len(), 2);
        assert!(bow.windows(2).all(|w| w[0].0 < w[1].0));
        let beta = dictionary.id("beta").unwrap();
        assert!(bow.contains(&(beta, 2)));
    }

    #[test]
    fn test_build_corpus_preserves_length() {
        let documents = vec![tokens(&["alpha"]), Vec::new(), tokens(&["alpha", "alpha"])];
        let dictionary = Dictionary::build(&documents);
        let corpus = build_corpus(&dictionary, &documents);

        assert_eq!(corpus.len(), documents.len());
        assert!(corpus[1].is_empty());
        assert_eq!(corpus[2], vec![(0, 2)]);
    }
}
