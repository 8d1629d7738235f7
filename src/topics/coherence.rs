//! UMass topic coherence over document co-occurrence counts.
//!
//! For a topic's ranked top words `w1..wM`, the UMass score is
//! `Σ_{m=2..M} Σ_{l=1..m-1} ln((D(wm, wl) + 1) / D(wl))`, where `D(w)` is
//! the number of documents containing `w` and `D(wm, wl)` the number
//! containing both. Scores are negative in practice; closer to zero means
//! the topic's words actually co-occur in the corpus.

use std::collections::{HashMap, HashSet};

/// Per-topic UMass coherence, computed over the tokenized documents.
///
/// `topics` holds each topic's top words in rank order. Word pairs whose
/// conditioning word never occurs contribute nothing.
pub fn umass_coherence(topics: &[Vec<String>], documents: &[Vec<String>]) -> Vec<f64> {
    // Document-occurrence sets for every word that appears in a topic list.
    let vocab: HashSet<&str> = topics.iter().flatten().map(String::as_str).collect();
    let mut occurrences: HashMap<&str, HashSet<usize>> = HashMap::new();
    for (index, document) in documents.iter().enumerate() {
        for token in document {
            if vocab.contains(token.as_str()) {
                occurrences.entry(token.as_str()).or_default().insert(index);
            }
        }
    }

    topics
        .iter()
        .map(|words| {
            let mut score = 0.0;
            for m in 1..words.len() {
                for l in 0..m {
                    let later = occurrences.get(words[m].as_str());
                    let earlier = occurrences.get(words[l].as_str());
                    let df_earlier = earlier.map_or(0, HashSet::len);
                    if df_earlier == 0 {
                        continue;
                    }
                    let co = match (later, earlier) {
                        (Some(a), Some(b)) => a.intersection(b).count(),
                        _ => 0,
                    };
                    score += ((co as f64 + 1.0) / df_earlier as f64).ln();
                }
            }
            score
        })
        .collect()
}

/// Mean coherence across topics; `0.0` for an empty topic list.
pub fn average_coherence(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_cooccurring_words_score_higher_than_disjoint() {
        let documents = vec![
            tokens(&["trade", "talks"]),
            tokens(&["trade", "talks"]),
            tokens(&["missile", "launch"]),
            tokens(&["missile", "launch"]),
        ];

        let coherent = umass_coherence(&[tokens(&["trade", "talks"])], &documents);
        let incoherent = umass_coherence(&[tokens(&["trade", "missile"])], &documents);

        assert!(coherent[0] > incoherent[0]);
        // Perfect co-occurrence: ln((2 + 1) / 2) > 0
        assert!(coherent[0] > 0.0);
        // Never co-occurring: ln((0 + 1) / 2) < 0
        assert!(incoherent[0] < 0.0);
    }

    #[test]
    fn test_words_absent_from_corpus_contribute_nothing() {
        let documents = vec![tokens(&["trade"])];
        let scores = umass_coherence(&[tokens(&["ghost", "phantom"])], &documents);
        assert_eq!(scores, vec![0.0]);
    }

    #[test]
    fn test_one_score_per_topic() {
        let documents = vec![tokens(&["trade", "talks", "missile"])];
        let topics = vec![tokens(&["trade", "talks"]), tokens(&["missile"])];
        let scores = umass_coherence(&topics, &documents);
        assert_eq!(scores.len(), 2);
        // A single-word topic has no pairs
        assert_eq!(scores[1], 0.0);
    }

    #[test]
    fn test_average_coherence() {
        assert_eq!(average_coherence(&[]), 0.0);
        assert_eq!(average_coherence(&[-2.0, -4.0]), -3.0);
    }
}
