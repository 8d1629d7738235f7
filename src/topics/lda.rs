//! Latent Dirichlet Allocation via seeded collapsed Gibbs sampling.
//!
//! Fits the fixed-hyperparameter model the report pipeline needs: symmetric
//! priors, a configurable number of full sweeps, and a seeded RNG so a run
//! over the same corpus is exactly reproducible. The fitted model exposes the
//! two things the report consumes: ranked topic-word probabilities and
//! per-document topic distributions.
//!
//! Counts are kept in the standard collapsed form: during sampling each token
//! assignment is removed, the conditional
//! `p(topic) ∝ (n_dk + α) · (n_kw + β) / (n_k + Vβ)` is evaluated, and a new
//! topic is drawn from it.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

/// Hyperparameters for one fit.
#[derive(Debug, Clone, Copy)]
pub struct LdaParams {
    /// Number of topics.
    pub num_topics: usize,
    /// Full Gibbs sweeps over every token in the corpus.
    pub passes: usize,
    /// Symmetric document-topic prior.
    pub alpha: f64,
    /// Symmetric topic-word prior.
    pub beta: f64,
    /// RNG seed.
    pub seed: u64,
}

/// A fitted topic model over a bag-of-words corpus.
pub struct LdaModel {
    num_topics: usize,
    vocab_size: usize,
    alpha: f64,
    beta: f64,
    /// topic -> word -> assigned-token count
    topic_word: Vec<Vec<u32>>,
    /// topic -> total assigned tokens
    topic_totals: Vec<u32>,
    /// document -> topic -> assigned-token count
    doc_topic: Vec<Vec<u32>>,
    /// document -> total tokens
    doc_totals: Vec<u32>,
}

impl LdaModel {
    /// Fit a model over `corpus`, whose word ids must all be `< vocab_size`.
    #[instrument(level = "info", skip(corpus, params), fields(docs = corpus.len(), vocab = vocab_size, topics = params.num_topics))]
    pub fn fit(corpus: &[Vec<(u32, u32)>], vocab_size: usize, params: &LdaParams) -> Self {
        let k = params.num_topics;
        let mut rng = StdRng::seed_from_u64(params.seed);

        // Expand bags into individual token instances; Gibbs resamples each
        // instance separately.
        let docs: Vec<Vec<u32>> = corpus
            .iter()
            .map(|bow| {
                let mut instances = Vec::new();
                for &(word, count) in bow {
                    for _ in 0..count {
                        instances.push(word);
                    }
                }
                instances
            })
            .collect();

        let mut topic_word = vec![vec![0u32; vocab_size]; k];
        let mut topic_totals = vec![0u32; k];
        let mut doc_topic = vec![vec![0u32; k]; docs.len()];
        let mut assignments: Vec<Vec<usize>> = Vec::with_capacity(docs.len());

        for (d, instances) in docs.iter().enumerate() {
            let mut doc_assignments = Vec::with_capacity(instances.len());
            for &word in instances {
                let topic = rng.random_range(0..k);
                doc_assignments.push(topic);
                doc_topic[d][topic] += 1;
                topic_word[topic][word as usize] += 1;
                topic_totals[topic] += 1;
            }
            assignments.push(doc_assignments);
        }

        let v_beta = params.beta * vocab_size as f64;
        let mut weights = vec![0.0f64; k];

        for pass in 0..params.passes {
            for (d, instances) in docs.iter().enumerate() {
                for (n, &word) in instances.iter().enumerate() {
                    let old = assignments[d][n];
                    doc_topic[d][old] -= 1;
                    topic_word[old][word as usize] -= 1;
                    topic_totals[old] -= 1;

                    let mut total = 0.0;
                    for (t, weight) in weights.iter_mut().enumerate() {
                        *weight = (doc_topic[d][t] as f64 + params.alpha)
                            * (topic_word[t][word as usize] as f64 + params.beta)
                            / (topic_totals[t] as f64 + v_beta);
                        total += *weight;
                    }

                    let mut target = rng.random::<f64>() * total;
                    let mut new = k - 1;
                    for (t, &weight) in weights.iter().enumerate() {
                        if target < weight {
                            new = t;
                            break;
                        }
                        target -= weight;
                    }

                    assignments[d][n] = new;
                    doc_topic[d][new] += 1;
                    topic_word[new][word as usize] += 1;
                    topic_totals[new] += 1;
                }
            }
            debug!(pass = pass + 1, total = params.passes, "Completed Gibbs sweep");
        }

        let doc_totals = docs.iter().map(|instances| instances.len() as u32).collect();
        info!(passes = params.passes, "Fitted LDA model");

        Self {
            num_topics: k,
            vocab_size,
            alpha: params.alpha,
            beta: params.beta,
            topic_word,
            topic_totals,
            doc_topic,
            doc_totals,
        }
    }

    pub fn num_topics(&self) -> usize {
        self.num_topics
    }

    pub fn num_documents(&self) -> usize {
        self.doc_topic.len()
    }

    /// Smoothed word probabilities for one topic, highest first, truncated
    /// to `n` (or the vocabulary size, whichever is smaller).
    pub fn top_words(&self, topic: usize, n: usize) -> Vec<(u32, f64)> {
        let denom = self.topic_totals[topic] as f64 + self.beta * self.vocab_size as f64;
        let mut words: Vec<(u32, f64)> = (0..self.vocab_size)
            .map(|w| {
                let p = (self.topic_word[topic][w] as f64 + self.beta) / denom;
                (w as u32, p)
            })
            .collect();
        words.sort_by(|a, b| b.1.total_cmp(&a.1));
        words.truncate(n);
        words
    }

    /// Smoothed topic distribution for one training document.
    ///
    /// An empty document gets the uniform prior distribution.
    pub fn document_topics(&self, doc: usize) -> Vec<f64> {
        let denom = self.doc_totals[doc] as f64 + self.alpha * self.num_topics as f64;
        self.doc_topic[doc]
            .iter()
            .map(|&count| (count as f64 + self.alpha) / denom)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(seed: u64) -> LdaParams {
        LdaParams {
            num_topics: 2,
            passes: 10,
            alpha: 0.1,
            beta: 0.01,
            seed,
        }
    }

    fn sample_corpus() -> Vec<Vec<(u32, u32)>> {
        // Two word groups: ids 0-1 and ids 2-3
        vec![
            vec![(0, 3), (1, 2)],
            vec![(0, 1), (1, 4)],
            vec![(2, 2), (3, 3)],
            vec![(2, 4), (3, 1)],
            vec![],
        ]
    }

    #[test]
    fn test_fit_is_deterministic_for_fixed_seed() {
        let corpus = sample_corpus();
        let a = LdaModel::fit(&corpus, 4, &params(42));
        let b = LdaModel::fit(&corpus, 4, &params(42));

        for topic in 0..a.num_topics() {
            assert_eq!(a.top_words(topic, 4), b.top_words(topic, 4));
        }
        for doc in 0..a.num_documents() {
            assert_eq!(a.document_topics(doc), b.document_topics(doc));
        }
    }

    #[test]
    fn test_document_topics_sum_to_one() {
        let corpus = sample_corpus();
        let model = LdaModel::fit(&corpus, 4, &params(42));

        for doc in 0..model.num_documents() {
            let sum: f64 = model.document_topics(doc).iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "doc {doc} sums to {sum}");
        }
    }

    #[test]
    fn test_empty_document_gets_uniform_distribution() {
        let corpus = sample_corpus();
        let model = LdaModel::fit(&corpus, 4, &params(42));

        let dist = model.document_topics(4);
        assert_eq!(dist, vec![0.5, 0.5]);
    }

    #[test]
    fn test_top_words_are_sorted_and_truncated() {
        let corpus = sample_corpus();
        let model = LdaModel::fit(&corpus, 4, &params(42));

        for topic in 0..model.num_topics() {
            let words = model.top_words(topic, 3);
            assert_eq!(words.len(), 3);
            assert!(words.windows(2).all(|w| w[0].1 >= w[1].1));

            // Asking for more than the vocabulary yields the whole vocabulary
            assert_eq!(model.top_words(topic, 100).len(), 4);
        }
    }

    #[test]
    fn test_topic_word_probabilities_sum_to_one() {
        let corpus = sample_corpus();
        let model = LdaModel::fit(&corpus, 4, &params(7));

        for topic in 0..model.num_topics() {
            let sum: f64 = model.top_words(topic, 4).iter().map(|&(_, p)| p).sum();
            assert!((sum - 1.0).abs() < 1e-9, "topic {topic} sums to {sum}");
        }
    }
}
