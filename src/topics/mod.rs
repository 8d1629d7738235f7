//! Topic-model pipeline: normalization, corpus construction, LDA fit, and
//! coherence scoring.
//!
//! The pipeline runs in fixed stages, each feeding the next:
//!
//! 1. **Preprocess** ([`preprocess`]): normalize each CSV row into a token
//!    document, dropping stopwords and short tokens
//! 2. **Corpus** ([`corpus`]): build the token dictionary, filter extreme
//!    document frequencies, vectorize into bag-of-words form
//! 3. **Fit** ([`lda`]): seeded collapsed-Gibbs LDA over the corpus
//! 4. **Score** ([`coherence`]): UMass coherence over each topic's top words
//!
//! Documents and their metadata stay positionally aligned through every
//! stage; nothing here reorders or drops rows.

pub mod coherence;
pub mod corpus;
pub mod lda;
pub mod preprocess;
