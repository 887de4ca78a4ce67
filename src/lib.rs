//! ngram-lm - smoothed n-gram language models for sentence scoring.
//!
//! # Overview
//!
//! Each model is trained once from a tokenized [`Corpus`] and then scores
//! sentences with a natural-log probability, so candidate sentences can be
//! ranked by plausibility (spelling correction, reranking, evaluation).
//!
//! # Models
//!
//! - [`UnigramModel`]: add-one smoothed unigram
//! - [`BigramModel`]: add-one smoothed bigram
//! - [`StupidBackoffModel`]: bigram relative frequency, backing off to a
//!   discounted unigram
//! - [`TrigramModel`]: trigram relative frequency, backing off to a discounted
//!   bigram and then an add-one unigram
//!
//! All four implement [`LanguageModel`] and share no state. [`ModelKind`]
//! trains any of them behind a `Box<dyn LanguageModel>`.
//!
//! # Modules
//!
//! - `token.rs`: tokens, sentences, corpus
//! - `counts.rs`: zero-default count tables and vocabulary
//! - `scoring.rs`: the scoring trait, per-token terms, ranking
//! - `config.rs`: backoff weight and scoring policy, persisted with `confy`
//! - `error.rs`: [`LmError`]
//!
//! ```rust
//! use ngram_lm::{Corpus, LanguageModel, UnigramModel};
//!
//! let corpus = Corpus::from_word_lists([vec!["a", "b", "a"]]);
//! let model = UnigramModel::train(&corpus).unwrap();
//! let score = model.score_words(&["a"]).unwrap();
//! assert!((score - 0.6f64.ln()).abs() < 1e-12);
//! ```

pub mod backoff;
pub mod bigram;
pub mod config;
pub mod counts;
pub mod error;
pub mod scoring;
pub mod token;
pub mod trigram;
pub mod unigram;

pub use backoff::StupidBackoffModel;
pub use bigram::BigramModel;
pub use config::{Config, TrainingPasses, BACKOFF_WEIGHT};
pub use counts::{CountTable, Vocabulary};
pub use error::{LmError, Result};
pub use scoring::{rank_candidates, Estimate, LanguageModel, ModelKind, RankedCandidate, TokenScore};
pub use token::{Corpus, Sentence, Token};
pub use trigram::TrigramModel;
pub use unigram::UnigramModel;
