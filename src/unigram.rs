//! Add-one smoothed unigram model.

use crate::counts::{CountTable, Vocabulary};
use crate::error::{LmError, Result};
use crate::scoring::{check_sentence, ln_count, Estimate, LanguageModel, TokenScore};
use crate::token::{Corpus, Token};

const NAME: &str = "unigram";

/// Scores each token independently as `(c(w) + 1) / (N + V)`.
#[derive(Debug, Clone)]
pub struct UnigramModel {
    unigram_counts: CountTable<Token>,
    vocabulary: Vocabulary,
    total: u64,
}

impl UnigramModel {
    /// Count every token of every sentence.
    ///
    /// # Errors
    /// [`LmError::EmptyCorpus`] if the corpus holds no tokens.
    pub fn train(corpus: &Corpus) -> Result<Self> {
        let mut unigram_counts = CountTable::new();
        let mut vocabulary = Vocabulary::new();
        let mut total = 0;

        for token in corpus.iter().flat_map(|sentence| sentence.tokens()) {
            unigram_counts.increment(token.clone());
            vocabulary.insert(token);
            total += 1;
        }

        if total == 0 {
            return Err(LmError::EmptyCorpus { model: NAME });
        }

        tracing::debug!(
            model = NAME,
            vocabulary = vocabulary.len(),
            total,
            "trained language model"
        );

        Ok(Self {
            unigram_counts,
            vocabulary,
            total,
        })
    }

    pub fn unigram_count(&self, token: &Token) -> u64 {
        self.unigram_counts.get(token)
    }
}

impl LanguageModel for UnigramModel {
    fn name(&self) -> &'static str {
        NAME
    }

    fn min_sentence_len(&self) -> usize {
        1
    }

    fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    fn total_tokens(&self) -> u64 {
        self.total
    }

    fn token_scores(&self, sentence: &[Token]) -> Result<Vec<TokenScore>> {
        check_sentence(NAME, self.min_sentence_len(), sentence)?;

        let denominator = ln_count(self.total + self.vocabulary.len() as u64);
        Ok(sentence
            .iter()
            .enumerate()
            .map(|(i, token)| {
                let log_prob = ln_count(self.unigram_counts.get(token) + 1) - denominator;
                TokenScore::new(i, Estimate::Unigram, log_prob)
            })
            .collect())
    }
}
