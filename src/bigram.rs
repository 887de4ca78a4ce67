//! Add-one smoothed bigram model.

use crate::counts::{CountTable, Vocabulary};
use crate::error::{LmError, Result};
use crate::scoring::{check_sentence, ln_count, Estimate, LanguageModel, TokenScore};
use crate::token::{Corpus, Token};

const NAME: &str = "bigram";

/// Scores `P(w | u)` as `(c(u, w) + 1) / (c(u) + V)` for every token.
///
/// The first token of a scored sentence is conditioned on [`Token::Unknown`],
/// whose count is normally 0, so its denominator is just `V`.
#[derive(Debug, Clone)]
pub struct BigramModel {
    unigram_counts: CountTable<Token>,
    bigram_counts: CountTable<(Token, Token)>,
    vocabulary: Vocabulary,
    total: u64,
}

impl BigramModel {
    /// Count unigrams and adjacent pairs, each sentence starting from
    /// [`Token::Padding`] as context.
    ///
    /// # Errors
    /// [`LmError::EmptyCorpus`] if the corpus holds no tokens.
    pub fn train(corpus: &Corpus) -> Result<Self> {
        let mut unigram_counts = CountTable::new();
        let mut bigram_counts = CountTable::new();
        let mut vocabulary = Vocabulary::new();
        let mut total = 0;

        for sentence in corpus {
            let mut previous = Token::Padding;
            for token in sentence.tokens() {
                unigram_counts.increment(token.clone());
                total += 1;

                if !token.is_padding() {
                    bigram_counts.increment((previous, token.clone()));
                }

                vocabulary.insert(token);
                previous = token.clone();
            }
        }

        if total == 0 {
            return Err(LmError::EmptyCorpus { model: NAME });
        }

        tracing::debug!(
            model = NAME,
            vocabulary = vocabulary.len(),
            total,
            bigrams = bigram_counts.len(),
            "trained language model"
        );

        Ok(Self {
            unigram_counts,
            bigram_counts,
            vocabulary,
            total,
        })
    }

    pub fn unigram_count(&self, token: &Token) -> u64 {
        self.unigram_counts.get(token)
    }

    pub fn bigram_count(&self, previous: &Token, token: &Token) -> u64 {
        self.bigram_counts.get(&(previous.clone(), token.clone()))
    }
}

impl LanguageModel for BigramModel {
    fn name(&self) -> &'static str {
        NAME
    }

    fn min_sentence_len(&self) -> usize {
        2
    }

    fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    fn total_tokens(&self) -> u64 {
        self.total
    }

    fn token_scores(&self, sentence: &[Token]) -> Result<Vec<TokenScore>> {
        check_sentence(NAME, self.min_sentence_len(), sentence)?;

        let v = self.vocabulary.len() as u64;
        let mut previous = &Token::Unknown;
        let mut terms = Vec::with_capacity(sentence.len());

        for (i, token) in sentence.iter().enumerate() {
            let log_prob = ln_count(self.bigram_count(previous, token) + 1)
                - ln_count(self.unigram_count(previous) + v);
            terms.push(TokenScore::new(i, Estimate::SmoothedBigram, log_prob));
            previous = token;
        }

        Ok(terms)
    }
}
