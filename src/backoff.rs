//! Stupid backoff bigram model.
//!
//! Seen bigrams score their unsmoothed relative frequency. Unseen bigrams fall
//! back to the add-one unigram estimate multiplied by a fixed weight. Scores
//! are not renormalized, so they rank sentences but do not sum to one.
//!
//! # Final token
//!
//! By default the last token of a sentence is not scored: the first token
//! always is, then positions `1..n-1`. Published benchmark scores were produced
//! this way, so changing it would break comparability. Set
//! [`Config::score_final_token`] to score the full sentence instead.

use crate::config::Config;
use crate::counts::{CountTable, Vocabulary};
use crate::error::{LmError, Result};
use crate::scoring::{check_sentence, ln_count, Estimate, LanguageModel, TokenScore};
use crate::token::{Corpus, Token};

const NAME: &str = "backoff";

#[derive(Debug, Clone)]
pub struct StupidBackoffModel {
    unigram_counts: CountTable<Token>,
    bigram_counts: CountTable<(Token, Token)>,
    vocabulary: Vocabulary,
    total: u64,
    /// `ln` of the backoff weight.
    log_weight: f64,
    score_final_token: bool,
}

impl StupidBackoffModel {
    /// Count unigrams and bigrams, each sentence starting from
    /// [`Token::SentenceStart`].
    ///
    /// Sentence-start tokens inside the corpus are skipped; the start
    /// marker's unigram count is pinned to 1 rather than accumulated.
    ///
    /// # Errors
    /// [`LmError::InvalidConfig`] for a bad backoff weight,
    /// [`LmError::EmptyCorpus`] if no token besides sentence starts was seen.
    pub fn train(corpus: &Corpus, config: &Config) -> Result<Self> {
        config.validate()?;

        let mut unigram_counts = CountTable::new();
        let mut bigram_counts = CountTable::new();
        let mut vocabulary = Vocabulary::new();
        let mut total = 0;

        for sentence in corpus {
            let mut previous = Token::SentenceStart;
            unigram_counts.set(Token::SentenceStart, 1);

            for token in sentence.tokens() {
                if *token == Token::SentenceStart {
                    continue;
                }
                vocabulary.insert(token);
                unigram_counts.increment(token.clone());
                bigram_counts.increment((previous, token.clone()));
                total += 1;
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
            log_weight: config.backoff_weight.ln(),
            score_final_token: config.score_final_token,
        })
    }

    pub fn unigram_count(&self, token: &Token) -> u64 {
        self.unigram_counts.get(token)
    }

    pub fn bigram_count(&self, previous: &Token, token: &Token) -> u64 {
        self.bigram_counts.get(&(previous.clone(), token.clone()))
    }

    /// `ln(weight * (c(w) + 1) / (N + V))`.
    fn discounted_unigram(&self, token: &Token) -> f64 {
        let denominator = ln_count(self.total + self.vocabulary.len() as u64);
        ln_count(self.unigram_count(token) + 1) - denominator + self.log_weight
    }
}

impl LanguageModel for StupidBackoffModel {
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

        let end = if self.score_final_token {
            sentence.len()
        } else {
            sentence.len() - 1
        };

        let mut terms = Vec::with_capacity(end);
        terms.push(TokenScore::new(
            0,
            Estimate::DiscountedUnigram,
            self.discounted_unigram(&sentence[0]),
        ));

        let mut previous = &sentence[0];
        for (i, token) in sentence.iter().enumerate().take(end).skip(1) {
            let bigram = self.bigram_count(previous, token);
            let term = if bigram == 0 {
                TokenScore::new(i, Estimate::DiscountedUnigram, self.discounted_unigram(token))
            } else {
                // A seen pair implies its context was counted at least once.
                let log_prob = ln_count(bigram) - ln_count(self.unigram_count(previous));
                TokenScore::new(i, Estimate::Bigram, log_prob)
            };
            terms.push(term);
            previous = token;
        }

        Ok(terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BACKOFF_WEIGHT;
    use crate::token::Sentence;

    fn corpus() -> Corpus {
        Corpus::new(vec![
            Sentence::bracketed(["the", "cat", "sat"]),
            Sentence::bracketed(["the", "dog", "sat"]),
        ])
    }

    fn model() -> StupidBackoffModel {
        StupidBackoffModel::train(&corpus(), &Config::default()).unwrap()
    }

    #[test]
    fn test_sentence_start_is_pinned_not_accumulated() {
        let model = model();
        assert_eq!(model.unigram_count(&Token::SentenceStart), 1);
        assert_eq!(model.bigram_count(&Token::SentenceStart, &Token::word("the")), 2);
        // the, cat, sat, </s>, the, dog, sat, </s>
        assert_eq!(model.total_tokens(), 8);
        assert_eq!(model.vocabulary_size(), 5);
    }

    #[test]
    fn test_first_token_is_discounted_unigram() {
        let model = model();
        let terms = model.token_scores(&[Token::word("the"), Token::word("cat")]).unwrap();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].estimate, Estimate::DiscountedUnigram);
        assert_eq!(terms[0].log_prob, 3f64.ln() - 13f64.ln() + 0.4f64.ln());
    }

    #[test]
    fn test_unseen_bigram_backs_off_exactly() {
        let model = model();
        let sentence = [
            Token::SentenceStart,
            Token::word("cat"),
            Token::word("dog"),
            Token::SentenceEnd,
        ];
        let terms = model.token_scores(&sentence).unwrap();
        assert_eq!(terms.len(), 3);

        // (<s>, cat) and (cat, dog) were never seen.
        assert_eq!(terms[1].estimate, Estimate::DiscountedUnigram);
        assert_eq!(terms[1].log_prob, 2f64.ln() - 13f64.ln() + BACKOFF_WEIGHT.ln());
        assert_eq!(terms[2].estimate, Estimate::DiscountedUnigram);
        assert_eq!(terms[2].log_prob, 2f64.ln() - 13f64.ln() + BACKOFF_WEIGHT.ln());
    }

    #[test]
    fn test_seen_bigram_uses_relative_frequency() {
        let model = model();
        let sentence = Sentence::bracketed(["the", "cat", "sat"]);
        let terms = model.token_scores(sentence.tokens()).unwrap();

        // <s> the cat sat </s>: the final </s> is not scored.
        assert_eq!(terms.len(), 4);
        assert_eq!(terms[0].log_prob, 2f64.ln() - 13f64.ln() + 0.4f64.ln());
        assert_eq!(terms[1].estimate, Estimate::Bigram);
        assert_eq!(terms[1].log_prob, 2f64.ln() - 1f64.ln());
        assert_eq!(terms[2].log_prob, 1f64.ln() - 2f64.ln());
        assert_eq!(terms[3].log_prob, 1f64.ln() - 1f64.ln());
    }

    #[test]
    fn test_score_final_token_override() {
        let config = Config {
            score_final_token: true,
            ..Config::default()
        };
        let model = StupidBackoffModel::train(&corpus(), &config).unwrap();
        let sentence = Sentence::bracketed(["the", "cat", "sat"]);
        let terms = model.token_scores(sentence.tokens()).unwrap();

        assert_eq!(terms.len(), 5);
        assert_eq!(terms[4].estimate, Estimate::Bigram);
        assert_eq!(terms[4].log_prob, 2f64.ln() - 2f64.ln());
    }

    #[test]
    fn test_two_token_sentence_scores_only_the_first() {
        let score = model().score_words(&["zebra", "the"]).unwrap();
        assert_eq!(score, 1f64.ln() - 13f64.ln() + 0.4f64.ln());
    }

    #[test]
    fn test_corpus_of_only_sentence_starts_is_empty() {
        let corpus = Corpus::new(vec![vec![Token::SentenceStart].into()]);
        let err = StupidBackoffModel::train(&corpus, &Config::default()).unwrap_err();
        assert_eq!(err, LmError::EmptyCorpus { model: "backoff" });
    }

    #[test]
    fn test_invalid_weight_is_rejected() {
        let config = Config {
            backoff_weight: 0.0,
            ..Config::default()
        };
        assert!(matches!(
            StupidBackoffModel::train(&corpus(), &config),
            Err(LmError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_repeated_pair_never_lowers_its_term() {
        let sentence = |words: &[&str]| {
            let mut tokens = vec![Token::SentenceStart];
            tokens.extend(words.iter().map(|&w| Token::word(w)));
            Sentence::new(tokens)
        };
        let train = |sentences: Vec<Sentence>| {
            StupidBackoffModel::train(&Corpus::new(sentences), &Config::default()).unwrap()
        };

        let once = train(vec![sentence(&["a", "b"])]);
        let twice = train(vec![sentence(&["a", "b"]), sentence(&["a", "b"])]);
        let query = sentence(&["a", "b", "c"]);
        let pair_term = |model: &StupidBackoffModel| {
            let terms = model.token_scores(query.tokens()).unwrap();
            assert_eq!(terms[2].estimate, Estimate::Bigram);
            terms[2].log_prob
        };
        assert!(pair_term(&twice) >= pair_term(&once));

        // Raising c(a) alone: first term goes from ln(2/4) to ln(4/6).
        let more_a = train(vec![sentence(&["a", "b"]), sentence(&["a", "a"])]);
        let first_term = |model: &StupidBackoffModel| {
            let terms = model.token_scores(&[Token::word("a"), Token::word("b")]).unwrap();
            assert_eq!(terms[0].estimate, Estimate::DiscountedUnigram);
            terms[0].log_prob
        };
        assert!(first_term(&more_a) > first_term(&once));
    }
}
