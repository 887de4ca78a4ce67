//! The scoring contract shared by all models, plus helpers built on it.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::backoff::StupidBackoffModel;
use crate::bigram::BigramModel;
use crate::config::Config;
use crate::error::{LmError, Result};
use crate::token::{Corpus, Token};
use crate::trigram::TrigramModel;
use crate::unigram::UnigramModel;

/// Which estimate produced a token's log-probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Estimate {
    /// Add-one unigram: `ln(c(w) + 1) - ln(N + V)`.
    Unigram,
    /// Add-one bigram: `ln(c(u, w) + 1) - ln(c(u) + V)`.
    SmoothedBigram,
    /// Add-one unigram discounted by the backoff weight.
    DiscountedUnigram,
    /// Relative frequency `c(u, w) / c(u)`.
    Bigram,
    /// Relative frequency discounted by the backoff weight.
    DiscountedBigram,
    /// Relative frequency `c(t, u, w) / c(t, u)`.
    Trigram,
    /// The term contributes exactly zero.
    Unscored,
}

/// One term of a sentence score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenScore {
    /// Position of the token in the sentence.
    pub index: usize,
    pub estimate: Estimate,
    /// Natural-log contribution of this token.
    pub log_prob: f64,
}

impl TokenScore {
    pub(crate) fn new(index: usize, estimate: Estimate, log_prob: f64) -> Self {
        Self {
            index,
            estimate,
            log_prob,
        }
    }
}

/// A trained, read-only n-gram model that scores sentences in log space.
pub trait LanguageModel {
    /// Short model name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Fewest tokens a sentence may have.
    fn min_sentence_len(&self) -> usize;

    /// Distinct tokens seen during training (`V`).
    fn vocabulary_size(&self) -> usize;

    /// Tokens counted during training (`N`).
    fn total_tokens(&self) -> u64;

    /// Per-token terms of the sentence score, in sentence order.
    fn token_scores(&self, sentence: &[Token]) -> Result<Vec<TokenScore>>;

    /// Natural-log probability of `sentence`.
    fn score(&self, sentence: &[Token]) -> Result<f64> {
        let terms = self.token_scores(sentence)?;
        Ok(terms.iter().fold(0.0, |acc, term| acc + term.log_prob))
    }

    /// Score plain strings, each taken as an ordinary word.
    fn score_words(&self, words: &[&str]) -> Result<f64> {
        let sentence: Vec<Token> = words.iter().map(|&word| Token::word(word)).collect();
        self.score(&sentence)
    }
}

/// Length check shared by every `token_scores` implementation.
pub(crate) fn check_sentence(
    model: &'static str,
    required: usize,
    sentence: &[Token],
) -> Result<()> {
    if sentence.len() < required {
        return Err(LmError::UnderlengthSentence {
            model,
            required,
            actual: sentence.len(),
        });
    }
    Ok(())
}

/// `ln(count)` for a count known to be non-zero.
#[inline]
pub(crate) fn ln_count(count: u64) -> f64 {
    (count as f64).ln()
}

/// A candidate sentence with its score, as returned by [`rank_candidates`].
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    /// Index into the candidate slice that was ranked.
    pub index: usize,
    pub score: f64,
}

/// Score every candidate and return them best first.
///
/// Ties keep their input order.
pub fn rank_candidates<M, S>(model: &M, candidates: &[S]) -> Result<Vec<RankedCandidate>>
where
    M: LanguageModel + ?Sized,
    S: AsRef<[Token]>,
{
    let mut ranked = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| {
            model
                .score(candidate.as_ref())
                .map(|score| RankedCandidate { index, score })
        })
        .collect::<Result<Vec<_>>>()?;

    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    Ok(ranked)
}

/// The four interchangeable model families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    LaplaceUnigram,
    LaplaceBigram,
    StupidBackoff,
    Custom,
}

impl ModelKind {
    pub const ALL: [ModelKind; 4] = [
        ModelKind::LaplaceUnigram,
        ModelKind::LaplaceBigram,
        ModelKind::StupidBackoff,
        ModelKind::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ModelKind::LaplaceUnigram => "unigram",
            ModelKind::LaplaceBigram => "bigram",
            ModelKind::StupidBackoff => "backoff",
            ModelKind::Custom => "custom",
        }
    }

    /// Train a model of this kind behind the common scoring trait.
    pub fn train(self, corpus: &Corpus, config: &Config) -> Result<Box<dyn LanguageModel>> {
        Ok(match self {
            ModelKind::LaplaceUnigram => Box::new(UnigramModel::train(corpus)?),
            ModelKind::LaplaceBigram => Box::new(BigramModel::train(corpus)?),
            ModelKind::StupidBackoff => Box::new(StupidBackoffModel::train(corpus, config)?),
            ModelKind::Custom => Box::new(TrigramModel::train(corpus, config)?),
        })
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = LmError;

    fn from_str(s: &str) -> Result<Self> {
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LmError::InvalidConfig(format!("unknown model kind: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Sentence;

    fn corpus() -> Corpus {
        Corpus::new(vec![
            Sentence::bracketed(["the", "quick", "brown", "fox"]),
            Sentence::bracketed(["the", "quick", "dog"]),
            Sentence::bracketed(["the", "lazy", "dog"]),
            Sentence::bracketed(["the", "fox", "jumps"]),
        ])
    }

    #[test]
    fn test_every_kind_scores_finite_and_deterministic() {
        let corpus = corpus();
        let config = Config::default();
        let sentence = Sentence::bracketed(["the", "quick", "cat", "jumps"]);

        for kind in ModelKind::ALL {
            let model = kind.train(&corpus, &config).unwrap();
            let first = model.score(sentence.tokens()).unwrap();
            let second = model.score(sentence.tokens()).unwrap();
            assert!(first.is_finite(), "{kind} produced {first}");
            assert_eq!(first.to_bits(), second.to_bits());
        }
    }

    #[test]
    fn test_model_kind_round_trips_through_str() {
        for kind in ModelKind::ALL {
            assert_eq!(kind.to_string().parse::<ModelKind>().unwrap(), kind);
        }
        assert!("kneser-ney".parse::<ModelKind>().is_err());
    }

    #[test]
    fn test_rank_candidates_prefers_seen_sentence() {
        let corpus = corpus();
        let model = ModelKind::LaplaceBigram
            .train(&corpus, &Config::default())
            .unwrap();
        let candidates = [
            Sentence::bracketed(["the", "quick", "fox", "brown"]),
            Sentence::bracketed(["the", "quick", "brown", "fox"]),
            Sentence::bracketed(["fox", "the", "brown"]),
        ];

        let ranked = rank_candidates(model.as_ref(), &candidates).unwrap();
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].index, 1);
        assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn test_trained_models_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UnigramModel>();
        assert_send_sync::<BigramModel>();
        assert_send_sync::<StupidBackoffModel>();
        assert_send_sync::<TrigramModel>();
    }

    #[test]
    fn test_underlength_sentence_is_rejected() {
        let err = check_sentence("test", 2, &[Token::word("a")]).unwrap_err();
        assert!(matches!(err, LmError::UnderlengthSentence { required: 2, actual: 1, .. }));
        assert!(check_sentence("test", 2, &[Token::word("a"), Token::Padding]).is_ok());
    }

    #[test]
    fn test_only_custom_model_rejects_padding() {
        let corpus = corpus();
        let config = Config::default();
        let sentence = [Token::Padding, Token::word("the"), Token::Padding, Token::word("fox")];

        for kind in ModelKind::ALL {
            let model = kind.train(&corpus, &config).unwrap();
            let result = model.score(&sentence);
            if kind == ModelKind::Custom {
                assert_eq!(result, Err(LmError::ReservedToken { model: "custom", index: 0 }));
            } else {
                let score = result.unwrap();
                assert!(score.is_finite(), "{kind} produced {score}");
            }
        }
    }
}
