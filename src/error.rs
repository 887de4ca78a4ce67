//! Error type shared by every language model.

use thiserror::Error;

/// Errors raised while training or scoring a language model.
///
/// Unseen n-grams are not errors: every model smooths or backs off instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LmError {
    /// Training counted zero tokens, so every smoothing denominator is zero.
    #[error("cannot train {model} model: corpus contains no countable tokens")]
    EmptyCorpus { model: &'static str },

    /// The sentence is shorter than the model's n-gram order allows.
    #[error("{model} model needs at least {required} tokens per sentence, got {actual}")]
    UnderlengthSentence {
        model: &'static str,
        required: usize,
        actual: usize,
    },

    /// The sentence contains the training-only padding token. Only the
    /// custom trigram model, which counts `(<NULL>, w0)` pairs, raises it.
    #[error("{model} model cannot score the padding token at position {index}")]
    ReservedToken { model: &'static str, index: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, LmError>;
