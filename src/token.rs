//! Tokens, sentences and the training corpus.
//!
//! Boundary and out-of-vocabulary markers are dedicated [`Token`] variants
//! rather than magic strings, so a corpus word spelled `"<s>"` stays an
//! ordinary [`Token::Word`] and can never be mistaken for a sentence boundary.

use std::fmt;

/// A single token of a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    /// An ordinary vocabulary item.
    Word(String),
    /// Marks the start of a sentence (`<s>`).
    SentenceStart,
    /// Marks the end of a sentence (`</s>`).
    SentenceEnd,
    /// Out-of-vocabulary marker (`<UNK>`). The bigram model uses it as the
    /// context of the first scored token.
    Unknown,
    /// Context filler placed before the first token of a sentence while
    /// counting (`<NULL>`). Never valid inside a scored sentence.
    Padding,
}

impl Token {
    pub fn word(text: impl Into<String>) -> Self {
        Token::Word(text.into())
    }

    /// Returns the text of a [`Token::Word`], `None` for markers.
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Token::Word(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_word(&self) -> bool {
        matches!(self, Token::Word(_))
    }

    pub fn is_padding(&self) -> bool {
        matches!(self, Token::Padding)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(text) => f.write_str(text),
            Token::SentenceStart => f.write_str("<s>"),
            Token::SentenceEnd => f.write_str("</s>"),
            Token::Unknown => f.write_str("<UNK>"),
            Token::Padding => f.write_str("<NULL>"),
        }
    }
}

impl From<&str> for Token {
    fn from(text: &str) -> Self {
        Token::Word(text.to_string())
    }
}

impl From<String> for Token {
    fn from(text: String) -> Self {
        Token::Word(text)
    }
}

/// An ordered sequence of tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// Build a sentence of plain words, without boundary markers.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: words.into_iter().map(Token::word).collect(),
        }
    }

    /// Build `<s> words... </s>`, the shape the corpus loader hands over.
    pub fn bracketed<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = vec![Token::SentenceStart];
        tokens.extend(words.into_iter().map(Token::word));
        tokens.push(Token::SentenceEnd);
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<Vec<Token>> for Sentence {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl AsRef<[Token]> for Sentence {
    fn as_ref(&self) -> &[Token] {
        &self.tokens
    }
}

/// The training corpus: an ordered list of sentences.
///
/// Models borrow the corpus only for the duration of training; none of them
/// keeps a reference to it afterwards.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    sentences: Vec<Sentence>,
}

impl Corpus {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { sentences }
    }

    /// Build a corpus from nested word lists, one inner list per sentence.
    ///
    /// # Example
    /// ```rust
    /// use ngram_lm::Corpus;
    ///
    /// let corpus = Corpus::from_word_lists([vec!["a", "b", "a"]]);
    /// assert_eq!(corpus.token_count(), 3);
    /// ```
    pub fn from_word_lists<I, W, S>(sentences: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: IntoIterator<Item = S>,
        S: Into<String>,
    {
        sentences.into_iter().map(Sentence::from_words).collect()
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sentence> {
        self.sentences.iter()
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Number of tokens across all sentences, markers included.
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }
}

impl FromIterator<Sentence> for Corpus {
    fn from_iter<T: IntoIterator<Item = Sentence>>(iter: T) -> Self {
        Self {
            sentences: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Sentence;
    type IntoIter = std::slice::Iter<'a, Sentence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sentences.iter()
    }
}
