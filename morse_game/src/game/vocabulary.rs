//! The closed set of words a round can be played against.

use rand::Rng;
use std::str::FromStr;
use thiserror::Error;

use super::entities::{TargetWord, WordError};

/// Networking and communications terms played by default.
pub const DEFAULT_WORDS: [&str; 10] = [
    "NETWORK",
    "WIRELESS",
    "COMMUNICATION",
    "BROADBAND",
    "SATELLITE",
    "FIBER",
    "MODEM",
    "ROUTER",
    "SWITCH",
    "PROTOCOL",
];

#[derive(Debug, Eq, Error, PartialEq)]
pub enum VocabularyError {
    #[error("vocabulary has no words")]
    Empty,
    #[error("invalid word: {0}")]
    InvalidWord(#[from] WordError),
}

/// A non-empty list of playable words.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Vocabulary {
    words: Vec<TargetWord>,
}

impl Vocabulary {
    /// # Errors
    ///
    /// Returns an error if there are no words or any word is invalid.
    pub fn new<I, S>(words: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| TargetWord::new(word.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if words.is_empty() {
            return Err(VocabularyError::Empty);
        }
        Ok(Self { words })
    }

    /// Uniformly random word.
    pub fn choose<R: Rng>(&self, rng: &mut R) -> TargetWord {
        let idx = rng.random_range(0..self.words.len());
        self.words[idx].clone()
    }

    #[must_use]
    pub fn words(&self) -> &[TargetWord] {
        &self.words
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_WORDS).expect("default words are valid")
    }
}

/// Parses a comma-separated list, e.g. `"FIBER, MODEM"`.
impl FromStr for Vocabulary {
    type Err = VocabularyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.split(',').filter(|word| !word.trim().is_empty()))
    }
}
