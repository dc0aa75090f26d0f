use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of lives a round starts with.
pub const MAX_LIVES: Lives = 3;

/// Placeholder for the lives counter.
pub type Lives = u8;

/// Separator written between decoded characters.
pub const MESSAGE_SEPARATOR: char = ' ';

/// A single dot or dash within a Morse token.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Mark {
    Dot,
    Dash,
}

impl Mark {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Dot => '.',
            Self::Dash => '-',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A discrete symbol delivered by the upstream decoder.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum RawSymbol {
    Dot,
    Dash,
    LetterPause,
    WordPause,
}

impl RawSymbol {
    /// Decode one byte of the symbol wire format. Any byte outside
    /// `.`, `-`, ` ` and `/` is noise and yields `None`.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'.' => Some(Self::Dot),
            b'-' => Some(Self::Dash),
            b' ' => Some(Self::LetterPause),
            b'/' => Some(Self::WordPause),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Dot => b'.',
            Self::Dash => b'-',
            Self::LetterPause => b' ',
            Self::WordPause => b'/',
        }
    }

    /// The mark this symbol contributes to a token, if any.
    #[must_use]
    pub const fn mark(self) -> Option<Mark> {
        match self {
            Self::Dot => Some(Mark::Dot),
            Self::Dash => Some(Mark::Dash),
            Self::LetterPause | Self::WordPause => None,
        }
    }
}

impl fmt::Display for RawSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::Dot => ".",
            Self::Dash => "-",
            Self::LetterPause => "Letter Pause",
            Self::WordPause => "Word Pause",
        };
        write!(f, "{repr}")
    }
}

/// Marks accumulated since the last pause.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct MorseToken(Vec<Mark>);

impl MorseToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mark: Mark) {
        self.0.push(mark);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn marks(&self) -> impl Iterator<Item = Mark> + '_ {
        self.0.iter().copied()
    }

    /// Whether this token spells exactly `code` (a string of `.`/`-`).
    #[must_use]
    pub fn matches(&self, code: &str) -> bool {
        code.len() == self.0.len()
            && code
                .chars()
                .zip(self.marks())
                .all(|(c, mark)| c == mark.as_char())
    }
}

impl FromIterator<Mark> for MorseToken {
    fn from_iter<I: IntoIterator<Item = Mark>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for MorseToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in &self.0 {
            write!(f, "{mark}")?;
        }
        Ok(())
    }
}

/// Characters decoded so far in a round, with space separators between
/// them. Never holds two separators in a row.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DecodedMessage(String);

impl DecodedMessage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_char(&mut self, ch: char) {
        self.0.push(ch);
    }

    /// Append a separator unless the message is empty or already ends
    /// with one.
    pub fn push_separator(&mut self) {
        if !self.0.is_empty() && !self.0.ends_with(MESSAGE_SEPARATOR) {
            self.0.push(MESSAGE_SEPARATOR);
        }
    }

    /// Number of real characters decoded, ignoring separators.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.chars().count()
    }

    /// The decoded characters with every separator removed.
    #[must_use]
    pub fn compact(&self) -> String {
        self.chars().collect()
    }

    fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0.chars().filter(|&c| c != MESSAGE_SEPARATOR)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DecodedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.trim_end())
    }
}

/// Errors for words that can't be played.
#[derive(Debug, Deserialize, Eq, Error, PartialEq, Serialize)]
pub enum WordError {
    #[error("word is empty")]
    Empty,
    #[error("word {word:?} contains {ch:?}; only A-Z and 0-9 are allowed")]
    InvalidChar { word: String, ch: char },
}

/// The word a round is played against. Uppercase `A`-`Z` and `0`-`9` only.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct TargetWord(String);

impl TargetWord {
    /// # Errors
    ///
    /// Returns an error if the trimmed word is empty or holds anything other
    /// than uppercase ASCII letters and digits.
    pub fn new(word: &str) -> Result<Self, WordError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(WordError::Empty);
        }
        if let Some(ch) = word
            .chars()
            .find(|c| !(c.is_ascii_uppercase() || c.is_ascii_digit()))
        {
            return Err(WordError::InvalidChar {
                word: word.to_string(),
                ch,
            });
        }
        Ok(Self(word.to_string()))
    }

    /// Character expected at `pos`, or `None` past the end of the word.
    #[must_use]
    pub fn char_at(&self, pos: usize) -> Option<char> {
        self.0.as_bytes().get(pos).map(|&b| char::from(b))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::InProgress => "in progress",
            Self::Won => "won",
            Self::Lost => "lost",
        };
        write!(f, "{repr}")
    }
}

/// Everything a round needs. Owned by the loop and handed to the tokenizer
/// and the match engine one at a time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundState {
    /// Symbols as typed, with letter and word separators.
    pub received_morse_log: String,
    pub decoded_message: DecodedMessage,
    pub current_token: MorseToken,
    pub target_word: TargetWord,
    pub lives: Lives,
    pub status: RoundStatus,
    /// Most recent symbol received. Display only.
    pub last_symbol: Option<RawSymbol>,
}

impl RoundState {
    #[must_use]
    pub fn new(target_word: TargetWord) -> Self {
        Self {
            received_morse_log: String::new(),
            decoded_message: DecodedMessage::new(),
            current_token: MorseToken::new(),
            target_word,
            lives: MAX_LIVES,
            status: RoundStatus::InProgress,
            last_symbol: None,
        }
    }

    #[must_use]
    pub fn view(&self) -> RoundView {
        RoundView {
            target_word: self.target_word.to_string(),
            received_morse: self.received_morse_log.clone(),
            decoded_message: self.decoded_message.to_string(),
            current_token: self.current_token.to_string(),
            last_symbol: self.last_symbol.map(|symbol| symbol.to_string()),
            lives: self.lives,
            status: self.status,
        }
    }
}

/// Read-only snapshot of a round for display.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct RoundView {
    pub target_word: String,
    pub received_morse: String,
    pub decoded_message: String,
    pub current_token: String,
    pub last_symbol: Option<String>,
    pub lives: Lives,
    pub status: RoundStatus,
}
