//! Turns raw symbols into tokens and resolved characters.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    entities::{RawSymbol, RoundState},
    morse,
};

/// Separator written to the morse log on a letter pause.
pub const LETTER_SEPARATOR: &str = " ";

/// Separator written to the morse log on a word pause.
pub const WORD_SEPARATOR: &str = "  ";

/// Outcome of feeding one raw symbol to the tokenizer.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TokenizerEvent {
    /// A dot or dash was added to the current token.
    SymbolAppended,
    /// A letter pause arrived with nothing to resolve.
    PauseOnly,
    /// The closed token isn't in the Morse table.
    DecodeFailed,
    CharacterResolved(char),
    WordBoundary,
}

impl fmt::Display for TokenizerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SymbolAppended => write!(f, "symbol appended"),
            Self::PauseOnly => write!(f, "pause"),
            Self::DecodeFailed => write!(f, "unknown letter"),
            Self::CharacterResolved(ch) => write!(f, "decoded {ch}"),
            Self::WordBoundary => write!(f, "word boundary"),
        }
    }
}

/// Stateless driver over the token and log held in a [`RoundState`].
pub struct MorseTokenizer;

impl MorseTokenizer {
    /// Consume one symbol, mutating only the current token, the morse log
    /// and the last seen symbol.
    pub fn consume(symbol: RawSymbol, state: &mut RoundState) -> TokenizerEvent {
        state.last_symbol = Some(symbol);
        match symbol {
            RawSymbol::Dot | RawSymbol::Dash => {
                if let Some(mark) = symbol.mark() {
                    state.current_token.push(mark);
                    state.received_morse_log.push(mark.as_char());
                }
                TokenizerEvent::SymbolAppended
            }
            RawSymbol::LetterPause => {
                push_letter_separator(&mut state.received_morse_log);
                if state.current_token.is_empty() {
                    return TokenizerEvent::PauseOnly;
                }
                let resolved = morse::decode_token(&state.current_token);
                state.current_token.clear();
                match resolved {
                    Some(ch) => TokenizerEvent::CharacterResolved(ch),
                    None => TokenizerEvent::DecodeFailed,
                }
            }
            RawSymbol::WordPause => {
                push_word_separator(&mut state.received_morse_log);
                // An unterminated letter is dropped, not resolved.
                state.current_token.clear();
                TokenizerEvent::WordBoundary
            }
        }
    }
}

fn push_letter_separator(log: &mut String) {
    if !log.is_empty() && !log.ends_with(' ') {
        log.push_str(LETTER_SEPARATOR);
    }
}

/// A word pause right after a letter pause widens the trailing letter
/// separator instead of stacking another separator on top of it.
fn push_word_separator(log: &mut String) {
    if log.is_empty() || log.ends_with(WORD_SEPARATOR) {
        return;
    }
    if log.ends_with(LETTER_SEPARATOR) {
        log.push_str(&WORD_SEPARATOR[LETTER_SEPARATOR.len()..]);
    } else {
        log.push_str(WORD_SEPARATOR);
    }
}
