//! Matches resolved characters against the target word and keeps score.

use super::{
    entities::{RoundState, RoundStatus},
    tokenizer::TokenizerEvent,
};

/// Outcome of a resolved character, as seen by the engine.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    Match,
    Mismatch,
}

pub struct WordMatchEngine;

impl WordMatchEngine {
    /// Apply one tokenizer event to the round. Does nothing once the round
    /// is over.
    pub fn apply(event: TokenizerEvent, state: &mut RoundState) {
        if state.status.is_over() {
            return;
        }

        match event {
            TokenizerEvent::SymbolAppended
            | TokenizerEvent::PauseOnly
            | TokenizerEvent::WordBoundary => state.decoded_message.push_separator(),
            TokenizerEvent::DecodeFailed => lose_life(state),
            TokenizerEvent::CharacterResolved(ch) => match Self::check(ch, state) {
                Verdict::Match => state.decoded_message.push_char(ch),
                Verdict::Mismatch => lose_life(state),
            },
        }

        state.status = Self::status(state);
    }

    /// Compare `ch` with the next expected character of the target word.
    /// Decoding past the end of the word is a mismatch.
    #[must_use]
    pub fn check(ch: char, state: &RoundState) -> Verdict {
        let pos = state.decoded_message.char_count();
        match state.target_word.char_at(pos) {
            Some(expected) if expected == ch => Verdict::Match,
            _ => Verdict::Mismatch,
        }
    }

    #[must_use]
    pub fn status(state: &RoundState) -> RoundStatus {
        if state.decoded_message.compact() == state.target_word.as_str() {
            RoundStatus::Won
        } else if state.lives == 0 {
            RoundStatus::Lost
        } else {
            RoundStatus::InProgress
        }
    }
}

fn lose_life(state: &mut RoundState) {
    state.lives = state.lives.saturating_sub(1);
}
