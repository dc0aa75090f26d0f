//! Round lifecycle: word selection, symbol processing and restarts.

use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

use super::{
    engine::WordMatchEngine,
    entities::{RawSymbol, RoundState, RoundStatus, RoundView},
    tokenizer::{MorseTokenizer, TokenizerEvent},
    vocabulary::Vocabulary,
};

/// Owns the state of the current round and everything needed to start the
/// next one.
#[derive(Debug)]
pub struct Session {
    vocabulary: Vocabulary,
    rng: StdRng,
    state: RoundState,
    round: u32,
}

impl Session {
    #[must_use]
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self::with_rng(vocabulary, StdRng::from_os_rng())
    }

    /// Reproducible word selection.
    #[must_use]
    pub fn with_seed(vocabulary: Vocabulary, seed: u64) -> Self {
        Self::with_rng(vocabulary, StdRng::seed_from_u64(seed))
    }

    #[must_use]
    pub fn with_rng(vocabulary: Vocabulary, mut rng: StdRng) -> Self {
        let state = RoundState::new(vocabulary.choose(&mut rng));
        info!("Round 1 started");
        debug!("Target word is {}", state.target_word);
        Self {
            vocabulary,
            rng,
            state,
            round: 1,
        }
    }

    /// Feed one raw symbol through the tokenizer and the match engine.
    /// Returns `None` without touching the round once it is over.
    pub fn handle_symbol(&mut self, symbol: RawSymbol) -> Option<TokenizerEvent> {
        if self.state.status.is_over() {
            return None;
        }

        debug!("Received symbol {symbol}");
        let event = MorseTokenizer::consume(symbol, &mut self.state);
        let lives = self.state.lives;
        WordMatchEngine::apply(event, &mut self.state);

        if self.state.lives < lives {
            info!("Mismatch ({event}), {} live(s) left", self.state.lives);
        }
        match self.state.status {
            RoundStatus::Won => info!("Round {} won: {}", self.round, self.state.target_word),
            RoundStatus::Lost => info!("Round {} lost: out of lives", self.round),
            RoundStatus::InProgress => {}
        }
        Some(event)
    }

    /// Feed one byte of the symbol wire format. Noise bytes are dropped.
    pub fn handle_byte(&mut self, byte: u8) -> Option<TokenizerEvent> {
        RawSymbol::from_byte(byte).and_then(|symbol| self.handle_symbol(symbol))
    }

    /// Replace the round with a fresh one, discarding any token in flight.
    pub fn restart(&mut self) {
        self.state = RoundState::new(self.vocabulary.choose(&mut self.rng));
        self.round += 1;
        info!("Round {} started", self.round);
        debug!("Target word is {}", self.state.target_word);
    }

    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    #[must_use]
    pub fn view(&self) -> RoundView {
        self.state.view()
    }

    #[must_use]
    pub fn status(&self) -> RoundStatus {
        self.state.status
    }

    /// Rounds played so far, counting the current one.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::MAX_LIVES;

    fn session(word: &str) -> Session {
        Session::with_seed(Vocabulary::new([word]).unwrap(), 0)
    }

    fn feed(session: &mut Session, script: &str) {
        for byte in script.bytes() {
            session.handle_byte(byte);
        }
    }

    #[test]
    fn test_new_session() {
        let session = session("FIBER");
        assert_eq!(session.state().target_word.as_str(), "FIBER");
        assert_eq!(session.round(), 1);
        assert_eq!(session.status(), RoundStatus::InProgress);
    }

    #[test]
    fn test_noise_bytes_are_ignored() {
        let mut session = session("FIBER");
        assert_eq!(session.handle_byte(b'\n'), None);
        assert_eq!(session.handle_byte(b'x'), None);
        assert!(session.state().received_morse_log.is_empty());
        assert_eq!(session.state().last_symbol, None);
    }

    #[test]
    fn test_win_freezes_session() {
        let mut session = session("FIBER");
        feed(&mut session, "..-. .. -... . .-. ");
        assert_eq!(session.status(), RoundStatus::Won);
        assert_eq!(session.state().lives, MAX_LIVES);

        let snapshot = session.state().clone();
        assert_eq!(session.handle_symbol(RawSymbol::Dot), None);
        assert_eq!(session.state(), &snapshot);
    }

    #[test]
    fn test_restart_resets_round() {
        let mut session = session("FIBER");
        feed(&mut session, "..-. -..- -..");
        assert_eq!(session.state().lives, 2);
        assert!(!session.state().current_token.is_empty());

        session.restart();
        assert_eq!(session.round(), 2);
        assert_eq!(session.state().lives, MAX_LIVES);
        assert!(session.state().current_token.is_empty());
        assert!(session.state().decoded_message.is_empty());
        assert!(session.state().received_morse_log.is_empty());
    }

    #[test]
    fn test_restart_after_loss() {
        let mut session = session("FIBER");
        feed(&mut session, "...... ...... ...... ");
        assert_eq!(session.status(), RoundStatus::Lost);
        session.restart();
        assert_eq!(session.status(), RoundStatus::InProgress);
        assert_eq!(session.handle_byte(b'.'), Some(TokenizerEvent::SymbolAppended));
    }

    #[test]
    fn test_same_seed_same_words() {
        let mut a = Session::with_seed(Vocabulary::default(), 99);
        let mut b = Session::with_seed(Vocabulary::default(), 99);
        for _ in 0..5 {
            assert_eq!(a.state().target_word, b.state().target_word);
            a.restart();
            b.restart();
        }
    }
}
