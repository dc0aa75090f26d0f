/// Property-based tests for the round state machine using proptest
///
/// These tests drive the tokenizer and match engine with arbitrary symbol
/// streams and check the invariants that must hold for every reachable round.
use morse_game::{
    MorseTokenizer, TokenizerEvent, WordMatchEngine,
    entities::{MAX_LIVES, RawSymbol, RoundState, RoundStatus, TargetWord},
    morse::{MORSE_TABLE, encode},
};
use proptest::prelude::*;

// Strategy to generate any raw symbol, weighted towards marks
fn symbol_strategy() -> impl Strategy<Value = RawSymbol> {
    prop_oneof![
        4 => Just(RawSymbol::Dot),
        4 => Just(RawSymbol::Dash),
        2 => Just(RawSymbol::LetterPause),
        1 => Just(RawSymbol::WordPause),
    ]
}

// Strategy to generate a valid target word
fn word_strategy() -> impl Strategy<Value = TargetWord> {
    "[A-Z0-9]{1,12}".prop_map(|word| TargetWord::new(&word).unwrap())
}

// Strategy to generate a tokenizer event, including bogus characters
fn event_strategy() -> impl Strategy<Value = TokenizerEvent> {
    prop_oneof![
        Just(TokenizerEvent::SymbolAppended),
        Just(TokenizerEvent::PauseOnly),
        Just(TokenizerEvent::DecodeFailed),
        Just(TokenizerEvent::WordBoundary),
        prop::char::range('0', 'Z').prop_map(TokenizerEvent::CharacterResolved),
    ]
}

// Helper to run a symbol through both stages
fn step(state: &mut RoundState, symbol: RawSymbol) -> TokenizerEvent {
    let event = MorseTokenizer::consume(symbol, state);
    WordMatchEngine::apply(event, state);
    event
}

proptest! {
    #[test]
    fn test_decoded_message_is_prefix(
        word in word_strategy(),
        symbols in prop::collection::vec(symbol_strategy(), 0..200),
    ) {
        let mut state = RoundState::new(word);
        for symbol in symbols {
            step(&mut state, symbol);
            if state.status != RoundStatus::Lost {
                let decoded = state.decoded_message.compact();
                prop_assert!(
                    state.target_word.as_str().starts_with(&decoded),
                    "{decoded:?} is not a prefix of {}", state.target_word
                );
            }
        }
    }

    #[test]
    fn test_lives_monotonic_and_bounded(
        word in word_strategy(),
        symbols in prop::collection::vec(symbol_strategy(), 0..200),
    ) {
        let mut state = RoundState::new(word);
        let mut previous = state.lives;
        for symbol in symbols {
            step(&mut state, symbol);
            prop_assert!(state.lives <= previous);
            prop_assert!(state.lives <= MAX_LIVES);
            previous = state.lives;
        }
    }

    #[test]
    fn test_terminal_state_is_idempotent(
        word in word_strategy(),
        symbols in prop::collection::vec(symbol_strategy(), 0..200),
        events in prop::collection::vec(event_strategy(), 1..20),
    ) {
        let mut state = RoundState::new(word);
        for symbol in symbols {
            step(&mut state, symbol);
            if state.status.is_over() {
                break;
            }
        }
        if state.status.is_over() {
            let snapshot = state.clone();
            for event in events {
                WordMatchEngine::apply(event, &mut state);
            }
            prop_assert_eq!(state, snapshot);
        }
    }

    #[test]
    fn test_mismatch_consumes_exactly_one_life(
        word in word_strategy(),
        ch in prop::char::range('A', 'Z'),
    ) {
        let mut state = RoundState::new(word);
        prop_assume!(state.target_word.char_at(0) != Some(ch));
        let message = state.decoded_message.clone();
        WordMatchEngine::apply(TokenizerEvent::CharacterResolved(ch), &mut state);
        prop_assert_eq!(state.lives, MAX_LIVES - 1);
        prop_assert_eq!(state.decoded_message, message);
    }

    #[test]
    fn test_correct_transmission_wins(word in word_strategy()) {
        let mut state = RoundState::new(word.clone());
        for ch in word.as_str().chars() {
            let code = encode(ch).unwrap();
            for byte in code.bytes().chain(std::iter::once(b' ')) {
                step(&mut state, RawSymbol::from_byte(byte).unwrap());
            }
        }
        prop_assert_eq!(state.status, RoundStatus::Won);
        prop_assert_eq!(state.lives, MAX_LIVES);
    }
}

#[test]
fn test_round_trip_decode_every_entry() {
    for (code, ch) in MORSE_TABLE {
        let mut state = RoundState::new(TargetWord::new("FIBER").unwrap());
        for byte in code.bytes() {
            let symbol = RawSymbol::from_byte(byte).unwrap();
            assert_eq!(
                MorseTokenizer::consume(symbol, &mut state),
                TokenizerEvent::SymbolAppended
            );
        }
        assert_eq!(
            MorseTokenizer::consume(RawSymbol::LetterPause, &mut state),
            TokenizerEvent::CharacterResolved(ch),
            "{code} should resolve to {ch}"
        );
    }
}
