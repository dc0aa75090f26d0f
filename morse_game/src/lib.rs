//! # Morse Game
//!
//! A Morse code word game: a live stream of dots, dashes and pauses is
//! decoded into characters and checked, one position at a time, against a
//! target word. Each wrong or undecodable letter costs a life.
//!
//! ## Architecture
//!
//! Every raw symbol flows through two stages that share a single owned
//! [`RoundState`](game::entities::RoundState):
//!
//! - **MorseTokenizer**: accumulates dots and dashes into a token and resolves
//!   it against the Morse table on a letter pause
//! - **WordMatchEngine**: compares each resolved character with the target
//!   word, spends lives on mismatches and decides when the round is won or lost
//!
//! A [`Session`] ties the two together with target word selection and
//! restarts, and [`link`] provides the non-blocking symbol sources that feed it.
//!
//! ## Example
//!
//! ```
//! use morse_game::{Session, Vocabulary, entities::RoundStatus};
//!
//! let mut session = Session::with_seed(Vocabulary::new(["SOS"]).unwrap(), 0);
//! for byte in "... --- ... ".bytes() {
//!     session.handle_byte(byte);
//! }
//! assert_eq!(session.status(), RoundStatus::Won);
//! ```

/// Round state machine, Morse table and word selection.
pub mod game;
pub use game::{
    MorseTokenizer, Session, TokenizerEvent, Verdict, Vocabulary, VocabularyError,
    WordMatchEngine, entities, morse,
};

/// Symbol sources polled by the game loop.
pub mod link;
pub use link::{DeviceLink, Link, LinkError, ScriptLink, SymbolSource, TcpLink};
