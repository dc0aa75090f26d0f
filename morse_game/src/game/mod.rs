//! Morse game engine - decoding and word matching.
//!
//! This module provides the round state machine:
//! - Entities shared by every stage (symbols, tokens, the round state)
//! - The Morse code table
//! - The tokenizer turning raw symbols into resolved characters
//! - The match engine keeping lives and the round outcome
//! - Round lifecycle and target word selection

pub mod engine;
pub mod entities;
pub mod morse;
pub mod session;
pub mod tokenizer;
pub mod vocabulary;

pub use engine::{Verdict, WordMatchEngine};
pub use session::Session;
pub use tokenizer::{MorseTokenizer, TokenizerEvent};
pub use vocabulary::{Vocabulary, VocabularyError};
