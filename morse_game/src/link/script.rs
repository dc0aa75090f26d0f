use std::collections::VecDeque;

use super::{Result, SymbolSource, next_symbol};
use crate::game::entities::RawSymbol;

/// An in-memory byte queue, used for replays and tests.
#[derive(Debug, Default)]
pub struct ScriptLink {
    bytes: VecDeque<u8>,
}

impl ScriptLink {
    #[must_use]
    pub fn new(script: &[u8]) -> Self {
        Self {
            bytes: script.iter().copied().collect(),
        }
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend(bytes);
    }

    /// Bytes still waiting, noise included.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.bytes.len()
    }
}

impl From<&str> for ScriptLink {
    fn from(script: &str) -> Self {
        Self::new(script.as_bytes())
    }
}

impl SymbolSource for ScriptLink {
    fn poll_symbol(&mut self) -> Result<Option<RawSymbol>> {
        let mut bytes = std::iter::from_fn(|| self.bytes.pop_front());
        Ok(next_symbol(&mut bytes))
    }

    fn clear(&mut self) -> Result<()> {
        self.bytes.clear();
        Ok(())
    }

    fn is_exhausted(&self) -> bool {
        self.bytes.is_empty()
    }
}
