//! Symbol source error types.

use std::io;
use thiserror::Error;

/// Errors that can occur while polling a symbol source
#[derive(Debug, Error)]
pub enum LinkError {
    /// Transport I/O failure
    #[error("link I/O error: {0}")]
    Io(#[from] io::Error),

    /// The other end went away; no more symbols will arrive
    #[error("link disconnected")]
    Disconnected,
}

impl LinkError {
    /// Whether polling the link again can ever yield another symbol.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, LinkError::Disconnected)
    }
}

/// Result type for link operations
pub type Result<T> = std::result::Result<T, LinkError>;
