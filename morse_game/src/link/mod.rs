//! Symbol sources feeding the game loop.
//!
//! Every link speaks the same one-byte-per-symbol wire format
//! (see [`RawSymbol::from_byte`]) and is polled without blocking: a poll
//! yields at most one symbol, skipping any noise bytes that precede it.

use enum_dispatch::enum_dispatch;

use crate::game::entities::RawSymbol;

pub mod device;
pub mod errors;
pub mod script;
pub mod tcp;

pub use device::DeviceLink;
pub use errors::{LinkError, Result};
pub use script::ScriptLink;
pub use tcp::TcpLink;

/// A non-blocking source of raw symbols.
#[enum_dispatch]
pub trait SymbolSource {
    /// Next symbol if one is available right now.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails or the peer disconnects.
    fn poll_symbol(&mut self) -> Result<Option<RawSymbol>>;

    /// Drop everything buffered so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails while draining.
    fn clear(&mut self) -> Result<()>;

    /// Whether the source has run dry for good.
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Any of the supported symbol sources.
#[enum_dispatch(SymbolSource)]
#[derive(Debug)]
pub enum Link {
    Tcp(TcpLink),
    Device(DeviceLink),
    Script(ScriptLink),
}

/// First symbol among `bytes`, consuming noise along the way.
pub(crate) fn next_symbol<I: Iterator<Item = u8>>(bytes: &mut I) -> Option<RawSymbol> {
    bytes.find_map(RawSymbol::from_byte)
}
