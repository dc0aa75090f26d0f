//! TCP link to a serial-to-network bridge in front of the hardware decoder.

use log::debug;
use mio::net::TcpStream;
use std::{
    io::{self, Read},
    net::{self, SocketAddr},
    time::Duration,
};

use super::{LinkError, Result, SymbolSource};
use crate::game::entities::RawSymbol;

/// Default timeout for connecting to the bridge.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(1);

/// A non-blocking TCP stream read one byte at a time.
#[derive(Debug)]
pub struct TcpLink {
    stream: TcpStream,
    closed: bool,
}

impl TcpLink {
    /// Connect to `addr`, trying three times with decreasing timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if every attempt fails.
    pub fn connect(addr: &SocketAddr) -> Result<Self> {
        let connect_timeouts = [
            CONNECT_TIMEOUT,
            Duration::from_millis(500),
            Duration::from_millis(100),
        ];
        let mut last_error = None;
        for connect_timeout in connect_timeouts {
            match net::TcpStream::connect_timeout(addr, connect_timeout) {
                Ok(stream) => {
                    stream.set_nonblocking(true)?;
                    debug!("Connected to symbol bridge at {addr}");
                    return Ok(Self::from_stream(TcpStream::from_std(stream)));
                }
                Err(error) => {
                    debug!("Connecting to {addr} failed: {error}");
                    last_error = Some(error);
                }
            }
        }
        Err(last_error.map_or(LinkError::Disconnected, LinkError::Io))
    }

    /// Wrap an already connected, non-blocking stream.
    #[must_use]
    pub fn from_stream(stream: TcpStream) -> Self {
        Self {
            stream,
            closed: false,
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.stream.read(&mut byte) {
                Ok(0) => {
                    self.closed = true;
                    return Err(LinkError::Disconnected);
                }
                Ok(_) => return Ok(Some(byte[0])),
                Err(error) if error.kind() == io::ErrorKind::WouldBlock => return Ok(None),
                Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
                Err(error) => return Err(error.into()),
            }
        }
    }
}

impl SymbolSource for TcpLink {
    fn poll_symbol(&mut self) -> Result<Option<RawSymbol>> {
        while let Some(byte) = self.next_byte()? {
            if let Some(symbol) = RawSymbol::from_byte(byte) {
                return Ok(Some(symbol));
            }
        }
        Ok(None)
    }

    fn clear(&mut self) -> Result<()> {
        while self.next_byte()?.is_some() {}
        Ok(())
    }

    fn is_exhausted(&self) -> bool {
        self.closed
    }
}
