//! Character device link, e.g. the USB serial port of the hardware decoder.
//!
//! Reads happen on a dedicated thread so the game loop never blocks; bytes
//! reach the loop over a channel. Terminal devices are switched to raw mode
//! at [`BAUD_RATE`] with a short read timeout, so an idle port reads zero
//! bytes instead of blocking. Zero-byte reads mean "no data yet", never end
//! of stream; the reader only stops on an I/O error or when the link is
//! dropped.

use log::{debug, warn};
use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, Sender, TryRecvError},
    },
    thread,
    time::Duration,
};

use super::{LinkError, Result, SymbolSource};
use crate::game::entities::RawSymbol;

/// Line speed of the hardware decoder.
pub const BAUD_RATE: u32 = 115_200;

/// Read timeout of a terminal device, in tenths of a second.
const READ_TIMEOUT_DECISECONDS: u8 = 1;

/// Pause after an empty read on devices that return immediately.
const IDLE_BACKOFF: Duration = Duration::from_millis(10);

const READ_BUFFER_SIZE: usize = 64;

#[derive(Debug)]
pub struct DeviceLink {
    path: PathBuf,
    rx: Receiver<io::Result<u8>>,
    stop: Arc<AtomicBool>,
    exhausted: bool,
}

impl DeviceLink {
    /// Open `path` for reading and start the reader thread.
    ///
    /// # Errors
    ///
    /// Returns an error if the device can't be opened or configured, or the
    /// reader thread can't be spawned.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;
        configure_port(&file)?;

        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let reader_stop = Arc::clone(&stop);
        thread::Builder::new()
            .name("morse-device-reader".to_string())
            .spawn(move || read_loop(file, &tx, &reader_stop))?;
        debug!("Opened device link {}", path.display());
        Ok(Self {
            path,
            rx,
            stop,
            exhausted: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        match self.rx.try_recv() {
            Ok(Ok(byte)) => Ok(Some(byte)),
            Ok(Err(error)) => {
                self.exhausted = true;
                Err(error.into())
            }
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => {
                self.exhausted = true;
                Err(LinkError::Disconnected)
            }
        }
    }
}

impl Drop for DeviceLink {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// Raw 8N1 at [`BAUD_RATE`], returning from `read` after the timeout even
/// when nothing arrived. Anything that isn't a terminal is left alone.
#[cfg(unix)]
fn configure_port(file: &File) -> io::Result<()> {
    use std::os::fd::AsRawFd;

    let fd = file.as_raw_fd();
    // SAFETY: `fd` is owned by `file`, which outlives these calls, and
    // `termios` is filled in by `tcgetattr` before it's modified.
    unsafe {
        if libc::isatty(fd) == 0 {
            return Ok(());
        }
        let mut termios: libc::termios = std::mem::zeroed();
        if libc::tcgetattr(fd, &mut termios) != 0 {
            return Err(io::Error::last_os_error());
        }
        libc::cfmakeraw(&mut termios);
        if libc::cfsetspeed(&mut termios, libc::B115200) != 0 {
            return Err(io::Error::last_os_error());
        }
        termios.c_cflag |= libc::CLOCAL | libc::CREAD;
        termios.c_cc[libc::VMIN] = 0;
        termios.c_cc[libc::VTIME] = READ_TIMEOUT_DECISECONDS;
        if libc::tcsetattr(fd, libc::TCSANOW, &termios) != 0 {
            return Err(io::Error::last_os_error());
        }
    }
    debug!("Configured serial port for {BAUD_RATE} baud");
    Ok(())
}

#[cfg(not(unix))]
fn configure_port(_file: &File) -> io::Result<()> {
    Ok(())
}

fn read_loop(mut file: File, tx: &Sender<io::Result<u8>>, stop: &AtomicBool) {
    let mut buf = [0u8; READ_BUFFER_SIZE];
    while !stop.load(Ordering::Relaxed) {
        match file.read(&mut buf) {
            Ok(0) => thread::sleep(IDLE_BACKOFF),
            Ok(n) => {
                if buf[..n].iter().any(|&byte| tx.send(Ok(byte)).is_err()) {
                    return;
                }
            }
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error)
                if matches!(
                    error.kind(),
                    io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                ) =>
            {
                thread::sleep(IDLE_BACKOFF);
            }
            Err(error) => {
                warn!("Device read failed: {error}");
                let _ = tx.send(Err(error));
                return;
            }
        }
    }
    debug!("Device reader stopped");
}

impl SymbolSource for DeviceLink {
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
        self.exhausted
    }
}
