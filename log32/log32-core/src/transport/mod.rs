//! Transport abstractions the handlers write through
//!
//! How bytes physically leave the device is up to the firmware: a UART, the
//! USB serial/JTAG peripheral, a Wi-Fi UDP socket. Handlers only see these
//! traits.

pub mod fake;

pub use fake::{MemoryConsole, MemoryDatagram, SentDatagram};

use alloc::rc::Rc;
use core::cell::RefCell;

use crate::error::TransportError;

/// Byte sink for console output (UART, USB serial)
pub trait ConsoleIo {
    /// Bring up the console at the given symbol rate
    ///
    /// Called at most once, by the handler constructor, and only when the
    /// configured rate is non-zero.
    fn begin(&mut self, _baud_rate: u32) -> Result<(), TransportError> {
        Ok(())
    }

    /// Write all of `data`
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), TransportError>;
}

/// Connectionless datagram sender (UDP)
pub trait DatagramIo {
    /// Send `payload` as a single datagram to `host:port`
    fn send_to(&mut self, host: &str, port: u16, payload: &[u8]) -> Result<(), TransportError>;
}

/// A console shared between the logger and other code, e.g. a UART that the
/// application also writes to
///
/// While the other user holds the console, writes fail with
/// [`TransportError::InUse`] instead of waiting.
impl<C: ConsoleIo + ?Sized> ConsoleIo for Rc<RefCell<C>> {
    fn begin(&mut self, baud_rate: u32) -> Result<(), TransportError> {
        self.try_borrow_mut()
            .map_err(|_| TransportError::InUse)?
            .begin(baud_rate)
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.try_borrow_mut()
            .map_err(|_| TransportError::InUse)?
            .write_bytes(data)
    }
}

impl<D: DatagramIo + ?Sized> DatagramIo for Rc<RefCell<D>> {
    fn send_to(&mut self, host: &str, port: u16, payload: &[u8]) -> Result<(), TransportError> {
        self.try_borrow_mut()
            .map_err(|_| TransportError::InUse)?
            .send_to(host, port, payload)
    }
}
