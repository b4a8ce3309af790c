//! In-memory transports for testing and development
//!
//! Both fakes record what would have left the device and can be switched
//! into a failing state to exercise the error paths of the handlers.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use super::{ConsoleIo, DatagramIo};
use crate::error::TransportError;

/// Console that appends everything written to an in-memory buffer
#[derive(Debug, Default)]
pub struct MemoryConsole {
    output: Vec<u8>,
    writes: usize,
    baud_rate: Option<u32>,
    failing: bool,
}

impl MemoryConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written so far
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Number of successful `write_bytes` calls
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Output as text (lossy for invalid UTF-8)
    pub fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    /// Output split into lines, without line terminators
    pub fn lines(&self) -> Vec<String> {
        self.output_str().lines().map(ToString::to_string).collect()
    }

    /// Rate passed to `begin`, if it was called
    pub fn baud_rate(&self) -> Option<u32> {
        self.baud_rate
    }

    /// Make subsequent writes fail with [`TransportError::NotReady`]
    pub fn set_failing(&mut self, failing: bool) {
        self.failing = failing;
    }

    pub fn clear(&mut self) {
        self.output.clear();
        self.writes = 0;
    }
}

impl ConsoleIo for MemoryConsole {
    fn begin(&mut self, baud_rate: u32) -> Result<(), TransportError> {
        self.baud_rate = Some(baud_rate);
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), TransportError> {
        if self.failing {
            return Err(TransportError::NotReady);
        }
        self.output.extend_from_slice(data);
        self.writes += 1;
        Ok(())
    }
}

/// A datagram captured by [`MemoryDatagram`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentDatagram {
    pub host: String,
    pub port: u16,
    pub payload: Vec<u8>,
}

impl SentDatagram {
    /// Payload as text (lossy for invalid UTF-8)
    pub fn payload_str(&self) -> String {
        String::from_utf8_lossy(&self.payload).into_owned()
    }
}

/// Datagram transport that records every packet instead of sending it
#[derive(Debug, Default)]
pub struct MemoryDatagram {
    sent: Vec<SentDatagram>,
    offline: bool,
}

impl MemoryDatagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Datagrams sent so far, oldest first
    pub fn sent(&self) -> &[SentDatagram] {
        &self.sent
    }

    /// Simulate a lost network association: sends fail with [`TransportError::NotReady`]
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }
}

impl DatagramIo for MemoryDatagram {
    fn send_to(&mut self, host: &str, port: u16, payload: &[u8]) -> Result<(), TransportError> {
        if self.offline {
            return Err(TransportError::NotReady);
        }
        self.sent.push(SentDatagram {
            host: host.to_string(),
            port,
            payload: payload.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_console_records() {
        let mut console = MemoryConsole::new();
        console.write_bytes(b"a\nb\n").unwrap();
        assert_eq!(console.lines(), ["a", "b"]);
        assert_eq!(console.baud_rate(), None);

        console.set_failing(true);
        assert_eq!(console.write_bytes(b"c"), Err(TransportError::NotReady));
        assert_eq!(console.output(), b"a\nb\n");
    }

    #[test]
    fn test_memory_datagram_offline() {
        let mut udp = MemoryDatagram::new();
        udp.set_offline(true);
        assert!(udp.send_to("10.0.0.1", 514, b"x").is_err());
        udp.set_offline(false);
        udp.send_to("10.0.0.1", 514, b"x").unwrap();
        assert_eq!(udp.sent().len(), 1);
        assert_eq!(udp.sent()[0].port, 514);
        assert_eq!(udp.sent()[0].payload_str(), "x");
    }
}
