//! Host adapters for log32
//!
//! Lets the logger run on a development machine: the console is stdout, the
//! syslog transport is a real UDP socket and the clock is the system clock.

use std::io::{self, Write};
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::Context;
use log32_core::LoggingConfig;
use log32_core::TransportError;
use log32_core::time::TimeProvider;
use log32_core::transport::{ConsoleIo, DatagramIo};

/// Console writing to the process' stdout
#[derive(Debug, Default)]
pub struct StdoutConsole;

impl StdoutConsole {
    pub fn new() -> Self {
        Self
    }
}

impl ConsoleIo for StdoutConsole {
    fn begin(&mut self, baud_rate: u32) -> Result<(), TransportError> {
        log::debug!("StdoutConsole: ignoring baud rate {baud_rate}");
        Ok(())
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), TransportError> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(data).map_err(io_error)?;
        stdout.flush().map_err(io_error)
    }
}

/// UDP sender for syslog datagrams
///
/// The socket is bound on first use, so a handler can be created before the
/// network is up. It is bound to the address family of the destination (IPv4
/// or IPv6) and rebound if that changes. The resolved address of the last
/// destination is cached.
#[derive(Debug, Default)]
pub struct UdpDatagram {
    socket: Option<UdpSocket>,
    resolved: Option<(String, u16, SocketAddr)>,
}

impl UdpDatagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local address of the socket, once bound
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.socket.as_ref().and_then(|socket| socket.local_addr().ok())
    }

    fn socket_for(&mut self, dest: SocketAddr) -> Result<&UdpSocket, TransportError> {
        let same_family = self
            .local_addr()
            .is_some_and(|local| local.is_ipv4() == dest.is_ipv4());
        if !same_family {
            let unspecified = if dest.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };
            let socket = UdpSocket::bind(unspecified).map_err(io_error)?;
            log::debug!("UdpDatagram: bound to {:?}", socket.local_addr().ok());
            self.socket = Some(socket);
        }
        self.socket.as_ref().ok_or(TransportError::NotReady)
    }

    fn resolve(&mut self, host: &str, port: u16) -> Result<SocketAddr, TransportError> {
        if let Some((cached_host, cached_port, addr)) = &self.resolved {
            if cached_host == host && *cached_port == port {
                return Ok(*addr);
            }
        }

        let mut addrs = (host, port)
            .to_socket_addrs()
            .map_err(|err| TransportError::Unreachable(format!("{host}:{port}: {err}")))?
            .peekable();
        let first = addrs
            .peek()
            .copied()
            .ok_or_else(|| TransportError::Unreachable(format!("{host}:{port}: no address")))?;
        // Prefer IPv4 when the name has both
        let addr = addrs.find(SocketAddr::is_ipv4).unwrap_or(first);
        self.resolved = Some((host.to_string(), port, addr));
        Ok(addr)
    }
}

impl DatagramIo for UdpDatagram {
    fn send_to(&mut self, host: &str, port: u16, payload: &[u8]) -> Result<(), TransportError> {
        let addr = self.resolve(host, port)?;
        let sent = self.socket_for(addr)?.send_to(payload, addr).map_err(io_error)?;
        if sent != payload.len() {
            return Err(TransportError::Io(format!(
                "short datagram: {sent} of {} bytes",
                payload.len()
            )));
        }
        Ok(())
    }
}

/// System clock: uptime since construction, wall-clock time from the OS
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    started: Instant,
    wall_clock: bool,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            wall_clock: true,
        }
    }

    /// Clock without wall-clock time, like a device before its first NTP sync
    pub fn uptime_only() -> Self {
        Self {
            wall_clock: false,
            ..Self::new()
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn unix_time_ms(&self) -> Option<u64> {
        if !self.wall_clock {
            return None;
        }
        let since_epoch = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
        u64::try_from(since_epoch.as_millis()).ok()
    }
}

/// Read a JSON logging config and validate it
pub fn load_config(path: &Path) -> anyhow::Result<LoggingConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: LoggingConfig = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}

fn io_error(err: io::Error) -> TransportError {
    match err.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::HostUnreachable
        | io::ErrorKind::NetworkUnreachable
        | io::ErrorKind::AddrNotAvailable => TransportError::Unreachable(err.to_string()),
        _ => TransportError::Io(err.to_string()),
    }
}
