//! Error types for log32

use alloc::string::String;
use core::fmt;

/// Failure of a console or network transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Transport not brought up (e.g. no network association yet)
    NotReady,
    /// Destination could not be resolved or reached
    Unreachable(String),
    /// Underlying I/O error
    Io(String),
    /// Transport is shared and currently held by its other user
    InUse,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::NotReady => write!(f, "Transport not ready"),
            TransportError::Unreachable(dest) => write!(f, "Destination unreachable: {}", dest),
            TransportError::Io(msg) => write!(f, "I/O error: {}", msg),
            TransportError::InUse => write!(f, "Transport in use"),
        }
    }
}

/// Error returned by [`LogHandler::write`](crate::LogHandler::write).
///
/// Never surfaces to the caller of a log statement: the dispatching logger
/// drops it. Composite handlers use it to report partial delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogError {
    /// The handler's transport failed
    Transport(TransportError),
    /// The handler is already writing (re-entrant call or handler cycle)
    Busy,
    /// Some members of a fan-out handler failed
    Partial {
        /// Number of members whose write failed
        failed: usize,
        /// Number of members the event was offered to
        total: usize,
    },
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::Transport(err) => write!(f, "Transport error: {}", err),
            LogError::Busy => write!(f, "Handler busy"),
            LogError::Partial { failed, total } => {
                write!(f, "{} of {} handlers failed", failed, total)
            }
        }
    }
}

impl From<TransportError> for LogError {
    fn from(err: TransportError) -> Self {
        LogError::Transport(err)
    }
}

/// Invalid logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Syslog host is empty
    MissingHost,
    /// Syslog port is zero
    InvalidPort,
    /// Syslog facility outside 0..=23
    InvalidFacility(u8),
    /// Neither a serial nor a syslog sink is configured
    NoSink,
    /// A console was requested by the config but none was supplied
    MissingConsole,
    /// A datagram transport was requested by the config but none was supplied
    MissingDatagram,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingHost => write!(f, "Syslog host must not be empty"),
            ConfigError::InvalidPort => write!(f, "Syslog port must not be 0"),
            ConfigError::InvalidFacility(facility) => {
                write!(f, "Syslog facility {} out of range 0..=23", facility)
            }
            ConfigError::NoSink => write!(f, "No serial or syslog output configured"),
            ConfigError::MissingConsole => write!(f, "Serial output configured without a console"),
            ConfigError::MissingDatagram => {
                write!(f, "Syslog output configured without a datagram transport")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TransportError {}

#[cfg(feature = "std")]
impl std::error::Error for LogError {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
