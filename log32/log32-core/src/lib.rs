//! Hierarchical logging for 32 bit microcontrollers.
//!
//! Firmware modules derive their own tagged [`Logger`] from a root logger.
//! Loggers inherit their effective level and device id from their ancestors,
//! render `format_args!` style messages into a fixed-size buffer, and hand the
//! finished [`LogEvent`] to a [`LogHandler`]: a serial console, a syslog server
//! over UDP, or a [`MultiHandler`] fanning out to several of them.
//!
//! ```
//! use std::rc::Rc;
//!
//! use log32_core::time::ManualClock;
//! use log32_core::transport::MemoryConsole;
//! use log32_core::{LogLevel, LoggerTree, SerialConfig, SerialHandler};
//!
//! let serial = Rc::new(SerialHandler::new(
//!     &SerialConfig { color: false, baud_rate: 0 },
//!     MemoryConsole::new(),
//!     ManualClock::new(1_234),
//! ));
//! let tree = LoggerTree::new();
//! let root = tree.root("main", Some(serial.clone()));
//! let wifi = root.child("wifi");
//!
//! root.set_level(LogLevel::INFO);
//! log32_core::debug!(wifi, "dropped: {}", 1);
//! log32_core::warn!(wifi, "rssi {} dBm", -71);
//!
//! assert_eq!(serial.io().output_str(), "1.234:30::wifi:rssi -71 dBm\n");
//! ```

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod bootstrap;
pub mod buffer;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod level;
pub mod logger;
pub mod time;
pub mod transport;

pub use buffer::{MESSAGE_BUFFER_LEN, MessageBuffer};
pub use config::{LoggingConfig, ModuleConfig, SerialConfig, SyslogConfig};
pub use error::{ConfigError, LogError, TransportError};
pub use event::LogEvent;
pub use handler::{LogHandler, MultiHandler, SerialHandler, SyslogHandler};
pub use level::LogLevel;
pub use logger::{Logger, LoggerId, LoggerTree, UnsetLevelPolicy};
