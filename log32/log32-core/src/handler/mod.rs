//! Log handlers: the sinks a logger forwards its events to
//!
//! A handler is a "dumb" sink: level filtering is exclusively done by the
//! [`Logger`](crate::Logger), a handler only formats and transports what it is
//! given. Handlers are shared by reference counting; the same handler may be
//! attached to many loggers and added to several [`MultiHandler`]s.

pub mod multi;
pub mod serial;
pub mod syslog;

pub use multi::MultiHandler;
pub use serial::SerialHandler;
pub use syslog::{Facility, SyslogHandler};

use crate::error::LogError;
use crate::event::LogEvent;

/// Sink for formatted log events
///
/// Implementations must return in bounded time and should not allocate on the
/// common path. Errors are reported back to the dispatcher, which drops them;
/// they never reach the code that issued the log statement.
pub trait LogHandler {
    fn write(&self, event: &LogEvent<'_>) -> Result<(), LogError>;
}
