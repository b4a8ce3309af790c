//! Syslog over UDP
//!
//! Each event becomes one RFC 5424 message sent as a single datagram:
//!
//! ```text
//! <PRI>1 TIMESTAMP HOSTNAME APP-NAME PROCID MSGID MSG
//! <14>1 2024-05-01T10:00:00.250Z e32-a1b2c3 wifi loopTask 12.034 connected
//! ```
//!
//! HOSTNAME carries the device id, APP-NAME the logger tag, PROCID the name of
//! the running task and MSGID the uptime. Fields without a value are `-`. The
//! TIMESTAMP is only known once the device has wall-clock time.
//!
//! Delivery is fire-and-forget: a failed send is reported to the dispatching
//! logger, which drops it. Nothing is retried or buffered.

use alloc::string::String;
use core::cell::{Ref, RefCell};
use core::fmt::{self, Write};

use chrono::{DateTime, Datelike, Timelike, Utc};

use super::LogHandler;
use crate::buffer::MessageBuffer;
use crate::color::{Colorizer, severity_bucket};
use crate::config::SyslogConfig;
use crate::error::{ConfigError, LogError};
use crate::event::LogEvent;
use crate::level::LogLevel;
use crate::time::TimeProvider;
use crate::transport::DatagramIo;

/// Capacity of the buffer a datagram is encoded into
pub const DATAGRAM_BUFFER_LEN: usize = 512;

/// RFC 5424 protocol version
pub const SYSLOG_VERSION: u8 = 1;

/// Syslog severity per severity bucket: unset, debug, info, warning, error, critical
const SEVERITY_MAPPING: [u8; 6] = [
    7, // unset -> debug
    7, // debug
    6, // info (5 = notice is unused)
    4, // warning
    3, // error
    2, // critical (1 = alert and 0 = emergency are unused)
];

/// Returns the name of the currently running task, if any
pub type TaskNameFn = fn() -> Option<&'static str>;

/// Syslog facility (0..=23)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facility(u8);

impl Facility {
    pub const KERNEL: Facility = Facility(0);
    pub const USER: Facility = Facility(1);
    pub const DAEMON: Facility = Facility(3);
    pub const LOCAL0: Facility = Facility(16);
    pub const LOCAL7: Facility = Facility(23);

    pub fn new(code: u8) -> Result<Self, ConfigError> {
        if code > Self::LOCAL7.0 {
            return Err(ConfigError::InvalidFacility(code));
        }
        Ok(Facility(code))
    }

    pub fn code(self) -> u8 {
        self.0
    }
}

/// Syslog severity of a log level
pub fn severity(level: LogLevel) -> u8 {
    SEVERITY_MAPPING[severity_bucket(level, SEVERITY_MAPPING.len() - 1)]
}

/// PRI value: `facility * 8 + severity`
pub fn priority(facility: Facility, level: LogLevel) -> u8 {
    facility.0 * 8 + severity(level)
}

/// Header values of a single syslog message that do not come from the event
#[derive(Debug, Clone, Copy, Default)]
pub struct SyslogStamp<'a> {
    /// Milliseconds since boot
    pub uptime_ms: u64,
    /// Milliseconds since the Unix epoch, if known
    pub unix_time_ms: Option<u64>,
    /// Name of the emitting task
    pub task: Option<&'a str>,
}

/// Encode one event as an RFC 5424 line into `out`
///
/// A message that does not fit is truncated; the color reset is kept.
pub fn encode<const N: usize>(
    out: &mut MessageBuffer<N>,
    facility: Facility,
    colors: Colorizer,
    stamp: &SyslogStamp<'_>,
    event: &LogEvent<'_>,
) {
    out.write_args(format_args!(
        "<{}>{} {} {} {} {} {}.{:03} {}{}",
        priority(facility, event.level),
        SYSLOG_VERSION,
        Timestamp(stamp.unix_time_ms),
        nil_if_empty(event.device_id),
        nil_if_empty(Some(event.tag)),
        nil_if_empty(stamp.task),
        stamp.uptime_ms / 1000,
        stamp.uptime_ms % 1000,
        colors.start(event.level),
        event.message,
    ));
    out.terminate(colors.end());
}

/// Header fields must not be empty, RFC 5424 uses `-` for "no value"
fn nil_if_empty(field: Option<&str>) -> &str {
    match field {
        Some(value) if !value.is_empty() => value,
        _ => "-",
    }
}

/// RFC 3339 UTC timestamp with millisecond precision, or `-`
struct Timestamp(Option<u64>);

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let time = self
            .0
            .and_then(|ms| i64::try_from(ms).ok())
            .and_then(DateTime::<Utc>::from_timestamp_millis);
        match time {
            Some(t) => write!(
                f,
                "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
                t.year(),
                t.month(),
                t.day(),
                t.hour(),
                t.minute(),
                t.second(),
                t.timestamp_subsec_millis(),
            ),
            None => f.write_char('-'),
        }
    }
}

/// Handler sending each event as a syslog datagram
pub struct SyslogHandler<D: DatagramIo, T: TimeProvider> {
    io: RefCell<D>,
    clock: T,
    host: String,
    port: u16,
    facility: Facility,
    colors: Colorizer,
    task_name: Option<TaskNameFn>,
}

impl<D: DatagramIo, T: TimeProvider> SyslogHandler<D, T> {
    /// Create a syslog handler sending to `config.host:config.port`
    pub fn new(config: &SyslogConfig, io: D, clock: T) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            io: RefCell::new(io),
            clock,
            host: config.host.clone(),
            port: config.port,
            facility: Facility::new(config.facility)?,
            colors: Colorizer::new(config.color),
            task_name: None,
        })
    }

    /// Fill the PROCID field from `task_name` (e.g. the RTOS task name)
    pub fn with_task_name(mut self, task_name: TaskNameFn) -> Self {
        self.task_name = Some(task_name);
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn facility(&self) -> Facility {
        self.facility
    }

    /// Borrow the underlying datagram transport
    ///
    /// Panics if called from inside a write to this handler.
    pub fn io(&self) -> Ref<'_, D> {
        self.io.borrow()
    }

    pub fn clock(&self) -> &T {
        &self.clock
    }
}

impl<D: DatagramIo, T: TimeProvider> LogHandler for SyslogHandler<D, T> {
    fn write(&self, event: &LogEvent<'_>) -> Result<(), LogError> {
        let stamp = SyslogStamp {
            uptime_ms: self.clock.now_ms(),
            unix_time_ms: self.clock.unix_time_ms(),
            task: self.task_name.and_then(|task_name| task_name()),
        };
        let mut datagram = MessageBuffer::<DATAGRAM_BUFFER_LEN>::new();
        encode(&mut datagram, self.facility, self.colors, &stamp, event);

        let mut io = self.io.try_borrow_mut().map_err(|_| LogError::Busy)?;
        io.send_to(&self.host, self.port, datagram.as_bytes())?;
        Ok(())
    }
}
