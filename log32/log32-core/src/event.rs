//! The formatted event handed to log handlers

use crate::level::LogLevel;

/// A log event that already passed level filtering and has been rendered.
///
/// Borrowed from the dispatching [`Logger`](crate::Logger) for the duration of a
/// single [`LogHandler::write`](crate::LogHandler::write) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEvent<'a> {
    /// Level of the log statement
    pub level: LogLevel,
    /// Effective device id of the emitting logger
    pub device_id: Option<&'a str>,
    /// Tag of the emitting logger
    pub tag: &'a str,
    /// Rendered (possibly truncated) message
    pub message: &'a str,
}

impl<'a> LogEvent<'a> {
    pub fn new(
        level: LogLevel,
        device_id: Option<&'a str>,
        tag: &'a str,
        message: &'a str,
    ) -> Self {
        Self {
            level,
            device_id,
            tag,
            message,
        }
    }

    /// Length of the rendered message in bytes
    pub fn message_len(&self) -> usize {
        self.message.len()
    }
}
