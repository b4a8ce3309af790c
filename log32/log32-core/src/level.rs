//! Log severity levels

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity of a log event.
///
/// The well-known levels are spaced by 10 so that intermediate levels stay
/// representable and ordered. [`LogLevel::NOTSET`] is not a threshold: a logger
/// whose own level is unset inherits the level of its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogLevel(u8);

impl LogLevel {
    pub const NOTSET: LogLevel = LogLevel(0);
    pub const DEBUG: LogLevel = LogLevel(10);
    pub const INFO: LogLevel = LogLevel(20);
    pub const WARNING: LogLevel = LogLevel(30);
    pub const ERROR: LogLevel = LogLevel(40);
    pub const CRITICAL: LogLevel = LogLevel(50);

    /// Create a level from its raw numeric value
    pub const fn from_raw(raw: u8) -> Self {
        LogLevel(raw)
    }

    /// Raw numeric value (0, 10, 20, ...)
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// `false` only for [`LogLevel::NOTSET`]
    pub const fn is_set(self) -> bool {
        self.0 != LogLevel::NOTSET.0
    }

    /// Name of the severity bucket this level falls into
    pub fn name(self) -> &'static str {
        match self.0 / 10 {
            0 => "NOTSET",
            1 => "DEBUG",
            2 => "INFO",
            3 => "WARNING",
            4 => "ERROR",
            _ => "CRITICAL",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::NOTSET
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => LogLevel::ERROR,
            log::Level::Warn => LogLevel::WARNING,
            log::Level::Info => LogLevel::INFO,
            log::Level::Debug | log::Level::Trace => LogLevel::DEBUG,
        }
    }
}

/// Error returned when parsing a [`LogLevel`] from a string fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLevelError;

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected a level name (DEBUG, INFO, ...) or a number from 0 to 255")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseLevelError {}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(raw) = s.parse::<u8>() {
            return Ok(LogLevel(raw));
        }
        const NAMES: [(&str, LogLevel); 7] = [
            ("NOTSET", LogLevel::NOTSET),
            ("DEBUG", LogLevel::DEBUG),
            ("INFO", LogLevel::INFO),
            ("WARNING", LogLevel::WARNING),
            ("WARN", LogLevel::WARNING),
            ("ERROR", LogLevel::ERROR),
            ("CRITICAL", LogLevel::CRITICAL),
        ];
        NAMES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, level)| *level)
            .ok_or(ParseLevelError)
    }
}
