//! ANSI colors keyed by severity bucket

use crate::level::LogLevel;

/// SGR reset sequence, terminates colorized output
pub const RESET: &str = "\x1b[0m";

/// [`RESET`] followed by a line break
const RESET_LINE: &str = "\x1b[0m\n";

/// Indexed by severity bucket: unset, debug, info, warning, error, critical
const COLOR_CODES: [&str; 6] = [
    RESET,
    "\x1b[36m", // cyan
    "\x1b[32m", // green
    "\x1b[33m", // yellow
    "\x1b[31m", // red
    "\x1b[35m", // magenta
];

/// Severity bucket of `level` (`level / 10`), clamped to `max_index`
pub fn severity_bucket(level: LogLevel, max_index: usize) -> usize {
    usize::from(level.raw() / 10).min(max_index)
}

/// Color start/end sequences for handlers with an optional `color` setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Colorizer {
    enabled: bool,
}

impl Colorizer {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sequence to emit before a line of the given level, empty when disabled
    pub fn start(&self, level: LogLevel) -> &'static str {
        if !self.enabled {
            return "";
        }
        COLOR_CODES[severity_bucket(level, COLOR_CODES.len() - 1)]
    }

    /// Sequence to emit after a colorized line, empty when disabled
    pub fn end(&self) -> &'static str {
        if self.enabled { RESET } else { "" }
    }

    /// [`end`](Self::end) plus a line break
    pub fn end_line(&self) -> &'static str {
        if self.enabled { RESET_LINE } else { "\n" }
    }
}
