//! `format_args!` style logging macros
//!
//! The first argument is the [`Logger`](crate::Logger) to log through:
//!
//! ```
//! use log32_core::LoggerTree;
//!
//! let tree = LoggerTree::new();
//! let root = tree.root("main", None);
//! log32_core::info!(root, "{} samples", 16);
//! log32_core::logf!(root, log32_core::LogLevel::from_raw(25), "between info and warning");
//! ```

/// Log through `$logger` at an arbitrary [`LogLevel`](crate::LogLevel)
#[macro_export]
macro_rules! logf {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::LogLevel::CRITICAL, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::LogLevel::ERROR, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::LogLevel::WARNING, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::LogLevel::INFO, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::logf!($logger, $crate::LogLevel::DEBUG, $($arg)+)
    };
}
