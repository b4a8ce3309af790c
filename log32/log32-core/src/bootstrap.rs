//! Startup wiring of the root logger
//!
//! The root logger lives for the whole program. [`init`] leaks a
//! [`LoggerTree`] once and hands out its root as a `Logger<'static>`, which is
//! then passed to every module so it can derive its own child logger. This has
//! to happen before any module creates its logger.
//!
//! [`from_config`] does the same from a [`LoggingConfig`], building the serial
//! and syslog handlers it describes. Strings taken from the config (tags,
//! device id) are leaked as well; this is meant to run once at startup.

use alloc::{
    boxed::Box,
    format,
    rc::Rc,
    string::{String, ToString},
    vec::Vec,
};

use crate::config::LoggingConfig;
use crate::error::ConfigError;
use crate::handler::{LogHandler, MultiHandler, SerialHandler, SyslogHandler};
use crate::logger::{Logger, LoggerTree};
use crate::time::TimeProvider;
use crate::transport::{ConsoleIo, DatagramIo};

/// Root logger plus the module loggers created from the config
#[derive(Debug)]
pub struct LoggingSetup<'t> {
    pub root: Logger<'t>,
    pub modules: Vec<Logger<'t>>,
}

impl<'t> LoggingSetup<'t> {
    /// Module logger with the given tag, if the config declared one
    pub fn module(&self, tag: &str) -> Option<Logger<'t>> {
        self.modules.iter().copied().find(|logger| logger.tag() == tag)
    }
}

/// Leak a fresh tree and create its root logger
pub fn init(tag: &'static str, handler: Option<Rc<dyn LogHandler>>) -> Logger<'static> {
    let tree: &'static LoggerTree = Box::leak(Box::new(LoggerTree::new()));
    tree.root(tag, handler)
}

/// Leak a fresh tree and set it up as described by `config`
///
/// `console` is required when serial output is configured and `datagram` when
/// syslog output is; a transport for an output that is not configured is
/// dropped. With both outputs the root gets a [`MultiHandler`] that writes to
/// syslog first, then to the console.
pub fn from_config<C, D, T>(
    config: &LoggingConfig,
    console: Option<C>,
    datagram: Option<D>,
    clock: T,
) -> Result<LoggingSetup<'static>, ConfigError>
where
    C: ConsoleIo + 'static,
    D: DatagramIo + 'static,
    T: TimeProvider + Clone + 'static,
{
    config.validate()?;
    let handler = build_handler(config, console, datagram, clock)?;
    let tree: &'static LoggerTree =
        Box::leak(Box::new(LoggerTree::with_unset_policy(config.unset_policy)));
    Ok(configure(tree, config, handler))
}

/// Set up a root logger on an existing tree
///
/// Same as [`from_config`] without leaking the tree.
pub fn build<'t, C, D, T>(
    tree: &'t LoggerTree,
    config: &LoggingConfig,
    console: Option<C>,
    datagram: Option<D>,
    clock: T,
) -> Result<LoggingSetup<'t>, ConfigError>
where
    C: ConsoleIo + 'static,
    D: DatagramIo + 'static,
    T: TimeProvider + Clone + 'static,
{
    config.validate()?;
    let handler = build_handler(config, console, datagram, clock)?;
    tree.set_unset_policy(config.unset_policy);
    Ok(configure(tree, config, handler))
}

/// Device id in the `e32-<mac>` form used by ESP32 boards
pub fn device_id_from_mac(mac: u64) -> String {
    format!("e32-{mac:06x}")
}

fn build_handler<C, D, T>(
    config: &LoggingConfig,
    console: Option<C>,
    datagram: Option<D>,
    clock: T,
) -> Result<Rc<dyn LogHandler>, ConfigError>
where
    C: ConsoleIo + 'static,
    D: DatagramIo + 'static,
    T: TimeProvider + Clone + 'static,
{
    let syslog: Option<Rc<dyn LogHandler>> = match &config.syslog {
        Some(syslog_config) => {
            let io = datagram.ok_or(ConfigError::MissingDatagram)?;
            Some(Rc::new(SyslogHandler::new(syslog_config, io, clock.clone())?))
        }
        None => None,
    };
    let serial: Option<Rc<dyn LogHandler>> = match &config.serial {
        Some(serial_config) => {
            let io = console.ok_or(ConfigError::MissingConsole)?;
            Some(Rc::new(SerialHandler::new(serial_config, io, clock)))
        }
        None => None,
    };

    match (syslog, serial) {
        (Some(syslog), Some(serial)) => {
            let multi = MultiHandler::new();
            multi.add_handler(syslog);
            multi.add_handler(serial);
            Ok(Rc::new(multi))
        }
        (Some(handler), None) | (None, Some(handler)) => Ok(handler),
        (None, None) => Err(ConfigError::NoSink),
    }
}

fn configure<'t>(
    tree: &'t LoggerTree,
    config: &LoggingConfig,
    handler: Rc<dyn LogHandler>,
) -> LoggingSetup<'t> {
    let root = tree.root(leak(&config.tag), Some(handler));
    root.set_level(config.level);
    root.set_device_id(config.device_id.as_deref().map(leak));

    let modules = config
        .modules
        .iter()
        .map(|module| {
            let logger = root.child(leak(&module.tag));
            logger.set_level(module.level);
            logger
        })
        .collect();

    log::debug!(
        "log32: root '{}' at level {} with {} module logger(s)",
        config.tag,
        config.level,
        config.modules.len()
    );
    LoggingSetup { root, modules }
}

fn leak(s: &str) -> &'static str {
    s.to_string().leak()
}
