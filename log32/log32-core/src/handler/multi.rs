//! Fan-out to several handlers

use alloc::{rc::Rc, vec::Vec};
use core::cell::{Cell, RefCell};

use super::LogHandler;
use crate::error::LogError;
use crate::event::LogEvent;

/// Handler forwarding every event to a list of other handlers
///
/// Members receive the identical event in insertion order. A failing member
/// does not keep the event from the members after it. The list is append-only
/// and may contain other `MultiHandler`s.
///
/// ```
/// use std::rc::Rc;
///
/// use log32_core::time::ManualClock;
/// use log32_core::transport::{MemoryConsole, MemoryDatagram};
/// use log32_core::{LoggerTree, MultiHandler, SerialConfig, SerialHandler, SyslogConfig, SyslogHandler};
///
/// let clock = Rc::new(ManualClock::new(0));
/// let serial = Rc::new(SerialHandler::new(&SerialConfig::default(), MemoryConsole::new(), clock.clone()));
/// let syslog_config = SyslogConfig { host: "10.0.0.2".into(), ..SyslogConfig::default() };
/// let syslog = Rc::new(SyslogHandler::new(&syslog_config, MemoryDatagram::new(), clock).unwrap());
///
/// let multi = Rc::new(MultiHandler::new());
/// let tree = LoggerTree::new();
/// let root = tree.root("main", Some(multi.clone()));
///
/// // Members can be added after the handler has been attached
/// multi.add_handler(syslog.clone());
/// multi.add_handler(serial.clone());
///
/// root.info(format_args!("up"));
/// assert_eq!(syslog.io().sent().len(), 1);
/// assert_eq!(serial.io().lines().len(), 1);
/// ```
#[derive(Default)]
pub struct MultiHandler {
    handlers: RefCell<Vec<Rc<dyn LogHandler>>>,
    dispatching: Cell<bool>,
}

impl MultiHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a handler
    ///
    /// Panics if called by a member while this handler is dispatching.
    pub fn add_handler(&self, handler: Rc<dyn LogHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.borrow().is_empty()
    }
}

impl LogHandler for MultiHandler {
    fn write(&self, event: &LogEvent<'_>) -> Result<(), LogError> {
        // Reached again through our own members: a handler cycle
        if self.dispatching.replace(true) {
            return Err(LogError::Busy);
        }

        let handlers = self.handlers.borrow();
        let mut failed = 0;
        for handler in handlers.iter() {
            if handler.write(event).is_err() {
                failed += 1;
            }
        }
        let total = handlers.len();
        drop(handlers);
        self.dispatching.set(false);

        if failed > 0 {
            return Err(LogError::Partial { failed, total });
        }
        Ok(())
    }
}
