//! Loggers and the hierarchy they form
//!
//! Every module creates its own [`Logger`], derived from the root logger or
//! one of its descendants. A logger whose own level is [`LogLevel::NOTSET`]
//! uses the level of the nearest ancestor that has one; the device id is
//! inherited the same way. Both are resolved on every log call, so changing an
//! ancestor takes effect immediately for the whole subtree.
//!
//! A child starts out with its parent's handler. Changing a handler later
//! affects only that one logger.

mod macros;
mod tree;

pub use tree::{LoggerId, LoggerTree, UnsetLevelPolicy};

use alloc::rc::Rc;
use core::fmt;

use crate::buffer::{MESSAGE_BUFFER_LEN, MessageBuffer};
use crate::event::LogEvent;
use crate::handler::LogHandler;
use crate::level::LogLevel;

/// Handle to a logger node in a [`LoggerTree`]
#[derive(Clone, Copy)]
pub struct Logger<'t> {
    tree: &'t LoggerTree,
    id: LoggerId,
}

impl<'t> Logger<'t> {
    pub(crate) fn new(tree: &'t LoggerTree, id: LoggerId) -> Self {
        Self { tree, id }
    }

    /// Derive a child logger
    ///
    /// The child's level and device id are unset (inherited), and it starts
    /// with a snapshot of this logger's current handler.
    ///
    /// Nodes are never reclaimed: create module loggers once at startup and
    /// keep the handle. Deriving a child per short-lived object grows the tree
    /// by one node each time.
    pub fn child(&self, tag: &'static str) -> Logger<'t> {
        Logger::new(self.tree, self.tree.add_child(tag, self.id))
    }

    pub fn id(&self) -> LoggerId {
        self.id
    }

    pub fn tree(&self) -> &'t LoggerTree {
        self.tree
    }

    /// Parent logger, `None` for a root
    pub fn parent(&self) -> Option<Logger<'t>> {
        self.tree
            .with_node(self.id, |node| node.parent)
            .map(|parent| Logger::new(self.tree, parent))
    }

    pub fn tag(&self) -> &'static str {
        self.tree.with_node(self.id, |node| node.tag)
    }

    pub fn set_tag(&self, tag: &'static str) {
        self.tree.with_node_mut(self.id, |node| node.tag = tag);
    }

    /// Own level, [`LogLevel::NOTSET`] if inherited
    pub fn level(&self) -> LogLevel {
        self.tree.with_node(self.id, |node| node.level)
    }

    /// Set the own level; events below the effective level are discarded
    pub fn set_level(&self, level: LogLevel) {
        self.tree.with_node_mut(self.id, |node| node.level = level);
    }

    /// Own device id, `None` if inherited
    pub fn device_id(&self) -> Option<&'static str> {
        self.tree.with_node(self.id, |node| node.device_id)
    }

    pub fn set_device_id(&self, device_id: Option<&'static str>) {
        self.tree.with_node_mut(self.id, |node| node.device_id = device_id);
    }

    pub fn handler(&self) -> Option<Rc<dyn LogHandler>> {
        self.tree.with_node(self.id, |node| node.handler.clone())
    }

    /// Replace the handler of this logger only; children keep theirs
    pub fn set_handler(&self, handler: Option<Rc<dyn LogHandler>>) {
        self.tree.with_node_mut(self.id, |node| node.handler = handler);
    }

    /// Own level if set, otherwise the nearest set ancestor level, otherwise
    /// [`LogLevel::NOTSET`]
    pub fn effective_level(&self) -> LogLevel {
        self.tree.effective_level(self.id)
    }

    /// Own device id if set, otherwise the nearest ancestor's
    pub fn effective_device_id(&self) -> Option<&'static str> {
        self.tree.effective_device_id(self.id)
    }

    /// Whether an event at `level` passes this logger's effective level
    ///
    /// Use it to skip computing expensive arguments; the log methods perform
    /// the same check themselves.
    pub fn is_enabled_for(&self, level: LogLevel) -> bool {
        self.tree.is_enabled_for(self.id, level)
    }

    /// Log a message at `level`
    ///
    /// Nothing is rendered when the event is filtered or no handler is
    /// attached. Messages longer than [`MESSAGE_BUFFER_LEN`] bytes are
    /// truncated. Handler failures are dropped here.
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        let Some(target) = self.tree.dispatch_target(self.id, level) else {
            return;
        };

        let message = MessageBuffer::<MESSAGE_BUFFER_LEN>::format(args);
        let event = LogEvent::new(level, target.device_id, target.tag, message.as_str());
        if let Err(err) = target.handler.write(&event) {
            log::debug!("log32: event from '{}' not delivered: {}", target.tag, err);
        }
    }

    pub fn critical(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::CRITICAL, args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::ERROR, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::WARNING, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::INFO, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(LogLevel::DEBUG, args);
    }
}

impl fmt::Debug for Logger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("id", &self.id)
            .field("tag", &self.tag())
            .field("level", &self.level())
            .field("device_id", &self.device_id())
            .finish()
    }
}
