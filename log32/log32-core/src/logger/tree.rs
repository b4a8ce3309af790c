//! Arena holding every logger node
//!
//! Nodes are only ever appended, and a child is created from an existing
//! node, so a parent's index is always lower than its child's. There is no
//! way to reparent a node: the hierarchy is acyclic by construction.

use alloc::{rc::Rc, vec::Vec};
use core::cell::{Cell, RefCell};

use serde::{Deserialize, Serialize};

use super::Logger;
use crate::handler::LogHandler;
use crate::level::LogLevel;

/// Index of a logger node inside its [`LoggerTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoggerId(usize);

impl LoggerId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// How a chain of loggers without any level set filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnsetLevelPolicy {
    /// Log every event
    #[default]
    AllowAll,
    /// Drop every event
    SuppressAll,
}

pub(crate) struct LoggerNode {
    pub(crate) tag: &'static str,
    pub(crate) level: LogLevel,
    pub(crate) device_id: Option<&'static str>,
    pub(crate) parent: Option<LoggerId>,
    pub(crate) handler: Option<Rc<dyn LogHandler>>,
}

/// What a passing log call needs from the tree
pub(crate) struct DispatchTarget {
    pub(crate) handler: Rc<dyn LogHandler>,
    pub(crate) tag: &'static str,
    pub(crate) device_id: Option<&'static str>,
}

/// Owner of a forest of loggers
///
/// Loggers are handed out as [`Logger`] handles borrowing the tree. The tree
/// is not `Sync`: concurrent use from several tasks must be serialized by the
/// caller, e.g. by giving each task its own tree.
#[derive(Default)]
pub struct LoggerTree {
    nodes: RefCell<Vec<LoggerNode>>,
    unset_policy: Cell<UnsetLevelPolicy>,
}

impl LoggerTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unset_policy(unset_policy: UnsetLevelPolicy) -> Self {
        let tree = Self::new();
        tree.unset_policy.set(unset_policy);
        tree
    }

    /// Create a root logger (no parent, level unset, no device id)
    ///
    /// A root without a handler is valid; it drops everything.
    pub fn root(&self, tag: &'static str, handler: Option<Rc<dyn LogHandler>>) -> Logger<'_> {
        let id = self.push(LoggerNode {
            tag,
            level: LogLevel::NOTSET,
            device_id: None,
            parent: None,
            handler,
        });
        Logger::new(self, id)
    }

    /// Handle to an existing node
    pub fn get(&self, id: LoggerId) -> Option<Logger<'_>> {
        (id.0 < self.len()).then(|| Logger::new(self, id))
    }

    /// Number of loggers in the tree
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    pub fn unset_policy(&self) -> UnsetLevelPolicy {
        self.unset_policy.get()
    }

    pub fn set_unset_policy(&self, unset_policy: UnsetLevelPolicy) {
        self.unset_policy.set(unset_policy);
    }

    pub(crate) fn add_child(&self, tag: &'static str, parent: LoggerId) -> LoggerId {
        let handler = self.with_node(parent, |node| node.handler.clone());
        self.push(LoggerNode {
            tag,
            level: LogLevel::NOTSET,
            device_id: None,
            parent: Some(parent),
            handler,
        })
    }

    fn push(&self, node: LoggerNode) -> LoggerId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(node);
        LoggerId(nodes.len() - 1)
    }

    pub(crate) fn with_node<R>(&self, id: LoggerId, f: impl FnOnce(&LoggerNode) -> R) -> R {
        f(&self.nodes.borrow()[id.0])
    }

    pub(crate) fn with_node_mut<R>(&self, id: LoggerId, f: impl FnOnce(&mut LoggerNode) -> R) -> R {
        f(&mut self.nodes.borrow_mut()[id.0])
    }

    /// First non-`None` value of `field` from `id` up to its root
    fn inherited<R>(&self, id: LoggerId, field: impl Fn(&LoggerNode) -> Option<R>) -> Option<R> {
        let nodes = self.nodes.borrow();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = &nodes[id.0];
            if let Some(value) = field(node) {
                return Some(value);
            }
            current = node.parent;
        }
        None
    }

    pub(crate) fn effective_level(&self, id: LoggerId) -> LogLevel {
        self.inherited(id, |node| node.level.is_set().then_some(node.level))
            .unwrap_or(LogLevel::NOTSET)
    }

    pub(crate) fn effective_device_id(&self, id: LoggerId) -> Option<&'static str> {
        self.inherited(id, |node| node.device_id)
    }

    pub(crate) fn is_enabled_for(&self, id: LoggerId, level: LogLevel) -> bool {
        let threshold = self.effective_level(id);
        if !threshold.is_set() {
            return self.unset_policy.get() == UnsetLevelPolicy::AllowAll;
        }
        level >= threshold
    }

    /// Everything a log call at `level` needs, or `None` if it is filtered
    pub(crate) fn dispatch_target(&self, id: LoggerId, level: LogLevel) -> Option<DispatchTarget> {
        let (handler, tag) = self.with_node(id, |node| (node.handler.clone(), node.tag));
        let handler = handler?;
        if !self.is_enabled_for(id, level) {
            return None;
        }
        Some(DispatchTarget {
            handler,
            tag,
            device_id: self.effective_device_id(id),
        })
    }
}
