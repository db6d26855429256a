//! Focus ring and keyboard traversal
//!
//! The ring holds `NodeId`s of focusable widgets in depth-first order. It
//! never owns nodes; after the tree is recomposed call [`FocusRing::rebuild`]
//! so the ids point into the new tree.

use super::key::Key;
use super::widget::{NodeId, Payload, WidgetTree};

/// Traversal direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Tab / Right
    Forward,
    /// Shift-Tab / Left
    Backward,
}

/// What a key press asks the runtime to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusAction {
    /// Focus moved (`from == to` on a one-entry ring)
    Moved { from: NodeId, to: NodeId },
    /// Toggle the focused switch
    Activate(NodeId),
    /// Navigation or activation key with nothing to act on
    Consumed,
    /// Not a key the core handles
    Unhandled,
}

#[derive(Debug, Clone)]
struct Entry {
    node: NodeId,
    id: Option<String>,
}

/// Cyclic focus order over the focusable widgets of one tree
///
/// Invariant: `index < entries.len()` whenever `entries` is non-empty.
#[derive(Debug, Clone, Default)]
pub struct FocusRing {
    entries: Vec<Entry>,
    index: usize,
}

impl FocusRing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nodes in traversal order
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|entry| entry.node)
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.entries.get(self.index).map(|entry| entry.node)
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.entries
            .get(self.index)
            .and_then(|entry| entry.id.as_deref())
    }

    /// Recollect focusable nodes from `tree`
    ///
    /// Keeps the previous target when a node with the same id still exists,
    /// otherwise focus falls back to the first entry.
    pub fn rebuild(&mut self, tree: &WidgetTree) {
        let previous = self.focused_id().map(str::to_string);

        let mut entries = Vec::new();
        tree.walk_visible(|node_id, node, _| {
            if node.accepts_focus() {
                entries.push(Entry {
                    node: node_id,
                    id: node.id().map(str::to_string),
                });
            }
        });

        self.index = previous
            .and_then(|prev| {
                entries
                    .iter()
                    .position(|entry| entry.id.as_deref() == Some(prev.as_str()))
            })
            .unwrap_or(0);
        self.entries = entries;

        tracing::trace!(
            len = self.entries.len(),
            index = self.index,
            "rebuilt focus ring"
        );
    }

    /// Move focus one step, wrapping at both ends
    ///
    /// Returns `(from, to)`, or `None` on an empty ring.
    pub fn advance(&mut self, direction: Direction) -> Option<(NodeId, NodeId)> {
        let len = self.entries.len();
        if len == 0 {
            return None;
        }

        let from = self.entries[self.index].node;
        self.index = match direction {
            Direction::Forward => (self.index + 1) % len,
            Direction::Backward => (self.index + len - 1) % len,
        };
        Some((from, self.entries[self.index].node))
    }

    /// Focus a specific node; false if it is not in the ring
    pub fn focus(&mut self, node: NodeId) -> bool {
        match self.entries.iter().position(|entry| entry.node == node) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }

    /// Interpret a key against the ring
    ///
    /// Navigation keys move focus here; activation is returned for the
    /// runtime to carry out since it owns the switch states.
    pub fn dispatch_key(&mut self, key: Key, tree: &WidgetTree) -> FocusAction {
        let direction = match key {
            Key::Tab | Key::Right => Some(Direction::Forward),
            Key::ShiftTab | Key::Left => Some(Direction::Backward),
            _ => None,
        };

        if let Some(direction) = direction {
            return match self.advance(direction) {
                Some((from, to)) => FocusAction::Moved { from, to },
                None => FocusAction::Consumed,
            };
        }

        if key.is_activation() {
            let target = self.focused().filter(|&node| {
                matches!(
                    tree.get(node).map(|n| n.payload()),
                    Some(Payload::Switch { .. })
                )
            });
            return match target {
                Some(node) => FocusAction::Activate(node),
                None => FocusAction::Consumed,
            };
        }

        FocusAction::Unhandled
    }
}
