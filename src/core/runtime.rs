//! Composition runtime
//!
//! `Runtime` owns the widget tree, the focus ring, the handler registry and
//! the embedding application's state. It is the whole application-facing
//! surface: [`compose`](Runtime::compose), [`register`](Runtime::register),
//! [`dispatch_key`](Runtime::dispatch_key) and
//! [`render_if_dirty`](Runtime::render_if_dirty).
//!
//! # Cascade
//!
//! ```text
//! dispatch_key(Space)
//!    │
//!    ▼
//! FocusRing ── Activate(node) ──► SwitchState::toggle
//!                                      │
//!                                      ├─► mark_dirty(node)
//!                                      └─► publish(ChangeEvent)
//!                                             │
//!                                             ▼
//!                                   matching handlers (in order)
//!                                   may toggle / relabel via Context
//! ```
//!
//! Everything above runs to completion before `dispatch_key` returns. The
//! runtime is single-threaded (handlers are `Rc`), so a multi-threaded host
//! has to funnel input into the one thread that owns it.
//!
//! A handler that toggles the switch it is listening to, unconditionally,
//! recurses without bound. The runtime does not guard against that.

use super::compose::{self, Description};
use super::error::Result;
use super::focus::{Direction, FocusAction, FocusRing};
use super::key::{Handled, Key};
use super::render::DrawInstruction;
use super::router::{ChangeEvent, EventRouter, Selector};
use super::widget::{NodeId, WidgetNode, WidgetTree};
use std::fmt;

/// Retained widget tree plus focus, routing and application state
pub struct Runtime<S = ()> {
    tree: WidgetTree,
    focus: FocusRing,
    router: EventRouter<S>,
    state: S,
}

impl<S> fmt::Debug for Runtime<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("nodes", &self.tree.len())
            .field("focused", &self.focus.focused_id())
            .field("handlers", &self.router.len())
            .finish_non_exhaustive()
    }
}

impl<S> Runtime<S> {
    pub fn new(state: S) -> Self {
        Self {
            tree: WidgetTree::new(),
            focus: FocusRing::new(),
            router: EventRouter::new(),
            state,
        }
    }

    // =========================================================================
    // Application-facing API
    // =========================================================================

    /// Replace the tree with one built from `description`
    ///
    /// On error the previous tree is left untouched.
    pub fn compose(&mut self, description: &Description) -> Result<()> {
        let mut tree = compose::build(description)?;
        tree.mark_all_dirty();
        self.tree = tree;
        self.focus.rebuild(&self.tree);

        tracing::debug!(
            nodes = self.tree.len(),
            focusable = self.focus.len(),
            focused = self.focus.focused_id().unwrap_or("-"),
            "composed widget tree"
        );
        Ok(())
    }

    /// Add a change handler; handlers run in registration order
    pub fn register<F>(&mut self, selector: Selector, callback: F)
    where
        F: Fn(&mut Context<'_, S>, &ChangeEvent) + 'static,
    {
        self.router.register(selector, callback);
    }

    /// Feed one key press through the focus ring
    ///
    /// Returns `Handled::No` for keys the core does not bind, so the caller
    /// can apply its own bindings.
    pub fn dispatch_key(&mut self, key: Key) -> Handled {
        match self.focus.dispatch_key(key, &self.tree) {
            FocusAction::Moved { from, to } => {
                self.tree.mark_dirty(from);
                self.tree.mark_dirty(to);
                tracing::trace!(%key, focused = self.focus.focused_id().unwrap_or("-"), "focus moved");
                Handled::Yes
            }
            FocusAction::Activate(node) => {
                self.toggle_node(node);
                Handled::Yes
            }
            FocusAction::Consumed => Handled::Yes,
            FocusAction::Unhandled => Handled::No,
        }
    }

    /// Draw instructions for every visible node, if anything changed
    ///
    /// Clears all dirty flags. A second call without an intervening change
    /// returns an empty list.
    pub fn render_if_dirty(&mut self) -> Vec<DrawInstruction> {
        if !self.tree.is_dirty() {
            return Vec::new();
        }

        let focused = self.focus.focused();
        let mut instructions = Vec::with_capacity(self.tree.len());
        self.tree.walk_visible(|node_id, node, depth| {
            instructions.push(DrawInstruction::from_node(
                node_id,
                node,
                depth,
                focused == Some(node_id),
            ));
        });
        self.tree.clear_dirty();

        tracing::trace!(count = instructions.len(), "rendered widget tree");
        instructions
    }

    // =========================================================================
    // State transitions
    // =========================================================================

    /// Toggle the switch with id `id`; false if there is no such switch
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.tree.find(id) {
            Some(node) => self.toggle_node(node),
            None => false,
        }
    }

    /// Set the switch with id `id`; false if nothing changed
    pub fn set(&mut self, id: &str, value: bool) -> bool {
        match self.tree.find(id) {
            Some(node) => self.set_node(node, value),
            None => false,
        }
    }

    pub fn toggle_node(&mut self, node: NodeId) -> bool {
        let Some(state) = self.tree.get_mut(node).and_then(WidgetNode::switch_mut) else {
            return false;
        };
        let value = state.toggle();
        self.commit(node, value);
        true
    }

    pub fn set_node(&mut self, node: NodeId, value: bool) -> bool {
        let Some(state) = self.tree.get_mut(node).and_then(WidgetNode::switch_mut) else {
            return false;
        };
        match state.set(value) {
            Some(value) => {
                self.commit(node, value);
                true
            }
            None => false,
        }
    }

    /// Mark dirty, then publish before returning
    fn commit(&mut self, node: NodeId, value: bool) {
        self.tree.mark_dirty(node);

        let Some(widget) = self.tree.get(node) else {
            return;
        };
        let event = ChangeEvent::from_node(node, widget, value);
        tracing::debug!(
            source = event.source_id().unwrap_or("-"),
            value,
            "switch changed"
        );
        self.publish(&event);
    }

    /// Run every matching handler, in registration order
    ///
    /// Handlers may cause further transitions; those publish recursively and
    /// complete before this call returns.
    pub(crate) fn publish(&mut self, event: &ChangeEvent) {
        for callback in self.router.matching(event) {
            let mut cx = Context { runtime: self };
            callback(&mut cx, event);
        }
    }

    // =========================================================================
    // Presentation updates
    // =========================================================================

    /// Flag `node` and its ancestors for re-render
    pub fn mark_dirty(&mut self, node: NodeId) {
        self.tree.mark_dirty(node);
    }

    /// Change the text of the label with id `id`
    pub fn set_label(&mut self, id: &str, text: &str) -> bool {
        self.update_node(id, |node| node.set_text(text))
    }

    pub fn add_class(&mut self, id: &str, class: &str) -> bool {
        self.update_node(id, |node| node.add_class(class))
    }

    pub fn remove_class(&mut self, id: &str, class: &str) -> bool {
        self.update_node(id, |node| node.remove_class(class))
    }

    fn update_node<F>(&mut self, id: &str, f: F) -> bool
    where
        F: FnOnce(&mut WidgetNode) -> bool,
    {
        let Some(node) = self.tree.find(id) else {
            return false;
        };
        let changed = self.tree.get_mut(node).is_some_and(f);
        if changed {
            self.tree.mark_dirty(node);
        }
        changed
    }

    // =========================================================================
    // Focus
    // =========================================================================

    pub fn advance(&mut self, direction: Direction) {
        if let Some((from, to)) = self.focus.advance(direction) {
            self.tree.mark_dirty(from);
            self.tree.mark_dirty(to);
        }
    }

    /// Move focus to the widget with id `id`, if it is in the focus ring
    pub fn focus(&mut self, id: &str) -> bool {
        let Some(node) = self.tree.find(id) else {
            return false;
        };
        let previous = self.focus.focused();
        if !self.focus.focus(node) {
            return false;
        }
        if let Some(previous) = previous {
            self.tree.mark_dirty(previous);
        }
        self.tree.mark_dirty(node);
        true
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focus.focused()
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.focus.focused_id()
    }

    pub fn focus_ring(&self) -> &FocusRing {
        &self.focus
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.tree.find(id)
    }

    pub fn node(&self, id: &str) -> Option<&WidgetNode> {
        self.tree.find(id).and_then(|node| self.tree.get(node))
    }

    pub fn switch_value(&self, id: &str) -> Option<bool> {
        self.node(id).and_then(WidgetNode::switch_value)
    }

    pub fn is_dirty(&self) -> bool {
        self.tree.is_dirty()
    }

    pub fn handler_count(&self) -> usize {
        self.router.len()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }
}

impl<S: Default> Default for Runtime<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// What a change handler may touch
///
/// Handlers get the application state plus the subset of runtime operations
/// that keep the cascade consistent. Registering handlers or recomposing is
/// not available from inside a handler.
pub struct Context<'a, S> {
    runtime: &'a mut Runtime<S>,
}

impl<S> Context<'_, S> {
    pub fn state(&self) -> &S {
        &self.runtime.state
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.runtime.state
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        self.runtime.toggle(id)
    }

    pub fn set(&mut self, id: &str, value: bool) -> bool {
        self.runtime.set(id, value)
    }

    pub fn set_label(&mut self, id: &str, text: &str) -> bool {
        self.runtime.set_label(id, text)
    }

    pub fn add_class(&mut self, id: &str, class: &str) -> bool {
        self.runtime.add_class(id, class)
    }

    pub fn remove_class(&mut self, id: &str, class: &str) -> bool {
        self.runtime.remove_class(id, class)
    }

    pub fn switch_value(&self, id: &str) -> Option<bool> {
        self.runtime.switch_value(id)
    }

    pub fn focused_id(&self) -> Option<&str> {
        self.runtime.focused_id()
    }
}
