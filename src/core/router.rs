//! Selector-filtered change event routing
//!
//! Handlers are registered against a [`Selector`] during setup. When a switch
//! changes, every handler whose selector matches the emitting widget runs, in
//! registration order. There is no "first match wins"; independent handlers
//! for the same widget all see the event.

use super::runtime::Context;
use super::widget::{NodeId, WidgetNode};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// Which widgets a handler listens to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    ById(String),
    ByClass(String),
    Any,
}

impl Selector {
    pub fn id(id: impl Into<String>) -> Self {
        Selector::ById(id.into())
    }

    pub fn class(class: impl Into<String>) -> Self {
        Selector::ByClass(class.into())
    }

    pub fn matches(&self, event: &ChangeEvent) -> bool {
        match self {
            Selector::ById(id) => event.source_id() == Some(id.as_str()),
            Selector::ByClass(class) => event.source_classes().contains(class),
            Selector::Any => true,
        }
    }
}

/// CSS-style: `#wifi`, `.setting`, `*`
impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::ById(id) => write!(f, "#{}", id),
            Selector::ByClass(class) => write!(f, ".{}", class),
            Selector::Any => f.write_str("*"),
        }
    }
}

/// A switch changed value
///
/// Built only by the runtime when a transition happens; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    source: NodeId,
    source_id: Option<String>,
    source_classes: BTreeSet<String>,
    new_value: bool,
}

impl ChangeEvent {
    pub(crate) fn from_node(source: NodeId, node: &WidgetNode, new_value: bool) -> Self {
        Self {
            source,
            source_id: node.id().map(str::to_string),
            source_classes: node.classes().clone(),
            new_value,
        }
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn source_id(&self) -> Option<&str> {
        self.source_id.as_deref()
    }

    pub fn source_classes(&self) -> &BTreeSet<String> {
        &self.source_classes
    }

    pub fn new_value(&self) -> bool {
        self.new_value
    }
}

/// Handler callback
///
/// `Rc` so the runtime can hold on to the matching handlers while it hands
/// itself to them mutably; that is what lets a handler toggle another switch
/// in the middle of a publish.
pub type Callback<S> = Rc<dyn Fn(&mut Context<'_, S>, &ChangeEvent)>;

/// One `register` call
pub struct HandlerRegistration<S> {
    selector: Selector,
    callback: Callback<S>,
}

impl<S> HandlerRegistration<S> {
    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

impl<S> fmt::Debug for HandlerRegistration<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistration")
            .field("selector", &self.selector)
            .finish_non_exhaustive()
    }
}

/// Flat registry of handlers for one runtime
pub struct EventRouter<S> {
    registrations: Vec<HandlerRegistration<S>>,
}

impl<S> EventRouter<S> {
    pub fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    pub fn register<F>(&mut self, selector: Selector, callback: F)
    where
        F: Fn(&mut Context<'_, S>, &ChangeEvent) + 'static,
    {
        tracing::debug!(%selector, "registered change handler");
        self.registrations.push(HandlerRegistration {
            selector,
            callback: Rc::new(callback),
        });
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn registrations(&self) -> &[HandlerRegistration<S>] {
        &self.registrations
    }

    /// Callbacks whose selector matches, in registration order
    pub fn matching(&self, event: &ChangeEvent) -> Vec<Callback<S>> {
        self.registrations
            .iter()
            .filter(|registration| registration.selector.matches(event))
            .map(|registration| Rc::clone(&registration.callback))
            .collect()
    }
}

impl<S> Default for EventRouter<S> {
    fn default() -> Self {
        Self::new()
    }
}
