//! Declarative tree descriptions
//!
//! A [`Description`] is a plain value describing the shape of a widget tree.
//! [`build`] turns it into a [`WidgetTree`], rejecting duplicate ids.
//!
//! ```ignore
//! let ui = Description::vertical([
//!     labeled_switch("WiFi", "wifi", false),
//!     labeled_switch("Bluetooth", "bluetooth", false),
//! ]);
//! runtime.compose(&ui)?;
//! ```

use super::error::{ConfigurationError, Result};
use super::switch::SwitchState;
use super::widget::{Layout, NodeId, Payload, WidgetNode, WidgetTree};
use std::collections::HashSet;

/// Class carried by the row container built by [`labeled_switch`]
pub const LABELED_SWITCH_CLASS: &str = "labeled-switch";
/// Class carried by the label inside a [`labeled_switch`] row
pub const LABEL_CLASS: &str = "label";
/// Class carried by the switch inside a [`labeled_switch`] row
pub const SWITCH_CLASS: &str = "switch";

#[derive(Debug, Clone, PartialEq)]
enum Kind {
    Label(String),
    Switch(bool),
    Container(Layout),
}

/// Declarative description of a widget and its children
#[derive(Debug, Clone, PartialEq)]
pub struct Description {
    kind: Kind,
    id: Option<String>,
    classes: Vec<String>,
    focusable: Option<bool>,
    visible: bool,
    disabled: bool,
    children: Vec<Description>,
}

impl Description {
    fn new(kind: Kind) -> Self {
        Self {
            kind,
            id: None,
            classes: Vec::new(),
            focusable: None,
            visible: true,
            disabled: false,
            children: Vec::new(),
        }
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::new(Kind::Label(text.into()))
    }

    pub fn switch(id: impl Into<String>, value: bool) -> Self {
        Self::new(Kind::Switch(value)).id(id)
    }

    pub fn vertical<I: IntoIterator<Item = Description>>(children: I) -> Self {
        Self::new(Kind::Container(Layout::Vertical)).children(children)
    }

    pub fn horizontal<I: IntoIterator<Item = Description>>(children: I) -> Self {
        Self::new(Kind::Container(Layout::Horizontal)).children(children)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Override whether this widget joins the focus ring
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = Some(focusable);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn children<I: IntoIterator<Item = Description>>(mut self, children: I) -> Self {
        self.children.extend(children);
        self
    }

    fn payload(&self) -> Payload {
        match &self.kind {
            Kind::Label(text) => Payload::Label { text: text.clone() },
            Kind::Switch(value) => Payload::Switch {
                state: SwitchState::new(*value),
            },
            Kind::Container(layout) => Payload::Container { layout: *layout },
        }
    }
}

/// A label followed by a switch on one row
pub fn labeled_switch(label: impl Into<String>, id: impl Into<String>, value: bool) -> Description {
    Description::horizontal([
        Description::label(label).class(LABEL_CLASS),
        Description::switch(id, value).class(SWITCH_CLASS),
    ])
    .class(LABELED_SWITCH_CLASS)
}

/// Build a tree from a description
///
/// Nodes are inserted in depth-first, left-to-right order, so the same
/// description always yields the same `NodeId`s.
pub fn build(description: &Description) -> Result<WidgetTree> {
    let mut tree = WidgetTree::new();
    let mut seen = HashSet::new();
    insert(&mut tree, description, None, &mut seen)?;
    Ok(tree)
}

fn insert(
    tree: &mut WidgetTree,
    description: &Description,
    parent: Option<NodeId>,
    seen: &mut HashSet<String>,
) -> Result<()> {
    if let Some(id) = &description.id {
        if id.is_empty() {
            return Err(ConfigurationError::EmptyId);
        }
        if !seen.insert(id.clone()) {
            return Err(ConfigurationError::DuplicateId(id.clone()));
        }
    }

    let payload = description.payload();
    let focusable = description
        .focusable
        .unwrap_or_else(|| payload.focusable_by_default());

    let node = WidgetNode::new(payload)
        .with_id(description.id.clone())
        .with_classes(description.classes.iter().cloned())
        .with_flags(focusable, description.visible, description.disabled);
    let node_id = tree.insert(node, parent);

    for child in &description.children {
        insert(tree, child, Some(node_id), seen)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo() -> Description {
        Description::vertical([
            labeled_switch("WiFi", "wifi", false),
            labeled_switch("Bluetooth", "bluetooth", true),
        ])
    }

    #[test]
    fn test_labeled_switch_shape() {
        let tree = build(&labeled_switch("WiFi", "wifi", true)).unwrap();
        let root = tree.get(tree.root().unwrap()).unwrap();
        assert!(root.has_class(LABELED_SWITCH_CLASS));
        assert_eq!(root.children().len(), 2);

        let label = tree.get(root.children()[0]).unwrap();
        assert_eq!(
            label.payload(),
            &Payload::Label {
                text: "WiFi".to_string()
            }
        );
        assert!(label.has_class(LABEL_CLASS));

        let switch = tree.get(root.children()[1]).unwrap();
        assert_eq!(switch.id(), Some("wifi"));
        assert_eq!(switch.switch_value(), Some(true));
        assert!(switch.has_class(SWITCH_CLASS));
    }

    #[test]
    fn test_build_is_deterministic() {
        let a = build(&demo()).unwrap();
        let b = build(&demo()).unwrap();
        assert_eq!(a.len(), 7);
        assert_eq!(a.find("wifi"), b.find("wifi"));
        assert_eq!(a.find("bluetooth"), b.find("bluetooth"));
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let ui = Description::vertical([
            Description::switch("wifi", false),
            Description::switch("wifi", true),
        ]);
        assert_eq!(
            build(&ui).unwrap_err(),
            ConfigurationError::DuplicateId("wifi".to_string())
        );
    }

    #[test]
    fn test_empty_id_is_rejected() {
        let ui = Description::label("x").id("");
        assert_eq!(build(&ui).unwrap_err(), ConfigurationError::EmptyId);
    }

    #[test]
    fn test_flags_are_carried_into_nodes() {
        let ui = Description::vertical([
            Description::switch("a", false).disabled(),
            Description::label("hint").focusable(true).hidden(),
        ]);
        let tree = build(&ui).unwrap();
        let a = tree.get(tree.find("a").unwrap()).unwrap();
        assert!(a.is_disabled());
        assert!(a.is_focusable());

        let root = tree.get(tree.root().unwrap()).unwrap();
        let hint = tree.get(root.children()[1]).unwrap();
        assert!(hint.is_focusable());
        assert!(!hint.is_visible());
    }
}
