//! Retained widget tree
//!
//! Nodes live in an arena owned by [`WidgetTree`]. Children are referenced by
//! [`NodeId`] and every node keeps a link to its parent, so a dirty mark can
//! climb to the root without a search.
//!
//! Invariant: if a node is dirty, so is every ancestor. `mark_dirty` always
//! climbs and `clear_dirty` clears the whole tree at once.

use super::switch::SwitchState;
use serde::Serialize;
use std::collections::BTreeSet;

/// Index of a node inside its tree's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Child arrangement for containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Vertical,
    Horizontal,
}

/// What a node is
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Label { text: String },
    Switch { state: SwitchState },
    Container { layout: Layout },
}

impl Payload {
    /// Whether nodes of this kind take focus unless told otherwise
    pub(crate) fn focusable_by_default(&self) -> bool {
        matches!(self, Payload::Switch { .. })
    }
}

/// A single widget in the tree
#[derive(Debug, Clone)]
pub struct WidgetNode {
    id: Option<String>,
    classes: BTreeSet<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    payload: Payload,
    focusable: bool,
    visible: bool,
    disabled: bool,
    dirty: bool,
}

impl WidgetNode {
    pub(crate) fn new(payload: Payload) -> Self {
        let focusable = payload.focusable_by_default();
        Self {
            id: None,
            classes: BTreeSet::new(),
            children: Vec::new(),
            parent: None,
            payload,
            focusable,
            visible: true,
            disabled: false,
            dirty: true,
        }
    }

    pub(crate) fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    pub(crate) fn with_classes<I: IntoIterator<Item = String>>(mut self, classes: I) -> Self {
        self.classes.extend(classes);
        self
    }

    pub(crate) fn with_flags(mut self, focusable: bool, visible: bool, disabled: bool) -> Self {
        self.focusable = focusable;
        self.visible = visible;
        self.disabled = disabled;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn classes(&self) -> &BTreeSet<String> {
        &self.classes
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Current value if this is a switch
    pub fn switch_value(&self) -> Option<bool> {
        match &self.payload {
            Payload::Switch { state } => Some(state.value()),
            _ => None,
        }
    }

    /// Whether focus traversal may land here
    pub(crate) fn accepts_focus(&self) -> bool {
        self.focusable && !self.disabled
    }

    pub(crate) fn switch_mut(&mut self) -> Option<&mut SwitchState> {
        match &mut self.payload {
            Payload::Switch { state } => Some(state),
            _ => None,
        }
    }

    /// Replace label text; false if not a label or text unchanged
    pub(crate) fn set_text(&mut self, text: &str) -> bool {
        match &mut self.payload {
            Payload::Label { text: current } if current != text => {
                *current = text.to_string();
                true
            }
            _ => false,
        }
    }

    pub(crate) fn add_class(&mut self, class: &str) -> bool {
        self.classes.insert(class.to_string())
    }

    pub(crate) fn remove_class(&mut self, class: &str) -> bool {
        self.classes.remove(class)
    }
}

/// Arena-backed widget tree
#[derive(Debug, Clone, Default)]
pub struct WidgetTree {
    nodes: Vec<WidgetNode>,
    root: Option<NodeId>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node under `parent` (or as the root when `parent` is None)
    pub(crate) fn insert(&mut self, mut node: WidgetNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = parent;
        self.nodes.push(node);

        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.root = Some(id),
        }
        id
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, node: NodeId) -> Option<&WidgetNode> {
        self.nodes.get(node.0)
    }

    pub(crate) fn get_mut(&mut self, node: NodeId) -> Option<&mut WidgetNode> {
        self.nodes.get_mut(node.0)
    }

    /// Look up a node by its string id
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.id() == Some(id))
            .map(NodeId)
    }

    /// Flag `node` and all its ancestors for re-render
    pub fn mark_dirty(&mut self, node: NodeId) {
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(node) = self.nodes.get_mut(id.0) else {
                break;
            };
            node.dirty = true;
            current = node.parent;
        }
    }

    pub(crate) fn mark_all_dirty(&mut self) {
        for node in &mut self.nodes {
            node.dirty = true;
        }
    }

    pub(crate) fn clear_dirty(&mut self) {
        for node in &mut self.nodes {
            node.dirty = false;
        }
    }

    /// Whether anything in the tree needs re-rendering
    pub fn is_dirty(&self) -> bool {
        self.root
            .and_then(|root| self.get(root))
            .is_some_and(WidgetNode::is_dirty)
    }

    /// Depth-first, left-to-right walk over every node with its depth
    pub fn walk<F>(&self, mut f: F)
    where
        F: FnMut(NodeId, &WidgetNode, usize),
    {
        self.walk_filtered(|_| true, &mut f);
    }

    /// Same as [`walk`](Self::walk) but skips hidden nodes and their subtrees
    pub fn walk_visible<F>(&self, mut f: F)
    where
        F: FnMut(NodeId, &WidgetNode, usize),
    {
        self.walk_filtered(WidgetNode::is_visible, &mut f);
    }

    fn walk_filtered<P, F>(&self, keep: P, f: &mut F)
    where
        P: Fn(&WidgetNode) -> bool,
        F: FnMut(NodeId, &WidgetNode, usize),
    {
        let Some(root) = self.root else {
            return;
        };

        let mut stack = vec![(root, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id.0];
            if !keep(node) {
                continue;
            }
            f(id, node, depth);
            // Reverse so the leftmost child is popped first
            for &child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> (WidgetTree, NodeId, NodeId, NodeId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert(
            WidgetNode::new(Payload::Container {
                layout: Layout::Vertical,
            }),
            None,
        );
        let label = tree.insert(
            WidgetNode::new(Payload::Label {
                text: "WiFi".to_string(),
            }),
            Some(root),
        );
        let switch = tree.insert(
            WidgetNode::new(Payload::Switch {
                state: SwitchState::new(false),
            })
            .with_id(Some("wifi".to_string())),
            Some(root),
        );
        (tree, root, label, switch)
    }

    #[test]
    fn test_mark_dirty_climbs_to_root() {
        let (mut tree, root, label, switch) = sample_tree();
        tree.clear_dirty();
        assert!(!tree.is_dirty());

        tree.mark_dirty(switch);
        assert!(tree.get(switch).unwrap().is_dirty());
        assert!(tree.get(root).unwrap().is_dirty());
        assert!(!tree.get(label).unwrap().is_dirty());
        assert!(tree.is_dirty());
    }

    #[test]
    fn test_walk_is_depth_first_left_to_right() {
        let (tree, root, label, switch) = sample_tree();
        let mut order = Vec::new();
        tree.walk(|id, _, depth| order.push((id, depth)));
        assert_eq!(order, vec![(root, 0), (label, 1), (switch, 1)]);
    }

    #[test]
    fn test_walk_visible_skips_hidden_subtree() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(
            WidgetNode::new(Payload::Container {
                layout: Layout::Vertical,
            }),
            None,
        );
        let hidden = tree.insert(
            WidgetNode::new(Payload::Container {
                layout: Layout::Horizontal,
            })
            .with_flags(false, false, false),
            Some(root),
        );
        tree.insert(
            WidgetNode::new(Payload::Switch {
                state: SwitchState::default(),
            }),
            Some(hidden),
        );

        let mut seen = Vec::new();
        tree.walk_visible(|id, _, _| seen.push(id));
        assert_eq!(seen, vec![root]);
    }

    #[test]
    fn test_find_by_id() {
        let (tree, _, _, switch) = sample_tree();
        assert_eq!(tree.find("wifi"), Some(switch));
        assert_eq!(tree.find("bluetooth"), None);
    }

    #[test]
    fn test_label_text_change_reports_only_real_changes() {
        let (mut tree, _, label, switch) = sample_tree();
        let node = tree.get_mut(label).unwrap();
        assert!(!node.set_text("WiFi"));
        assert!(node.set_text("Wireless"));
        assert!(!tree.get_mut(switch).unwrap().set_text("nope"));
    }

    #[test]
    fn test_switches_are_focusable_by_default() {
        let (tree, root, label, switch) = sample_tree();
        assert!(tree.get(switch).unwrap().is_focusable());
        assert!(!tree.get(label).unwrap().is_focusable());
        assert!(!tree.get(root).unwrap().is_focusable());
    }
}
