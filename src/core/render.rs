//! Draw instructions handed to the terminal backend
//!
//! One instruction per visible node, in depth-first order. Geometry and
//! colors are the backend's business; an instruction only says what the
//! node is and what state it is in.

use super::widget::{Layout, NodeId, Payload, WidgetNode};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DrawKind {
    Label { text: String },
    Switch { value: bool },
    Container { layout: Layout },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawInstruction {
    pub node: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    pub depth: usize,
    pub focused: bool,
    pub disabled: bool,
    pub kind: DrawKind,
}

impl DrawInstruction {
    pub(crate) fn from_node(node_id: NodeId, node: &WidgetNode, depth: usize, focused: bool) -> Self {
        let kind = match node.payload() {
            Payload::Label { text } => DrawKind::Label { text: text.clone() },
            Payload::Switch { state } => DrawKind::Switch {
                value: state.value(),
            },
            Payload::Container { layout } => DrawKind::Container { layout: *layout },
        };

        Self {
            node: node_id,
            id: node.id().map(str::to_string),
            classes: node.classes().iter().cloned().collect(),
            depth,
            focused,
            disabled: node.is_disabled(),
            kind,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
