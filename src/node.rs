use crate::utils::matches_normalized;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node in the tree arena. The root is always 0.
pub type NodeId = usize;

/// Why induction stopped and produced a leaf.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub enum LeafReason {
    /// Every row of the subset shares the label.
    Pure,
    /// All features were used on the path; majority label.
    NoFeatures,
    /// No feature improved on the gain sentinel; majority label.
    NoGain,
}

/// Outgoing edge of a decision node.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Branch {
    /// Attribute value as observed in the training data.
    pub value: String,
    pub child: NodeId,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub enum NodeKind {
    /// Internal node testing `attribute`, one branch per observed value.
    Decision {
        attribute: String,
        feature: usize,
        gain: f64,
        children: Vec<Branch>,
    },
    /// Terminal node holding the predicted class.
    Leaf { label: String, reason: LeafReason },
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Node {
    pub num: NodeId,
    pub depth: usize,
    /// Training rows that reached this node.
    pub n_rows: usize,
    pub kind: NodeKind,
}

impl Node {
    pub fn new_leaf(num: NodeId, depth: usize, n_rows: usize, label: &str, reason: LeafReason) -> Self {
        Node {
            num,
            depth,
            n_rows,
            kind: NodeKind::Leaf {
                label: label.to_string(),
                reason,
            },
        }
    }

    pub fn new_decision(
        num: NodeId,
        depth: usize,
        n_rows: usize,
        attribute: &str,
        feature: usize,
        gain: f64,
        children: Vec<Branch>,
    ) -> Self {
        Node {
            num,
            depth,
            n_rows,
            kind: NodeKind::Decision {
                attribute: attribute.to_string(),
                feature,
                gain,
                children,
            },
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Tested attribute, `None` for a leaf.
    pub fn attribute(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Decision { attribute, .. } => Some(attribute),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// Predicted class, `None` for a decision node.
    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf { label, .. } => Some(label),
            NodeKind::Decision { .. } => None,
        }
    }

    /// Branches in insertion order, empty for a leaf.
    pub fn children(&self) -> &[Branch] {
        match &self.kind {
            NodeKind::Decision { children, .. } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }

    /// Branch whose value equals `value` exactly.
    pub fn child(&self, value: &str) -> Option<&Branch> {
        self.children().iter().find(|b| b.value == value)
    }

    /// First branch whose value matches `value` once both are trimmed and lowercased.
    pub fn child_normalized(&self, value: &str) -> Option<&Branch> {
        self.children().iter().find(|b| matches_normalized(&b.value, value))
    }
}

impl fmt::Display for Node {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            NodeKind::Leaf { label, reason } => {
                write!(f, "{}:leaf={},rows={},reason={:?}", self.num, label, self.n_rows, reason)
            }
            NodeKind::Decision {
                attribute,
                gain,
                children,
                ..
            } => {
                let branches: Vec<String> = children.iter().map(|b| format!("{}->{}", b.value, b.child)).collect();
                write!(
                    f,
                    "{}:[{}] {},gain={:.4},rows={}",
                    self.num,
                    attribute,
                    branches.join(","),
                    gain,
                    self.n_rows
                )
            }
        }
    }
}
