//! Highlight
//!
//! Projects a recorded [`DecisionPath`] back onto a tree, marking the nodes
//! and edges that were traversed. The replay only looks at the tree structure
//! and the path strings, so it also works for paths recorded elsewhere.
use crate::node::NodeId;
use crate::tree::{DecisionPath, Tree};
use crate::utils::split_path_entry;
use hashbrown::HashSet;

/// Nodes and edges lying on a replayed path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathHighlight {
    /// Visited nodes, root first.
    pub nodes: Vec<NodeId>,
    /// Traversed `(parent, child)` edges, in order.
    pub edges: Vec<(NodeId, NodeId)>,
    node_set: HashSet<NodeId>,
}

impl PathHighlight {
    fn visit(&mut self, from: Option<NodeId>, to: NodeId) {
        if let Some(from) = from {
            self.edges.push((from, to));
        }
        self.nodes.push(to);
        self.node_set.insert(to);
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_set.contains(&id)
    }

    pub fn contains_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.edges.contains(&(from, to))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Node ids in pre-order: a node, then each branch subtree in branch order.
pub fn preorder_ids(tree: &Tree) -> Vec<NodeId> {
    let mut ids = Vec::with_capacity(tree.len());
    if tree.is_empty() {
        return ids;
    }
    let mut stack: Vec<NodeId> = vec![0];
    while let Some(id) = stack.pop() {
        ids.push(id);
        stack.extend(tree.nodes[id].children().iter().rev().map(|b| b.child));
    }
    ids
}

/// Replay `path` from the root of `tree`.
///
/// The root is always marked. Replay stops at the first entry that is not of
/// the form `attribute=value`, names another attribute than the current node
/// tests, or has no branch with exactly that value, and once a leaf is reached.
pub fn highlight_path(tree: &Tree, path: &DecisionPath) -> PathHighlight {
    let mut highlight = PathHighlight::default();
    let mut current = match tree.root() {
        Some(root) => root,
        None => return highlight,
    };
    highlight.visit(None, current.num);

    for entry in path.iter() {
        let attribute = match current.attribute() {
            Some(a) => a,
            None => break,
        };
        let branch = match split_path_entry(entry) {
            Some((attr, value)) if attr == attribute => match current.child(value) {
                Some(b) => b,
                None => break,
            },
            _ => break,
        };
        highlight.visit(Some(current.num), branch.child);
        current = &tree.nodes[branch.child];
    }
    highlight
}
