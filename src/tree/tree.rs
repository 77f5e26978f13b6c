use crate::data::{FeatureSet, Row, Table};
use crate::entropy::{count_labels, split_by_feature, LabelCounts};
use crate::errors::Id3Error;
use crate::node::{Branch, LeafReason, Node, NodeId, NodeKind};
use crate::splitter::{select_best_split, Splitter};
use log::{debug, log_enabled, Level};
use rayon::ThreadPool;
use serde::{Deserialize, Serialize};
use std::cmp::max;
use std::fmt::{self, Display};

/// Decision tree induced with ID3.
///
/// Nodes are stored in an arena indexed by [`NodeId`]. Ids are handed out in
/// pre-order while the tree is grown, so the root is 0 and every parent has a
/// smaller id than its descendants.
/// Deserialized trees are checked with [`Tree::validate`].
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(try_from = "TreeParts")]
pub struct Tree {
    pub nodes: Vec<Node>,
    pub depth: usize,
    pub n_leaves: usize,
}

#[derive(Deserialize)]
struct TreeParts {
    nodes: Vec<Node>,
    depth: usize,
    n_leaves: usize,
}

impl TryFrom<TreeParts> for Tree {
    type Error = Id3Error;

    fn try_from(parts: TreeParts) -> Result<Self, Self::Error> {
        let tree = Tree {
            nodes: parts.nodes,
            depth: parts.depth,
            n_leaves: parts.n_leaves,
        };
        tree.validate()?;
        Ok(tree)
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            nodes: Vec::new(),
            depth: 0,
            n_leaves: 0,
        }
    }

    /// Grow the tree from every row of `table`, replacing any previous fit.
    ///
    /// * `table` - Training data, the last column is the label.
    /// * `features` - Column indices eligible for splitting. The label column
    ///   and indices past it are ignored.
    /// * `splitter` - Ranks candidate features at each node.
    /// * `pool` - Thread pool used when the splitter scores features in parallel.
    pub fn fit<S: Splitter + Sync>(&mut self, table: &Table, features: &FeatureSet, splitter: &S, pool: &ThreadPool) {
        self.nodes.clear();
        self.depth = 0;
        self.n_leaves = 0;
        // Only feature columns may be split on, never the label.
        let features = FeatureSet::new(features.iter().filter(|&f| f < table.n_features()).collect());
        let rows = table.row_refs();
        self.grow(table.headers(), &rows, &features, 0, splitter, pool);
    }

    /// Check that the arena is well formed: every node sits at its own id,
    /// decision nodes have at least one branch, and every branch points
    /// forward to an existing node. Walks over a valid tree always reach a
    /// leaf, without cycles or out of range ids.
    pub fn validate(&self) -> Result<(), Id3Error> {
        for (i, node) in self.nodes.iter().enumerate() {
            if node.num != i {
                return Err(Id3Error::InvalidModel(format!("node at position {} has id {}", i, node.num)));
            }
            if !node.is_leaf() && node.children().is_empty() {
                return Err(Id3Error::InvalidModel(format!("decision node {} has no branches", i)));
            }
            for branch in node.children() {
                if branch.child <= i || branch.child >= self.nodes.len() {
                    return Err(Id3Error::InvalidModel(format!(
                        "branch {} of node {} points to node {}, expected an id in {}..{}",
                        branch.value,
                        i,
                        branch.child,
                        i + 1,
                        self.nodes.len()
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build the subtree for `rows` and return the id of its root.
    fn grow<S: Splitter + Sync>(
        &mut self,
        headers: &[String],
        rows: &[&Row],
        features: &FeatureSet,
        depth: usize,
        splitter: &S,
        pool: &ThreadPool,
    ) -> NodeId {
        // Reserve the slot first so that ids follow pre-order.
        let num = self.nodes.len();
        self.nodes.push(Node::new_leaf(num, depth, rows.len(), "", LeafReason::Pure));
        self.depth = max(self.depth, depth);

        let counts = count_labels(rows);
        debug!(
            "Examining subset of {} rows at depth {}, class distribution: {}",
            rows.len(),
            depth,
            fmt_counts(&counts)
        );

        if let Some(label) = counts.single() {
            debug!("Pure subset, creating leaf node: {}", label);
            return self.set_leaf(num, label, LeafReason::Pure);
        }

        let majority = counts.majority().unwrap_or_default();
        if features.is_empty() {
            debug!("No remaining features, creating leaf node with majority class: {}", majority);
            return self.set_leaf(num, majority, LeafReason::NoFeatures);
        }

        let base_entropy = counts.entropy();
        debug!("Entropy(S) = {:.4}", base_entropy);

        let scores = splitter.feature_scores(rows, features, base_entropy, pool);
        if log_enabled!(Level::Debug) {
            for (f, gain) in features.iter().zip(&scores) {
                debug!(" - {}: gain = {:.4}", headers[f], gain);
            }
        }

        let split = match select_best_split(features, &scores) {
            Some(split) => split,
            None => {
                debug!("No feature improves entropy, creating leaf node with majority class: {}", majority);
                return self.set_leaf(num, majority, LeafReason::NoGain);
            }
        };

        let attribute = &headers[split.split_feature];
        debug!("Splitting on {} (gain = {:.4})", attribute, split.split_gain);

        let remaining = features.without(split.split_feature);
        debug_assert!(remaining.len() < features.len(), "feature set must shrink on every split");

        let mut children = Vec::new();
        for (value, subset) in split_by_feature(rows, split.split_feature) {
            debug!("Creating branch {} = {}", attribute, value);
            let child = self.grow(headers, &subset, &remaining, depth + 1, splitter, pool);
            children.push(Branch {
                value: value.to_string(),
                child,
            });
        }

        self.nodes[num] = Node::new_decision(
            num,
            depth,
            rows.len(),
            attribute,
            split.split_feature,
            split.split_gain,
            children,
        );
        num
    }

    fn set_leaf(&mut self, num: NodeId, label: &str, reason: LeafReason) -> NodeId {
        let node = &mut self.nodes[num];
        node.kind = NodeKind::Leaf {
            label: label.to_string(),
            reason,
        };
        self.n_leaves += 1;
        num
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    fn fmt_children(&self, f: &mut fmt::Formatter, id: NodeId, prefix: &str) -> fmt::Result {
        let children = self.nodes[id].children();
        for (i, branch) in children.iter().enumerate() {
            let (connector, extension) = if i + 1 == children.len() {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            let child = &self.nodes[branch.child];
            match &child.kind {
                NodeKind::Leaf { label, .. } => writeln!(f, "{}{}{} --> {}", prefix, connector, branch.value, label)?,
                NodeKind::Decision { attribute, .. } => {
                    writeln!(f, "{}{}{}", prefix, connector, branch.value)?;
                    writeln!(f, "{}{}└── {}", prefix, extension, attribute)?;
                    self.fmt_children(f, branch.child, &format!("{}{}    ", prefix, extension))?;
                }
            }
        }
        Ok(())
    }
}

fn fmt_counts(counts: &LabelCounts) -> String {
    counts
        .iter()
        .map(|(label, c)| format!("{}: {}", label, c))
        .collect::<Vec<String>>()
        .join(", ")
}

impl Display for Tree {
    // This trait requires `fmt` with this exact signature.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.root().map(|n| &n.kind) {
            None => Ok(()),
            Some(NodeKind::Leaf { label, .. }) => writeln!(f, "--> {}", label),
            Some(NodeKind::Decision { attribute, .. }) => {
                writeln!(f, "{}", attribute)?;
                self.fmt_children(f, 0, "")
            }
        }
    }
}
