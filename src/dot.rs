//! Graphviz export
//!
//! Renders a tree as DOT text, optionally with a replayed decision path
//! highlighted. Rendering the text to an image is left to Graphviz.
use crate::constants::{DOT_DECISION_FILL, DOT_DECISION_PATH_FILL, DOT_LEAF_FILL};
use crate::errors::Id3Error;
use crate::highlight::{preorder_ids, PathHighlight};
use crate::node::{Node, NodeKind};
use crate::tree::Tree;
use std::fs;
use std::path::Path;

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

fn node_text(node: &Node) -> &str {
    match &node.kind {
        NodeKind::Decision { attribute, .. } => attribute,
        NodeKind::Leaf { label, .. } => label,
    }
}

fn write_graph<F, E>(tree: &Tree, header: &str, node_fill: F, edge_color: E) -> String
where
    F: Fn(&Node) -> &'static str,
    E: Fn(usize, usize) -> Option<&'static str>,
{
    let mut out = String::new();
    out.push_str("digraph Tree {\n");
    out.push_str("rankdir=TB;\n");
    out.push_str(header);
    for id in preorder_ids(tree) {
        let node = &tree.nodes[id];
        out.push_str(&format!(
            "N{} [label=\"{}\", fillcolor=\"{}\"];\n",
            id,
            escape(node_text(node)),
            node_fill(node)
        ));
        for branch in node.children() {
            let style = match edge_color(id, branch.child) {
                Some(color) => format!("color=\"{}\"", color),
                None => "fontsize=14".to_string(),
            };
            out.push_str(&format!(
                "N{} -> N{} [label=\"{}\", {}];\n",
                id,
                branch.child,
                escape(&branch.value),
                style
            ));
        }
    }
    out.push_str("}\n");
    out
}

/// DOT source of the whole tree.
pub fn to_dot(tree: &Tree) -> String {
    write_graph(
        tree,
        "node [shape=box, style=filled, color=black, fontsize=16];\n",
        |n| if n.is_leaf() { DOT_LEAF_FILL } else { DOT_DECISION_FILL },
        |_, _| None,
    )
}

/// DOT source of the tree with the nodes and edges of `highlight` coloured,
/// every other node white and every other edge black.
pub fn to_dot_highlighted(tree: &Tree, highlight: &PathHighlight) -> String {
    write_graph(
        tree,
        "bgcolor=white;\nnode [shape=box, style=filled, color=black, fillcolor=white, fontsize=16];\n",
        |n| match (highlight.contains_node(n.num), n.is_leaf()) {
            (false, _) => "white",
            (true, true) => DOT_LEAF_FILL,
            (true, false) => DOT_DECISION_PATH_FILL,
        },
        |from, to| {
            if highlight.contains_edge(from, to) {
                Some("orange")
            } else {
                Some("black")
            }
        },
    )
}

/// Write DOT source to `path`.
pub fn write_dot<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), Id3Error> {
    let path = path.as_ref();
    fs::write(path, contents).map_err(|e| Id3Error::UnableToWrite(format!("{}: {}", path.display(), e)))
}
