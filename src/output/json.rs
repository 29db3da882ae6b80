//! JSON output formatting

use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;

use crate::tree::{Node, NodeKind, NodeVisitor};

/// One node of the kept tree, as serialized by `--json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonNode {
    pub name: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<JsonNode>,
}

impl From<&Node> for JsonNode {
    fn from(node: &Node) -> Self {
        Self {
            name: node.name(),
            path: node.path().to_path_buf(),
            kind: node.kind(),
            size: node.size(),
            children: Vec::new(),
        }
    }
}

/// Rebuilds the tree from the pre-order node stream.
///
/// The stack holds the open ancestors of the node visited last; visiting a node at depth
/// `d` closes everything at depth `d` or deeper.
#[derive(Debug, Default)]
pub struct JsonCollector {
    open: Vec<JsonNode>,
    root: Option<JsonNode>,
}

impl JsonCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The collected tree, or `None` if nothing was visited.
    pub fn into_tree(mut self) -> Option<JsonNode> {
        self.close_to(0);
        self.root
    }

    fn close_to(&mut self, depth: usize) {
        while self.open.len() > depth {
            let Some(done) = self.open.pop() else { break };
            match self.open.last_mut() {
                Some(parent) => parent.children.push(done),
                None => self.root = Some(done),
            }
        }
    }
}

impl NodeVisitor for JsonCollector {
    fn visit_node(&mut self, node: &Node, depth: usize) -> io::Result<()> {
        self.close_to(depth);
        self.open.push(JsonNode::from(node));
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.close_to(0);
        Ok(())
    }
}

/// Write `tree` as pretty-printed JSON followed by a newline.
pub fn print_json<W: Write>(mut out: W, tree: &JsonNode) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut out, tree).map_err(io::Error::other)?;
    writeln!(out)?;
    out.flush()
}
