//! TreeWalker - depth-first, size-aware traversal
//!
//! Each directory is listed, its children classified, sized, ordered and truncated to
//! the configured limit before the directory itself is handed to the visitor. The kept
//! children are then walked in order, so the visitor sees a strict pre-order stream.
//!
//! When symlinks are followed, every link on the path from the root to the current node
//! is held in a [`SymlinkChain`]. Meeting a link that is already on the chain ends that
//! branch with a single `LoopSymlink` node.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::classify::classify;
use super::config::WalkerConfig;
use super::node::{Node, NodeKind};
use super::path::{link_destination, normalize, physical_path};
use super::size_cache::SizeCache;

/// Receives every node reached by the walk, parents before their children.
///
/// `depth` is 0 for the root. A node's [`child_count`](Node::child_count) is final when
/// it is visited and equals the number of nodes that will follow at `depth + 1` before
/// the stream returns to `depth` or above.
pub trait NodeVisitor {
    fn visit_node(&mut self, node: &Node, depth: usize) -> io::Result<()>;

    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Links currently being followed, innermost first.
///
/// Lives on the stack of the recursive walk, so a link leaves the chain exactly when
/// the call that pushed it returns.
struct SymlinkChain<'a> {
    link: &'a Path,
    outer: Option<&'a SymlinkChain<'a>>,
}

impl SymlinkChain<'_> {
    fn contains(chain: Option<&SymlinkChain<'_>>, link: &Path) -> bool {
        let mut current = chain;
        while let Some(entry) = current {
            if entry.link == link {
                return true;
            }
            current = entry.outer;
        }
        false
    }
}

/// Depth-first walker driving classification, sizing and ordering.
pub struct TreeWalker {
    config: WalkerConfig,
    sizes: SizeCache,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        let sizes = SizeCache::new(config.max_depth);
        Self { config, sizes }
    }

    /// Entries currently memoized by the size cache.
    pub fn cached_sizes(&self) -> usize {
        self.sizes.len()
    }

    /// Walk the tree rooted at `root`, streaming nodes to `visitor`.
    ///
    /// Filesystem failures below the root are logged and only prune the affected branch.
    /// Errors returned by the visitor abort the walk.
    pub fn walk<V: NodeVisitor>(&mut self, root: &Path, visitor: &mut V) -> io::Result<()> {
        let root = Node::new(root, classify(root));
        debug!(root = %root.path().display(), kind = %root.kind(), "starting walk");
        self.walk_node(root, 0, None, visitor)?;
        visitor.finish()
    }

    fn walk_node<V: NodeVisitor>(
        &mut self,
        mut node: Node,
        depth: usize,
        chain: Option<&SymlinkChain<'_>>,
        visitor: &mut V,
    ) -> io::Result<()> {
        self.fill_size(&mut node, depth);

        if depth >= self.config.max_depth {
            visitor.visit_node(&node, depth)?;
            self.sizes.evict_subtree(node.path());
            return Ok(());
        }

        match node.kind() {
            NodeKind::Directory => self.walk_directory(node, depth, chain, visitor),
            NodeKind::Symlink => self.walk_symlink(node, depth, chain, visitor),
            _ => {
                visitor.visit_node(&node, depth)?;
                self.sizes.evict(node.path());
                Ok(())
            }
        }
    }

    fn walk_directory<V: NodeVisitor>(
        &mut self,
        mut node: Node,
        depth: usize,
        chain: Option<&SymlinkChain<'_>>,
        visitor: &mut V,
    ) -> io::Result<()> {
        let paths = match list_children(node.path()) {
            Ok(paths) => paths,
            Err(err) => {
                warn!(path = %node.path().display(), error = %err, "cannot list directory");
                visitor.visit_node(&node, depth)?;
                self.sizes.evict_subtree(node.path());
                return Ok(());
            }
        };

        let mut children: Vec<Node> = paths
            .into_iter()
            .map(|path| {
                let kind = classify(&path);
                let mut child = Node::new(path, kind);
                self.fill_size(&mut child, depth + 1);
                child
            })
            .collect();

        self.config.order.sort(&mut children);
        let kept = children.len().min(self.config.limit);
        for discarded in children.drain(kept..) {
            self.sizes.evict_subtree(discarded.path());
        }

        node.set_child_count(kept);
        visitor.visit_node(&node, depth)?;
        self.sizes.evict(node.path());

        for child in children {
            self.walk_node(child, depth + 1, chain, visitor)?;
        }
        Ok(())
    }

    fn walk_symlink<V: NodeVisitor>(
        &mut self,
        mut node: Node,
        depth: usize,
        chain: Option<&SymlinkChain<'_>>,
        visitor: &mut V,
    ) -> io::Result<()> {
        if !self.config.follow_symlinks {
            visitor.visit_node(&node, depth)?;
            self.sizes.evict_subtree(node.path());
            return Ok(());
        }

        let link = normalize(node.path());
        if SymlinkChain::contains(chain, &link) {
            debug!(path = %link.display(), "symlink loop detected");
            node.mark_loop();
            visitor.visit_node(&node, depth)?;
            self.sizes.evict_subtree(node.path());
            return Ok(());
        }

        let target = match fs::read_link(node.path())
            .and_then(|raw| physical_path(&link_destination(node.path(), &raw)))
        {
            Ok(target) => target,
            Err(err) => {
                warn!(path = %node.path().display(), error = %err, "cannot resolve symlink");
                visitor.visit_node(&node, depth)?;
                self.sizes.evict_subtree(node.path());
                return Ok(());
            }
        };

        node.set_child_count(1);
        visitor.visit_node(&node, depth)?;
        self.sizes.evict_subtree(node.path());

        let chain = SymlinkChain {
            link: &link,
            outer: chain,
        };
        let kind = classify(&target);
        self.walk_node(Node::new(target, kind), depth + 1, Some(&chain), visitor)
    }

    fn fill_size(&mut self, node: &mut Node, depth: usize) {
        if node.kind().has_size() && node.size().is_none() {
            self.sizes.set_current_depth(depth);
            node.fill_size(self.sizes.size(node.path()));
        }
    }
}

/// Entries of `dir` sorted by file name. The listing handle is closed on return.
fn list_children(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(err) => warn!(path = %dir.display(), error = %err, "skipping unreadable entry"),
        }
    }
    entries.sort_by_key(|e| e.file_name());
    Ok(entries.into_iter().map(|e| e.path()).collect())
}
