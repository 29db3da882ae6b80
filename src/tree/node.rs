//! Visited filesystem entries

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// What a path turned out to be when it was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    RegularFile,
    Directory,
    Symlink,
    /// Symlink whose immediate target does not exist
    DanglingSymlink,
    /// Symlink whose target could not be read or stat'ed
    BrokenSymlink,
    /// Symlink already open on the current chain of followed links
    LoopSymlink,
    /// Devices, sockets, FIFOs and entries that could not be stat'ed
    Unknown,
}

const KIND_NAMES: [(NodeKind, &str); 7] = [
    (NodeKind::RegularFile, "regular"),
    (NodeKind::Directory, "directory"),
    (NodeKind::Symlink, "symlink"),
    (NodeKind::DanglingSymlink, "dangling symlink"),
    (NodeKind::BrokenSymlink, "broken symlink"),
    (NodeKind::LoopSymlink, "loop symlink"),
    (NodeKind::Unknown, "unknown file format"),
];

impl NodeKind {
    /// Display name used by the text renderer.
    pub fn name(self) -> &'static str {
        KIND_NAMES
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, name)| *name)
            .unwrap_or("unknown file format")
    }

    /// Whether a byte count is computed (and printed) for this kind.
    pub fn has_size(self) -> bool {
        !matches!(
            self,
            NodeKind::Unknown | NodeKind::BrokenSymlink | NodeKind::DanglingSymlink
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One classified, optionally sized entry handed to a [`NodeVisitor`].
///
/// [`NodeVisitor`]: super::NodeVisitor
#[derive(Debug, Clone)]
pub struct Node {
    path: PathBuf,
    kind: NodeKind,
    size: Option<u64>,
    child_count: usize,
}

impl Node {
    pub fn new(path: impl Into<PathBuf>, kind: NodeKind) -> Self {
        Self {
            path: path.into(),
            kind,
            size: None,
            child_count: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Byte count, `None` until sized and always `None` for kinds without a size.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Children kept after ordering and truncation (followed symlinks count their target).
    pub fn child_count(&self) -> usize {
        self.child_count
    }

    /// Last path component, or the whole path for roots like `/`.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Record the size. Only the first call has an effect.
    pub(crate) fn fill_size(&mut self, bytes: u64) {
        if self.size.is_none() && self.kind.has_size() {
            self.size = Some(bytes);
        }
    }

    pub(crate) fn set_child_count(&mut self, count: usize) {
        self.child_count = count;
    }

    /// The one permitted reclassification: a followed symlink seen twice on a chain.
    pub(crate) fn mark_loop(&mut self) {
        debug_assert_eq!(self.kind, NodeKind::Symlink);
        self.kind = NodeKind::LoopSymlink;
        self.child_count = 0;
    }
}
