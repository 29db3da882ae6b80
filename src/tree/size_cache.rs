//! Depth-gated memoizing size calculator
//!
//! A directory's size is the sum of its non-symlink children, computed depth-first.
//! Entries are only memoized while the depth being sized is within the walker's depth
//! limit; anything deeper is never visited on its own. The walker evicts each entry as
//! soon as it has been read or its subtree has been discarded, so occupancy follows the
//! kept frontier rather than the whole tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub struct SizeCache {
    // Ordered so that a directory's cached descendants form one contiguous range.
    entries: BTreeMap<PathBuf, u64>,
    depth_limit: usize,
    current_depth: usize,
}

impl SizeCache {
    pub fn new(depth_limit: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            depth_limit,
            current_depth: 0,
        }
    }

    /// Depth at which the next [`size`](Self::size) query is made.
    pub fn set_current_depth(&mut self, depth: usize) {
        self.current_depth = depth;
    }

    /// Size of `path` in bytes, following a symlink at `path` itself.
    ///
    /// Unreadable entries count as zero.
    pub fn size(&mut self, path: &Path) -> u64 {
        self.lookup(path, self.current_depth)
    }

    /// Drop the entry for `path`.
    pub fn evict(&mut self, path: &Path) {
        self.entries.remove(path);
    }

    /// Drop the entry for `path` and every cached entry below it.
    pub fn evict_subtree(&mut self, path: &Path) {
        let doomed: Vec<PathBuf> = self
            .entries
            .range::<Path, _>((std::ops::Bound::Included(path), std::ops::Bound::Unbounded))
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(path))
            .cloned()
            .collect();
        for key in doomed {
            self.entries.remove(&key);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    fn lookup(&mut self, path: &Path, depth: usize) -> u64 {
        if let Some(&bytes) = self.entries.get(path) {
            return bytes;
        }
        let bytes = self.compute(path, depth);
        if depth <= self.depth_limit {
            self.entries.insert(path.to_path_buf(), bytes);
        }
        bytes
    }

    fn compute(&mut self, path: &Path, depth: usize) -> u64 {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => self.directory_size(path, depth),
            Ok(meta) => meta.len(),
            Err(err) => {
                debug!(path = %path.display(), error = %err, "cannot stat, counting as empty");
                0
            }
        }
    }

    fn directory_size(&mut self, dir: &Path, depth: usize) -> u64 {
        let children = match list_sized_children(dir) {
            Ok(children) => children,
            Err(err) => {
                warn!(path = %dir.display(), error = %err, "cannot list directory while sizing");
                return 0;
            }
        };

        let child_depth = depth + 1;
        children
            .iter()
            .map(|child| {
                if child_depth <= self.depth_limit {
                    self.lookup(child, child_depth)
                } else {
                    self.compute(child, child_depth)
                }
            })
            .fold(0u64, u64::saturating_add)
    }
}

/// Children that contribute bytes to their parent: everything except symlinks.
fn list_sized_children(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                debug!(path = %dir.display(), error = %err, "skipping unreadable entry");
                continue;
            }
        };
        let is_symlink = entry.file_type().is_ok_and(|t| t.is_symlink());
        if !is_symlink {
            children.push(entry.path());
        }
    }
    Ok(children)
}
