//! Lexical path helpers

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::JduError;

/// Remove `.` components and fold `..` into the preceding component.
///
/// Purely lexical: the filesystem is never consulted, so symlinks in the path stay intact.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(out.components().next_back(), Some(Component::Normal(_)))
                    && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// The path stored in `link`, joined to the directory containing the link.
///
/// Nothing is folded: `..` after a symlinked component must be resolved by the kernel,
/// so the result is only ever handed to filesystem calls as is.
pub fn link_destination(link: &Path, target: &Path) -> PathBuf {
    match link.parent() {
        Some(dir) => dir.join(target),
        None => target.to_path_buf(),
    }
}

/// Resolve every directory component of `path` on the filesystem.
///
/// The final component is kept as written so a symlink there stays a symlink. A path
/// ending in `..` or naming the filesystem root is canonicalized whole.
pub fn physical_path(path: &Path) -> io::Result<PathBuf> {
    match (path.parent(), path.file_name()) {
        (Some(dir), Some(name)) => {
            let dir = if dir.as_os_str().is_empty() {
                Path::new(".")
            } else {
                dir
            };
            Ok(fs::canonicalize(dir)?.join(name))
        }
        _ => fs::canonicalize(path),
    }
}

/// Validate the root of a walk and return its absolute form.
///
/// `.` components are dropped. A path going through `..` has its directories resolved on
/// the filesystem. The root must exist and be a regular file, a directory or a symlink
/// (of any kind).
pub fn resolve_root(path: &Path) -> Result<PathBuf, JduError> {
    let not_found = |path: &Path| JduError::RootNotFound {
        path: path.to_path_buf(),
    };
    let root = std::path::absolute(path).map_err(|_| not_found(path))?;
    let root = if root.components().any(|c| c == Component::ParentDir) {
        physical_path(&root).map_err(|_| not_found(root.as_path()))?
    } else {
        normalize(&root)
    };

    let meta = fs::symlink_metadata(&root).map_err(|_| not_found(root.as_path()))?;
    let file_type = meta.file_type();
    if file_type.is_file() || file_type.is_dir() || file_type.is_symlink() {
        Ok(root)
    } else {
        Err(JduError::UnsupportedRoot { path: root })
    }
}
