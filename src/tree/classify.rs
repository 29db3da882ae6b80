//! Path classification
//!
//! Turns a path into a [`NodeKind`] from the live filesystem state. Nothing is sized here
//! and at most one symlink hop is inspected.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use super::node::NodeKind;
use super::path::link_destination;

/// Classify `path` without following it if it is a symlink.
pub fn classify(path: &Path) -> NodeKind {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "cannot stat entry");
            return NodeKind::Unknown;
        }
    };

    let file_type = meta.file_type();
    if file_type.is_symlink() {
        classify_symlink(path)
    } else if file_type.is_dir() {
        NodeKind::Directory
    } else if file_type.is_file() {
        NodeKind::RegularFile
    } else {
        NodeKind::Unknown
    }
}

/// A missing immediate target is dangling; any other failure to read the link or
/// stat its target is broken.
fn classify_symlink(link: &Path) -> NodeKind {
    let raw_target = match fs::read_link(link) {
        Ok(target) => target,
        Err(err) => {
            debug!(path = %link.display(), error = %err, "cannot read symlink");
            return NodeKind::BrokenSymlink;
        }
    };

    // The kernel resolves the joined path, including `..` after a symlinked component.
    let target = link_destination(link, &raw_target);
    match fs::symlink_metadata(&target) {
        Ok(_) => NodeKind::Symlink,
        Err(err) if err.kind() == io::ErrorKind::NotFound => NodeKind::DanglingSymlink,
        Err(err) => {
            debug!(
                path = %link.display(),
                target = %target.display(),
                error = %err,
                "cannot stat symlink target"
            );
            NodeKind::BrokenSymlink
        }
    }
}
