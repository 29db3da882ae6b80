//! Shared utility functions for output formatting

use crate::tree::{Node, NodeKind};

const UNITS: [&str; 7] = ["B", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Format a size in bytes using binary units, e.g. `0 B`, `1 KB`, `1.93 MB`.
///
/// At most two decimals are printed and trailing zeros are dropped.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < UNITS.len() && bytes / scale >= 1024 {
        scale *= 1024;
        unit += 1;
    }

    let value = format!("{:.2}", bytes as f64 / scale as f64);
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", value, UNITS[unit])
}

/// Tracks, per depth, how many siblings are still to come so that each line can be
/// given its connector and the continuation bars of its ancestors.
#[derive(Debug, Default)]
pub struct IndentState {
    remaining: Vec<usize>,
    under_symlink: Vec<bool>,
}

impl IndentState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indentation for `node` at `depth`. Must be called once per visit, in visit order.
    pub fn prefix(&mut self, node: &Node, depth: usize) -> String {
        self.remaining.truncate(depth);
        self.under_symlink.truncate(depth);

        let mut prefix = String::new();
        if depth > 0 {
            let parent = depth - 1;
            if let Some(left) = self.remaining.get_mut(parent) {
                *left = left.saturating_sub(1);
            }
            for level in 0..parent {
                let more = self.remaining.get(level).is_some_and(|&left| left > 0);
                prefix.push_str(if more { "│   " } else { "    " });
            }
            let last = self.remaining.get(parent).is_none_or(|&left| left == 0);
            let followed = self.under_symlink.get(parent).copied().unwrap_or(false);
            prefix.push(if last { '╰' } else { '├' });
            prefix.push(if followed { '▷' } else { '─' });
            prefix.push(' ');
        }

        self.remaining.resize(depth, 0);
        self.under_symlink.resize(depth, false);
        self.remaining.push(node.child_count());
        self.under_symlink.push(node.kind() == NodeKind::Symlink);
        prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1), "1 B");
        assert_eq!(format_size(1000), "1000 B");
        assert_eq!(format_size(1024), "1 KB");
        assert_eq!(format_size(2_024_000), "1.93 MB");
        assert_eq!(format_size(1_024_021), "1000.02 KB");
        assert_eq!(format_size(1_021_252_154_021), "951.12 GB");
        assert_eq!(format_size(125_000), "122.07 KB");
        assert_eq!(format_size(1_000_000_000), "953.67 MB");
        assert_eq!(format_size(u64::MAX), "16 EB");
    }

    fn node(kind: NodeKind, children: usize) -> Node {
        let mut node = Node::new("/x", kind);
        node.set_child_count(children);
        node
    }

    #[test]
    fn test_indent_for_nested_directories() {
        let mut state = IndentState::new();
        assert_eq!(state.prefix(&node(NodeKind::Directory, 2), 0), "");
        assert_eq!(state.prefix(&node(NodeKind::Directory, 1), 1), "├─ ");
        assert_eq!(state.prefix(&node(NodeKind::RegularFile, 0), 2), "│   ╰─ ");
        assert_eq!(state.prefix(&node(NodeKind::Directory, 1), 1), "╰─ ");
        assert_eq!(state.prefix(&node(NodeKind::Symlink, 1), 2), "    ╰─ ");
        assert_eq!(state.prefix(&node(NodeKind::RegularFile, 0), 3), "        ╰▷ ");
    }

    #[test]
    fn test_indent_under_followed_symlink_with_siblings() {
        let mut state = IndentState::new();
        state.prefix(&node(NodeKind::Symlink, 1), 0);
        assert_eq!(state.prefix(&node(NodeKind::Directory, 2), 1), "╰▷ ");
        assert_eq!(state.prefix(&node(NodeKind::RegularFile, 0), 2), "    ├─ ");
        assert_eq!(state.prefix(&node(NodeKind::RegularFile, 0), 2), "    ╰─ ");
    }
}
