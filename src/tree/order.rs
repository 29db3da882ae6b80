//! Child ordering policies
//!
//! The active order decides both which children survive truncation and the order
//! in which the survivors are visited.

use std::cmp::Ordering;

use super::node::Node;

/// How the children of a directory are ordered before the limit is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Largest first; unsized entries sort after every sized one.
    #[default]
    Size,
    /// File name ascending, byte-wise and case-sensitive.
    Name,
}

impl SortOrder {
    pub fn compare(self, a: &Node, b: &Node) -> Ordering {
        match self {
            SortOrder::Size => b.size().cmp(&a.size()),
            SortOrder::Name => a.path().file_name().cmp(&b.path().file_name()),
        }
    }

    /// Stable sort: ties keep their input order.
    pub fn sort(self, nodes: &mut [Node]) {
        nodes.sort_by(|a, b| self.compare(a, b));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;

    fn sized(name: &str, bytes: u64) -> Node {
        let mut node = Node::new(format!("/root/{}", name), NodeKind::RegularFile);
        node.fill_size(bytes);
        node
    }

    fn names(nodes: &[Node]) -> Vec<String> {
        nodes.iter().map(Node::name).collect()
    }

    #[test]
    fn test_size_order_is_descending() {
        let mut nodes = vec![sized("small", 1), sized("big", 100), sized("mid", 10)];
        SortOrder::Size.sort(&mut nodes);
        assert_eq!(names(&nodes), ["big", "mid", "small"]);
    }

    #[test]
    fn test_size_order_ties_keep_input_order() {
        let mut nodes = vec![sized("c", 5), sized("a", 5), sized("b", 7), sized("d", 5)];
        SortOrder::Size.sort(&mut nodes);
        assert_eq!(names(&nodes), ["b", "c", "a", "d"]);
    }

    #[test]
    fn test_size_order_puts_unsized_last() {
        let dangling = Node::new("/root/dangling", NodeKind::DanglingSymlink);
        let mut nodes = vec![dangling, sized("empty", 0)];
        SortOrder::Size.sort(&mut nodes);
        assert_eq!(names(&nodes), ["empty", "dangling"]);
    }

    #[test]
    fn test_name_order_is_deterministic() {
        for _ in 0..3 {
            let mut nodes = vec![sized("b", 1), sized("a", 2), sized("c", 3)];
            SortOrder::Name.sort(&mut nodes);
            assert_eq!(names(&nodes), ["a", "b", "c"]);
        }
    }

    #[test]
    fn test_name_order_uses_file_name_only_and_is_case_sensitive() {
        let mut nodes = vec![
            Node::new("/z/apple", NodeKind::RegularFile),
            Node::new("/a/banana", NodeKind::RegularFile),
            Node::new("/m/Cherry", NodeKind::RegularFile),
        ];
        SortOrder::Name.sort(&mut nodes);
        assert_eq!(names(&nodes), ["Cherry", "apple", "banana"]);
    }
}
