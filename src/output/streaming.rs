//! Streaming output formatter
//!
//! `StreamingFormatter` writes one line per node as the walker emits it, so memory use
//! does not grow with the size of the tree.

use std::io;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::{Node, NodeKind, NodeVisitor};

use super::config::OutputConfig;
use super::utils::{IndentState, format_size};

/// Text tree formatter: `<indent><name> [<size>] [<type>]` per node.
pub struct StreamingFormatter<W: WriteColor> {
    out: W,
    indent: IndentState,
}

impl StreamingFormatter<StandardStream> {
    /// Formatter writing to stdout, coloured when `config.use_color` is set.
    pub fn stdout(config: OutputConfig) -> Self {
        let choice = if config.use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        };
        Self::new(StandardStream::stdout(choice))
    }
}

impl<W: WriteColor> StreamingFormatter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            indent: IndentState::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn name_color(kind: NodeKind) -> Option<ColorSpec> {
    let mut spec = ColorSpec::new();
    match kind {
        NodeKind::Directory => spec.set_fg(Some(Color::Blue)).set_bold(true),
        NodeKind::Symlink => spec.set_fg(Some(Color::Cyan)),
        NodeKind::DanglingSymlink | NodeKind::BrokenSymlink => spec.set_fg(Some(Color::Red)),
        NodeKind::LoopSymlink => spec.set_fg(Some(Color::Yellow)),
        NodeKind::RegularFile | NodeKind::Unknown => return None,
    };
    Some(spec)
}

impl<W: WriteColor> NodeVisitor for StreamingFormatter<W> {
    fn visit_node(&mut self, node: &Node, depth: usize) -> io::Result<()> {
        let prefix = self.indent.prefix(node, depth);
        write!(self.out, "{}", prefix)?;

        match name_color(node.kind()) {
            Some(spec) => {
                self.out.set_color(&spec)?;
                write!(self.out, "{}", node.name())?;
                self.out.reset()?;
            }
            None => write!(self.out, "{}", node.name())?,
        }

        if let Some(size) = node.size() {
            write!(self.out, " [")?;
            self.out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(self.out, "{}", format_size(size))?;
            self.out.reset()?;
            write!(self.out, "]")?;
        }

        writeln!(self.out, " [{}]", node.kind())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::{Ansi, NoColor};

    fn node(path: &str, kind: NodeKind, size: Option<u64>, children: usize) -> Node {
        let mut node = Node::new(path, kind);
        if let Some(size) = size {
            node.fill_size(size);
        }
        node.set_child_count(children);
        node
    }

    fn render(nodes: &[(Node, usize)]) -> String {
        let mut formatter = StreamingFormatter::new(NoColor::new(Vec::new()));
        for (node, depth) in nodes {
            formatter.visit_node(node, *depth).unwrap();
        }
        formatter.finish().unwrap();
        String::from_utf8(formatter.into_inner().into_inner()).unwrap()
    }

    #[test]
    fn test_single_line_format() {
        let output = render(&[(node("/tmp/foo", NodeKind::RegularFile, Some(1024), 0), 0)]);
        assert_eq!(output, "foo [1 KB] [regular]\n");
    }

    #[test]
    fn test_unsized_node_has_no_size_bracket() {
        let output = render(&[(node("/tmp/gone", NodeKind::DanglingSymlink, None, 0), 0)]);
        assert_eq!(output, "gone [dangling symlink]\n");
    }

    #[test]
    fn test_followed_symlink_tree() {
        let output = render(&[
            (node("/r", NodeKind::Directory, Some(0), 2), 0),
            (node("/r/dir1", NodeKind::Directory, Some(0), 1), 1),
            (node("/r/dir1/link1", NodeKind::Symlink, Some(0), 1), 2),
            (node("/r/dir2", NodeKind::Directory, Some(0), 0), 3),
            (node("/r/file", NodeKind::RegularFile, Some(5), 0), 1),
        ]);
        let expected = "\
r [0 B] [directory]
├─ dir1 [0 B] [directory]
│   ╰─ link1 [0 B] [symlink]
│       ╰▷ dir2 [0 B] [directory]
╰─ file [5 B] [regular]
";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_colors_are_written_when_enabled() {
        let mut formatter = StreamingFormatter::new(Ansi::new(Vec::new()));
        formatter
            .visit_node(&node("/r", NodeKind::Directory, Some(3), 0), 0)
            .unwrap();
        let output = String::from_utf8(formatter.into_inner().into_inner()).unwrap();
        assert!(output.contains("\x1b["));
        assert!(output.contains("3 B"));
        assert!(output.ends_with("[directory]\n"));
    }
}
