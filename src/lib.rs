//! jdu - Disk usage as a tree: du meets tree

pub mod error;
pub mod logging;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::JduError;
pub use logging::{LogFormat, LoggingConfig, init_logging};
pub use output::{
    JsonCollector, JsonNode, OutputConfig, StreamingFormatter, format_size, print_json,
};
pub use tree::{Node, NodeKind, NodeVisitor, SortOrder, TreeWalker, WalkerConfig, resolve_root};
