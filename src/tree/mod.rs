//! Directory tree walking and sizing
//!
//! - `classify`: path to [`NodeKind`] without following more than one link hop
//! - `size_cache`: depth-gated, explicitly evicted size memoization
//! - `order`: child ordering applied before truncation
//! - `walker`: `TreeWalker`, streaming nodes to a [`NodeVisitor`] in pre-order

mod classify;
mod config;
mod node;
mod order;
mod path;
mod size_cache;
mod walker;

pub use classify::classify;
pub use config::{DEFAULT_LIMIT, DEFAULT_MAX_DEPTH, MAX_DEPTH_BOUND, WalkerConfig};
pub use node::{Node, NodeKind};
pub use order::SortOrder;
pub use path::{link_destination, normalize, physical_path, resolve_root};
pub use size_cache::SizeCache;
pub use walker::{NodeVisitor, TreeWalker};
