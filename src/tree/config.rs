//! Configuration types for the tree walker

use super::order::SortOrder;

pub const DEFAULT_MAX_DEPTH: usize = 8;
pub const DEFAULT_LIMIT: usize = 32;
/// Exclusive upper bound accepted for `max_depth`.
pub const MAX_DEPTH_BOUND: usize = 1024;

/// Configuration for tree walking behavior.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Nodes at this depth are emitted but not descended into (0 = root only)
    pub max_depth: usize,
    /// Maximum children kept per directory after ordering
    pub limit: usize,
    pub follow_symlinks: bool,
    pub order: SortOrder,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            limit: DEFAULT_LIMIT,
            follow_symlinks: false,
            order: SortOrder::Size,
        }
    }
}
