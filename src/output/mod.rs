//! Rendering of the node stream produced by the tree walker
//!
//! - `config` - Output configuration types
//! - `utils` - Indentation state and human-readable sizes
//! - `streaming` - Text tree written line by line as nodes arrive
//! - `json` - Tree rebuilt from the stream and printed as JSON

mod config;
mod json;
mod streaming;
mod utils;

pub use config::OutputConfig;
pub use json::{JsonCollector, JsonNode, print_json};
pub use streaming::StreamingFormatter;
pub use utils::{IndentState, format_size};
