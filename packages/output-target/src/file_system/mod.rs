//! File System Abstraction
//!
//! The write layer a generation pass runs against: the on-disk implementation
//! used by the CLI and a capturing wrapper that keeps writes in memory.

pub mod capturing_fs;
pub mod node_js_file_system;
pub mod types;

pub use capturing_fs::*;
pub use node_js_file_system::*;
pub use types::*;
