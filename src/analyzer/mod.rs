//! Code Analyzer Module
//!
//! - Directory walking with ignored-directory pruning
//! - Python outline extraction (tree-sitter)
//! - Repository scan orchestration

pub mod outline;
pub mod parser;
pub mod scanner;

pub use outline::{scan_directory, visualize_codebase, visualize_repo};
