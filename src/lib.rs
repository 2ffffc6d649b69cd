//! repo-viewer - Structural Outlines for Python Codebases
//!
//! Walks a directory tree, parses every Python file with tree-sitter and
//! reports its classes, methods and top-level functions with line ranges,
//! ready to be rendered by a visualization client.
//!
//! ## Quick Start
//!
//! ```ignore
//! use repo_viewer::{ScanConfig, visualize_repo};
//!
//! let report = visualize_repo("path/to/repo", &ScanConfig::default())?;
//! for module in &report.modules {
//!     println!("{}: {} classes", module.filename, module.classes.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: directory walking, outline extraction, scan orchestration
//! - [`config`]: layered configuration
//! - [`types`]: outline model and error types
//! - [`cli`]: command-line front end

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod types;

// Configuration
pub use config::{Config, ConfigLoader, ScanConfig};

// Error Types
pub use types::error::{Result, ViewerError};

// Outline Model
pub use types::outline::{
    Class, DiagnosticKind, FileDiagnostic, Function, Method, Module, ScanReport,
};

// Analyzer
pub use analyzer::{
    parser::{Parser, PythonParser},
    scan_directory,
    scanner::FileScanner,
    visualize_codebase, visualize_repo,
};
