//! Configuration Management
//!
//! Hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/repo-viewer/config.toml)
//! 3. Project config (.repo-viewer.toml)
//! 4. Environment variables (REPO_VIEWER_*)
//! 5. CLI arguments (highest priority)

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::*;
