//! Global Constants
//!
//! Centralized constants for configuration and tuning.

/// Directory walker defaults
pub mod scan {
    /// Source file extensions picked up by the walker
    pub const DEFAULT_EXTENSIONS: &[&str] = &["py"];

    /// Directory names whose whole subtree is skipped
    pub const DEFAULT_IGNORE_DIRS: &[&str] =
        &[".venv", "venv", "node_modules", "__pycache__", ".git"];
}

/// Configuration file locations
pub mod config {
    /// Environment variable prefix (e.g. REPO_VIEWER_SCAN__EXTENSIONS)
    pub const ENV_PREFIX: &str = "REPO_VIEWER_";

    /// Separator between nested keys in environment variables
    pub const ENV_SEPARATOR: &str = "__";

    /// Directory name under the user config dir
    pub const APP_DIR: &str = "repo-viewer";

    /// Project-local config file
    pub const PROJECT_CONFIG_FILE: &str = ".repo-viewer.toml";
}
