//! Configuration Types
//!
//! All configuration structures with sensible defaults.

use serde::{Deserialize, Serialize};

use crate::constants::scan::{DEFAULT_EXTENSIONS, DEFAULT_IGNORE_DIRS};
use crate::types::{Result, ViewerError};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Directory scan settings
    pub scan: ScanConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            scan: ScanConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    /// Returns `ViewerError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        self.scan.validate()
    }
}

// =============================================================================
// Scan Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File extensions (without the dot) treated as source files
    pub extensions: Vec<String>,

    /// Directory names pruned from the walk, matched by exact name
    pub ignore_dirs: Vec<String>,

    /// Glob patterns matched against file paths to drop individual files
    pub exclude: Vec<String>,

    /// Record callables defined inside other callables as children
    pub include_nested_functions: bool,

    /// Honor .gitignore files found during the walk
    pub respect_gitignore: bool,

    /// Follow symbolic links while walking
    pub follow_links: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
            exclude: Vec::new(),
            include_nested_functions: false,
            respect_gitignore: false,
            follow_links: false,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(ViewerError::Config(
                "scan.extensions must list at least one extension".to_string(),
            ));
        }

        if let Some(ext) = self
            .extensions
            .iter()
            .find(|e| e.trim().is_empty() || e.starts_with('.'))
        {
            return Err(ViewerError::Config(format!(
                "scan.extensions entries must be non-empty and have no leading dot, got '{}'",
                ext
            )));
        }

        if self.ignore_dirs.iter().any(|d| d.trim().is_empty()) {
            return Err(ViewerError::Config(
                "scan.ignore_dirs must not contain empty names".to_string(),
            ));
        }

        for pattern in &self.exclude {
            glob::Pattern::new(pattern).map_err(|e| {
                ViewerError::Config(format!("Invalid exclude pattern '{}': {}", pattern, e))
            })?;
        }

        Ok(())
    }

    pub fn with_nested_functions(mut self, enabled: bool) -> Self {
        self.include_nested_functions = enabled;
        self
    }

    pub fn with_ignore_dirs(mut self, dirs: Vec<String>) -> Self {
        self.ignore_dirs = dirs;
        self
    }
}
