//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/repo-viewer/config.toml)
//! 3. Project config (.repo-viewer.toml in the working directory)
//! 4. Environment variables (REPO_VIEWER_* prefix, `__` between sections)
//!
//! An explicit file passed with `--config` replaces steps 2 and 3.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::types::Config;
use crate::constants::config::{APP_DIR, ENV_PREFIX, ENV_SEPARATOR, PROJECT_CONFIG_FILE};
use crate::types::{Result, ViewerError};

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with full resolution chain:
    /// defaults → global → project → env vars
    pub fn load() -> Result<Config> {
        Self::load_with(None)
    }

    /// Load configuration, optionally from an explicit file instead of the
    /// global and project files. Environment variables still apply.
    pub fn load_with(explicit: Option<&Path>) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(ViewerError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                debug!("Loading config from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
            None => {
                if let Some(global_path) = Self::global_config_path()
                    && global_path.exists()
                {
                    debug!("Loading global config from: {}", global_path.display());
                    figment = figment.merge(Toml::file(&global_path));
                }

                let project_path = Self::project_config_path();
                if project_path.exists() {
                    debug!("Loading project config from: {}", project_path.display());
                    figment = figment.merge(Toml::file(&project_path));
                }
            }
        }

        // e.g. REPO_VIEWER_SCAN__INCLUDE_NESTED_FUNCTIONS -> scan.include_nested_functions
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR));

        let config: Config = figment
            .extract()
            .map_err(|e| ViewerError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| ViewerError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/repo-viewer/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join(APP_DIR))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get path to project config file
    pub fn project_config_path() -> PathBuf {
        PathBuf::from(PROJECT_CONFIG_FILE)
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path() {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path();
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Render the effective configuration as TOML or JSON
    pub fn render(config: &Config, as_json: bool) -> Result<String> {
        if as_json {
            Ok(serde_json::to_string_pretty(config)?)
        } else {
            toml::to_string_pretty(config).map_err(|e| ViewerError::Config(e.to_string()))
        }
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Write a default project config into `dir`.
    /// Returns the path and whether a file was written.
    pub fn init_project(dir: &Path, force: bool) -> Result<(PathBuf, bool)> {
        let config_path = dir.join(PROJECT_CONFIG_FILE);
        if config_path.exists() && !force {
            info!("Project config exists: {}", config_path.display());
            return Ok((config_path, false));
        }

        fs::write(&config_path, Self::default_project_config())?;
        info!("Created project config: {}", config_path.display());
        Ok((config_path, true))
    }

    /// Generate default project config content (TOML)
    fn default_project_config() -> String {
        r#"# repo-viewer Project Configuration
# Settings here override ~/.config/repo-viewer/config.toml.

version = "1.0"

[scan]
extensions = ["py"]
ignore_dirs = [".venv", "venv", "node_modules", "__pycache__", ".git"]
exclude = []

# Record functions defined inside other functions as children
include_nested_functions = false

respect_gitignore = false
follow_links = false
"#
        .to_string()
    }
}
