//! Config Command
//!
//! Manage repo-viewer configuration.
//!
//! Usage:
//!   repo-viewer config show [-f toml|json]
//!   repo-viewer config path
//!   repo-viewer config init [--force]

use std::path::Path;

use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::types::{Result, ViewerError};

/// Show the merged effective configuration
pub fn show(format: &str, config_path: Option<&Path>) -> Result<()> {
    let as_json = match format {
        "json" => true,
        "toml" => false,
        other => {
            return Err(ViewerError::Config(format!(
                "Invalid format '{}'. Valid values: toml, json",
                other
            )));
        }
    };

    let config = ConfigLoader::load_with(config_path)?;
    println!("{}", ConfigLoader::render(&config, as_json)?);
    Ok(())
}

/// Show configuration paths
pub fn path() -> Result<()> {
    ConfigLoader::show_path();
    Ok(())
}

/// Initialize project configuration in the current directory
pub fn init_project(force: bool) -> Result<()> {
    let root = std::env::current_dir()?;
    let (path, written) = ConfigLoader::init_project(&root, force)?;

    let output = Output::new();
    if written {
        output.success(&format!("Initialized project configuration: {}", path.display()));
    } else {
        output.info(&format!(
            "Project configuration already exists: {} (use --force to overwrite)",
            path.display()
        ));
    }
    Ok(())
}
