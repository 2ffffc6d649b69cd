//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Error Classes
//!
//! - **Request**: the whole scan is rejected before any traversal (`InvalidInput`)
//! - **Per-file**: one file is skipped, the scan continues (`FileRead`, `Syntax`)
//! - **Setup**: grammar or configuration could not be loaded (`Parser`, `Config`)

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    // -------------------------------------------------------------------------
    // Request Errors
    // -------------------------------------------------------------------------
    /// Root path is missing or is not a directory
    #[error("Invalid repository path: {}", path.display())]
    InvalidInput { path: PathBuf },

    // -------------------------------------------------------------------------
    // Per-file Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Syntax error in {path} at line {line}, column {column}")]
    Syntax {
        path: String,
        line: u32,
        column: u32,
    },

    // -------------------------------------------------------------------------
    // Setup Errors
    // -------------------------------------------------------------------------
    #[error("Parser error: {0}")]
    Parser(String),

    #[error("Config error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Ambient
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;

impl ViewerError {
    pub fn invalid_input(path: impl Into<PathBuf>) -> Self {
        Self::InvalidInput { path: path.into() }
    }

    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Errors that only affect a single file and must not abort a scan
    pub fn is_per_file(&self) -> bool {
        matches!(self, Self::FileRead { .. } | Self::Syntax { .. })
    }
}
