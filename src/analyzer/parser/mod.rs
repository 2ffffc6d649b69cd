//! Outline Parser Module
//!
//! Tree-sitter based extraction of classes, methods and functions.
//!
//! ```rust,ignore
//! use repo_viewer::analyzer::parser::{Parser, PythonParser};
//!
//! let parser = PythonParser::new()?;
//! let module = parser.parse("app.py", source_code)?;
//! ```

pub mod python;
pub mod traits;

pub use python::PythonParser;
pub use traits::{Parser, create_ts_parser, find_first_error, get_line_span, get_node_text};

use crate::config::ScanConfig;
use crate::types::Result;

/// Create the parser configured for a scan.
pub fn create_parser(config: &ScanConfig) -> Result<PythonParser> {
    Ok(PythonParser::new()?.with_nested_functions(config.include_nested_functions))
}
