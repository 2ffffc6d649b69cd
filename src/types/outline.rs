use serde::{Deserialize, Serialize};
use std::fmt;

/// A callable definition with its 1-based inclusive line span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub line_number: u32,
    pub end_line_number: u32,
    /// Callables defined inside this one; only filled when nested
    /// functions are requested.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<Function>,
}

impl Function {
    /// Creates a function; an end line before the start is clamped to the start.
    pub fn new(name: impl Into<String>, line_number: u32, end_line_number: u32) -> Self {
        Self {
            name: name.into(),
            line_number,
            end_line_number: end_line_number.max(line_number),
            functions: Vec::new(),
        }
    }
}

/// A callable defined directly inside a class body.
pub type Method = Function;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub name: String,
    pub line_number: u32,
    pub end_line_number: u32,
    pub methods: Vec<Method>,
}

impl Class {
    pub fn new(name: impl Into<String>, line_number: u32, end_line_number: u32) -> Self {
        Self {
            name: name.into(),
            line_number,
            end_line_number: end_line_number.max(line_number),
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }
}

/// Per-file outline.
///
/// `classes` are ordered by when each class body closed (inner classes come
/// before the class that contains them); `functions` are top-level only, in
/// source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub filename: String,
    pub classes: Vec<Class>,
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            classes: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty()
    }
}

// =============================================================================
// Scan Diagnostics
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// File could not be read
    Read,
    /// File is not valid Python
    Syntax,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Read => write!(f, "read"),
            DiagnosticKind::Syntax => write!(f, "syntax"),
        }
    }
}

/// Record of a file that was skipped during a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiagnostic {
    pub path: String,
    pub kind: DiagnosticKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Outcome of scanning one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub modules: Vec<Module>,
    pub diagnostics: Vec<FileDiagnostic>,
}

impl ScanReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when every candidate file failed and at least one was found
    pub fn all_failed(&self) -> bool {
        self.modules.is_empty() && !self.diagnostics.is_empty()
    }

    pub fn files_seen(&self) -> usize {
        self.modules.len() + self.diagnostics.len()
    }
}
