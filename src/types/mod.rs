pub mod error;
pub mod outline;

pub use error::{Result, ViewerError};
pub use outline::{
    Class, DiagnosticKind, FileDiagnostic, Function, Method, Module, ScanReport,
};
