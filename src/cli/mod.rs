pub mod commands;
pub mod ui;

pub use commands::scan::{OutputFormat, ScanOptions};
pub use ui::Output;
