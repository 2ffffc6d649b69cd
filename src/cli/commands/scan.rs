//! Scan Command
//!
//! Outlines a repository and prints the result.
//!
//! Usage:
//!   repo-viewer scan <PATH> [-f json|text] [--report] [--nested] [--ignore-dir NAME]...

use std::fmt::Write as _;
use std::path::PathBuf;
use std::str::FromStr;

use crate::analyzer::visualize_repo;
use crate::cli::ui::Output;
use crate::config::{Config, ConfigLoader};
use crate::types::{Function, Result, ScanReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            _ => Err(format!("Invalid format '{}'. Valid values: json, text", s)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub path: PathBuf,
    pub format: OutputFormat,
    /// Emit `{modules, diagnostics}` instead of the bare module list
    pub report: bool,
    pub pretty: bool,
    pub nested: bool,
    pub ignore_dirs: Vec<String>,
    pub config_path: Option<PathBuf>,
}

pub fn run(options: ScanOptions) -> Result<()> {
    let loaded = ConfigLoader::load_with(options.config_path.as_deref())?;
    let config = apply_overrides(loaded, &options);
    let report = visualize_repo(&options.path, &config.scan)?;

    let rendered = match options.format {
        OutputFormat::Json => render_json(&report, options.report, options.pretty)?,
        OutputFormat::Text => render_text(&report),
    };
    println!("{}", rendered);

    let output = Output::new();
    if report.all_failed() {
        output.warning(&format!(
            "All {} source files failed to parse",
            report.diagnostics.len()
        ));
    } else if !report.diagnostics.is_empty() {
        output.warning(&format!(
            "Skipped {} of {} files (run with --verbose for details)",
            report.diagnostics.len(),
            report.files_seen()
        ));
    } else if report.modules.is_empty() {
        output.info("No matching source files found");
    }

    Ok(())
}

/// Layer command-line flags over loaded configuration
pub fn apply_overrides(mut config: Config, options: &ScanOptions) -> Config {
    if options.nested {
        config.scan.include_nested_functions = true;
    }
    for dir in &options.ignore_dirs {
        if !config.scan.ignore_dirs.contains(dir) {
            config.scan.ignore_dirs.push(dir.clone());
        }
    }
    config
}

pub fn render_json(report: &ScanReport, full_report: bool, pretty: bool) -> Result<String> {
    let rendered = match (full_report, pretty) {
        (true, true) => serde_json::to_string_pretty(report)?,
        (true, false) => serde_json::to_string(report)?,
        (false, true) => serde_json::to_string_pretty(&report.modules)?,
        (false, false) => serde_json::to_string(&report.modules)?,
    };
    Ok(rendered)
}

/// Indented plain-text outline, one module per block
pub fn render_text(report: &ScanReport) -> String {
    let mut out = String::new();

    for module in &report.modules {
        let _ = writeln!(out, "{}", module.filename);
        for class in &module.classes {
            let _ = writeln!(
                out,
                "  class {} ({}-{})",
                class.name, class.line_number, class.end_line_number
            );
            for method in &class.methods {
                write_function(&mut out, method, 2);
            }
        }
        for function in &module.functions {
            write_function(&mut out, function, 1);
        }
    }

    for diagnostic in &report.diagnostics {
        let _ = writeln!(
            out,
            "! {} [{}]: {}",
            diagnostic.path, diagnostic.kind, diagnostic.message
        );
    }

    out.trim_end().to_string()
}

fn write_function(out: &mut String, function: &Function, depth: usize) {
    let _ = writeln!(
        out,
        "{}def {} ({}-{})",
        "  ".repeat(depth),
        function.name,
        function.line_number,
        function.end_line_number
    );
    for nested in &function.functions {
        write_function(out, nested, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Class, DiagnosticKind, FileDiagnostic, Module};

    fn sample_report() -> ScanReport {
        let mut module = Module::new("repo/test_file.py");
        module
            .classes
            .push(Class::new("TestClass", 2, 4).with_method(Function::new("test_method", 3, 4)));
        let mut outer = Function::new("test_function", 6, 9);
        outer.functions.push(Function::new("inner", 7, 8));
        module.functions.push(outer);

        ScanReport {
            modules: vec![module],
            diagnostics: vec![FileDiagnostic {
                path: "repo/invalid_file.py".to_string(),
                kind: DiagnosticKind::Syntax,
                message: "Syntax error".to_string(),
                line: Some(2),
            }],
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_render_json_modules_only() {
        let json = render_json(&sample_report(), false, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.is_array());
        assert_eq!(value[0]["filename"], "repo/test_file.py");
        assert_eq!(value[0]["classes"][0]["methods"][0]["name"], "test_method");
    }

    #[test]
    fn test_render_json_full_report() {
        let json = render_json(&sample_report(), true, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["modules"].as_array().unwrap().len(), 1);
        assert_eq!(value["diagnostics"][0]["kind"], "syntax");
    }

    #[test]
    fn test_render_empty_json() {
        let json = render_json(&ScanReport::new(), false, false).unwrap();
        assert_eq!(json, "[]");
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample_report());
        let expected = "\
repo/test_file.py
  class TestClass (2-4)
    def test_method (3-4)
  def test_function (6-9)
    def inner (7-8)
! repo/invalid_file.py [syntax]: Syntax error";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_apply_overrides() {
        let options = ScanOptions {
            nested: true,
            ignore_dirs: vec!["build".to_string(), ".git".to_string()],
            ..Default::default()
        };
        let config = apply_overrides(Config::default(), &options);
        assert!(config.scan.include_nested_functions);
        assert!(config.scan.ignore_dirs.contains(&"build".to_string()));
        assert_eq!(
            config.scan.ignore_dirs.iter().filter(|d| *d == ".git").count(),
            1
        );
    }
}
