//! Repository scan orchestration.
//!
//! Walks a directory, extracts one outline per source file and collects the
//! results. A file that cannot be read or parsed is skipped and recorded as a
//! diagnostic; it never aborts the scan.

use std::path::Path;

use tracing::{debug, info, warn};

use super::parser::{Parser, create_parser};
use super::scanner::FileScanner;
use crate::config::ScanConfig;
use crate::types::{DiagnosticKind, FileDiagnostic, Module, Result, ScanReport, ViewerError};

/// Scan a repository path supplied by a caller.
///
/// Rejects a missing path or a path that is not a directory with
/// [`ViewerError::InvalidInput`] before touching the filesystem further.
pub fn visualize_repo<P: AsRef<Path>>(path: P, config: &ScanConfig) -> Result<ScanReport> {
    let root = path.as_ref();
    if !root.is_dir() {
        return Err(ViewerError::invalid_input(root));
    }

    let parser = create_parser(config)?;
    scan_directory(root, config, &parser)
}

/// Outline every source file under `root`, keeping only successful modules.
pub fn visualize_codebase<P: AsRef<Path>>(root: P, config: &ScanConfig) -> Result<Vec<Module>> {
    let parser = create_parser(config)?;
    Ok(scan_directory(root.as_ref(), config, &parser)?.modules)
}

/// Walk `root` and run `parser` over each discovered file in walk order.
pub fn scan_directory<P: Parser>(
    root: &Path,
    config: &ScanConfig,
    parser: &P,
) -> Result<ScanReport> {
    let scanner = FileScanner::from_config(root, config)?;
    let files = scanner.scan();
    debug!("Scanning {} files under {}", files.len(), root.display());

    let mut report = ScanReport::new();

    for path in &files {
        match parser.parse_file(path) {
            Ok(module) => report.modules.push(module),
            Err(e) if e.is_per_file() => {
                warn!("Error parsing {}: {}", path.display(), e);
                report.diagnostics.push(diagnostic_for(path, &e));
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        "Outlined {} of {} files under {} ({} skipped)",
        report.modules.len(),
        files.len(),
        root.display(),
        report.diagnostics.len()
    );

    Ok(report)
}

fn diagnostic_for(path: &Path, err: &ViewerError) -> FileDiagnostic {
    let (kind, line) = match err {
        ViewerError::Syntax { line, .. } => (DiagnosticKind::Syntax, Some(*line)),
        _ => (DiagnosticKind::Read, None),
    };

    FileDiagnostic {
        path: path.to_string_lossy().to_string(),
        kind,
        message: err.to_string(),
        line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const VALID_SOURCE: &str = r#"
class TestClass:
    def test_method(self):
        pass

def test_function():
    pass
        "#;

    const INVALID_SOURCE: &str = r#"
    This is not valid Python syntax
    "#;

    fn temp_repo() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("test_file.py"), VALID_SOURCE).unwrap();
        temp
    }

    fn structure(modules: &[Module]) -> Vec<Module> {
        let mut sorted = modules.to_vec();
        sorted.sort_by(|a, b| a.filename.cmp(&b.filename));
        sorted
    }

    #[test]
    fn test_visualize_repo() {
        let repo = temp_repo();
        let report = visualize_repo(repo.path(), &ScanConfig::default()).unwrap();

        assert_eq!(report.modules.len(), 1);
        assert!(report.diagnostics.is_empty());

        let module = &report.modules[0];
        assert!(module.filename.ends_with("test_file.py"));
        assert_eq!(module.classes.len(), 1);
        assert_eq!(module.classes[0].name, "TestClass");
        assert_eq!(module.classes[0].methods.len(), 1);
        assert_eq!(module.classes[0].methods[0].name, "test_method");
        assert_eq!(module.functions.len(), 1);
        assert_eq!(module.functions[0].name, "test_function");
    }

    #[test]
    fn test_invalid_path() {
        let result = visualize_repo("/invalid/path", &ScanConfig::default());
        match result {
            Err(ViewerError::InvalidInput { path }) => {
                assert_eq!(path, Path::new("/invalid/path"));
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_regular_file_is_invalid_path() {
        let repo = temp_repo();
        let result = visualize_repo(repo.path().join("test_file.py"), &ScanConfig::default());
        assert!(matches!(result, Err(ViewerError::InvalidInput { .. })));
    }

    #[test]
    fn test_empty_repo() {
        let repo = temp_repo();
        fs::remove_file(repo.path().join("test_file.py")).unwrap();

        let report = visualize_repo(repo.path(), &ScanConfig::default()).unwrap();
        assert!(report.modules.is_empty());
        assert!(report.diagnostics.is_empty());
        assert!(!report.all_failed());
    }

    #[test]
    fn test_parse_error_skips_file() {
        let repo = temp_repo();
        fs::write(repo.path().join("invalid_file.py"), INVALID_SOURCE).unwrap();

        let report = visualize_repo(repo.path(), &ScanConfig::default()).unwrap();

        assert_eq!(report.modules.len(), 1);
        let module = &report.modules[0];
        assert!(module.filename.ends_with("test_file.py"));
        assert_eq!(module.classes[0].name, "TestClass");
        assert_eq!(module.classes[0].methods[0].name, "test_method");
        assert_eq!(module.functions[0].name, "test_function");

        assert_eq!(report.diagnostics.len(), 1);
        let diagnostic = &report.diagnostics[0];
        assert!(diagnostic.path.ends_with("invalid_file.py"));
        assert_eq!(diagnostic.kind, DiagnosticKind::Syntax);
        assert!(diagnostic.line.is_some());
    }

    #[test]
    fn test_only_invalid_file() {
        let repo = TempDir::new().unwrap();
        fs::write(repo.path().join("invalid_file.py"), INVALID_SOURCE).unwrap();

        let modules = visualize_codebase(repo.path(), &ScanConfig::default()).unwrap();
        assert!(modules.is_empty());

        let report = visualize_repo(repo.path(), &ScanConfig::default()).unwrap();
        assert!(report.all_failed());
    }

    #[test]
    fn test_unreadable_file_is_read_diagnostic() {
        let repo = temp_repo();
        // Not valid UTF-8
        fs::write(repo.path().join("binary.py"), b"\xff\xfe\x00\x9f").unwrap();

        let report = visualize_repo(repo.path(), &ScanConfig::default()).unwrap();
        assert_eq!(report.modules.len(), 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::Read);
        assert!(report.diagnostics[0].line.is_none());
    }

    #[test]
    fn test_one_module_per_file() {
        let repo = temp_repo();
        fs::create_dir_all(repo.path().join("pkg/sub")).unwrap();
        fs::write(repo.path().join("pkg/__init__.py"), "").unwrap();
        fs::write(repo.path().join("pkg/sub/util.py"), "def helper():\n    return 1\n").unwrap();
        fs::create_dir_all(repo.path().join(".venv/lib")).unwrap();
        fs::write(repo.path().join(".venv/lib/site.py"), "def skipped(): pass\n").unwrap();

        let report = visualize_repo(repo.path(), &ScanConfig::default()).unwrap();
        let modules = structure(&report.modules);
        assert_eq!(modules.len(), 3);

        let endings = ["__init__.py", "util.py", "test_file.py"];
        for (module, ending) in modules.iter().zip(endings) {
            assert!(
                module.filename.ends_with(ending),
                "{} should end with {}",
                module.filename,
                ending
            );
            assert!(module.filename.starts_with(&*repo.path().to_string_lossy()));
        }
        assert!(modules[0].is_empty());
    }

    #[test]
    fn test_scan_is_idempotent() {
        let repo = temp_repo();
        fs::write(
            repo.path().join("other.py"),
            "class A:\n    def a(self): pass\n\nclass B:\n    pass\n",
        )
        .unwrap();

        let first = visualize_repo(repo.path(), &ScanConfig::default()).unwrap();
        let second = visualize_repo(repo.path(), &ScanConfig::default()).unwrap();
        assert_eq!(structure(&first.modules), structure(&second.modules));
    }

    #[test]
    fn test_config_flows_into_parser() {
        let repo = TempDir::new().unwrap();
        fs::write(
            repo.path().join("closures.py"),
            "def outer():\n    def inner():\n        pass\n    return inner\n",
        )
        .unwrap();

        let config = ScanConfig::default().with_nested_functions(true);
        let report = visualize_repo(repo.path(), &config).unwrap();
        assert_eq!(report.modules[0].functions[0].functions[0].name, "inner");
    }

    #[test]
    fn test_ignore_dirs_from_config() {
        let repo = temp_repo();
        fs::create_dir_all(repo.path().join("build")).unwrap();
        fs::write(repo.path().join("build/gen.py"), "def gen(): pass\n").unwrap();

        let config = ScanConfig::default().with_ignore_dirs(vec!["build".to_string()]);
        let report = visualize_repo(repo.path(), &config).unwrap();
        assert_eq!(report.modules.len(), 1);
    }
}
