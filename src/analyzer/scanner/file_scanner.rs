use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::config::ScanConfig;
use crate::types::{Result, ViewerError};

/// Recursive source file walker.
///
/// Yields every file under `root` whose extension is configured, pruning any
/// directory whose name is in the ignore set. Paths are `root` joined with
/// the discovered relative segments; order is whatever the walk produces.
pub struct FileScanner {
    root: PathBuf,
    extensions: Vec<String>,
    ignore_dirs: Arc<Vec<String>>,
    exclude: Vec<glob::Pattern>,
    respect_gitignore: bool,
    follow_links: bool,
}

impl FileScanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let defaults = ScanConfig::default();
        Self {
            root: root.as_ref().to_path_buf(),
            extensions: defaults.extensions,
            ignore_dirs: Arc::new(defaults.ignore_dirs),
            exclude: Vec::new(),
            respect_gitignore: defaults.respect_gitignore,
            follow_links: defaults.follow_links,
        }
    }

    /// Create a scanner from scan settings. Fails on invalid exclude globs.
    pub fn from_config<P: AsRef<Path>>(root: P, config: &ScanConfig) -> Result<Self> {
        Ok(Self {
            root: root.as_ref().to_path_buf(),
            extensions: config.extensions.clone(),
            ignore_dirs: Arc::new(config.ignore_dirs.clone()),
            exclude: compile_excludes(&config.exclude)?,
            respect_gitignore: config.respect_gitignore,
            follow_links: config.follow_links,
        })
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_ignore_dirs(mut self, dirs: Vec<String>) -> Self {
        self.ignore_dirs = Arc::new(dirs);
        self
    }

    pub fn with_exclude(mut self, patterns: &[String]) -> Result<Self> {
        self.exclude = compile_excludes(patterns)?;
        Ok(self)
    }

    pub fn respect_gitignore(mut self, enabled: bool) -> Self {
        self.respect_gitignore = enabled;
        self
    }

    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let ignore_dirs = Arc::clone(&self.ignore_dirs);
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .hidden(false)
            .parents(self.respect_gitignore)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false)
            .follow_links(self.follow_links)
            .filter_entry(move |entry| {
                // The root itself is never pruned
                if entry.depth() == 0 {
                    return true;
                }
                let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
                !(is_dir
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| ignore_dirs.iter().any(|d| d == name)))
            })
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            if !self.check_extension(path) {
                continue;
            }

            if self.should_exclude(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        debug!(
            "Found {} source files under {}",
            files.len(),
            self.root.display()
        );
        files
    }

    fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude.iter().any(|p| p.matches(&path_str))
    }

    // Suffix match on the whole name, so a file called just `.py` counts
    fn check_extension(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| {
                self.extensions.iter().any(|ext| {
                    name.strip_suffix(ext.as_str())
                        .is_some_and(|stem| stem.ends_with('.'))
                })
            })
    }
}

fn compile_excludes(patterns: &[String]) -> Result<Vec<glob::Pattern>> {
    patterns
        .iter()
        .map(|p| {
            glob::Pattern::new(p)
                .map_err(|e| ViewerError::Config(format!("Invalid exclude pattern '{}': {}", p, e)))
        })
        .collect()
}
