//! Directory scanning
//!
//! This module provides the sequential scan pipeline: recursive traversal of
//! the scan root with pattern-based exclusion and depth limiting, followed by
//! per-file extraction. Traversal and parse failures below critical severity
//! become report diagnostics instead of aborting the scan.

use crate::core::extractor::ModuleExtractor;
use crate::error::{ModscanError, Result, ResultExt};
use crate::models::{ScanReport, Settings};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Sequential scanner producing one report per run
pub struct Scanner {
    settings: Settings,
}

impl Scanner {
    /// Create a new scanner with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Get the current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Scan the configured directory and extract every Python module.
    pub fn scan(&self) -> Result<ScanReport> {
        self.scan_with_progress(|_, _, _| {})
    }

    /// Scan with progress reporting.
    ///
    /// The callback receives `(done, total, message)`; total is zero while
    /// discovery is still running.
    pub fn scan_with_progress<F>(&self, progress_fn: F) -> Result<ScanReport>
    where
        F: Fn(usize, usize, &str),
    {
        let start_time = Instant::now();
        let mut report = ScanReport::new();

        let scan_path = &self.settings.scan_path;
        if !scan_path.exists() {
            return Err(ModscanError::InvalidPath {
                path: scan_path.clone(),
            });
        }

        let exclude_patterns = self.compile_exclude_patterns()?;

        progress_fn(0, 0, &format!("Scanning directory: {}", scan_path.display()));

        let (files, traversal_errors) = self.find_python_files(&exclude_patterns);
        for (path, err) in traversal_errors {
            report.add_diagnostic(path, &err);
        }

        progress_fn(0, files.len(), &format!("Found {} Python files", files.len()));

        for (i, file) in files.iter().enumerate() {
            progress_fn(i, files.len(), &format!("Parsing {}", file.display()));

            match ModuleExtractor::parse_file(file, scan_path) {
                Ok(record) => report.add_module(record),
                Err(err) => {
                    if err.is_critical() {
                        return Err(err);
                    }
                    report.add_diagnostic(file.clone(), &err);
                }
            }
        }

        progress_fn(files.len(), files.len(), "Extraction complete");

        report.sort_modules();
        report.set_scan_duration(start_time.elapsed());

        Ok(report)
    }

    /// Compile exclude patterns into glob patterns
    fn compile_exclude_patterns(&self) -> Result<Vec<Pattern>> {
        let mut patterns = Vec::new();
        for pattern_str in &self.settings.exclude_patterns {
            patterns.push(Pattern::new(pattern_str)?);
        }
        Ok(patterns)
    }

    /// Find every `.py` file under the scan root.
    ///
    /// Non-critical traversal failures are returned alongside the file list
    /// so the caller can record them without losing the rest of the tree.
    /// The list comes back sorted, making scan order independent of the
    /// order the OS yields directory entries in.
    pub(crate) fn find_python_files(
        &self,
        exclude_patterns: &[Pattern],
    ) -> (Vec<PathBuf>, Vec<(PathBuf, ModscanError)>) {
        let mut files = Vec::new();
        let mut errors = Vec::new();

        self.find_python_files_recursive(
            &self.settings.scan_path,
            &mut files,
            &mut errors,
            exclude_patterns,
            0,
        );

        files.sort();
        (files, errors)
    }

    fn find_python_files_recursive(
        &self,
        dir: &Path,
        files: &mut Vec<PathBuf>,
        errors: &mut Vec<(PathBuf, ModscanError)>,
        exclude_patterns: &[Pattern],
        current_depth: usize,
    ) {
        if let Some(max_depth) = self.settings.max_depth {
            if current_depth > max_depth {
                return;
            }
        }

        let entries = match fs::read_dir(dir).with_file_context(dir) {
            Ok(entries) => entries,
            Err(err) => {
                errors.push((dir.to_path_buf(), err));
                return;
            }
        };

        for entry_result in entries {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(err) => {
                    errors.push((dir.to_path_buf(), ModscanError::io_error(err)));
                    continue;
                }
            };

            let path = entry.path();
            if self.is_excluded(&path, exclude_patterns) {
                continue;
            }

            if path.is_dir() {
                let should_follow = if path.is_symlink() {
                    self.settings.follow_links
                } else {
                    true
                };
                if should_follow {
                    self.find_python_files_recursive(
                        &path,
                        files,
                        errors,
                        exclude_patterns,
                        current_depth + 1,
                    );
                }
            } else if path.extension().is_some_and(|ext| ext == "py") {
                files.push(path);
            }
        }
    }

    /// Check whether a path matches any exclude pattern.
    ///
    /// Patterns are tried against the entry's file name and against its path
    /// relative to the scan root, so both `__pycache__` and `src/generated`
    /// work as written.
    pub fn is_excluded(&self, path: &Path, patterns: &[Pattern]) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative = path
            .strip_prefix(&self.settings.scan_path)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/");

        patterns
            .iter()
            .any(|pattern| pattern.matches(&name) || pattern.matches(&relative))
    }
}
