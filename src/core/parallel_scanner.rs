//! Parallel scanning
//!
//! This module provides the concurrent scan pipeline: discovery runs once
//! up front, then per-file extraction fans out over a rayon thread pool.
//! Extraction outcomes are collected in input order and merged into the
//! report on the calling thread, so a parallel scan produces the same
//! report as a sequential one.

use crate::core::extractor::ModuleExtractor;
use crate::core::parallel::{parallel_process, parallel_process_with_progress, ProgressUpdate};
use crate::core::scanner::Scanner;
use crate::error::{ModscanError, Result};
use crate::models::{ModuleRecord, ScanReport, Settings};
use glob::Pattern;
use std::path::PathBuf;
use std::time::Instant;

/// Parallel scanner producing one report per run
pub struct ParallelScanner {
    settings: Settings,
}

impl ParallelScanner {
    /// Create a new parallel scanner with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Get the current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Scan the configured directory, extracting modules concurrently.
    pub fn scan(&self) -> Result<ScanReport> {
        let start_time = Instant::now();
        let mut report = ScanReport::new();

        let files = self.discover(&mut report)?;

        let scan_path = self.settings.scan_path.as_path();
        let outcomes = self.thread_pool()?.install(|| {
            parallel_process(files, |file: PathBuf| {
                let record = ModuleExtractor::parse_file(&file, scan_path);
                (file, record)
            })
        });

        Self::merge_outcomes(&mut report, outcomes)?;

        report.sort_modules();
        report.set_scan_duration(start_time.elapsed());

        Ok(report)
    }

    /// Scan with progress reporting.
    pub fn scan_with_progress<F>(&self, progress_callback: F) -> Result<ScanReport>
    where
        F: Fn(ProgressUpdate) + Send + Sync,
    {
        let start_time = Instant::now();
        let mut report = ScanReport::new();

        progress_callback(ProgressUpdate::new(
            0,
            0,
            format!("Scanning directory: {}", self.settings.scan_path.display()),
        ));

        let files = self.discover(&mut report)?;
        let total = files.len();

        progress_callback(ProgressUpdate::new(
            0,
            total,
            format!("Found {} Python files", total),
        ));

        let scan_path = self.settings.scan_path.as_path();
        let outcomes = self.thread_pool()?.install(|| {
            parallel_process_with_progress(
                files,
                |file: PathBuf| {
                    let record = ModuleExtractor::parse_file(&file, scan_path);
                    (file, record)
                },
                |update| progress_callback(update),
            )
        });

        Self::merge_outcomes(&mut report, outcomes)?;

        report.sort_modules();
        report.set_scan_duration(start_time.elapsed());

        progress_callback(ProgressUpdate::new(total, total, "Extraction complete"));

        Ok(report)
    }

    /// Find every Python file under the scan root, recording traversal
    /// failures as report diagnostics.
    fn discover(&self, report: &mut ScanReport) -> Result<Vec<PathBuf>> {
        if !self.settings.scan_path.exists() {
            return Err(ModscanError::InvalidPath {
                path: self.settings.scan_path.clone(),
            });
        }

        let exclude_patterns = self.compile_exclude_patterns()?;

        let scanner = Scanner::new(self.settings.clone());
        let (files, traversal_errors) = scanner.find_python_files(&exclude_patterns);
        for (path, err) in traversal_errors {
            report.add_diagnostic(path, &err);
        }

        Ok(files)
    }

    /// Compile exclude patterns into glob patterns
    fn compile_exclude_patterns(&self) -> Result<Vec<Pattern>> {
        let mut patterns = Vec::new();
        for pattern_str in &self.settings.exclude_patterns {
            patterns.push(Pattern::new(pattern_str)?);
        }
        Ok(patterns)
    }

    /// Build the pool extraction runs on, sized from settings.
    fn thread_pool(&self) -> Result<rayon::ThreadPool> {
        let threads = self.settings.threads.unwrap_or_else(num_cpus::get);
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| {
                ModscanError::parallel_error(format!("Failed to build thread pool: {}", e))
            })
    }

    /// Fold per-file outcomes into the report. Critical failures abort;
    /// everything else becomes a diagnostic.
    fn merge_outcomes(
        report: &mut ScanReport,
        outcomes: Vec<(PathBuf, Result<ModuleRecord>)>,
    ) -> Result<()> {
        for (file, outcome) in outcomes {
            match outcome {
                Ok(record) => report.add_module(record),
                Err(err) => {
                    if err.is_critical() {
                        return Err(err);
                    }
                    report.add_diagnostic(file, &err);
                }
            }
        }
        Ok(())
    }
}
