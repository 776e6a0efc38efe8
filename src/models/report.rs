//! Scan report structures
//!
//! The `ScanReport` is the snapshot one scan produces: every module record
//! plus the fail-soft diagnostics collected along the way. Serialized to
//! JSON it is the interchange document other tools (and `--from-report`)
//! consume; `diagnostics` is omitted when empty so the document carries
//! exactly the record list.

use super::module_record::ModuleRecord;
use crate::error::{ModscanError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Collection of all records and diagnostics from one scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub modules: Vec<ModuleRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<ScanDiagnostic>,
    /// Wall-clock duration of the scan; never serialized, reports must be
    /// byte-identical across reruns of an unchanged tree.
    #[serde(skip)]
    pub scan_duration: Duration,
}

impl ScanReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module record to the report
    pub fn add_module(&mut self, record: ModuleRecord) {
        self.modules.push(record);
    }

    /// Add a fail-soft diagnostic for a file that could not be analyzed
    pub fn add_diagnostic(&mut self, path: PathBuf, error: &ModscanError) {
        self.diagnostics.push(ScanDiagnostic {
            path,
            message: error.user_message(),
            severity: DiagnosticSeverity::from(error),
        });
    }

    /// Set the scan duration
    pub fn set_scan_duration(&mut self, duration: Duration) {
        self.scan_duration = duration;
    }

    /// Sort records by module path. Parallel extraction collects records in
    /// completion order; sorting restores the canonical order.
    pub fn sort_modules(&mut self) {
        self.modules.sort_by(|a, b| a.path.cmp(&b.path));
        self.diagnostics.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Compute summary statistics over the current records
    pub fn summary(&self) -> ScanSummary {
        let mut summary = ScanSummary {
            total_modules: self.modules.len(),
            diagnostics_count: self.diagnostics.len(),
            scan_duration: self.scan_duration,
            ..ScanSummary::default()
        };
        for record in &self.modules {
            summary.total_functions += record.functions.len();
            summary.total_classes += record.classes.len();
            summary.total_plain_imports += record.imports.imports.len();
            summary.total_from_imports += record.imports.from_imports.len();
            if record.is_package_marker() {
                summary.package_count += 1;
            }
        }
        summary
    }

    /// Load a previously written report from a JSON file.
    ///
    /// Any deviation from the record layout (a module missing `path`, a
    /// duplicated path) is a broken extractor contract and fails hard.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ModscanError::ReportRead {
            path: path.to_path_buf(),
            source,
        })?;
        let report: ScanReport =
            serde_json::from_str(&content).map_err(|source| ModscanError::ReportParse {
                path: path.to_path_buf(),
                source,
            })?;
        report.validate()?;
        Ok(report)
    }

    /// Check the snapshot invariants that serde cannot express
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for record in &self.modules {
            if !seen.insert(record.path.as_str()) {
                return Err(ModscanError::invalid_record(format!(
                    "module path '{}' appears more than once in the snapshot",
                    record.path
                )));
            }
        }
        Ok(())
    }
}

/// Summary statistics for one scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    pub total_modules: usize,
    pub total_functions: usize,
    pub total_classes: usize,
    pub total_plain_imports: usize,
    pub total_from_imports: usize,
    pub package_count: usize,
    pub diagnostics_count: usize,
    pub scan_duration: Duration,
}

impl ScanSummary {
    /// Format the scan duration as a human-readable string
    pub fn format_duration(&self) -> String {
        let secs = self.scan_duration.as_secs();
        let millis = self.scan_duration.subsec_millis();

        if secs == 0 {
            format!("{}ms", millis)
        } else if secs < 60 {
            format!("{}.{:03}s", secs, millis)
        } else {
            let mins = secs / 60;
            let secs = secs % 60;
            format!("{}m {}s", mins, secs)
        }
    }
}

/// A fail-soft problem encountered while scanning one file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanDiagnostic {
    pub path: PathBuf,
    pub message: String,
    pub severity: DiagnosticSeverity,
}

/// Severity attached to a recorded diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticSeverity {
    Warning,
    Error,
    Critical,
}

impl From<&ModscanError> for DiagnosticSeverity {
    fn from(error: &ModscanError) -> Self {
        match error.severity() {
            crate::error::ErrorSeverity::Warning => DiagnosticSeverity::Warning,
            crate::error::ErrorSeverity::Error => DiagnosticSeverity::Error,
            crate::error::ErrorSeverity::Critical => DiagnosticSeverity::Critical,
        }
    }
}
