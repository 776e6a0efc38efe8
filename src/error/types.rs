//! Error types and definitions for modscan
//!
//! This module provides the error handling system for the modscan application,
//! including error types, severity levels, and a result alias.

use crate::models::violation::{CycleWitness, Violation};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Maximum number of duplicate-symbol violations rendered in one error message.
pub const MAX_RENDERED_VIOLATIONS: usize = 20;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for modscan operations
#[derive(Debug, Error)]
pub enum ModscanError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// Permission denied errors
    #[error("Permission denied accessing {path}")]
    PermissionDenied { path: PathBuf },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Directory traversal errors
    #[error("Directory traversal error for {path}: {message}")]
    DirectoryTraversal { path: PathBuf, message: String },

    /// Source file read errors
    #[error("Error reading source file {path}: {source}")]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Python parse failures for a single source file
    #[error("Parse error in {path}: {message}")]
    ParseFailure { path: PathBuf, message: String },

    /// Report file read errors
    #[error("Error reading report file {path}: {source}")]
    ReportRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Report deserialization errors; the extractor contract is broken
    #[error("Malformed module report in {path}: {source}")]
    ReportParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Module record contract violations found after deserialization
    #[error("Invalid module record: {message}")]
    InvalidRecord { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// TOML parsing errors
    #[error("TOML parsing error: {source}")]
    TomlParse {
        #[source]
        source: toml::de::Error,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Invalid output format
    #[error("Invalid output format: {format}")]
    InvalidOutputFormat { format: String },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Output directory not found
    #[error("Output directory not found: {path}")]
    OutputDirectoryNotFound { path: PathBuf },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// CSV serialization error
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Parallel execution error
    #[error("Parallel execution error: {message}")]
    ParallelExecution { message: String },

    /// Module analysis errors
    #[error("Analysis error: {message}")]
    Analysis { message: String },

    /// An import cycle not covered by the allow-list
    #[error("import cycle detected: {witness}")]
    CycleDetected { witness: CycleWitness },

    /// Duplicate symbol definitions within one or more modules
    #[error("{}", format_duplicate_report(.violations))]
    DuplicateSymbols { violations: Vec<Violation> },
}

impl ModscanError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - operation can continue
            ModscanError::PermissionDenied { .. } => ErrorSeverity::Warning,
            ModscanError::SourceRead { .. } => ErrorSeverity::Warning,
            ModscanError::ParseFailure { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            ModscanError::Config { .. } => ErrorSeverity::Critical,
            ModscanError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            ModscanError::ConfigRead { .. } => ErrorSeverity::Critical,
            ModscanError::ConfigParse { .. } => ErrorSeverity::Critical,
            ModscanError::TomlParse { .. } => ErrorSeverity::Critical,
            ModscanError::GlobPattern { .. } => ErrorSeverity::Critical,
            ModscanError::InvalidOutputFormat { .. } => ErrorSeverity::Critical,
            ModscanError::StdoutWrite { .. } => ErrorSeverity::Critical,
            ModscanError::OutputDirectoryNotFound { .. } => ErrorSeverity::Critical,
            ModscanError::ReportRead { .. } => ErrorSeverity::Critical,
            ModscanError::ReportParse { .. } => ErrorSeverity::Critical,
            ModscanError::InvalidRecord { .. } => ErrorSeverity::Critical,

            // Regular errors - current operation fails but overall process can continue
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ModscanError::PermissionDenied { path } => {
                format!("Cannot access '{}' due to permission denied. Check file permissions or exclude the path.", path.display())
            }
            ModscanError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide a valid directory path.", path.display())
            }
            ModscanError::ParseFailure { path, message } => {
                format!("Cannot parse '{}': {}. Skipping file.", path.display(), message)
            }
            ModscanError::ReportParse { path, source } => {
                format!("Report '{}' does not match the module record layout: {}. Regenerate it with a scan.", path.display(), source)
            }
            ModscanError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Create one with --init or use command line options.", path.display())
            }
            ModscanError::OutputDirectoryNotFound { path } => {
                format!("Output directory '{}' does not exist. Please create the directory or specify a different output path.", path.display())
            }
            ModscanError::CycleDetected { witness } => {
                format!("Import cycle detected: {}. Break the cycle or allow-list every module in it.", witness)
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Create an IO error
    pub fn io_error(source: std::io::Error) -> Self {
        ModscanError::Io { source }
    }

    /// Create a permission denied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        ModscanError::PermissionDenied { path: path.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ModscanError::DirectoryTraversal {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a parse failure for a single source file
    pub fn parse_failure(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ModscanError::ParseFailure {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        ModscanError::Config {
            message: message.into(),
        }
    }

    /// Create a module record contract error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        ModscanError::InvalidRecord {
            message: message.into(),
        }
    }

    /// Create a parallel execution error
    pub fn parallel_error(message: impl Into<String>) -> Self {
        ModscanError::ParallelExecution {
            message: message.into(),
        }
    }

    /// Create a module analysis error
    pub fn analysis_error(message: impl Into<String>) -> Self {
        ModscanError::Analysis {
            message: message.into(),
        }
    }
}

/// Render a duplicate-symbol failure, capped at [`MAX_RENDERED_VIOLATIONS`] lines.
fn format_duplicate_report(violations: &[Violation]) -> String {
    let mut lines = Vec::with_capacity(violations.len().min(MAX_RENDERED_VIOLATIONS) + 2);
    lines.push(format!(
        "found {} duplicate symbol definition(s):",
        violations.len()
    ));
    for violation in violations.iter().take(MAX_RENDERED_VIOLATIONS) {
        lines.push(format!("  {}", violation));
    }
    if violations.len() > MAX_RENDERED_VIOLATIONS {
        lines.push(format!(
            "  ... and {} more",
            violations.len() - MAX_RENDERED_VIOLATIONS
        ));
    }
    lines.join("\n")
}

// Implement From for common error types
impl From<std::io::Error> for ModscanError {
    fn from(err: std::io::Error) -> Self {
        ModscanError::io_error(err)
    }
}

impl From<toml::de::Error> for ModscanError {
    fn from(err: toml::de::Error) -> Self {
        ModscanError::TomlParse { source: err }
    }
}

impl From<csv::Error> for ModscanError {
    fn from(err: csv::Error) -> Self {
        ModscanError::Csv { source: err }
    }
}

impl From<glob::PatternError> for ModscanError {
    fn from(err: glob::PatternError) -> Self {
        ModscanError::GlobPattern { source: err }
    }
}

impl From<serde_json::Error> for ModscanError {
    fn from(err: serde_json::Error) -> Self {
        ModscanError::JsonSerialize { source: err }
    }
}

/// Result type alias for modscan operations
pub type Result<T> = std::result::Result<T, ModscanError>;
