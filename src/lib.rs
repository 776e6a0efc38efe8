//! Modscan - a static import and symbol analyzer for Python codebases
//!
//! This library scans directory trees for Python sources, records the
//! functions, classes, and import statements of every module, and checks the
//! resulting module dependency graph for import cycles and duplicate
//! top-level symbol definitions. Source files are parsed, never executed.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;

// Re-export commonly used types
pub use analysis::{run_checks, CheckOutcome};
pub use error::{
    handle_error, try_with_recovery, ErrorSeverity, ModscanError, OptionExt, Result, ResultExt,
};
pub use models::{
    config::Settings,
    dependency_graph::DependencyGraph,
    module_record::ModuleRecord,
    report::ScanReport,
    violation::{CycleWitness, Violation},
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
