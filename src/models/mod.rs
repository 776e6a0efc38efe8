//! Data models and structures for modscan

pub mod config;
pub mod dependency_graph;
pub mod module_record;
pub mod report;
pub mod violation;

pub use config::{OutputFormat, PartialSettings, Settings};
pub use dependency_graph::{DependencyGraph, GraphStatistics};
pub use module_record::{dotted_name_for, FromImport, ImportTable, ModuleRecord, SymbolDef};
pub use report::{ScanDiagnostic, ScanReport, ScanSummary};
pub use violation::{CycleWitness, SymbolKind, Violation};
