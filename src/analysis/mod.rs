//! Dependency analysis over extracted module records
//!
//! Builds the import graph and runs the two structural checks: import cycle
//! detection and duplicate symbol detection. Exclusion prefixes remove
//! modules before either check sees them.

pub mod cycles;
pub mod duplicates;
pub mod filter;
pub mod graph;
pub mod resolve;

pub use cycles::{ensure_acyclic, find_cycles, find_disallowed_cycle};
pub use duplicates::{ensure_unique_symbols, find_duplicate_symbols};
pub use filter::PathPrefixFilter;
pub use graph::DependencyGraphBuilder;
pub use resolve::resolve_import_target;

use crate::models::{CycleWitness, DependencyGraph, ModuleRecord, Settings, Violation};

/// Combined result of both structural checks over one set of records
#[derive(Debug)]
pub struct CheckOutcome {
    /// The import graph the cycle check ran against
    pub graph: DependencyGraph,
    /// First cycle not covered by the allow-list, if any
    pub cycle: Option<CycleWitness>,
    /// Every duplicate symbol definition found
    pub violations: Vec<Violation>,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.cycle.is_none() && self.violations.is_empty()
    }
}

/// Run both checks with the exclusions and allow-list from `settings`.
pub fn run_checks(records: &[ModuleRecord], settings: &Settings) -> CheckOutcome {
    let filter = PathPrefixFilter::new(settings.exclude_prefixes.clone());
    let graph = DependencyGraphBuilder::new(records, &filter).build();
    let allowed = settings.allowed_cycle_set();

    let cycle = find_disallowed_cycle(&graph, &allowed);
    let violations = find_duplicate_symbols(records, &filter);

    CheckOutcome {
        graph,
        cycle,
        violations,
    }
}
