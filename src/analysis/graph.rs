//! Dependency graph construction from module records
//!
//! Builds the directed import graph over one record snapshot. Resolution is
//! closed-world: only imports that land on a known module produce edges,
//! everything else (stdlib, third-party, dynamic targets) is silently out
//! of scope.

use super::filter::PathPrefixFilter;
use super::resolve::resolve_import_target;
use crate::models::{DependencyGraph, ModuleRecord};
use std::collections::BTreeMap;

/// Builder for the module dependency graph
pub struct DependencyGraphBuilder<'a> {
    records: &'a [ModuleRecord],
    filter: &'a PathPrefixFilter,
}

impl<'a> DependencyGraphBuilder<'a> {
    /// Create a builder over a record snapshot with an exclusion predicate
    pub fn new(records: &'a [ModuleRecord], filter: &'a PathPrefixFilter) -> Self {
        Self { records, filter }
    }

    /// Build the dependency graph.
    ///
    /// Every kept record becomes a vertex, even without edges. Identical
    /// record input always yields the identical edge set per vertex.
    pub fn build(&self) -> DependencyGraph {
        let kept: Vec<&ModuleRecord> = self
            .records
            .iter()
            .filter(|record| !self.filter.is_excluded(&record.path))
            .collect();

        let index = module_index(&kept);

        let mut graph = DependencyGraph::new();
        for record in &kept {
            graph.add_vertex(record.path.clone());
        }

        for record in &kept {
            for entry in &record.imports.imports {
                let name = base_import_name(entry);
                if name.is_empty() {
                    continue;
                }
                if let Some(target) = index.get(name) {
                    graph.add_edge(record.path.clone(), target.clone());
                }
            }

            let importer = record.dotted_name();
            for from_import in &record.imports.from_imports {
                let resolved = resolve_import_target(&importer, &from_import.module);
                if let Some(target) = index.get(resolved.as_str()) {
                    graph.add_edge(record.path.clone(), target.clone());
                }
            }
        }

        graph
    }
}

/// Map dotted module names to module paths.
///
/// Later records win on dotted-name collisions; with path-sorted input a
/// package marker therefore shadows a same-named plain module, matching
/// Python's package-over-module precedence.
fn module_index(records: &[&ModuleRecord]) -> BTreeMap<String, String> {
    let mut index = BTreeMap::new();
    for record in records {
        index.insert(record.dotted_name(), record.path.clone());
    }
    index
}

/// Strip the ` as alias` suffix from a plain import entry
fn base_import_name(entry: &str) -> &str {
    entry.split_whitespace().next().unwrap_or("")
}
