//! Dependency graph data structures for module analysis

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Directed import graph over module paths.
///
/// Adjacency lives in ordered collections so traversal order, and with it
/// witness selection and DOT output, is stable for a given input. The graph
/// is built once from a record snapshot and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    adjacency: BTreeMap<String, BTreeSet<String>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self {
            adjacency: BTreeMap::new(),
        }
    }

    /// Add a vertex with no edges. Existing edges are kept.
    pub fn add_vertex(&mut self, module: impl Into<String>) {
        self.adjacency.entry(module.into()).or_default();
    }

    /// Add a directed edge. Both endpoints become vertices if they are not
    /// already present.
    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>) {
        let to = to.into();
        self.adjacency.entry(to.clone()).or_default();
        self.adjacency.entry(from.into()).or_default().insert(to);
    }

    /// Whether the module is a vertex of the graph
    pub fn contains(&self, module: &str) -> bool {
        self.adjacency.contains_key(module)
    }

    /// Direct dependencies of a module, if it is a vertex
    pub fn dependencies_of(&self, module: &str) -> Option<&BTreeSet<String>> {
        self.adjacency.get(module)
    }

    /// All vertices in sorted order
    pub fn vertices(&self) -> impl Iterator<Item = &String> {
        self.adjacency.keys()
    }

    /// All (vertex, dependency set) pairs in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.adjacency.iter()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|deps| deps.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Get statistics about the dependency graph
    pub fn statistics(&self) -> GraphStatistics {
        let vertex_count = self.vertex_count();
        let edge_count = self.edge_count();

        let mut fan_in: BTreeMap<&str, usize> = BTreeMap::new();
        for deps in self.adjacency.values() {
            for dep in deps {
                *fan_in.entry(dep.as_str()).or_default() += 1;
            }
        }

        let mut max_fan_out = 0;
        let mut max_fan_out_module = None;
        for (module, deps) in &self.adjacency {
            if deps.len() > max_fan_out {
                max_fan_out = deps.len();
                max_fan_out_module = Some(module.clone());
            }
        }

        let mut max_fan_in = 0;
        let mut max_fan_in_module = None;
        for (module, count) in &fan_in {
            if *count > max_fan_in {
                max_fan_in = *count;
                max_fan_in_module = Some(module.to_string());
            }
        }

        let isolated_count = self
            .adjacency
            .iter()
            .filter(|(module, deps)| deps.is_empty() && !fan_in.contains_key(module.as_str()))
            .count();

        GraphStatistics {
            vertex_count,
            edge_count,
            max_fan_out,
            max_fan_out_module,
            max_fan_in,
            max_fan_in_module,
            isolated_count,
        }
    }

    /// Export to DOT format for visualization
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph imports {\n");
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box];\n\n");

        for module in self.adjacency.keys() {
            dot.push_str(&format!("  \"{}\";\n", module));
        }

        dot.push('\n');

        for (module, deps) in &self.adjacency {
            for dep in deps {
                dot.push_str(&format!("  \"{}\" -> \"{}\";\n", module, dep));
            }
        }

        dot.push_str("}\n");
        dot
    }
}

/// Statistics about the dependency graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub max_fan_out: usize,
    pub max_fan_out_module: Option<String>,
    pub max_fan_in: usize,
    pub max_fan_in_module: Option<String>,
    pub isolated_count: usize,
}
