//! Import cycle detection
//!
//! Depth-first search over the dependency graph with an on-stack set. Every
//! back edge yields one witness (a closed walk through the current DFS
//! path). The contract is existence plus a witness, not enumeration of all
//! cycles; the allow-list suppresses individual found cycles whose vertices
//! it fully covers.

use crate::error::{ModscanError, Result};
use crate::models::{CycleWitness, DependencyGraph};
use std::collections::BTreeSet;
use std::collections::HashSet;

/// Collect one witness per back edge found by a full DFS of the graph.
///
/// Vertices are taken in sorted order, so the returned witnesses are stable
/// for a given graph.
pub fn find_cycles(graph: &DependencyGraph) -> Vec<CycleWitness> {
    let mut visited = HashSet::new();
    let mut on_stack = HashSet::new();
    let mut stack = Vec::new();
    let mut cycles = Vec::new();

    for module in graph.vertices() {
        if !visited.contains(module.as_str()) {
            visit(
                graph,
                module,
                &mut visited,
                &mut on_stack,
                &mut stack,
                &mut cycles,
            );
        }
    }

    cycles
}

fn visit(
    graph: &DependencyGraph,
    module: &str,
    visited: &mut HashSet<String>,
    on_stack: &mut HashSet<String>,
    stack: &mut Vec<String>,
    cycles: &mut Vec<CycleWitness>,
) {
    visited.insert(module.to_string());
    on_stack.insert(module.to_string());
    stack.push(module.to_string());

    if let Some(deps) = graph.dependencies_of(module) {
        for dep in deps {
            if on_stack.contains(dep.as_str()) {
                // Back edge: the stack segment from dep onward, closed by
                // dep itself, is a valid closed walk.
                if let Some(pos) = stack.iter().position(|entry| entry == dep) {
                    let mut walk: Vec<String> = stack[pos..].to_vec();
                    walk.push(dep.clone());
                    cycles.push(CycleWitness::new(walk));
                }
            } else if !visited.contains(dep.as_str()) {
                visit(graph, dep, visited, on_stack, stack, cycles);
            }
        }
    }

    stack.pop();
    on_stack.remove(module);
}

/// Find the first cycle not fully covered by the allow-list.
///
/// A found cycle whose vertices all lie inside `allowed` is tolerated; any
/// cycle touching a module outside it is returned as the failure witness.
pub fn find_disallowed_cycle(
    graph: &DependencyGraph,
    allowed: &BTreeSet<String>,
) -> Option<CycleWitness> {
    find_cycles(graph)
        .into_iter()
        .find(|witness| !witness.is_allowed_by(allowed))
}

/// Fail with [`ModscanError::CycleDetected`] if the graph holds a cycle the
/// allow-list does not cover.
pub fn ensure_acyclic(graph: &DependencyGraph, allowed: &BTreeSet<String>) -> Result<()> {
    match find_disallowed_cycle(graph, allowed) {
        Some(witness) => Err(ModscanError::CycleDetected { witness }),
        None => Ok(()),
    }
}
