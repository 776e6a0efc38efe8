//! Findings reported by the analysis passes

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Namespace a symbol definition belongs to. Functions and classes are
/// tallied separately; a function and a class sharing a name is not a
/// collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    Function,
    Class,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolKind::Function => write!(f, "function"),
            SymbolKind::Class => write!(f, "class"),
        }
    }
}

/// One symbol name defined more than once within its namespace in one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Module path the duplicate lives in
    pub module: String,
    /// Which namespace the name collides in
    pub kind: SymbolKind,
    /// The colliding name
    pub name: String,
    /// How many times the name is defined
    pub count: usize,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} :: {} '{}' defined {} times",
            self.module, self.kind, self.name, self.count
        )
    }
}

/// One closed walk proving an import cycle exists.
///
/// The walk lists module paths in import order with the starting module
/// repeated at the end, so a two-module cycle renders as `a -> b -> a`.
/// The witness is not necessarily unique or shortest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleWitness {
    pub walk: Vec<String>,
}

impl CycleWitness {
    /// Wrap a closed walk. The caller guarantees the first and last entries
    /// match and every consecutive pair is an edge of the graph.
    pub fn new(walk: Vec<String>) -> Self {
        Self { walk }
    }

    /// The distinct modules participating in the cycle
    pub fn vertices(&self) -> BTreeSet<&str> {
        self.walk.iter().map(String::as_str).collect()
    }

    /// Whether every module of the cycle is covered by the allow-list
    pub fn is_allowed_by(&self, allowed: &BTreeSet<String>) -> bool {
        !self.walk.is_empty() && self.walk.iter().all(|module| allowed.contains(module))
    }
}

impl fmt::Display for CycleWitness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.walk.join(" -> "))
    }
}
