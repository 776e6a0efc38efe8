//! Module path exclusion predicate

/// Excludes modules from analysis by path prefix.
///
/// Applied before any edges are considered: an excluded module contributes
/// neither a vertex to the graph nor a namespace to the duplicate check.
/// Typical use is dropping the test-suite's own modules.
#[derive(Debug, Clone, Default)]
pub struct PathPrefixFilter {
    prefixes: Vec<String>,
}

impl PathPrefixFilter {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    /// A filter that excludes nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether a module path falls under any excluded prefix
    pub fn is_excluded(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix))
    }
}
