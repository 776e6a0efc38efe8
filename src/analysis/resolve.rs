//! Relative import resolution
//!
//! A from-import specifier is either a plain dotted name (`pkg.util`) or a
//! relative reference carrying a run of leading dots plus an optional
//! remainder (`.sibling`, `..base.types`, `.`). Resolution is a pure
//! function of the importing module's dotted name and the specifier; it
//! never touches the filesystem and never fails.

/// Resolve an import specifier against the importing module's dotted name.
///
/// N leading dots drop the last N segments of the importer's dotted name
/// (one dot means the current package) before the remainder is appended.
/// When N exceeds the available segments the remainder alone is returned,
/// so over-deep relative imports degrade gracefully instead of erroring.
pub fn resolve_import_target(importer: &str, specifier: &str) -> String {
    let dots = specifier.len() - specifier.trim_start_matches('.').len();
    let remainder = &specifier[dots..];

    if dots == 0 {
        return remainder.to_string();
    }

    let segments: Vec<&str> = importer.split('.').filter(|s| !s.is_empty()).collect();
    let kept = segments.len().saturating_sub(dots);
    let mut parts: Vec<&str> = segments[..kept].to_vec();
    if !remainder.is_empty() {
        parts.extend(remainder.split('.'));
    }
    parts.join(".")
}
