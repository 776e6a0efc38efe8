//! Duplicate symbol detection
//!
//! Tallies top-level definition names per module, separately for the
//! function and class namespaces. A name defined more than once in one
//! namespace of one module is a violation; all violations are collected
//! before any failure is raised.

use crate::analysis::filter::PathPrefixFilter;
use crate::error::{ModscanError, Result};
use crate::models::{ModuleRecord, SymbolDef, SymbolKind, Violation};
use std::collections::BTreeMap;

/// Collect every duplicate definition across the given records.
///
/// Records matching the exclusion filter are skipped entirely. Within a
/// module, violations come out name-sorted per namespace; across modules
/// they follow record order.
pub fn find_duplicate_symbols(
    records: &[ModuleRecord],
    filter: &PathPrefixFilter,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for record in records {
        if filter.is_excluded(&record.path) {
            continue;
        }
        collect_namespace(
            &record.path,
            SymbolKind::Function,
            &record.functions,
            &mut violations,
        );
        collect_namespace(
            &record.path,
            SymbolKind::Class,
            &record.classes,
            &mut violations,
        );
    }

    violations
}

fn collect_namespace(
    module: &str,
    kind: SymbolKind,
    symbols: &[SymbolDef],
    out: &mut Vec<Violation>,
) {
    let mut tally: BTreeMap<&str, usize> = BTreeMap::new();
    for symbol in symbols {
        *tally.entry(symbol.name.as_str()).or_insert(0) += 1;
    }

    for (name, count) in tally {
        if count > 1 {
            out.push(Violation {
                module: module.to_string(),
                kind,
                name: name.to_string(),
                count,
            });
        }
    }
}

/// Fail with [`ModscanError::DuplicateSymbols`] if any module defines a name
/// more than once within a namespace.
pub fn ensure_unique_symbols(records: &[ModuleRecord], filter: &PathPrefixFilter) -> Result<()> {
    let violations = find_duplicate_symbols(records, filter);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ModscanError::DuplicateSymbols { violations })
    }
}
