use std::fs;
use std::path::Path;
use tempfile::tempdir;
use modscan::{
    analysis::{ensure_acyclic, ensure_unique_symbols, run_checks, PathPrefixFilter},
    core::Scanner,
    error::Result,
    models::{ScanReport, Settings, SymbolKind},
};

fn settings_for(base_dir: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.scan_path = base_dir.to_path_buf();
    settings.quiet = true;
    settings.show_progress = false;
    settings
}

fn scan(settings: &Settings) -> Result<ScanReport> {
    Scanner::new(settings.clone()).scan()
}

#[test]
fn test_import_cycle_produces_witness() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("a.py"), "import b\n")?;
    fs::write(temp_dir.path().join("b.py"), "import c\n")?;
    fs::write(temp_dir.path().join("c.py"), "import a\n")?;

    let settings = settings_for(temp_dir.path());
    let report = scan(&settings)?;
    let outcome = run_checks(&report.modules, &settings);

    assert!(!outcome.passed());
    let witness = outcome.cycle.expect("triangle must produce a cycle");

    // The walk is closed and covers exactly the three modules
    assert_eq!(witness.walk.first(), witness.walk.last());
    let vertices: Vec<&str> = witness.vertices().into_iter().collect();
    assert_eq!(vertices, vec!["a.py", "b.py", "c.py"]);
    assert_eq!(witness.to_string(), "a.py -> b.py -> c.py -> a.py");

    // The hard-failing variant carries the same witness in its message
    let err = ensure_acyclic(&outcome.graph, &settings.allowed_cycle_set()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "import cycle detected: a.py -> b.py -> c.py -> a.py"
    );

    Ok(())
}

#[test]
fn test_self_import_is_a_cycle() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("solo.py"), "import solo\n")?;

    let settings = settings_for(temp_dir.path());
    let report = scan(&settings)?;
    let outcome = run_checks(&report.modules, &settings);

    let witness = outcome.cycle.expect("self import must cycle");
    assert_eq!(witness.walk, vec!["solo.py".to_string(), "solo.py".to_string()]);

    Ok(())
}

#[test]
fn test_modules_without_edges_never_cycle() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("one.py"), "import os\n\ndef f():\n    pass\n")?;
    fs::write(temp_dir.path().join("two.py"), "import json\n")?;
    fs::write(temp_dir.path().join("three.py"), "")?;

    let settings = settings_for(temp_dir.path());
    let report = scan(&settings)?;
    let outcome = run_checks(&report.modules, &settings);

    // Stdlib imports resolve to nothing in the snapshot, so no edges exist
    assert_eq!(outcome.graph.vertex_count(), 3);
    assert_eq!(outcome.graph.edge_count(), 0);
    assert!(outcome.cycle.is_none());
    assert!(outcome.passed());

    Ok(())
}

#[test]
fn test_allow_list_covering_every_member_suppresses_cycle() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("x.py"), "import y\n")?;
    fs::write(temp_dir.path().join("y.py"), "import x\n")?;

    let mut settings = settings_for(temp_dir.path());
    settings.allowed_cycles = vec!["x.py".to_string(), "y.py".to_string()];

    let report = scan(&settings)?;
    let outcome = run_checks(&report.modules, &settings);

    assert!(outcome.cycle.is_none());
    assert!(outcome.passed());

    Ok(())
}

#[test]
fn test_allow_list_missing_one_member_still_fails() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("x.py"), "import y\n")?;
    fs::write(temp_dir.path().join("y.py"), "import z\n")?;
    fs::write(temp_dir.path().join("z.py"), "import x\n")?;

    // z.py is not on the allow-list, so the x -> y -> z -> x cycle fails
    let mut settings = settings_for(temp_dir.path());
    settings.allowed_cycles = vec!["x.py".to_string(), "y.py".to_string()];

    let report = scan(&settings)?;
    let outcome = run_checks(&report.modules, &settings);

    let witness = outcome.cycle.expect("uncovered cycle must be reported");
    assert!(witness.vertices().contains("z.py"));

    Ok(())
}

#[test]
fn test_duplicate_function_reported_once_with_count() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(
        temp_dir.path().join("dup.py"),
        r#"def foo():
    pass

def foo():
    pass

class Foo:
    pass
"#,
    )?;

    let settings = settings_for(temp_dir.path());
    let report = scan(&settings)?;
    let outcome = run_checks(&report.modules, &settings);

    // Names are case-sensitive: the class Foo does not collide with foo
    assert_eq!(outcome.violations.len(), 1);
    let violation = &outcome.violations[0];
    assert_eq!(violation.module, "dup.py");
    assert_eq!(violation.kind, SymbolKind::Function);
    assert_eq!(violation.name, "foo");
    assert_eq!(violation.count, 2);

    let err =
        ensure_unique_symbols(&report.modules, &PathPrefixFilter::empty()).unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("found 1 duplicate symbol definition(s):"));
    assert!(message.contains("dup.py :: function 'foo' defined 2 times"));

    Ok(())
}

#[test]
fn test_function_and_class_namespaces_are_disjoint() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(
        temp_dir.path().join("mixed.py"),
        r#"def thing():
    pass

class thing:
    pass
"#,
    )?;

    let settings = settings_for(temp_dir.path());
    let report = scan(&settings)?;
    let outcome = run_checks(&report.modules, &settings);

    assert!(outcome.violations.is_empty());
    assert!(outcome.passed());

    Ok(())
}

#[test]
fn test_prefix_exclusion_applies_to_both_checks() -> Result<()> {
    let temp_dir = tempdir()?;
    let legacy_dir = temp_dir.path().join("legacy");
    fs::create_dir_all(&legacy_dir)?;
    fs::write(legacy_dir.join("__init__.py"), "")?;
    fs::write(
        legacy_dir.join("a.py"),
        r#"from .b import helper

def f():
    pass

def f():
    pass
"#,
    )?;
    fs::write(legacy_dir.join("b.py"), "from .a import f\n\ndef helper():\n    pass\n")?;
    fs::write(temp_dir.path().join("clean.py"), "def g():\n    pass\n")?;

    let mut settings = settings_for(temp_dir.path());
    settings.exclude_prefixes = Vec::new();

    let report = scan(&settings)?;

    // Unfiltered, the legacy package fails both checks
    let outcome = run_checks(&report.modules, &settings);
    assert!(outcome.cycle.is_some());
    assert_eq!(outcome.violations.len(), 1);

    // Excluding the prefix removes the vertices before edges are built,
    // so both findings disappear together
    settings.exclude_prefixes = vec!["legacy/".to_string()];
    let outcome = run_checks(&report.modules, &settings);
    assert!(outcome.cycle.is_none());
    assert!(outcome.violations.is_empty());
    assert!(outcome.passed());
    assert_eq!(outcome.graph.vertex_count(), 1);

    Ok(())
}

#[test]
fn test_over_deep_relative_import_falls_back_to_remainder() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(temp_dir.path().join("helpers.py"), "def x():\n    pass\n")?;
    fs::write(
        temp_dir.path().join("solo.py"),
        "from ...helpers import x\n",
    )?;

    let settings = settings_for(temp_dir.path());
    let report = scan(&settings)?;
    let outcome = run_checks(&report.modules, &settings);

    // Three dots exceed solo's depth; the remainder alone still resolves
    let deps = outcome
        .graph
        .dependencies_of("solo.py")
        .expect("solo.py must be a vertex");
    assert!(deps.contains("helpers.py"));
    assert!(outcome.passed());

    Ok(())
}

#[test]
fn test_unresolvable_imports_are_silently_dropped() -> Result<()> {
    let temp_dir = tempdir()?;
    fs::write(
        temp_dir.path().join("consumer.py"),
        r#"import os
import numpy as np
from collections import OrderedDict
from missing.module import thing
"#,
    )?;

    let settings = settings_for(temp_dir.path());
    let report = scan(&settings)?;

    // The record keeps every import statement
    let consumer = &report.modules[0];
    assert_eq!(consumer.imports.imports.len(), 2);
    assert_eq!(consumer.imports.from_imports.len(), 2);

    // None of them lands on a known module, so the graph stays edge-free
    let outcome = run_checks(&report.modules, &settings);
    assert_eq!(outcome.graph.edge_count(), 0);
    assert!(outcome.passed());

    Ok(())
}
