use std::fs;
use std::path::Path;
use tempfile::tempdir;
use modscan::{
    core::{ParallelScanner, Scanner},
    error::Result,
    models::Settings,
};

/// Create a small but realistic Python project:
/// a top-level script, one package with a subpackage, and a module that
/// exercises aliased and relative imports.
fn create_sample_project(base_dir: &Path) -> Result<()> {
    fs::write(
        base_dir.join("app.py"),
        r#"import os
import sys as system
from pkg.util import render

def main():
    render()

def helper():
    pass
"#,
    )?;

    let pkg_dir = base_dir.join("pkg");
    fs::create_dir_all(&pkg_dir)?;
    fs::write(pkg_dir.join("__init__.py"), "")?;
    fs::write(
        pkg_dir.join("util.py"),
        r#"import json
from . import formats
from .sub.leaf import walk

def render():
    pass

class Renderer:
    pass
"#,
    )?;
    fs::write(
        pkg_dir.join("formats.py"),
        r#"def encode():
    pass

def decode():
    pass
"#,
    )?;

    let sub_dir = pkg_dir.join("sub");
    fs::create_dir_all(&sub_dir)?;
    fs::write(sub_dir.join("__init__.py"), "")?;
    fs::write(
        sub_dir.join("leaf.py"),
        r#"from ..formats import encode

def walk():
    pass
"#,
    )?;

    Ok(())
}

fn settings_for(base_dir: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.scan_path = base_dir.to_path_buf();
    settings.quiet = true;
    settings.show_progress = false;
    settings
}

#[test]
fn test_scan_finds_all_modules_in_sorted_order() -> Result<()> {
    let temp_dir = tempdir()?;
    create_sample_project(temp_dir.path())?;

    let scanner = Scanner::new(settings_for(temp_dir.path()));
    let report = scanner.scan()?;

    // Six .py files, no diagnostics
    assert_eq!(report.modules.len(), 6);
    assert!(report.diagnostics.is_empty());

    let paths: Vec<&str> = report.modules.iter().map(|m| m.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "app.py",
            "pkg/__init__.py",
            "pkg/formats.py",
            "pkg/sub/__init__.py",
            "pkg/sub/leaf.py",
            "pkg/util.py",
        ]
    );

    // Paths are root-relative with forward slashes regardless of platform
    for path in &paths {
        assert!(!path.contains('\\'));
        assert!(!path.starts_with('/'));
    }

    Ok(())
}

#[test]
fn test_scan_records_symbols_in_definition_order() -> Result<()> {
    let temp_dir = tempdir()?;
    create_sample_project(temp_dir.path())?;

    let scanner = Scanner::new(settings_for(temp_dir.path()));
    let report = scanner.scan()?;

    let app = report
        .modules
        .iter()
        .find(|m| m.path == "app.py")
        .expect("app.py should be in the report");
    let function_names: Vec<&str> = app.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(function_names, vec!["main", "helper"]);
    assert!(app.classes.is_empty());

    let util = report
        .modules
        .iter()
        .find(|m| m.path == "pkg/util.py")
        .expect("pkg/util.py should be in the report");
    let class_names: Vec<&str> = util.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(class_names, vec!["Renderer"]);
    assert_eq!(util.dotted_name(), "pkg.util");

    Ok(())
}

#[test]
fn test_scan_records_imports_with_aliases_and_relative_forms() -> Result<()> {
    let temp_dir = tempdir()?;
    create_sample_project(temp_dir.path())?;

    let scanner = Scanner::new(settings_for(temp_dir.path()));
    let report = scanner.scan()?;

    let app = report.modules.iter().find(|m| m.path == "app.py").unwrap();
    // Plain imports keep the alias form verbatim
    assert_eq!(
        app.imports.imports,
        vec!["os".to_string(), "sys as system".to_string()]
    );
    assert_eq!(app.imports.from_imports.len(), 1);
    assert_eq!(app.imports.from_imports[0].module, "pkg.util");
    assert_eq!(app.imports.from_imports[0].names, vec!["render".to_string()]);

    let util = report
        .modules
        .iter()
        .find(|m| m.path == "pkg/util.py")
        .unwrap();
    // Relative imports carry their leading dots
    let from_modules: Vec<&str> = util
        .imports
        .from_imports
        .iter()
        .map(|fi| fi.module.as_str())
        .collect();
    assert_eq!(from_modules, vec![".", ".sub.leaf"]);

    let leaf = report
        .modules
        .iter()
        .find(|m| m.path == "pkg/sub/leaf.py")
        .unwrap();
    assert_eq!(leaf.imports.from_imports[0].module, "..formats");
    assert_eq!(
        leaf.imports.from_imports[0].names,
        vec!["encode".to_string()]
    );

    Ok(())
}

#[test]
fn test_scan_marks_package_initializers() -> Result<()> {
    let temp_dir = tempdir()?;
    create_sample_project(temp_dir.path())?;

    let scanner = Scanner::new(settings_for(temp_dir.path()));
    let report = scanner.scan()?;

    let markers: Vec<&str> = report
        .modules
        .iter()
        .filter(|m| m.is_package_marker())
        .map(|m| m.path.as_str())
        .collect();
    assert_eq!(markers, vec!["pkg/__init__.py", "pkg/sub/__init__.py"]);

    // The package marker takes the dotted name of its directory
    let pkg_init = report
        .modules
        .iter()
        .find(|m| m.path == "pkg/__init__.py")
        .unwrap();
    assert_eq!(pkg_init.dotted_name(), "pkg");

    let summary = report.summary();
    assert_eq!(summary.total_modules, 6);
    assert_eq!(summary.package_count, 2);

    Ok(())
}

#[test]
fn test_scan_applies_exclude_patterns() -> Result<()> {
    let temp_dir = tempdir()?;
    create_sample_project(temp_dir.path())?;

    // Directories the default patterns cover
    let cache_dir = temp_dir.path().join("__pycache__");
    fs::create_dir_all(&cache_dir)?;
    fs::write(cache_dir.join("cached.py"), "def stale():\n    pass\n")?;

    // A custom pattern on top of the defaults
    let generated_dir = temp_dir.path().join("generated");
    fs::create_dir_all(&generated_dir)?;
    fs::write(generated_dir.join("stubs.py"), "def stub():\n    pass\n")?;

    let mut settings = settings_for(temp_dir.path());
    settings.exclude_patterns.push("generated".to_string());

    let scanner = Scanner::new(settings);
    let report = scanner.scan()?;

    let paths: Vec<&str> = report.modules.iter().map(|m| m.path.as_str()).collect();
    assert!(!paths.iter().any(|p| p.starts_with("__pycache__")));
    assert!(!paths.iter().any(|p| p.starts_with("generated")));
    assert_eq!(report.modules.len(), 6);

    Ok(())
}

#[test]
fn test_scan_respects_max_depth() -> Result<()> {
    let temp_dir = tempdir()?;
    create_sample_project(temp_dir.path())?;

    let mut settings = settings_for(temp_dir.path());
    settings.max_depth = Some(1);

    let scanner = Scanner::new(settings);
    let report = scanner.scan()?;

    // pkg/sub/ lies two levels down and is skipped
    let paths: Vec<&str> = report.modules.iter().map(|m| m.path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["app.py", "pkg/__init__.py", "pkg/formats.py", "pkg/util.py"]
    );

    Ok(())
}

#[test]
fn test_syntax_error_becomes_diagnostic_not_failure() -> Result<()> {
    let temp_dir = tempdir()?;
    create_sample_project(temp_dir.path())?;
    fs::write(
        temp_dir.path().join("broken.py"),
        "def broken(:\n    pass\n",
    )?;

    let scanner = Scanner::new(settings_for(temp_dir.path()));
    let report = scanner.scan()?;

    // The unparseable file is reported, the rest of the tree still lands
    assert_eq!(report.modules.len(), 6);
    assert_eq!(report.diagnostics.len(), 1);
    assert!(report.diagnostics[0]
        .path
        .to_string_lossy()
        .ends_with("broken.py"));
    assert!(!report
        .modules
        .iter()
        .any(|m| m.path.as_str() == "broken.py"));

    Ok(())
}

#[test]
fn test_scan_missing_path_fails() {
    let mut settings = Settings::default();
    settings.scan_path = Path::new("/nonexistent/modscan/test/path").to_path_buf();

    let scanner = Scanner::new(settings);
    assert!(scanner.scan().is_err());
}

#[test]
fn test_parallel_scanner_matches_sequential() -> Result<()> {
    let temp_dir = tempdir()?;
    create_sample_project(temp_dir.path())?;

    let sequential = Scanner::new(settings_for(temp_dir.path())).scan()?;

    let mut parallel_settings = settings_for(temp_dir.path());
    parallel_settings.threads = Some(2);
    let parallel = ParallelScanner::new(parallel_settings).scan()?;

    assert_eq!(sequential.modules.len(), parallel.modules.len());
    for (seq, par) in sequential.modules.iter().zip(parallel.modules.iter()) {
        assert_eq!(seq, par);
    }

    Ok(())
}

#[test]
fn test_empty_directory_yields_empty_report() -> Result<()> {
    let temp_dir = tempdir()?;

    let scanner = Scanner::new(settings_for(temp_dir.path()));
    let report = scanner.scan()?;

    assert!(report.modules.is_empty());
    assert!(report.diagnostics.is_empty());
    assert_eq!(report.summary().total_modules, 0);

    Ok(())
}
