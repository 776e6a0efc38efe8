use std::fs;
use std::path::Path;
use tempfile::tempdir;
use modscan::{
    analysis::run_checks,
    core::{ParallelScanner, Scanner},
    error::Result,
    models::Settings,
    output::{Formatter, JsonFormatter},
};

/// Create a project wide enough that parallel extraction visits files in a
/// nondeterministic order: an import chain, a package with relative imports,
/// a two-module cycle, and a duplicate definition.
fn create_wide_project(base_dir: &Path) -> Result<()> {
    for i in 0..12 {
        let source = if i < 11 {
            format!("import mod_{:02}\n\ndef f_{:02}():\n    pass\n", i + 1, i)
        } else {
            format!("def f_{:02}():\n    pass\n", i)
        };
        fs::write(base_dir.join(format!("mod_{:02}.py", i)), source)?;
    }

    let pkg_dir = base_dir.join("pkg");
    fs::create_dir_all(&pkg_dir)?;
    fs::write(pkg_dir.join("__init__.py"), "")?;
    fs::write(pkg_dir.join("base.py"), "class Base:\n    pass\n")?;
    fs::write(
        pkg_dir.join("derived.py"),
        "from .base import Base\n\nclass Derived(Base):\n    pass\n",
    )?;

    let ring_dir = base_dir.join("ring");
    fs::create_dir_all(&ring_dir)?;
    fs::write(ring_dir.join("__init__.py"), "")?;
    fs::write(ring_dir.join("r1.py"), "from .r2 import g\n")?;
    fs::write(ring_dir.join("r2.py"), "from .r1 import h\n\ndef g():\n    pass\n")?;

    fs::write(
        base_dir.join("dup.py"),
        "def twice():\n    pass\n\ndef twice():\n    pass\n",
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
fn test_repeated_scans_serialize_identically() -> Result<()> {
    let temp_dir = tempdir()?;
    create_wide_project(temp_dir.path())?;

    let settings = settings_for(temp_dir.path());
    let formatter = JsonFormatter::new(true);

    let first = formatter.format(&Scanner::new(settings.clone()).scan()?)?;
    let second = formatter.format(&Scanner::new(settings).scan()?)?;

    // Wall-clock duration never reaches the document, so an unchanged tree
    // yields a byte-identical report
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_parallel_scan_serializes_like_sequential() -> Result<()> {
    let temp_dir = tempdir()?;
    create_wide_project(temp_dir.path())?;

    let settings = settings_for(temp_dir.path());
    let formatter = JsonFormatter::new(true);

    let sequential = formatter.format(&Scanner::new(settings.clone()).scan()?)?;

    let mut parallel_settings = settings;
    parallel_settings.threads = Some(3);
    let parallel = formatter.format(&ParallelScanner::new(parallel_settings).scan()?)?;

    assert_eq!(sequential, parallel);

    Ok(())
}

#[test]
fn test_check_verdicts_stable_across_reruns() -> Result<()> {
    let temp_dir = tempdir()?;
    create_wide_project(temp_dir.path())?;

    let settings = settings_for(temp_dir.path());
    let report = Scanner::new(settings.clone()).scan()?;

    let first = run_checks(&report.modules, &settings);
    let second = run_checks(&report.modules, &settings);

    let first_witness = first.cycle.expect("ring must cycle").to_string();
    let second_witness = second.cycle.expect("ring must cycle").to_string();
    assert_eq!(first_witness, second_witness);
    assert_eq!(first.violations, second.violations);

    // The same verdict also comes out of a fresh scan of the same tree
    let rescan = Scanner::new(settings.clone()).scan()?;
    let third = run_checks(&rescan.modules, &settings);
    assert_eq!(third.cycle.map(|w| w.to_string()), Some(first_witness));
    assert_eq!(third.violations, first.violations);

    Ok(())
}

#[test]
fn test_graph_export_is_stable() -> Result<()> {
    let temp_dir = tempdir()?;
    create_wide_project(temp_dir.path())?;

    let settings = settings_for(temp_dir.path());

    let first_report = Scanner::new(settings.clone()).scan()?;
    let first_dot = run_checks(&first_report.modules, &settings).graph.to_dot();

    let second_report = Scanner::new(settings.clone()).scan()?;
    let second_dot = run_checks(&second_report.modules, &settings).graph.to_dot();

    assert!(first_dot.starts_with("digraph imports {"));
    assert_eq!(first_dot, second_dot);

    Ok(())
}
