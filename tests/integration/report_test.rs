use std::fs;
use std::path::Path;
use tempfile::tempdir;
use modscan::{
    analysis::run_checks,
    core::Scanner,
    error::{ErrorSeverity, ModscanError, Result},
    models::{ScanReport, Settings},
    output::{Formatter, JsonFormatter},
};

fn create_checked_project(base_dir: &Path) -> Result<()> {
    let pkg_dir = base_dir.join("pkg");
    fs::create_dir_all(&pkg_dir)?;
    fs::write(pkg_dir.join("__init__.py"), "")?;
    fs::write(
        pkg_dir.join("core.py"),
        r#"from .api import serve

def boot():
    pass
"#,
    )?;
    fs::write(
        pkg_dir.join("api.py"),
        r#"from .core import boot

def serve():
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
fn test_report_json_matches_interchange_shape() -> Result<()> {
    let temp_dir = tempdir()?;
    create_checked_project(temp_dir.path())?;

    let settings = settings_for(temp_dir.path());
    let report = Scanner::new(settings).scan()?;
    assert!(report.diagnostics.is_empty());

    let json = JsonFormatter::new(false).format(&report)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;

    // The document is exactly the module list when no diagnostics exist
    let object = value.as_object().expect("report must be a JSON object");
    assert!(object.contains_key("modules"));
    assert!(!object.contains_key("diagnostics"));
    assert!(!object.contains_key("scan_duration"));

    let modules = value["modules"].as_array().unwrap();
    assert_eq!(modules.len(), 3);

    let api = &modules[1];
    assert_eq!(api["path"], "pkg/api.py");
    assert_eq!(api["functions"][0]["name"], "serve");
    assert!(api["classes"].as_array().unwrap().is_empty());
    assert_eq!(api["imports"]["from_imports"][0]["module"], ".core");
    assert_eq!(api["imports"]["from_imports"][0]["names"][0], "boot");
    assert!(api["imports"]["imports"].as_array().unwrap().is_empty());

    Ok(())
}

#[test]
fn test_saved_report_round_trips_with_identical_verdicts() -> Result<()> {
    let temp_dir = tempdir()?;
    create_checked_project(temp_dir.path())?;

    let settings = settings_for(temp_dir.path());
    let report = Scanner::new(settings.clone()).scan()?;

    let report_path = temp_dir.path().join("report.json");
    let json = JsonFormatter::new(true).format(&report)?;
    fs::write(&report_path, &json)?;

    let loaded = ScanReport::load_from_file(&report_path)?;
    assert_eq!(loaded.modules, report.modules);

    // Checking the loaded snapshot gives the same verdict as the live scan
    let live = run_checks(&report.modules, &settings);
    let replayed = run_checks(&loaded.modules, &settings);
    assert_eq!(live.cycle.is_some(), replayed.cycle.is_some());
    assert_eq!(
        live.cycle.as_ref().map(|w| w.to_string()),
        replayed.cycle.as_ref().map(|w| w.to_string())
    );
    assert_eq!(live.violations, replayed.violations);

    // The sample project holds a two-module cycle, so both runs fail
    assert!(!live.passed());
    assert!(!replayed.passed());

    Ok(())
}

#[test]
fn test_missing_report_file_fails_to_load() {
    let err = ScanReport::load_from_file(Path::new("/nonexistent/report.json")).unwrap_err();
    assert!(matches!(err, ModscanError::ReportRead { .. }));
    assert_eq!(err.severity(), ErrorSeverity::Critical);
}

#[test]
fn test_malformed_report_json_fails_to_load() -> Result<()> {
    let temp_dir = tempdir()?;
    let report_path = temp_dir.path().join("broken.json");
    fs::write(&report_path, "{ this is not json")?;

    let err = ScanReport::load_from_file(&report_path).unwrap_err();
    assert!(matches!(err, ModscanError::ReportParse { .. }));
    assert_eq!(err.severity(), ErrorSeverity::Critical);

    Ok(())
}

#[test]
fn test_duplicate_module_path_is_rejected() -> Result<()> {
    let temp_dir = tempdir()?;
    let report_path = temp_dir.path().join("dup.json");
    fs::write(
        &report_path,
        r#"{
  "modules": [
    {
      "path": "a.py",
      "functions": [],
      "classes": [],
      "imports": { "imports": [], "from_imports": [] }
    },
    {
      "path": "a.py",
      "functions": [],
      "classes": [],
      "imports": { "imports": [], "from_imports": [] }
    }
  ]
}"#,
    )?;

    let err = ScanReport::load_from_file(&report_path).unwrap_err();
    assert!(matches!(err, ModscanError::InvalidRecord { .. }));
    assert_eq!(err.severity(), ErrorSeverity::Critical);
    assert!(err.to_string().contains("a.py"));

    Ok(())
}

#[test]
fn test_diagnostics_serialize_only_when_present() -> Result<()> {
    let temp_dir = tempdir()?;
    create_checked_project(temp_dir.path())?;
    fs::write(temp_dir.path().join("bad.py"), "class Broken(:\n")?;

    let settings = settings_for(temp_dir.path());
    let report = Scanner::new(settings).scan()?;
    assert_eq!(report.diagnostics.len(), 1);

    let json = JsonFormatter::new(false).format(&report)?;
    let value: serde_json::Value = serde_json::from_str(&json)?;
    let diagnostics = value["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 1);

    Ok(())
}
