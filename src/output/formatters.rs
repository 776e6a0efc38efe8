//! Output formatting functionality
//!
//! This module provides formatters for different output formats.

use crate::error::{ModscanError, Result};
use crate::models::module_record::ModuleRecord;
use crate::models::report::{DiagnosticSeverity, ScanReport};
use ansi_term::Colour::{Blue, Cyan, Red, Yellow};
use ansi_term::Style;

/// Format a single module record as text
pub fn format_module_text(module: &ModuleRecord, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    // Dotted module name and file path
    if use_colors {
        output.push_str(&format!(
            "{} {}\n",
            Cyan.bold().paint(module.dotted_name()),
            Style::new().dimmed().paint(&module.path)
        ));
    } else {
        output.push_str(&format!("{} {}\n", module.dotted_name(), module.path));
    }

    output.push_str(&format!("  Functions: {}\n", module.functions.len()));
    output.push_str(&format!("  Classes: {}\n", module.classes.len()));
    output.push_str(&format!(
        "  Imports: {}\n",
        module.imports.imports.len() + module.imports.from_imports.len()
    ));

    if verbose {
        if !module.functions.is_empty() {
            output.push_str("  Function Names:\n");
            for function in &module.functions {
                output.push_str(&format!("    {}\n", function.name));
            }
        }

        if !module.classes.is_empty() {
            output.push_str("  Class Names:\n");
            for class in &module.classes {
                output.push_str(&format!("    {}\n", class.name));
            }
        }

        if !module.imports.imports.is_empty() {
            output.push_str("  Import Statements:\n");
            for import in &module.imports.imports {
                output.push_str(&format!("    import {}\n", import));
            }
        }

        if !module.imports.from_imports.is_empty() {
            output.push_str("  From Imports:\n");
            for from_import in &module.imports.from_imports {
                output.push_str(&format!(
                    "    from {} import {}\n",
                    from_import.module,
                    from_import.names.join(", ")
                ));
            }
        }
    }

    output.push('\n');
    output
}

/// Format a scan report as text
pub fn format_report_text(report: &ScanReport, use_colors: bool, verbose: bool) -> String {
    let mut output = String::new();

    // Summary header
    if use_colors {
        output.push_str(&format!("{}\n\n", Blue.bold().paint("Module Scan Summary")));
    } else {
        output.push_str("Module Scan Summary\n\n");
    }

    let summary = report.summary();

    output.push_str(&format!("Total modules: {}\n", summary.total_modules));
    output.push_str(&format!(
        "Package markers (__init__.py): {}\n",
        summary.package_count
    ));
    output.push_str(&format!("Functions: {}\n", summary.total_functions));
    output.push_str(&format!("Classes: {}\n", summary.total_classes));
    output.push_str(&format!("Plain imports: {}\n", summary.total_plain_imports));
    output.push_str(&format!("From imports: {}\n", summary.total_from_imports));
    output.push_str(&format!("Scan duration: {}\n", summary.format_duration()));

    // Diagnostics from files that could not be parsed
    if !report.diagnostics.is_empty() {
        if use_colors {
            output.push_str(&format!(
                "\n{}\n",
                Yellow
                    .bold()
                    .paint(format!("Diagnostics: {}", report.diagnostics.len()))
            ));
        } else {
            output.push_str(&format!("\nDiagnostics: {}\n", report.diagnostics.len()));
        }

        for diagnostic in &report.diagnostics {
            let severity_str = match diagnostic.severity {
                DiagnosticSeverity::Warning => {
                    if use_colors {
                        Yellow.paint("WARNING").to_string()
                    } else {
                        "WARNING".to_string()
                    }
                }
                DiagnosticSeverity::Error => {
                    if use_colors {
                        Red.paint("ERROR").to_string()
                    } else {
                        "ERROR".to_string()
                    }
                }
                DiagnosticSeverity::Critical => {
                    if use_colors {
                        Red.bold().paint("CRITICAL").to_string()
                    } else {
                        "CRITICAL".to_string()
                    }
                }
            };

            output.push_str(&format!(
                "  [{}] {}: {}\n",
                severity_str,
                diagnostic.path.display(),
                diagnostic.message
            ));
        }
    }

    // In non-verbose mode, list module names only
    if !verbose && !report.modules.is_empty() {
        output.push_str("\nModules:\n");
        for module in &report.modules {
            if use_colors {
                output.push_str(&format!(
                    "  {} {}\n",
                    Cyan.paint(module.dotted_name()),
                    Style::new().dimmed().paint(&module.path)
                ));
            } else {
                output.push_str(&format!("  {} {}\n", module.dotted_name(), module.path));
            }
        }
    }

    output
}

/// Format a scan report as JSON
pub fn format_report_json(report: &ScanReport, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    Ok(rendered)
}

/// Format a scan report as CSV
pub fn format_report_csv(report: &ScanReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);

    // Write header row
    writer.write_record([
        "Path",
        "Module",
        "Functions",
        "Classes",
        "Plain Imports",
        "From Imports",
    ])?;

    // Write data rows
    for module in &report.modules {
        writer.write_record([
            module.path.clone(),
            module.dotted_name(),
            module.functions.len().to_string(),
            module.classes.len().to_string(),
            module.imports.imports.len().to_string(),
            module.imports.from_imports.len().to_string(),
        ])?;
    }

    // Add summary row with empty cells for non-applicable fields
    let summary = report.summary();
    writer.write_record([
        "SUMMARY".to_string(),
        String::new(),
        summary.total_functions.to_string(),
        summary.total_classes.to_string(),
        summary.total_plain_imports.to_string(),
        summary.total_from_imports.to_string(),
    ])?;

    // Get the CSV data as a string
    let buffer = writer
        .into_inner()
        .map_err(|e| ModscanError::io_error(e.into_error()))?;
    let data = String::from_utf8(buffer).map_err(|e| ModscanError::CsvSerialize { source: e })?;

    Ok(data)
}
