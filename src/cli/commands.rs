//! Command implementations

use std::path::Path;
use std::sync::Arc;

use super::Args;
use crate::analysis::{run_checks, DependencyGraphBuilder, PathPrefixFilter};
use crate::config::{cli::CliArgs, load_config, FileConfig};
use crate::error::{try_with_recovery, ModscanError, Result, ResultExt};
use crate::models::config::{OutputFormat, Settings};
use crate::models::report::ScanReport;
use crate::output::{
    create_formatter, create_progress_callback, create_writer, FileWriter, OutputWriter,
    ProgressReporter,
};

/// Available commands
#[derive(Debug)]
pub enum Command {
    /// Scan a directory and emit the module report
    Scan(Args),
    /// Scan (or load a saved report) and run the import checks
    Check(Args),
    /// Initialize a default configuration file
    Init,
    /// Show detailed version information
    Version,
}

impl Command {
    /// Create a command from parsed arguments
    pub fn from_args(args: Args) -> Self {
        if args.init {
            return Command::Init;
        }

        if args.version_info {
            return Command::Version;
        }

        // A saved report only makes sense as check input
        if args.check || args.from_report.is_some() {
            return Command::Check(args);
        }

        Command::Scan(args)
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        match self {
            Command::Scan(args) => {
                self.validate()?;

                let settings = load_config(CliArgs::from_args(args))?;

                // JSON and CSV on stdout must stay machine-parseable
                let machine_stdout = settings.output_file.is_none()
                    && !matches!(settings.output_format, OutputFormat::Text);
                let chatty = !settings.quiet && !machine_stdout;

                if chatty {
                    println!(
                        "Modscan v{} - Python import analyzer",
                        env!("CARGO_PKG_VERSION")
                    );
                    println!("Scanning path: {}", settings.scan_path.display());
                    println!("Output format: {}", settings.output_format);

                    if settings.verbose {
                        println!("Settings: {:#?}", settings);
                    }
                }

                let report = scan_report(&settings)?;

                // When the report goes to a file, keep stdout informative
                if chatty && settings.output_file.is_some() {
                    print_scan_summary(&report);
                }

                let formatter = create_formatter(
                    &settings.output_format,
                    settings.use_colors,
                    settings.verbose,
                    settings.quiet,
                );
                let formatted = formatter
                    .format(&report)
                    .with_context(|| format!("Failed to format results as {}", settings.output_format))?;
                create_writer(settings.output_file.as_ref()).write(&formatted)?;

                if let Some(output_path) = &settings.output_file {
                    if chatty {
                        println!("Report written to {}", output_path.display());
                    }
                }

                if let Some(graph_path) = &settings.graph_file {
                    let written =
                        try_with_recovery(|| export_graph(&report, &settings, graph_path))?;
                    if written.is_some() && chatty {
                        println!("Dependency graph written to {}", graph_path.display());
                    }
                }

                Ok(())
            }
            Command::Check(args) => {
                self.validate()?;

                let settings = load_config(CliArgs::from_args(args))?;

                if !settings.quiet {
                    println!(
                        "Modscan v{} - Python import analyzer",
                        env!("CARGO_PKG_VERSION")
                    );

                    if settings.verbose {
                        println!("Settings: {:#?}", settings);
                    }
                }

                let report = match &args.from_report {
                    Some(report_path) => {
                        if !settings.quiet {
                            println!("Loading report from {}", report_path.display());
                        }
                        ScanReport::load_from_file(report_path)?
                    }
                    None => {
                        if !settings.quiet {
                            println!("Scanning path: {}", settings.scan_path.display());
                        }
                        scan_report(&settings)?
                    }
                };

                let reporter = ProgressReporter::new(settings.quiet, settings.verbose);
                let spinner = if settings.show_progress {
                    reporter.create_spinner(&format!("Checking {} modules", report.modules.len()))
                } else {
                    None
                };

                let outcome = run_checks(&report.modules, &settings);

                if let Some(spinner) = spinner {
                    spinner.finish_and_clear();
                }

                if settings.verbose {
                    let stats = outcome.graph.statistics();
                    reporter.print_verbose(&format!(
                        "Graph: {} vertices, {} edges",
                        stats.vertex_count, stats.edge_count
                    ));
                    if let Some(module) = &stats.max_fan_out_module {
                        reporter.print_verbose(&format!(
                            "Widest importer: {} ({} imports)",
                            module, stats.max_fan_out
                        ));
                    }
                    if let Some(module) = &stats.max_fan_in_module {
                        reporter.print_verbose(&format!(
                            "Most imported: {} ({} importers)",
                            module, stats.max_fan_in
                        ));
                    }
                }

                // Persist the snapshot before the verdict can fail the run
                if settings.output_file.is_some() {
                    let formatter = create_formatter(
                        &settings.output_format,
                        settings.use_colors,
                        settings.verbose,
                        settings.quiet,
                    );
                    let formatted = formatter.format(&report)?;
                    create_writer(settings.output_file.as_ref()).write(&formatted)?;

                    if let Some(output_path) = &settings.output_file {
                        reporter.print(&format!("Report written to {}", output_path.display()));
                    }
                }

                if let Some(graph_path) = &settings.graph_file {
                    let written =
                        try_with_recovery(|| export_graph(&report, &settings, graph_path))?;
                    if written.is_some() {
                        reporter
                            .print(&format!("Dependency graph written to {}", graph_path.display()));
                    }
                }

                let duplicates = if outcome.violations.is_empty() {
                    None
                } else {
                    Some(ModscanError::DuplicateSymbols {
                        violations: outcome.violations,
                    })
                };
                let cycle = outcome
                    .cycle
                    .map(|witness| ModscanError::CycleDetected { witness });

                match (duplicates, cycle) {
                    (None, None) => {
                        reporter.print(&format!(
                            "All checks passed: {} modules, no import cycles, no duplicate symbols.",
                            report.modules.len()
                        ));
                        Ok(())
                    }
                    (Some(duplicates), Some(cycle)) => {
                        // Both checks failed; run() reports the returned error
                        eprintln!("{}: {}", cycle.severity(), cycle.user_message());
                        Err(duplicates)
                    }
                    (Some(duplicates), None) => Err(duplicates),
                    (None, Some(cycle)) => Err(cycle),
                }
            }
            Command::Init => {
                let config = FileConfig::new();

                // Check if the file already exists
                if config.path().exists() {
                    println!(
                        "Configuration file already exists at: {}",
                        config.path().display()
                    );
                    println!("To overwrite it, delete the file first and run this command again.");
                    return Ok(());
                }

                config.create_default()?;

                println!(
                    "Created default configuration file at: {}",
                    config.path().display()
                );
                println!("\nThe configuration file contains default settings that you can customize.");
                println!("\nExample configuration options:");
                println!("  - scan_path: Directory to scan for Python modules");
                println!("  - exclude_patterns: Glob patterns for files and directories to skip");
                println!("  - exclude_prefixes: Module path prefixes dropped before checks");
                println!("  - allowed_cycles: Module paths whose mutual cycles are tolerated");
                println!("  - output_format: Output format (text, json, csv)");

                Ok(())
            }
            Command::Version => {
                println!("Modscan v{}", env!("CARGO_PKG_VERSION"));
                println!("A static import and symbol analyzer for Python codebases");
                println!("Parsing: rustpython-parser (source is never executed)");
                println!("License: MIT");
                Ok(())
            }
        }
    }

    /// Validate the command arguments
    pub fn validate(&self) -> Result<()> {
        match self {
            Command::Scan(args) | Command::Check(args) => {
                // Validate path if provided
                if let Some(path) = &args.path {
                    if !path.exists() {
                        return Err(ModscanError::InvalidPath { path: path.clone() });
                    }
                }

                // Validate config file if provided
                if let Some(config_path) = &args.config {
                    if !config_path.exists() {
                        return Err(ModscanError::ConfigNotFound {
                            path: config_path.clone(),
                        });
                    }
                }

                Ok(())
            }
            // No validation needed for these commands
            Command::Version | Command::Init => Ok(()),
        }
    }

    /// Run the command and handle errors
    pub fn run(&self) -> i32 {
        match self.execute() {
            Ok(_) => 0,
            Err(err) => {
                // Print user-friendly error message
                eprintln!("{}: {}", err.severity(), err.user_message());

                // Return appropriate exit code based on error severity
                match err.severity() {
                    crate::error::ErrorSeverity::Warning => 0, // Warnings don't cause failure
                    crate::error::ErrorSeverity::Error => 1,   // Regular errors
                    crate::error::ErrorSeverity::Critical => 2, // Critical errors
                }
            }
        }
    }
}

/// Scan the configured path and return the module report.
///
/// Parallel scans report progress through a ProgressReporter; sequential
/// scans print plain progress lines.
fn scan_report(settings: &Settings) -> Result<ScanReport> {
    if settings.parallel {
        let scanner = crate::core::ParallelScanner::new(settings.clone());

        if settings.show_progress && !settings.quiet {
            let reporter = Arc::new(ProgressReporter::new(settings.quiet, settings.verbose));
            reporter.start(0, &format!("Scanning {}", settings.scan_path.display()));

            let progress_callback = create_progress_callback(reporter.clone());
            let report = scanner.scan_with_progress(progress_callback)?;

            reporter.finish(&format!("Parsed {} modules", report.modules.len()));
            Ok(report)
        } else {
            scanner.scan()
        }
    } else {
        let scanner = crate::core::Scanner::new(settings.clone());

        if settings.show_progress && !settings.quiet {
            scanner.scan_with_progress(|current, total, message| {
                println!("[{}/{}] {}", current, total, message);
            })
        } else {
            scanner.scan()
        }
    }
}

/// Print the scan summary block used when the report itself goes to a file
fn print_scan_summary(report: &ScanReport) {
    let summary = report.summary();

    println!("\nScan Summary:");
    println!("-------------");
    println!("Total modules: {}", summary.total_modules);
    println!("Package markers: {}", summary.package_count);
    println!("Functions: {}", summary.total_functions);
    println!("Classes: {}", summary.total_classes);
    println!(
        "Imports: {} plain, {} from",
        summary.total_plain_imports, summary.total_from_imports
    );
    println!("Scan duration: {}", summary.format_duration());

    if summary.diagnostics_count > 0 {
        println!("Diagnostics: {}", summary.diagnostics_count);
    }

    println!(
        "\nScan completed at: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
}

/// Export the dependency graph for `report` in DOT format.
///
/// The exported graph honors the same path-prefix exclusions as the checks.
fn export_graph(report: &ScanReport, settings: &Settings, path: &Path) -> Result<()> {
    let filter = PathPrefixFilter::new(settings.exclude_prefixes.clone());
    let graph = DependencyGraphBuilder::new(&report.modules, &filter).build();

    FileWriter::new(path).write(&graph.to_dot())
}
