//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Modscan - static import and symbol analyzer for Python codebases
#[derive(Parser, Debug)]
#[command(name = "modscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scan Python sources for module structure, import cycles, and duplicate symbols")]
#[command(long_about = "Modscan statically analyzes a Python codebase without executing it. \
It walks a directory tree, parses every .py file, and records the functions, classes, and import \
statements of each module. From those records it builds a module dependency graph and checks it for \
import cycles and duplicate top-level symbol definitions.")]
#[command(after_help = "EXAMPLES:

Basic Usage:
    # Scan the current directory
    modscan

    # Scan a specific directory
    modscan --path ./my-project

    # Exclude files and directories by glob pattern (can specify multiple)
    modscan --exclude __pycache__ --exclude '*.egg-info'

    # Limit directory traversal depth
    modscan --max-depth 3

Checks:
    # Fail on import cycles and duplicate symbols
    modscan --check

    # Tolerate a known cycle between two modules
    modscan --check --allow-cycle pkg/a.py --allow-cycle pkg/b.py

    # Drop a subtree from the checks entirely
    modscan --check --exclude-prefix tests/

    # Re-run the checks against a saved report without rescanning
    modscan --check --from-report report.json

Output Options:
    # Output in JSON format
    modscan --output json

    # Output in CSV format for spreadsheet analysis
    modscan --output csv

    # Save results to a file
    modscan --output-file report.json

    # Export the dependency graph in DOT format
    modscan --graph-file imports.dot

    # Disable colored output
    modscan --no-colors

Performance Options:
    # Disable parallel parsing
    modscan --no-parallel

    # Limit the worker thread count
    modscan --threads 2

    # Disable progress bars
    modscan --no-progress

Configuration:
    # Use a specific configuration file
    modscan --config ./modscan.toml

    # Create a default configuration file
    modscan --init

Verbosity:
    # Quiet mode with minimal output
    modscan --quiet

    # Verbose mode with per-module details
    modscan --verbose

Common Workflows:
    # Gate a CI pipeline on a clean import graph
    modscan --path ./src --check --exclude-prefix tests/

    # Produce a machine-readable snapshot for later checking
    modscan --path ./src --output json --output-file report.json

    # Inspect a codebase in detail
    modscan --path ./src --verbose
")]
pub struct Args {
    /// Target directory to scan
    #[arg(short, long, value_name = "PATH", help = "Directory to scan for Python modules (defaults to current directory if not specified)")]
    pub path: Option<PathBuf>,

    /// Exclude files and directories matching these glob patterns
    #[arg(short, long, value_name = "PATTERN", help = "Glob patterns for files and directories to exclude (can be specified multiple times, e.g., --exclude __pycache__ --exclude '*.egg-info')")]
    pub exclude: Vec<String>,

    /// Drop modules under these path prefixes before running checks
    #[arg(long, value_name = "PREFIX", help = "Module path prefixes removed from the dependency graph before checks (can be specified multiple times, e.g., --exclude-prefix tests/)")]
    pub exclude_prefix: Vec<String>,

    /// Tolerate cycles confined to these module paths
    #[arg(long, value_name = "MODULE", help = "Module paths whose mutual import cycles are tolerated; a cycle fails unless every module in it is listed (can be specified multiple times)")]
    pub allow_cycle: Vec<String>,

    /// Maximum depth for directory traversal
    #[arg(long, value_name = "DEPTH", help = "Maximum directory depth to traverse (e.g., 3 will scan up to 3 levels deep from the starting directory)")]
    pub max_depth: Option<usize>,

    /// Output format (text, json, csv)
    #[arg(short, long, value_enum, value_name = "FORMAT", help = "Output format for results: 'text' for human-readable output, 'json' for machine processing, 'csv' for spreadsheet analysis")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write output to (uses stdout if not specified, e.g., --output-file ./report.json)")]
    pub output_file: Option<PathBuf>,

    /// Export the dependency graph in DOT format
    #[arg(long, value_name = "FILE", help = "Export the module dependency graph to a DOT format file for visualization")]
    pub graph_file: Option<PathBuf>,

    /// Run checks against a previously saved JSON report
    #[arg(long, value_name = "FILE", help = "Load module records from a saved JSON report instead of scanning the filesystem (implies --check)")]
    pub from_report: Option<PathBuf>,

    /// Check the scanned modules for cycles and duplicate symbols
    #[arg(long, help = "Check the import graph for cycles and every module for duplicate top-level symbols; exits nonzero when a check fails")]
    pub check: bool,

    /// Suppress non-essential output
    #[arg(short, long, help = "Suppress non-essential output (only show results, no progress or summary information)")]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long, help = "Show detailed progress and debug information (includes per-module details and configuration information)")]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .modscan.toml in current directory if not specified)")]
    pub config: Option<PathBuf>,

    /// Disable parallel parsing
    #[arg(long, help = "Disable parallel parsing (uses single-threaded mode, may be slower but uses less memory)")]
    pub no_parallel: bool,

    /// Number of worker threads for parallel parsing
    #[arg(long, value_name = "COUNT", help = "Number of worker threads for parallel parsing (defaults to the CPU count)")]
    pub threads: Option<usize>,

    /// Follow symbolic links during directory traversal
    #[arg(long, help = "Follow symbolic links during directory traversal (may cause infinite loops or duplicate records if links form cycles)")]
    pub follow_links: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output (useful for terminals that don't support ANSI colors or for piping output)")]
    pub no_colors: bool,

    /// Disable progress bars
    #[arg(long, help = "Disable progress bars (useful for CI environments or when redirecting output)")]
    pub no_progress: bool,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.modscan.toml) in the current directory")]
    pub init: bool,

    /// Show detailed version information
    #[arg(long, help = "Show detailed version and build information")]
    pub version_info: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
