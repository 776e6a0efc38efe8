//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Main configuration settings for modscan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root directory to scan for Python modules
    pub scan_path: PathBuf,

    /// Glob patterns excluded during directory traversal
    pub exclude_patterns: Vec<String>,

    /// Module path prefixes excluded from analysis (vertices dropped before
    /// edges are considered; applies to both detectors)
    pub exclude_prefixes: Vec<String>,

    /// Module paths forming reviewed, tolerated import cycles
    pub allowed_cycles: Vec<String>,

    /// Maximum directory depth to traverse
    pub max_depth: Option<usize>,

    /// Output format (text, json, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Graphviz DOT export target for the dependency graph
    pub graph_file: Option<PathBuf>,

    /// Whether to extract files in parallel
    pub parallel: bool,

    /// Worker thread count for parallel extraction (defaults to CPU count)
    pub threads: Option<usize>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to follow symbolic links during directory traversal
    pub follow_links: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress bars
    pub show_progress: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scan_path: PathBuf::from("."),
            exclude_patterns: vec![
                ".git".to_string(),
                "__pycache__".to_string(),
                ".venv".to_string(),
                "venv".to_string(),
                ".tox".to_string(),
                ".mypy_cache".to_string(),
                ".pytest_cache".to_string(),
                "build".to_string(),
                "dist".to_string(),
                "*.egg-info".to_string(),
            ],
            exclude_prefixes: vec!["tests/".to_string()],
            allowed_cycles: Vec::new(),
            max_depth: None,
            output_format: OutputFormat::Text,
            output_file: None,
            graph_file: None,
            parallel: true,
            threads: None,
            quiet: false,
            verbose: false,
            follow_links: false,
            use_colors: true,
            show_progress: true,
        }
    }
}

impl Settings {
    /// The cycle allow-list as the set the detector consumes
    pub fn allowed_cycle_set(&self) -> BTreeSet<String> {
        self.allowed_cycles.iter().cloned().collect()
    }
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Invalid output format: {}", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Partial settings for configuration merging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartialSettings {
    pub scan_path: Option<PathBuf>,
    pub exclude_patterns: Option<Vec<String>>,
    pub exclude_prefixes: Option<Vec<String>>,
    pub allowed_cycles: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub graph_file: Option<PathBuf>,
    pub parallel: Option<bool>,
    pub threads: Option<usize>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub follow_links: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.scan_path.is_some() {
            self.scan_path = other.scan_path;
        }
        if other.exclude_patterns.is_some() {
            self.exclude_patterns = other.exclude_patterns;
        }
        if other.exclude_prefixes.is_some() {
            self.exclude_prefixes = other.exclude_prefixes;
        }
        if other.allowed_cycles.is_some() {
            self.allowed_cycles = other.allowed_cycles;
        }
        if other.max_depth.is_some() {
            self.max_depth = other.max_depth;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.graph_file.is_some() {
            self.graph_file = other.graph_file;
        }
        if other.parallel.is_some() {
            self.parallel = other.parallel;
        }
        if other.threads.is_some() {
            self.threads = other.threads;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.follow_links.is_some() {
            self.follow_links = other.follow_links;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(scan_path) = &self.scan_path {
            settings.scan_path = scan_path.clone();
        }
        if let Some(exclude_patterns) = &self.exclude_patterns {
            settings.exclude_patterns = exclude_patterns.clone();
        }
        if let Some(exclude_prefixes) = &self.exclude_prefixes {
            settings.exclude_prefixes = exclude_prefixes.clone();
        }
        if let Some(allowed_cycles) = &self.allowed_cycles {
            settings.allowed_cycles = allowed_cycles.clone();
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = Some(max_depth);
        }
        if let Some(output_format) = self.output_format {
            settings.output_format = output_format;
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(graph_file) = &self.graph_file {
            settings.graph_file = Some(graph_file.clone());
        }
        if let Some(parallel) = self.parallel {
            settings.parallel = parallel;
        }
        if let Some(threads) = self.threads {
            settings.threads = Some(threads);
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(follow_links) = self.follow_links {
            settings.follow_links = follow_links;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }

        settings
    }
}
