//! Command-line argument configuration source

use std::path::PathBuf;

use super::ConfigSource;
use crate::cli::args::{Args, OutputFormat as CliOutputFormat};
use crate::error::Result;
use crate::models::config::{OutputFormat, PartialSettings};

/// Command-line argument configuration source
#[derive(Debug)]
pub struct CliConfig {
    args: CliArgs,
    name: String,
    priority: u8,
}

/// Command-line arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub exclude: Option<Vec<String>>,
    pub exclude_prefixes: Option<Vec<String>>,
    pub allowed_cycles: Option<Vec<String>>,
    pub max_depth: Option<usize>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub graph_file: Option<PathBuf>,
    pub no_parallel: bool,
    pub threads: Option<usize>,
    pub quiet: bool,
    pub verbose: bool,
    pub follow_links: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Extract the configuration-affecting subset of the parsed arguments.
    ///
    /// Only flags the user actually passed become overrides; leaving a flag
    /// off keeps whatever lower-priority sources decided.
    pub fn from_args(args: &Args) -> Self {
        CliArgs {
            path: args.path.clone(),
            exclude: if args.exclude.is_empty() {
                None
            } else {
                Some(args.exclude.clone())
            },
            exclude_prefixes: if args.exclude_prefix.is_empty() {
                None
            } else {
                Some(args.exclude_prefix.clone())
            },
            allowed_cycles: if args.allow_cycle.is_empty() {
                None
            } else {
                Some(args.allow_cycle.clone())
            },
            max_depth: args.max_depth,
            output_format: args.output.map(|format| match format {
                CliOutputFormat::Text => OutputFormat::Text,
                CliOutputFormat::Json => OutputFormat::Json,
                CliOutputFormat::Csv => OutputFormat::Csv,
            }),
            output_file: args.output_file.clone(),
            graph_file: args.graph_file.clone(),
            no_parallel: args.no_parallel,
            threads: args.threads,
            quiet: args.quiet,
            verbose: args.verbose,
            follow_links: args.follow_links,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    /// Create a new CLI configuration source
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
            priority: 30, // Highest priority
        }
    }

    /// Create a CLI configuration source from Args
    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from_args(args))
    }

    /// Set the priority for this configuration source
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if let Some(path) = &self.args.path {
            settings.scan_path = Some(path.clone());
        }

        if let Some(exclude) = &self.args.exclude {
            settings.exclude_patterns = Some(exclude.clone());
        }

        if let Some(prefixes) = &self.args.exclude_prefixes {
            settings.exclude_prefixes = Some(prefixes.clone());
        }

        if let Some(cycles) = &self.args.allowed_cycles {
            settings.allowed_cycles = Some(cycles.clone());
        }

        if let Some(max_depth) = self.args.max_depth {
            settings.max_depth = Some(max_depth);
        }

        if let Some(format) = self.args.output_format {
            settings.output_format = Some(format);
        }

        if let Some(output_file) = &self.args.output_file {
            settings.output_file = Some(output_file.clone());
        }

        if let Some(graph_file) = &self.args.graph_file {
            settings.graph_file = Some(graph_file.clone());
        }

        if self.args.no_parallel {
            settings.parallel = Some(false);
        }

        if let Some(threads) = self.args.threads {
            settings.threads = Some(threads);
        }

        if self.args.quiet {
            settings.quiet = Some(true);
        }

        if self.args.verbose {
            settings.verbose = Some(true);
        }

        if self.args.follow_links {
            settings.follow_links = Some(true);
        }

        if self.args.no_colors {
            settings.use_colors = Some(false);
        }

        if self.args.no_progress {
            settings.show_progress = Some(false);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        // CLI args are always available
        true
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
