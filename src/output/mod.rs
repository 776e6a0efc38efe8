//! Output formatting and writing functionality

mod formatters;
mod progress;
mod writers;

pub use self::progress::{create_progress_callback, ProgressReporter};
pub use self::writers::{create_writer, FileWriter, OutputWriter, StdoutWriter};

use crate::error::Result;
use crate::models::report::ScanReport;

/// Trait for different output formatters
pub trait Formatter {
    /// Format a scan report into a string
    fn format(&self, report: &ScanReport) -> Result<String>;
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    pub use_colors: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(use_colors: bool, verbose: bool, quiet: bool) -> Self {
        Self {
            use_colors,
            verbose,
            quiet,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        // In quiet mode, only output the headline numbers
        if self.quiet {
            let summary = report.summary();
            let mut output = format!(
                "Modules: {}, functions: {}, classes: {}, imports: {}\n",
                summary.total_modules,
                summary.total_functions,
                summary.total_classes,
                summary.total_plain_imports + summary.total_from_imports
            );

            if summary.diagnostics_count > 0 {
                output.push_str(&format!("Diagnostics: {}\n", summary.diagnostics_count));
            }

            return Ok(output);
        }

        let mut output = String::new();

        output.push_str(&formatters::format_report_text(
            report,
            self.use_colors,
            self.verbose,
        ));

        // In verbose mode, add details for each module
        if self.verbose {
            output.push_str("\nModule Details:\n\n");

            for module in &report.modules {
                output.push_str(&formatters::format_module_text(
                    module,
                    self.use_colors,
                    self.verbose,
                ));
            }
        }

        Ok(output)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        formatters::format_report_json(report, self.pretty)
    }
}

/// CSV formatter for spreadsheet analysis
pub struct CsvFormatter;

impl CsvFormatter {
    /// Create a new CSV formatter
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for CsvFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        formatters::format_report_csv(report)
    }
}

/// Create a formatter based on the output format
pub fn create_formatter(
    format: &crate::models::config::OutputFormat,
    use_colors: bool,
    verbose: bool,
    quiet: bool,
) -> Box<dyn Formatter> {
    match format {
        crate::models::config::OutputFormat::Text => {
            Box::new(TextFormatter::new(use_colors, verbose, quiet))
        }
        crate::models::config::OutputFormat::Json => {
            Box::new(JsonFormatter::new(true)) // Use pretty printing by default
        }
        crate::models::config::OutputFormat::Csv => Box::new(CsvFormatter::new()),
    }
}
