//! File and environment configuration sources

use std::env;
use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{ModscanError, Result};
use crate::models::config::{OutputFormat, PartialSettings};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".modscan.toml";

/// Configuration source backed by a TOML file
#[derive(Debug)]
pub struct FileConfig {
    path: PathBuf,
    name: String,
    priority: u8,
}

impl FileConfig {
    /// Create a file configuration source for the default file in the
    /// current directory
    pub fn new() -> Self {
        Self::with_path(PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Create a file configuration source for a specific path
    pub fn with_path(path: PathBuf) -> Self {
        let name = format!("config file ({})", path.display());
        Self {
            path,
            name,
            priority: 20,
        }
    }

    /// Set the priority for this configuration source
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Get the path of the configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a default configuration template to this source's path
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(ModscanError::ConfigNotFound {
                path: self.path.clone(),
            });
        }
        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}

/// Configuration source backed by environment variables
#[derive(Debug)]
pub struct EnvConfig {
    prefix: String,
    name: String,
    priority: u8,
}

impl EnvConfig {
    /// Create an environment configuration source with the given prefix
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            name: format!("environment variables ({prefix}_*)"),
            priority: 10,
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        env::var(format!("{}_{}", self.prefix, key)).ok()
    }

    fn list_var(&self, key: &str) -> Option<Vec<String>> {
        self.var(key).map(|value| {
            value
                .split(',')
                .map(|entry| entry.trim().to_string())
                .filter(|entry| !entry.is_empty())
                .collect()
        })
    }

    fn numeric_var(&self, key: &str) -> Result<Option<usize>> {
        match self.var(key) {
            Some(value) => {
                let parsed = value.parse::<usize>().map_err(|_| {
                    ModscanError::config_error(format!(
                        "invalid value for {}_{}: '{}'",
                        self.prefix, key, value
                    ))
                })?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if let Some(path) = self.var("SCAN_PATH") {
            settings.scan_path = Some(PathBuf::from(path));
        }

        settings.exclude_patterns = self.list_var("EXCLUDE");
        settings.exclude_prefixes = self.list_var("EXCLUDE_PREFIXES");
        settings.allowed_cycles = self.list_var("ALLOWED_CYCLES");
        settings.max_depth = self.numeric_var("MAX_DEPTH")?;
        settings.threads = self.numeric_var("THREADS")?;

        if let Some(format) = self.var("OUTPUT_FORMAT") {
            let parsed = format
                .parse::<OutputFormat>()
                .map_err(ModscanError::config_error)?;
            settings.output_format = Some(parsed);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        let marker = format!("{}_", self.prefix);
        env::vars().any(|(key, _)| key.starts_with(&marker))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> u8 {
        self.priority
    }
}
