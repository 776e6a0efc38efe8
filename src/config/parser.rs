//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::file::DEFAULT_CONFIG_FILE;
use crate::error::{ModscanError, Result};
use crate::models::config::PartialSettings;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ModscanError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|source| ModscanError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content(content: &str, path: &Path) -> Result<PartialSettings> {
    let settings: PartialSettings =
        toml::from_str(content).map_err(|source| ModscanError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    validate_partial_settings(&settings)?;
    Ok(settings)
}

/// Reject values that are syntactically valid TOML but can never work
fn validate_partial_settings(settings: &PartialSettings) -> Result<()> {
    if let Some(scan_path) = &settings.scan_path {
        if scan_path.as_os_str().is_empty() {
            return Err(ModscanError::config_error("scan_path cannot be empty"));
        }
    }

    if let Some(output_file) = &settings.output_file {
        if output_file.as_os_str().is_empty() {
            return Err(ModscanError::config_error("output_file cannot be empty"));
        }
    }

    if let Some(patterns) = &settings.exclude_patterns {
        for pattern in patterns {
            if pattern.is_empty() {
                return Err(ModscanError::config_error(
                    "exclude_patterns cannot contain empty entries",
                ));
            }
            glob::Pattern::new(pattern).map_err(|e| {
                ModscanError::config_error(format!("invalid exclude pattern '{pattern}': {e}"))
            })?;
        }
    }

    if settings.max_depth == Some(0) {
        return Err(ModscanError::config_error("max_depth must be at least 1"));
    }

    if settings.threads == Some(0) {
        return Err(ModscanError::config_error("threads must be at least 1"));
    }

    Ok(())
}

/// Locate and parse the default configuration file, if one exists.
///
/// Search order: `.modscan.toml` in the current directory, then in the
/// home directory, then `modscan/config.toml` under the platform config
/// directory.
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    for candidate in default_config_candidates() {
        if candidate.is_file() {
            return parse_config_file(&candidate).map(Some);
        }
    }
    Ok(None)
}

fn default_config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];

    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(DEFAULT_CONFIG_FILE));
    }

    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("modscan").join("config.toml"));
    }

    candidates
}

/// Write the commented default configuration template to `path`
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let template = include_str!("default_config.toml");

    fs::write(path, template).map_err(|source| ModscanError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(())
}
