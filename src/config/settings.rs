//! Final settings validation

use std::path::Path;

use crate::error::{ModscanError, Result};
use crate::models::config::Settings;

/// Validator applied to fully merged settings before a scan starts
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return an error describing the first problem
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.scan_path.exists() {
            return Err(ModscanError::InvalidPath {
                path: settings.scan_path.clone(),
            });
        }

        Self::validate_exclude_patterns(&settings.exclude_patterns)?;

        if settings.max_depth == Some(0) {
            return Err(ModscanError::config_error("max_depth must be at least 1"));
        }

        if settings.threads == Some(0) {
            return Err(ModscanError::config_error("threads must be at least 1"));
        }

        if let Some(output_file) = &settings.output_file {
            Self::validate_output_path(output_file)?;
        }

        if let Some(graph_file) = &settings.graph_file {
            Self::validate_output_path(graph_file)?;
        }

        Ok(())
    }

    fn validate_exclude_patterns(patterns: &[String]) -> Result<()> {
        for pattern in patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                ModscanError::config_error(format!("invalid exclude pattern '{pattern}': {e}"))
            })?;
        }
        Ok(())
    }

    /// Check that an output path can plausibly be written before scanning
    fn validate_output_path(path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        if !parent.exists() {
            return Err(ModscanError::OutputDirectoryNotFound {
                path: parent.to_path_buf(),
            });
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Ok(metadata) = parent.metadata() {
                if metadata.permissions().mode() & 0o200 == 0 {
                    return Err(ModscanError::PermissionDenied {
                        path: parent.to_path_buf(),
                    });
                }
            }
        }

        Ok(())
    }
}
