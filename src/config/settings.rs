//! Validation of fully merged settings

use std::path::Path;

use crate::error::{BuildError, Result};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.module_path.is_dir() {
            return Err(BuildError::InvalidPath {
                path: settings.module_path.clone(),
            });
        }

        if settings.threads == Some(0) {
            return Err(BuildError::config_error("threads must be at least 1"));
        }

        let overrides = [
            ("node_binary", &settings.node_binary),
            ("npm_binary", &settings.npm_binary),
            ("yarn_binary", &settings.yarn_binary),
        ];
        for (key, value) in overrides {
            if matches!(value, Some(binary) if binary.trim().is_empty()) {
                return Err(BuildError::config_error(format!("{} must not be blank", key)));
            }
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// The report file's directory must already exist
    fn validate_output_path(path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(BuildError::InvalidPath {
                    path: parent.to_path_buf(),
                })
            }
            _ => Ok(()),
        }
    }
}
