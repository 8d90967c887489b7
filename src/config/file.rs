//! File and environment configuration sources

use std::env;
use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{BuildError, Result, ResultExt};
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".depbuild.toml";

/// Prefix of the environment variables read by [`EnvConfig`]
pub const ENV_PREFIX: &str = "DEPBUILD";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
}

impl FileConfig {
    /// File source at the default path in the working directory
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the commented default configuration to this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(BuildError::ConfigNotFound {
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
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration source
///
/// Reads `<PREFIX>_PATH`, `<PREFIX>_OUTPUT_FORMAT`, `<PREFIX>_OUTPUT_FILE`,
/// `<PREFIX>_FORCE`, `<PREFIX>_AUTO_BUILD`, `<PREFIX>_ALLOW_UNRESOLVED` and
/// `<PREFIX>_THREADS`. Toolchain overrides (`NODE_BINARY` and friends) are
/// read by the builder itself.
pub struct EnvConfig {
    prefix: String,
    name: String,
}

const ENV_KEYS: &[&str] = &[
    "PATH",
    "OUTPUT_FORMAT",
    "OUTPUT_FILE",
    "FORCE",
    "AUTO_BUILD",
    "ALLOW_UNRESOLVED",
    "THREADS",
];

impl EnvConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        env::var(format!("{}_{}", self.prefix, key))
            .ok()
            .filter(|value| !value.trim().is_empty())
    }

    fn flag(&self, key: &str) -> Result<Option<bool>> {
        match self.var(key) {
            Some(value) => parse_bool(&value).map(Some).ok_or_else(|| {
                BuildError::config_error(format!(
                    "{}_{} must be true or false, got '{}'",
                    self.prefix, key, value
                ))
            }),
            None => Ok(None),
        }
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if let Some(path) = self.var("PATH") {
            settings.module_path = Some(PathBuf::from(path));
        }

        if let Some(format) = self.var("OUTPUT_FORMAT") {
            settings.output_format = Some(format.parse().map_err(BuildError::config_error)?);
        }

        if let Some(file) = self.var("OUTPUT_FILE") {
            settings.output_file = Some(PathBuf::from(file));
        }

        settings.force = self.flag("FORCE")?;
        settings.auto_build = self.flag("AUTO_BUILD")?;
        settings.allow_unresolved = self.flag("ALLOW_UNRESOLVED")?;

        if let Some(threads) = self.var("THREADS") {
            let parsed = threads.trim().parse::<usize>().with_context(|| {
                format!("{}_THREADS must be a positive integer, got '{}'", self.prefix, threads)
            })?;
            settings.threads = Some(parsed);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
