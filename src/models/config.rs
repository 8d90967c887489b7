//! Configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::toolchain::ToolchainOverrides;

/// Main configuration settings for depbuild
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Root directory of the module to build and analyze
    pub module_path: PathBuf,

    /// Whether to clear installed dependencies before building
    pub force: bool,

    /// Whether `analyze` builds the module first when it is not built
    pub auto_build: bool,

    /// Whether `analyze` may run against a module that was never built
    pub allow_unresolved: bool,

    /// Output format (text, json, csv)
    pub output_format: OutputFormat,

    /// Output file path (if not specified, output to stdout)
    pub output_file: Option<PathBuf>,

    /// Whether to suppress non-essential output
    pub quiet: bool,

    /// Whether to show detailed progress and debug information
    pub verbose: bool,

    /// Whether to use colors in text output
    pub use_colors: bool,

    /// Whether to show progress spinners
    pub show_progress: bool,

    /// Worker threads for manifest reads (rayon's default when unset)
    pub threads: Option<usize>,

    /// Binary to try first for the Node.js runtime
    pub node_binary: Option<String>,

    /// Binary to try first for npm
    pub npm_binary: Option<String>,

    /// Binary to try first for Yarn
    pub yarn_binary: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            module_path: PathBuf::from("."),
            force: false,
            auto_build: false,
            allow_unresolved: false,
            output_format: OutputFormat::Text,
            output_file: None,
            quiet: false,
            verbose: false,
            use_colors: true,
            show_progress: true,
            threads: None,
            node_binary: None,
            npm_binary: None,
            yarn_binary: None,
        }
    }
}

impl Settings {
    /// Toolchain overrides taken from configuration (not the environment)
    pub fn toolchain_overrides(&self) -> ToolchainOverrides {
        ToolchainOverrides {
            node: self.node_binary.clone(),
            npm: self.npm_binary.clone(),
            yarn: self.yarn_binary.clone(),
        }
    }
}

/// Supported output formats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
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
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialSettings {
    pub module_path: Option<PathBuf>,
    pub force: Option<bool>,
    pub auto_build: Option<bool>,
    pub allow_unresolved: Option<bool>,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub use_colors: Option<bool>,
    pub show_progress: Option<bool>,
    pub threads: Option<usize>,
    pub node_binary: Option<String>,
    pub npm_binary: Option<String>,
    pub yarn_binary: Option<String>,
}

impl PartialSettings {
    /// Merge another PartialSettings into this one
    /// Fields from `other` take precedence over existing fields
    pub fn merge_from(&mut self, other: PartialSettings) {
        if other.module_path.is_some() {
            self.module_path = other.module_path;
        }
        if other.force.is_some() {
            self.force = other.force;
        }
        if other.auto_build.is_some() {
            self.auto_build = other.auto_build;
        }
        if other.allow_unresolved.is_some() {
            self.allow_unresolved = other.allow_unresolved;
        }
        if other.output_format.is_some() {
            self.output_format = other.output_format;
        }
        if other.output_file.is_some() {
            self.output_file = other.output_file;
        }
        if other.quiet.is_some() {
            self.quiet = other.quiet;
        }
        if other.verbose.is_some() {
            self.verbose = other.verbose;
        }
        if other.use_colors.is_some() {
            self.use_colors = other.use_colors;
        }
        if other.show_progress.is_some() {
            self.show_progress = other.show_progress;
        }
        if other.threads.is_some() {
            self.threads = other.threads;
        }
        if other.node_binary.is_some() {
            self.node_binary = other.node_binary;
        }
        if other.npm_binary.is_some() {
            self.npm_binary = other.npm_binary;
        }
        if other.yarn_binary.is_some() {
            self.yarn_binary = other.yarn_binary;
        }
    }

    /// Convert partial settings to full settings
    /// Uses defaults for any fields that are None
    pub fn to_settings(&self) -> Settings {
        let mut settings = Settings::default();

        if let Some(module_path) = &self.module_path {
            settings.module_path = module_path.clone();
        }
        if let Some(force) = self.force {
            settings.force = force;
        }
        if let Some(auto_build) = self.auto_build {
            settings.auto_build = auto_build;
        }
        if let Some(allow_unresolved) = self.allow_unresolved {
            settings.allow_unresolved = allow_unresolved;
        }
        if let Some(output_format) = &self.output_format {
            settings.output_format = output_format.clone();
        }
        if let Some(output_file) = &self.output_file {
            settings.output_file = Some(output_file.clone());
        }
        if let Some(quiet) = self.quiet {
            settings.quiet = quiet;
        }
        if let Some(verbose) = self.verbose {
            settings.verbose = verbose;
        }
        if let Some(use_colors) = self.use_colors {
            settings.use_colors = use_colors;
        }
        if let Some(show_progress) = self.show_progress {
            settings.show_progress = show_progress;
        }
        if let Some(threads) = self.threads {
            settings.threads = Some(threads);
        }
        settings.node_binary = self.node_binary.clone().or(settings.node_binary);
        settings.npm_binary = self.npm_binary.clone().or(settings.npm_binary);
        settings.yarn_binary = self.yarn_binary.clone().or(settings.yarn_binary);

        settings
    }
}
