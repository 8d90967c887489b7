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
}

/// Settings-relevant subset of the command line
///
/// Switches are plain booleans: an absent switch leaves lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub path: Option<PathBuf>,
    pub force: bool,
    pub auto_build: bool,
    pub allow_unresolved: bool,
    pub output_format: Option<OutputFormat>,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
    pub no_colors: bool,
    pub no_progress: bool,
    pub threads: Option<usize>,
    pub config: Option<PathBuf>,
}

impl CliArgs {
    pub fn from_args(args: &Args) -> Self {
        Self {
            path: args.path.clone(),
            force: args.force,
            auto_build: args.auto_build,
            allow_unresolved: args.allow_unresolved,
            output_format: args.output.map(|format| match format {
                CliOutputFormat::Text => OutputFormat::Text,
                CliOutputFormat::Json => OutputFormat::Json,
                CliOutputFormat::Csv => OutputFormat::Csv,
            }),
            output_file: args.output_file.clone(),
            quiet: args.quiet,
            verbose: args.verbose,
            no_colors: args.no_colors,
            no_progress: args.no_progress,
            threads: args.threads,
            config: args.config.clone(),
        }
    }
}

impl CliConfig {
    pub fn new(args: CliArgs) -> Self {
        Self {
            args,
            name: "command-line arguments".to_string(),
        }
    }

    pub fn from_args(args: &Args) -> Self {
        Self::new(CliArgs::from_args(args))
    }

    /// Get the config file path if specified
    pub fn config_path(&self) -> Option<&PathBuf> {
        self.args.config.as_ref()
    }
}

impl ConfigSource for CliConfig {
    fn load(&self) -> Result<PartialSettings> {
        let args = &self.args;
        let switch = |on: bool, value: bool| if on { Some(value) } else { None };

        Ok(PartialSettings {
            module_path: args.path.clone(),
            force: switch(args.force, true),
            auto_build: switch(args.auto_build, true),
            allow_unresolved: switch(args.allow_unresolved, true),
            output_format: args.output_format.clone(),
            output_file: args.output_file.clone(),
            quiet: switch(args.quiet, true),
            verbose: switch(args.verbose, true),
            use_colors: switch(args.no_colors, false),
            show_progress: switch(args.no_progress, false),
            threads: args.threads,
            ..Default::default()
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        &self.name
    }
}
