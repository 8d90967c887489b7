//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// depbuild - install and list the dependencies of a Node.js module
#[derive(Parser, Debug, Clone)]
#[command(name = "depbuild")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Build Node.js modules with npm or Yarn and list their installed dependencies")]
#[command(long_about = "depbuild locates Node.js, npm and Yarn, installs a module's production \
dependencies with the package manager its lockfile asks for, and reports every package found \
under node_modules as an npm dependency.")]
#[command(after_help = "EXAMPLES:

    # List installed dependencies of the current directory
    depbuild

    # Install dependencies from scratch, then list them as JSON
    depbuild build --path ./my-app --force
    depbuild analyze --path ./my-app --output json

    # Build on demand when node_modules is missing
    depbuild analyze --auto-build

    # Show which node, npm and yarn binaries were found
    depbuild toolchains

    # Point at a specific toolchain
    NODE_BINARY=/opt/node/bin/node depbuild build

    # Create a default configuration file
    depbuild --init
")]
pub struct Args {
    /// What to do with the module
    #[arg(value_enum, default_value_t = Action::Analyze)]
    pub action: Action,

    /// Module directory
    #[arg(short, long, value_name = "PATH", help = "Directory of the Node.js module (defaults to the current directory)")]
    pub path: Option<PathBuf>,

    /// Clear node_modules before installing
    #[arg(short, long, help = "Remove node_modules before installing so the build starts clean")]
    pub force: bool,

    /// Build before analyzing when the module is not built
    #[arg(long, help = "Run the build first when `analyze` finds no node_modules directory")]
    pub auto_build: bool,

    /// Analyze even without a completed build
    #[arg(long, help = "Analyze a module that was never built instead of failing")]
    pub allow_unresolved: bool,

    /// Output format (text, json, csv)
    #[arg(short, long, value_enum, help = "Report format: 'text' for people, 'json' or 'csv' for tools")]
    pub output: Option<OutputFormat>,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE", help = "File to write the report to (uses stdout if not specified)")]
    pub output_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", help = "Path to configuration file (defaults to .depbuild.toml in the current directory)")]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, help = "Only print the report and errors")]
    pub quiet: bool,

    /// Show detailed progress and debug information
    #[arg(short, long, help = "Log toolchain probes, commands and skipped manifests")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, help = "Disable colored output")]
    pub no_colors: bool,

    /// Disable progress spinners
    #[arg(long, help = "Disable progress spinners (useful for CI environments)")]
    pub no_progress: bool,

    /// Worker threads for reading manifests
    #[arg(short = 'j', long, value_name = "N", help = "Number of threads used to read installed package manifests")]
    pub threads: Option<usize>,

    /// Initialize a default configuration file
    #[arg(long, help = "Create a default configuration file (.depbuild.toml) in the current directory")]
    pub init: bool,
}

/// Operations exposed on the command line
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Action {
    /// List the installed dependencies
    Analyze,
    /// Install the module's dependencies
    Build,
    /// Report whether the module has been built
    Status,
    /// Show the resolved toolchains
    Toolchains,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for programmatic consumption
    Json,
    /// CSV output for spreadsheet analysis
    Csv,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
