//! depbuild - install and list the dependencies of Node.js modules
//!
//! A [`Builder`] locates the toolchains an ecosystem needs, installs a
//! module's dependencies, and reports what ended up installed. The
//! [`NodeJsBuilder`] drives npm or Yarn and reads every
//! `node_modules/*/package.json` below the module.

pub mod builders;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod output;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use builders::{Builder, NodeJsBuilder};
pub use error::{handle_error, BuildError, ErrorSeverity, OptionExt, Result, ResultExt};
pub use models::{
    config::Settings,
    dependency::{Dependency, NodeModule},
    module::Module,
    report::AnalysisReport,
    toolchain::{ToolKind, Toolchain, ToolchainOverrides},
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
