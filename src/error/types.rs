//! Error types and definitions for depbuild
//!
//! Every builder operation reports failures through [`BuildError`]. The
//! variants fall into the categories the CLI cares about: configuration,
//! build preconditions, subprocess failures, scan failures, per-manifest soft
//! failures, and unsupported operations.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::models::toolchain::ToolKind;

/// Error severity levels for different error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Warning level errors - operation can continue
    Warning,
    /// Error level - current operation fails but overall process can continue
    Error,
    /// Critical level - process should terminate
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARNING"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Main error type for builder operations
#[derive(Debug, Error)]
pub enum BuildError {
    /// Standard IO errors
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// A required toolchain could not be resolved
    #[error("could not find {tool} binary (try setting ${env_var})")]
    ToolchainNotFound { tool: String, env_var: String },

    /// Neither supported package manager could be resolved
    #[error("could not find NPM binary or Yarn binary (try setting $NPM_BINARY or $YARN_BINARY)")]
    NoPackageManager,

    /// A lockfile selects a package manager that is not available
    #[error("{tool} lockfile found at {lockfile} but could not find {tool} binary (try setting ${env_var})")]
    LockfileWithoutToolchain {
        lockfile: PathBuf,
        tool: String,
        env_var: String,
    },

    /// Removing the install directory before a forced build failed
    #[error("failed to clear {path} before build: {source}")]
    CleanFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A subprocess could not be started
    #[error("failed to run `{command}`: {source}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A subprocess exited unsuccessfully
    #[error("`{command}` exited with {}: {stderr}", describe_status(.status))]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    /// The module has no installed dependencies to analyze
    #[error("module at {path} has not been built")]
    NotBuilt { path: PathBuf },

    /// The builder does not support this operation
    #[error("{operation} is not implemented for {builder}")]
    Unsupported {
        operation: String,
        builder: String,
    },

    /// Glob pattern errors
    #[error("Glob pattern error: {source}")]
    GlobPattern {
        #[source]
        source: glob::PatternError,
    },

    /// Directory walk failures while expanding a glob
    #[error("Glob traversal error: {source}")]
    Glob {
        #[source]
        source: glob::GlobError,
    },

    /// A package manifest could not be read
    #[error("Error reading manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing errors with file context
    #[error("JSON parsing error in {file}: {source}")]
    JsonParse {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid package.json structure
    #[error("Invalid package.json structure in {path}: {message}")]
    InvalidPackageJson { path: PathBuf, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Configuration file not found
    #[error("Configuration file not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration file read errors
    #[error("Error reading configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file parse errors
    #[error("Error parsing configuration file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid path errors
    #[error("Invalid path: {path}")]
    InvalidPath { path: PathBuf },

    /// Output file write errors
    #[error("Error writing to output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stdout write errors
    #[error("Error writing to stdout: {source}")]
    StdoutWrite {
        #[source]
        source: std::io::Error,
    },

    /// Parallel execution error
    #[error("Parallel execution error: {message}")]
    ParallelExecution { message: String },

    /// JSON serialization error
    #[error("JSON serialization error: {source}")]
    JsonSerialize {
        #[source]
        source: serde_json::Error,
    },

    /// CSV handling errors
    #[error("CSV error: {source}")]
    Csv {
        #[source]
        source: csv::Error,
    },

    /// CSV serialization error
    #[error("CSV serialization error: {source}")]
    CsvSerialize {
        #[source]
        source: std::string::FromUtf8Error,
    },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

impl BuildError {
    /// Get the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Warning level errors - operation can continue
            BuildError::ManifestRead { .. } => ErrorSeverity::Warning,
            BuildError::JsonParse { .. } => ErrorSeverity::Warning,
            BuildError::InvalidPackageJson { .. } => ErrorSeverity::Warning,

            // Critical errors - process should terminate
            BuildError::ToolchainNotFound { .. } => ErrorSeverity::Critical,
            BuildError::NoPackageManager => ErrorSeverity::Critical,
            BuildError::Config { .. } => ErrorSeverity::Critical,
            BuildError::ConfigNotFound { .. } => ErrorSeverity::Critical,
            BuildError::ConfigRead { .. } => ErrorSeverity::Critical,
            BuildError::ConfigParse { .. } => ErrorSeverity::Critical,
            BuildError::StdoutWrite { .. } => ErrorSeverity::Critical,

            // Regular errors - current operation fails but overall process can continue
            _ => ErrorSeverity::Error,
        }
    }

    /// Check if this is a critical error that should terminate the process
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            BuildError::ToolchainNotFound { tool, .. } => {
                format!("No working {} installation was found on this machine.", tool)
            }
            BuildError::NoPackageManager => {
                "Neither npm nor Yarn could be found. At least one package manager is required.".to_string()
            }
            BuildError::LockfileWithoutToolchain { lockfile, tool, .. } => {
                format!("'{}' requires {}, but {} is not installed.", lockfile.display(), tool, tool)
            }
            BuildError::CleanFailed { path, source } => {
                format!("Could not remove '{}' ({}). The build was not attempted.", path.display(), source)
            }
            BuildError::CommandFailed { command, stderr, .. } if stderr.is_empty() => {
                format!("`{}` failed without any output.", command)
            }
            BuildError::JsonParse { file, source } => {
                format!("Invalid JSON in '{}': {}. Please check the file format.", file.display(), source)
            }
            BuildError::Io { source } => {
                format!("File system error: {}. Check disk space and permissions.", source)
            }
            BuildError::InvalidPath { path } => {
                format!("Invalid path: '{}'. Please provide a valid directory path.", path.display())
            }
            BuildError::ConfigNotFound { path } => {
                format!("Configuration file not found at '{}'. Create a config file or use command line options.", path.display())
            }
            BuildError::InvalidPackageJson { path, message } => {
                format!("Invalid package.json in '{}': {}. Skipping package.", path.display(), message)
            }
            // For other errors, use the standard Display implementation
            _ => self.to_string(),
        }
    }

    /// Get a hint for fixing the error, if one applies
    pub fn suggestion(&self) -> Option<String> {
        match self {
            BuildError::ToolchainNotFound { env_var, tool } => Some(format!(
                "Install {} or point ${} at a working binary",
                tool, env_var
            )),
            BuildError::NoPackageManager => {
                Some("Install npm or Yarn, or set $NPM_BINARY or $YARN_BINARY".to_string())
            }
            BuildError::LockfileWithoutToolchain { env_var, .. } => Some(format!(
                "Install Yarn or set ${} so the lockfile can be honoured",
                env_var
            )),
            BuildError::NotBuilt { .. } => Some(
                "Run `depbuild build` first, or pass --auto-build or --allow-unresolved".to_string(),
            ),
            BuildError::InvalidPath { .. } => {
                Some("Check that the path exists and is accessible".to_string())
            }
            BuildError::ConfigNotFound { .. } => Some(
                "Create a .depbuild.toml file in your project directory or specify a config file with --config"
                    .to_string(),
            ),
            BuildError::Unsupported { .. } => {
                Some("Pass the module directory explicitly with --path".to_string())
            }
            _ => None,
        }
    }

    /// Create an IO error with context
    pub fn io_error(source: std::io::Error) -> Self {
        BuildError::Io { source }
    }

    /// Create a JSON parse error with file context
    pub fn json_parse_error(file: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        BuildError::JsonParse {
            file: file.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        BuildError::Config {
            message: message.into(),
        }
    }

    /// Create an error for a toolchain that failed every candidate probe
    pub fn toolchain_not_found(kind: ToolKind) -> Self {
        BuildError::ToolchainNotFound {
            tool: kind.display_name().to_string(),
            env_var: kind.env_var().to_string(),
        }
    }

    /// Create an error for a lockfile whose package manager is missing
    pub fn lockfile_without_toolchain(lockfile: impl Into<PathBuf>, kind: ToolKind) -> Self {
        BuildError::LockfileWithoutToolchain {
            lockfile: lockfile.into(),
            tool: kind.display_name().to_string(),
            env_var: kind.env_var().to_string(),
        }
    }

    /// Create an error for an operation a builder does not provide
    pub fn unsupported(operation: impl Into<String>, builder: impl Into<String>) -> Self {
        BuildError::Unsupported {
            operation: operation.into(),
            builder: builder.into(),
        }
    }
}

// Implement From for common error types
impl From<std::io::Error> for BuildError {
    fn from(err: std::io::Error) -> Self {
        BuildError::io_error(err)
    }
}

impl From<glob::PatternError> for BuildError {
    fn from(err: glob::PatternError) -> Self {
        BuildError::GlobPattern { source: err }
    }
}

impl From<glob::GlobError> for BuildError {
    fn from(err: glob::GlobError) -> Self {
        BuildError::Glob { source: err }
    }
}

impl From<csv::Error> for BuildError {
    fn from(err: csv::Error) -> Self {
        BuildError::Csv { source: err }
    }
}

impl From<serde_json::Error> for BuildError {
    fn from(err: serde_json::Error) -> Self {
        BuildError::JsonSerialize { source: err }
    }
}

/// Result type alias for builder operations
pub type Result<T> = std::result::Result<T, BuildError>;
