//! Toolchain data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tools the Node.js builder knows how to locate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// The Node.js runtime
    Node,
    /// The npm package manager
    Npm,
    /// The Yarn package manager
    Yarn,
}

impl ToolKind {
    /// Human-readable tool name used in messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ToolKind::Node => "Node.js",
            ToolKind::Npm => "NPM",
            ToolKind::Yarn => "Yarn",
        }
    }

    /// Environment variable that overrides the binary for this tool
    pub fn env_var(&self) -> &'static str {
        match self {
            ToolKind::Node => "NODE_BINARY",
            ToolKind::Npm => "NPM_BINARY",
            ToolKind::Yarn => "YARN_BINARY",
        }
    }

    /// Well-known binary names, in the order they are tried
    pub fn default_names(&self) -> &'static [&'static str] {
        match self {
            ToolKind::Node => &["node", "nodejs"],
            ToolKind::Npm => &["npm"],
            ToolKind::Yarn => &["yarn"],
        }
    }

    /// Flag that makes the tool print its version and exit
    pub fn version_flag(&self) -> &'static str {
        "-v"
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolKind::Node => write!(f, "node"),
            ToolKind::Npm => write!(f, "npm"),
            ToolKind::Yarn => write!(f, "yarn"),
        }
    }
}

/// A resolved external executable and the version it reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolchain {
    pub kind: ToolKind,
    /// Command used to invoke the tool, as given in the candidate list
    pub command: String,
    pub version: Option<String>,
}

impl Toolchain {
    pub fn new(kind: ToolKind, command: impl Into<String>, version: Option<String>) -> Self {
        Self {
            kind,
            command: command.into(),
            version,
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} {} ({})", self.kind, version, self.command),
            None => write!(f, "{} ({})", self.kind, self.command),
        }
    }
}

/// Explicit binary overrides for each tool
///
/// An override is tried before the tool's well-known names. Empty strings
/// are treated as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolchainOverrides {
    pub node: Option<String>,
    pub npm: Option<String>,
    pub yarn: Option<String>,
}

impl ToolchainOverrides {
    /// Read `NODE_BINARY`, `NPM_BINARY` and `YARN_BINARY` from the process environment
    pub fn from_env() -> Self {
        let read = |kind: ToolKind| {
            std::env::var(kind.env_var())
                .ok()
                .filter(|value| !value.trim().is_empty())
        };

        Self {
            node: read(ToolKind::Node),
            npm: read(ToolKind::Npm),
            yarn: read(ToolKind::Yarn),
        }
    }

    pub fn get(&self, kind: ToolKind) -> Option<&str> {
        let value = match kind {
            ToolKind::Node => &self.node,
            ToolKind::Npm => &self.npm,
            ToolKind::Yarn => &self.yarn,
        };
        value.as_deref()
    }

    /// Fill unset entries from `fallback`
    pub fn or(self, fallback: ToolchainOverrides) -> Self {
        Self {
            node: self.node.or(fallback.node),
            npm: self.npm.or(fallback.npm),
            yarn: self.yarn.or(fallback.yarn),
        }
    }

    /// Ordered candidate commands for `kind`: the override, then default names
    pub fn candidates(&self, kind: ToolKind) -> Vec<String> {
        let mut candidates = Vec::with_capacity(kind.default_names().len() + 1);
        candidates.push(self.get(kind).unwrap_or_default().to_string());
        candidates.extend(kind.default_names().iter().map(|name| name.to_string()));
        candidates
    }
}
