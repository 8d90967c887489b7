//! Dependency identity types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dependency discovered by a builder
///
/// Builders for different ecosystems return their own concrete types; the
/// rest of the crate only relies on this identity triple.
pub trait Dependency: fmt::Debug + Send + Sync {
    /// Where the package is fetched from (e.g. `npm`)
    fn fetcher(&self) -> &str;

    /// Package name within the fetcher's namespace
    fn package(&self) -> &str;

    /// Resolved version of the package
    fn revision(&self) -> &str;

    /// Compact `fetcher+package$revision` identifier
    fn locator(&self) -> String {
        format!("{}+{}${}", self.fetcher(), self.package(), self.revision())
    }
}

/// An installed npm package, identified by name and version
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeModule {
    pub name: String,
    pub version: String,
}

impl NodeModule {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl Dependency for NodeModule {
    // TODO: report git and tarball sources once manifests carry `_resolved`
    fn fetcher(&self) -> &str {
        "npm"
    }

    fn package(&self) -> &str {
        &self.name
    }

    fn revision(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for NodeModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Serializable snapshot of any [`Dependency`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    pub fetcher: String,
    pub package: String,
    pub revision: String,
}

impl DependencyRecord {
    pub fn from_dependency(dependency: &dyn Dependency) -> Self {
        Self {
            fetcher: dependency.fetcher().to_string(),
            package: dependency.package().to_string(),
            revision: dependency.revision().to_string(),
        }
    }
}
