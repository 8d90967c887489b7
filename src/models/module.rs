//! The project under analysis

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::fs::{FileSystem, RealFileSystem};
use crate::core::scanner::MANIFEST;
use crate::parsers::package_json::PackageJsonParser;

/// A project directory handed to a builder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Display name of the module
    pub name: String,
    /// Target the module was resolved from (usually the path given on the command line)
    pub target: String,
    /// Root directory the builder operates in
    pub dir: PathBuf,
}

impl Module {
    pub fn new(name: impl Into<String>, target: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            dir: dir.into(),
        }
    }

    /// Build a module for a directory on disk, naming it after its `package.json`
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        Self::from_dir_in(&RealFileSystem, dir)
    }

    /// Build a module for a directory read through `fs`
    ///
    /// Falls back to the directory name when the manifest is missing or has
    /// no `name` field.
    pub fn from_dir_in(fs: &dyn FileSystem, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let name = fs
            .read_to_string(&dir.join(MANIFEST))
            .ok()
            .and_then(|content| PackageJsonParser::parse_name(&content))
            .or_else(|| {
                dir.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| dir.display().to_string());

        Self::new(name, dir.display().to_string(), dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::events::EventLog;
    use crate::core::fs::MemoryFileSystem;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_from_dir_uses_manifest_name() {
        let temp_dir = tempdir().unwrap();
        fs::write(
            temp_dir.path().join("package.json"),
            r#"{"name": "storefront", "private": true}"#,
        )
        .unwrap();

        let module = Module::from_dir(temp_dir.path());
        assert_eq!(module.name, "storefront");
        assert_eq!(module.dir, temp_dir.path());
    }

    #[test]
    fn test_from_dir_falls_back_to_directory_name() {
        let temp_dir = tempdir().unwrap();
        let project = temp_dir.path().join("checkout-service");
        fs::create_dir(&project).unwrap();

        let module = Module::from_dir(&project);
        assert_eq!(module.name, "checkout-service");
        assert_eq!(module.target, project.display().to_string());
    }

    #[test]
    fn test_from_dir_in_reads_through_filesystem() {
        let events = EventLog::new();
        let memory = MemoryFileSystem::new().with_events(events.clone());
        memory.add_file("/srv/shop/package.json", r#"{"name": "@acme/shop"}"#);

        let module = Module::from_dir_in(&memory, "/srv/shop");
        assert_eq!(module.name, "@acme/shop");
        assert_eq!(module.dir, PathBuf::from("/srv/shop"));
        assert_eq!(events.entries(), vec!["read /srv/shop/package.json"]);

        let unnamed = Module::from_dir_in(&memory, "/srv/admin");
        assert_eq!(unnamed.name, "admin");
    }
}
