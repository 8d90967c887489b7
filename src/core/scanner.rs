//! Discovery of installed package manifests

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::fs::FileSystem;
use crate::error::Result;

/// Directory package managers install dependencies into
pub const NODE_MODULES: &str = "node_modules";

/// Manifest file read for every installed package
pub const MANIFEST: &str = "package.json";

/// Glob matching every installed package manifest below `root`
///
/// `root` is escaped so that glob metacharacters in directory names are
/// matched literally.
pub fn manifest_pattern(root: &Path) -> String {
    let root = glob::Pattern::escape(&root.to_string_lossy());
    let root = root.trim_end_matches('/');
    format!("{}/**/{}/*/{}", root, NODE_MODULES, MANIFEST)
}

/// List the manifests of all installed packages under `root`, at any nesting depth
///
/// Returns an empty list when nothing is installed. Pattern or traversal
/// errors abort the scan.
pub fn scan(fs: &dyn FileSystem, root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = manifest_pattern(root);
    debug!(%pattern, "Scanning for installed package manifests");
    let manifests = fs.glob(&pattern)?;
    debug!(count = manifests.len(), "Found installed package manifests");
    Ok(manifests)
}
