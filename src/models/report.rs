//! Analysis report data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::dependency::{Dependency, DependencyRecord};
use crate::models::module::Module;
use crate::models::toolchain::Toolchain;

/// Result of analyzing one module, ready to be formatted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub module: String,
    pub path: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub built: bool,
    pub toolchains: Vec<Toolchain>,
    pub dependencies: Vec<DependencyRecord>,
}

impl AnalysisReport {
    pub fn new(module: &Module, built: bool, toolchains: Vec<Toolchain>) -> Self {
        Self {
            module: module.name.clone(),
            path: module.dir.clone(),
            generated_at: Utc::now(),
            built,
            toolchains,
            dependencies: Vec::new(),
        }
    }

    /// Record dependencies, keeping them sorted by package then revision
    pub fn with_dependencies(mut self, dependencies: &[Box<dyn Dependency>]) -> Self {
        self.dependencies = dependencies
            .iter()
            .map(|dependency| DependencyRecord::from_dependency(dependency.as_ref()))
            .collect();
        self.dependencies.sort_by(|a, b| {
            a.package
                .cmp(&b.package)
                .then_with(|| a.revision.cmp(&b.revision))
        });
        self
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }
}
