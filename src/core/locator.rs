//! Toolchain discovery
//!
//! A tool is found by walking an ordered candidate list and probing each
//! candidate with its version flag. The first candidate that runs
//! successfully and prints a well-formed version wins.

use tracing::debug;

use crate::core::process::CommandRunner;
use crate::models::toolchain::{ToolKind, Toolchain, ToolchainOverrides};

/// Minimum raw output length accepted from `npm -v` / `yarn -v`
const MIN_PACKAGE_MANAGER_OUTPUT: usize = 5;

/// Parse `node -v` output (`v18.17.0`) into a bare version
pub fn parse_node_version(output: &str) -> Option<String> {
    if !output.starts_with('v') {
        return None;
    }
    let version = output.trim()[1..].to_string();
    if version.is_empty() {
        None
    } else {
        Some(version)
    }
}

/// Parse `npm -v` / `yarn -v` output into a version
pub fn parse_package_manager_version(output: &str) -> Option<String> {
    if output.len() < MIN_PACKAGE_MANAGER_OUTPUT {
        return None;
    }
    let version = output.trim();
    if version.is_empty() {
        None
    } else {
        Some(version.to_string())
    }
}

/// Version parser for `kind`
pub fn version_parser(kind: ToolKind) -> fn(&str) -> Option<String> {
    match kind {
        ToolKind::Node => parse_node_version,
        ToolKind::Npm | ToolKind::Yarn => parse_package_manager_version,
    }
}

/// Finds executables by probing candidates in priority order
pub struct Locator<'a> {
    runner: &'a dyn CommandRunner,
}

impl<'a> Locator<'a> {
    pub fn new(runner: &'a dyn CommandRunner) -> Self {
        Self { runner }
    }

    /// Return the first candidate whose version probe succeeds, with its version
    ///
    /// Empty candidates are skipped without spawning anything. Spawn errors,
    /// non-zero exits and unparsable output only move on to the next
    /// candidate.
    pub fn locate<S, F>(&self, candidates: &[S], version_flag: &str, parse: F) -> Option<(String, String)>
    where
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        for candidate in candidates {
            let candidate = candidate.as_ref();
            if candidate.is_empty() {
                continue;
            }

            let output = match self.runner.run(candidate, &[version_flag], None) {
                Ok(output) => output,
                Err(err) => {
                    debug!(candidate, error = %err, "Toolchain candidate could not be started");
                    continue;
                }
            };

            if !output.success {
                debug!(candidate, status = ?output.status, "Toolchain candidate exited unsuccessfully");
                continue;
            }

            match parse(&output.stdout) {
                Some(version) => {
                    debug!(candidate, %version, "Resolved toolchain candidate");
                    return Some((candidate.to_string(), version));
                }
                None => {
                    debug!(candidate, output = %output.stdout.trim(), "Unexpected version output");
                }
            }
        }

        None
    }

    /// Locate `kind`, trying its override before its well-known names
    pub fn locate_tool(&self, kind: ToolKind, overrides: &ToolchainOverrides) -> Option<Toolchain> {
        let candidates = overrides.candidates(kind);
        self.locate(&candidates, kind.version_flag(), version_parser(kind))
            .map(|(command, version)| Toolchain::new(kind, command, Some(version)))
    }
}
