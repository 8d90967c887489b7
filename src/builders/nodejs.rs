//! Builder for Node.js modules managed by npm or Yarn

use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Span};

use crate::builders::Builder;
use crate::core::fs::{FileSystem, RealFileSystem};
use crate::core::locator::Locator;
use crate::core::parallel::{build_pool, collect_slots, present};
use crate::core::process::{render_command, CommandRunner, SystemRunner};
use crate::core::scanner::{self, NODE_MODULES};
use crate::error::{handle_error, BuildError, OptionExt, Result};
use crate::models::dependency::{Dependency, NodeModule};
use crate::models::module::Module;
use crate::models::toolchain::{ToolKind, Toolchain, ToolchainOverrides};
use crate::parsers::package_json::PackageJsonParser;

/// Lockfile whose presence selects Yarn over npm
pub const YARN_LOCKFILE: &str = "yarn.lock";

const NPM_INSTALL_ARGS: &[&str] = &["install", "--production"];
const YARN_INSTALL_ARGS: &[&str] = &["install", "--production", "--frozen-lockfile"];

/// Builds and analyzes Node.js modules
///
/// Holds one optional [`Toolchain`] per tool. All three are empty until
/// [`Builder::initialize`] runs.
pub struct NodeJsBuilder {
    node: Option<Toolchain>,
    npm: Option<Toolchain>,
    yarn: Option<Toolchain>,
    overrides: ToolchainOverrides,
    runner: Arc<dyn CommandRunner>,
    fs: Arc<dyn FileSystem>,
    pool: Option<Arc<rayon::ThreadPool>>,
    span: Span,
}

impl NodeJsBuilder {
    /// Builder using real processes, the real disk, and overrides from the environment
    pub fn new() -> Self {
        Self {
            node: None,
            npm: None,
            yarn: None,
            overrides: ToolchainOverrides::from_env(),
            runner: Arc::new(SystemRunner),
            fs: Arc::new(RealFileSystem),
            pool: None,
            span: info_span!("nodejs"),
        }
    }

    pub fn with_overrides(mut self, overrides: ToolchainOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_runner(mut self, runner: Arc<dyn CommandRunner>) -> Self {
        self.runner = runner;
        self
    }

    pub fn with_filesystem(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Span every operation of this builder logs under
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Read manifests on a dedicated pool of `threads` workers
    pub fn with_threads(mut self, threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(BuildError::ParallelExecution {
                message: "thread count must be at least 1".to_string(),
            });
        }
        let pool = build_pool(threads).map_err(|e| BuildError::ParallelExecution {
            message: format!("could not start {} worker threads: {}", threads, e),
        })?;
        self.pool = Some(Arc::new(pool));
        Ok(self)
    }

    pub fn node(&self) -> Option<&Toolchain> {
        self.node.as_ref()
    }

    pub fn npm(&self) -> Option<&Toolchain> {
        self.npm.as_ref()
    }

    pub fn yarn(&self) -> Option<&Toolchain> {
        self.yarn.as_ref()
    }

    /// Installed packages under the module, one per readable manifest
    pub fn analyze_modules(&self, module: &Module) -> Result<Vec<NodeModule>> {
        let _entered = self.span.enter();
        debug!(dir = %module.dir.display(), "Running analysis on Node.js module");

        let manifests = scanner::scan(self.fs.as_ref(), &module.dir)?;

        let read_all = || collect_slots(&manifests, |path| self.read_manifest(path));
        let slots = match &self.pool {
            Some(pool) => pool.install(read_all),
            None => read_all(),
        };

        let dependencies = present(slots);
        let skipped = manifests.len() - dependencies.len();
        if skipped > 0 {
            warn!(skipped, "Some installed package manifests could not be parsed");
        }
        debug!(count = dependencies.len(), "Collected Node.js dependencies");

        Ok(dependencies)
    }

    /// Parse one manifest; failures are logged and yield `None`
    fn read_manifest(&self, path: &Path) -> Option<NodeModule> {
        let _entered = self.span.enter();
        match PackageJsonParser::parse_file(self.fs.as_ref(), path) {
            Ok(module) => Some(module),
            Err(err) => {
                debug!(path = %path.display(), "Skipping unreadable package manifest");
                handle_error(err);
                None
            }
        }
    }

    /// Remove `node_modules`; a missing directory counts as already clean
    fn clean(&self, module: &Module) -> Result<()> {
        let node_modules = module.dir.join(NODE_MODULES);
        debug!(path = %node_modules.display(), "`force` flag is set; clearing node_modules");

        match self.fs.remove_dir_all(&node_modules) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(BuildError::CleanFailed {
                path: node_modules,
                source,
            }),
        }
    }

    fn install(&self, toolchain: &Toolchain, args: &[&str], dir: &Path) -> Result<()> {
        let command = render_command(&toolchain.command, args);
        info!(%command, dir = %dir.display(), "Installing dependencies");

        let output = self
            .runner
            .run(&toolchain.command, args, Some(dir))
            .map_err(|source| BuildError::CommandSpawn {
                command: command.clone(),
                source,
            })?;

        if !output.success {
            return Err(BuildError::CommandFailed {
                command,
                status: output.status,
                stderr: output.stderr.trim().to_string(),
            });
        }

        info!(%command, "Dependencies installed");
        Ok(())
    }
}

impl Default for NodeJsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder for NodeJsBuilder {
    fn name(&self) -> &'static str {
        "NodeJsBuilder"
    }

    fn initialize(&mut self) -> Result<()> {
        let span = self.span.clone();
        let _entered = span.enter();
        debug!("Initializing Node.js builder");

        self.node = None;
        self.npm = None;
        self.yarn = None;

        let locator = Locator::new(self.runner.as_ref());

        self.node = Some(
            locator
                .locate_tool(ToolKind::Node, &self.overrides)
                .ok_or_error(|| BuildError::toolchain_not_found(ToolKind::Node))?,
        );
        self.npm = locator.locate_tool(ToolKind::Npm, &self.overrides);
        self.yarn = locator.locate_tool(ToolKind::Yarn, &self.overrides);

        if self.npm.is_none() && self.yarn.is_none() {
            return Err(BuildError::NoPackageManager);
        }

        debug!(
            node = ?self.node,
            npm = ?self.npm,
            yarn = ?self.yarn,
            "Initialized Node.js builder"
        );
        Ok(())
    }

    fn build(&self, module: &Module, force: bool) -> Result<()> {
        let _entered = self.span.enter();
        debug!(dir = %module.dir.display(), force, "Running Node.js build");

        if force {
            self.clean(module)?;
        }

        let lockfile = module.dir.join(YARN_LOCKFILE);
        if self.fs.exists(&lockfile) {
            debug!("Yarn lockfile detected");
            // TODO: reject Yarn releases that cannot read this lockfile version
            let yarn = self
                .yarn
                .as_ref()
                .ok_or_error(|| BuildError::lockfile_without_toolchain(&lockfile, ToolKind::Yarn))?;
            return self.install(yarn, YARN_INSTALL_ARGS, &module.dir);
        }

        let npm = self
            .npm
            .as_ref()
            .ok_or_error(|| BuildError::toolchain_not_found(ToolKind::Npm))?;
        self.install(npm, NPM_INSTALL_ARGS, &module.dir)
    }

    fn analyze(&self, module: &Module, _allow_unresolved: bool) -> Result<Vec<Box<dyn Dependency>>> {
        Ok(self
            .analyze_modules(module)?
            .into_iter()
            .map(|dependency| Box::new(dependency) as Box<dyn Dependency>)
            .collect())
    }

    fn is_built(&self, module: &Module, _allow_unresolved: bool) -> Result<bool> {
        let _entered = self.span.enter();
        let node_modules = module.dir.join(NODE_MODULES);
        debug!(path = %node_modules.display(), "Checking node_modules");
        // Presence only; the installed tree is not compared against package.json
        Ok(self.fs.is_dir(&node_modules))
    }

    fn is_module(&self, _target: &str) -> Result<bool> {
        Err(BuildError::unsupported("IsModule", self.name()))
    }

    fn infer_module(&self, _target: &str) -> Result<Module> {
        Err(BuildError::unsupported("InferModule", self.name()))
    }

    fn toolchains(&self) -> Vec<Toolchain> {
        [&self.node, &self.npm, &self.yarn]
            .into_iter()
            .flatten()
            .cloned()
            .collect()
    }
}
