//! The builder contract and its ecosystem implementations
//!
//! A builder takes a [`Module`] through a fixed sequence of operations:
//!
//! 1. [`Builder::initialize`] locates the toolchains the ecosystem needs.
//! 2. [`Builder::build`] installs the module's dependencies, optionally
//!    clearing previous install artifacts first.
//! 3. [`Builder::analyze`] lists the installed dependencies.
//! 4. [`Builder::is_built`] cheaply reports whether an install exists.
//!
//! Ordering is not enforced by the types. Calling `build` before
//! `initialize` returns an error naming the missing toolchain.

pub mod nodejs;

pub use nodejs::NodeJsBuilder;

use crate::error::Result;
use crate::models::dependency::Dependency;
use crate::models::module::Module;
use crate::models::toolchain::Toolchain;

/// Operations every ecosystem-specific builder provides
pub trait Builder {
    /// Short name used in logs and error messages
    fn name(&self) -> &'static str;

    /// Locate and record the toolchains this builder needs
    fn initialize(&mut self) -> Result<()>;

    /// Install the module's dependencies; `force` clears earlier installs first
    fn build(&self, module: &Module, force: bool) -> Result<()>;

    /// List the dependencies installed for `module`
    fn analyze(&self, module: &Module, allow_unresolved: bool) -> Result<Vec<Box<dyn Dependency>>>;

    /// Whether `module` already has an install to analyze
    fn is_built(&self, module: &Module, allow_unresolved: bool) -> Result<bool>;

    /// Whether `target` names a module this builder handles
    fn is_module(&self, target: &str) -> Result<bool>;

    /// Resolve `target` into a module
    fn infer_module(&self, target: &str) -> Result<Module>;

    /// Toolchains resolved by the last `initialize`
    fn toolchains(&self) -> Vec<Toolchain>;
}
