//! Command-line interface components

pub mod args;
pub mod commands;

pub use args::{Action, Args};
pub use commands::{perform, Command};
