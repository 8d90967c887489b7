//! Error handling for depbuild
//!
//! This module provides the error type shared by every builder, a result
//! alias, and helpers for attaching context and handling errors by severity.

pub mod context;
pub mod types;

pub use context::{handle_error, OptionExt, ResultExt};
pub use types::{BuildError, ErrorSeverity, Result};
