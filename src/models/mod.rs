//! Data models for depbuild

pub mod config;
pub mod dependency;
pub mod module;
pub mod report;
pub mod toolchain;
