//! Parsers for ecosystem manifest files

pub mod package_json;

pub use package_json::PackageJsonParser;
