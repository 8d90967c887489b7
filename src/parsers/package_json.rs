//! Package.json parsing functionality
//!
//! Only the identity fields of a manifest matter to the builder: the
//! top-level `name` and `version` strings. Every other field is ignored.

use serde_json::{Map, Value};
use std::path::Path;

use crate::core::fs::FileSystem;
use crate::error::{BuildError, Result, ResultExt};
use crate::models::dependency::NodeModule;

/// Parser for package.json files
pub struct PackageJsonParser;

impl PackageJsonParser {
    /// Parse package.json content into a dependency identity
    pub fn parse(content: &str) -> Result<NodeModule> {
        Self::parse_at(content, Path::new("package.json"))
    }

    /// Read and parse the manifest at `path` through `fs`
    pub fn parse_file(fs: &dyn FileSystem, path: &Path) -> Result<NodeModule> {
        let content = fs.read_to_string(path).with_file_context(path)?;

        Self::parse_at(&content, path)
    }

    /// Extract just the `name` field, tolerating manifests without a version
    pub fn parse_name(content: &str) -> Option<String> {
        let value: Value = serde_json::from_str(content).ok()?;
        value
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }

    fn parse_at(content: &str, path: &Path) -> Result<NodeModule> {
        let json_value: Value = serde_json::from_str(content)
            .map_err(|e| BuildError::json_parse_error(path, e))?;

        let obj = match json_value {
            Value::Object(obj) => obj,
            _ => {
                return Err(BuildError::InvalidPackageJson {
                    path: path.to_path_buf(),
                    message: "Root value is not an object".into(),
                });
            }
        };

        let name = Self::extract_string_field(&obj, "name", path)?;
        let version = Self::extract_string_field(&obj, "version", path)?;

        Ok(NodeModule { name, version })
    }

    fn extract_string_field(obj: &Map<String, Value>, field: &str, path: &Path) -> Result<String> {
        match obj.get(field) {
            Some(Value::String(value)) if !value.is_empty() => Ok(value.clone()),
            Some(Value::String(_)) => Err(BuildError::InvalidPackageJson {
                path: path.to_path_buf(),
                message: format!("Field '{}' is empty", field),
            }),
            Some(_) => Err(BuildError::InvalidPackageJson {
                path: path.to_path_buf(),
                message: format!("Field '{}' is not a string", field),
            }),
            None => Err(BuildError::InvalidPackageJson {
                path: path.to_path_buf(),
                message: format!("Missing required field '{}'", field),
            }),
        }
    }
}
