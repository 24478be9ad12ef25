//! Decal descriptor templates.
//!
//! A template is an arbitrary JSON document. Only the mesh size leaves at
//! `Vector.colossal_MeshSize.{x,z}` are rewritten; every other field, and
//! the field order, passes through untouched. Numbers keep their source
//! text, so large integers and long decimals are written back verbatim.

use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::{DecalError, Result};
use crate::geometry::MeshSize;

/// Path to the object holding the mesh size leaves.
pub const MESH_SIZE_PATH: [&str; 2] = ["Vector", "colossal_MeshSize"];

const INDENT: &[u8] = b"    ";

/// A parsed decal descriptor template.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    value: Value,
}

impl Template {
    /// Load a template from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DecalError::Template {
            message: format!("Failed to read {}: {}", path.display(), e),
            help: Some("Check the template path".to_string()),
        })?;

        Self::parse(&content)
    }

    /// Parse a template from a JSON string.
    pub fn parse(content: &str) -> Result<Self> {
        let value = serde_json::from_str(content).map_err(|e| DecalError::Template {
            message: format!("Invalid JSON: {}", e),
            help: None,
        })?;
        Ok(Self { value })
    }

    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    /// Look up a nested field by object keys.
    pub fn get_path(&self, path: &[&str]) -> Result<&Value> {
        let mut current = &self.value;
        for (depth, key) in path.iter().enumerate() {
            current = object_field(current, key, &path[..depth])?;
        }
        Ok(current)
    }

    /// Replace an existing nested field. Missing keys are not created.
    pub fn set_path(&mut self, path: &[&str], value: Value) -> Result<()> {
        let mut current = &mut self.value;
        for (depth, key) in path.iter().enumerate() {
            let parent = &path[..depth];
            current = match current {
                Value::Object(map) => map
                    .get_mut(*key)
                    .ok_or_else(|| missing_key(key, parent))?,
                other => return Err(not_an_object(other, parent)),
            };
        }
        *current = value;
        Ok(())
    }

    /// Write `mesh` into `Vector.colossal_MeshSize.x` and `.z`.
    ///
    /// Both leaves must already exist and hold numbers.
    pub fn instantiate(&mut self, mesh: MeshSize) -> Result<()> {
        let [vector, mesh_key] = MESH_SIZE_PATH;

        for axis in ["x", "z"] {
            let path = [vector, mesh_key, axis];
            let leaf = self.get_path(&path)?;
            if !leaf.is_number() {
                return Err(DecalError::Template {
                    message: format!(
                        "'{}' must be a number, found {}",
                        path.join("."),
                        kind(leaf)
                    ),
                    help: None,
                });
            }
        }

        self.set_path(&[vector, mesh_key, "x"], Value::from(mesh.x))?;
        self.set_path(&[vector, mesh_key, "z"], Value::from(mesh.z))?;
        Ok(())
    }

    /// Serialize with 4-space indentation.
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        self.value
            .serialize(&mut ser)
            .map_err(|e| DecalError::template(format!("Failed to serialize: {}", e)))?;
        String::from_utf8(buf).map_err(|e| DecalError::template(e.to_string()))
    }

    /// Write the pretty-printed document to `path`.
    pub fn write(&self, path: &Path) -> Result<()> {
        let content = self.to_pretty_string()?;
        std::fs::write(path, content).map_err(|e| DecalError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write descriptor: {}", e),
        })
    }
}

fn object_field<'a>(value: &'a Value, key: &str, parent: &[&str]) -> Result<&'a Value> {
    match value {
        Value::Object(map) => map.get(key).ok_or_else(|| missing_key(key, parent)),
        other => Err(not_an_object(other, parent)),
    }
}

fn missing_key(key: &str, parent: &[&str]) -> DecalError {
    let location = if parent.is_empty() {
        "template root".to_string()
    } else {
        format!("'{}'", parent.join("."))
    };
    DecalError::Template {
        message: format!("missing key '{}' in {}", key, location),
        help: Some(format!(
            "Templates must contain {}.x and {}.z",
            MESH_SIZE_PATH.join("."),
            MESH_SIZE_PATH.join(".")
        )),
    }
}

fn not_an_object(value: &Value, parent: &[&str]) -> DecalError {
    let location = if parent.is_empty() {
        "template root".to_string()
    } else {
        format!("'{}'", parent.join("."))
    };
    DecalError::template(format!("{} must be an object, found {}", location, kind(value)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
