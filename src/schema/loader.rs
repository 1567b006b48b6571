//! Schema loading and validation

use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::schema::error::{InvalidSchema, LoadError};
use crate::schema::property::Property;

/// A validated collection of property declarations plus the set of
/// required property names
///
/// A schema either loads completely or not at all; once constructed it is
/// immutable, so shared read access needs no coordination.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    properties: BTreeMap<String, Property>,
    required: Vec<String>,
}

impl Schema {
    /// Load a schema from a YAML file
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::load_str(&text)?)
    }

    /// Load a schema from YAML text
    pub fn load_str(text: &str) -> Result<Self, InvalidSchema> {
        let document: Value = serde_yml::from_str(text)?;

        let Some(root) = document.as_object() else {
            return Err(InvalidSchema::NotAMapping {
                found: node_kind(&document).to_string(),
            });
        };

        let mut properties = BTreeMap::new();
        match root.get("properties") {
            None | Some(Value::Null) => {}
            Some(Value::Object(declarations)) => {
                for (name, definition) in declarations {
                    let property = Property::from_definition(name, definition)?;
                    properties.insert(name.clone(), property);
                }
            }
            Some(_) => {
                return Err(InvalidSchema::MalformedSection {
                    section: "properties",
                    expected: "mapping of property declarations",
                })
            }
        }

        let required = match root.get("required") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(names)) => {
                let mut required = Vec::with_capacity(names.len());
                for name in names {
                    let Some(name) = name.as_str() else {
                        return Err(InvalidSchema::MalformedSection {
                            section: "required",
                            expected: "sequence of property names",
                        });
                    };
                    required.push(name.to_string());
                }
                required
            }
            Some(_) => {
                return Err(InvalidSchema::MalformedSection {
                    section: "required",
                    expected: "sequence of property names",
                })
            }
        };

        // Fail fast on requirements that can never be satisfied
        for name in &required {
            if !properties.contains_key(name) {
                return Err(InvalidSchema::UnknownRequired { name: name.clone() });
            }
        }

        Ok(Self {
            properties,
            required,
        })
    }

    /// Get all declared properties, keyed by name
    pub fn properties(&self) -> &BTreeMap<String, Property> {
        &self.properties
    }

    /// Look up a single property by name
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    /// Get the names a caller must supply values for, in declaration order
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Whether the named property is required
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|n| n == name)
    }
}

fn node_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
