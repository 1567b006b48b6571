//! Provider extension blocks attached to property declarations
//!
//! A declaration may carry an `x-google-marketplace` block whose `type`
//! names the extension kind. The type name is an open discriminant: each
//! recognized name has a parser arm in [`Extension::from_definition`], so
//! new kinds are added here without touching the loader.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::schema::error::InvalidSchema;

/// Extension type name for generated passwords
pub const GENERATED_PASSWORD: &str = "GENERATED_PASSWORD";

/// A recognized provider extension attached to a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    GeneratedPassword(GeneratedPassword),
}

impl Extension {
    /// Key under which the extension block appears in a declaration
    pub const KEY: &'static str = "x-google-marketplace";

    pub(crate) fn from_definition(property: &str, block: &Value) -> Result<Self, InvalidSchema> {
        let fields = block
            .as_object()
            .ok_or_else(|| InvalidSchema::MalformedExtension {
                property: property.to_string(),
                reason: "extension block must be a mapping".to_string(),
            })?;

        let xtype = fields.get("type").and_then(Value::as_str).ok_or_else(|| {
            InvalidSchema::MalformedExtension {
                property: property.to_string(),
                reason: "extension block must declare a type".to_string(),
            }
        })?;

        match xtype {
            GENERATED_PASSWORD => Ok(Extension::GeneratedPassword(GeneratedPassword::from_block(
                property, fields,
            )?)),
            other => Err(InvalidSchema::UnknownExtension {
                property: property.to_string(),
                xtype: other.to_string(),
            }),
        }
    }

    /// Get the extension's declared type name
    pub fn xtype(&self) -> &'static str {
        match self {
            Extension::GeneratedPassword(_) => GENERATED_PASSWORD,
        }
    }

    /// Get the generated-password parameters, if this is that kind
    pub fn password(&self) -> Option<&GeneratedPassword> {
        match self {
            Extension::GeneratedPassword(spec) => Some(spec),
        }
    }
}

/// Parameters for a password the packaging tool will generate
///
/// Generation itself happens elsewhere; the schema only declares how.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPassword {
    #[serde(default = "default_length")]
    pub length: u32,

    #[serde(default)]
    pub include_symbols: bool,

    #[serde(default = "default_base64")]
    pub base64: bool,
}

fn default_length() -> u32 {
    10
}

fn default_base64() -> bool {
    true
}

impl Default for GeneratedPassword {
    fn default() -> Self {
        Self {
            length: default_length(),
            include_symbols: false,
            base64: default_base64(),
        }
    }
}

impl GeneratedPassword {
    fn from_block(property: &str, fields: &Map<String, Value>) -> Result<Self, InvalidSchema> {
        let spec = match fields.get("generatedPassword") {
            Some(block) if !block.is_null() => {
                serde_json::from_value(block.clone()).map_err(|e| {
                    InvalidSchema::MalformedExtension {
                        property: property.to_string(),
                        reason: format!("bad generatedPassword parameters: {e}"),
                    }
                })?
            }
            _ => {
                // Legacy form: a bare `length` on the extension block itself
                let mut spec = GeneratedPassword::default();
                if let Some(length) = fields.get("length") {
                    spec.length = length
                        .as_u64()
                        .and_then(|l| u32::try_from(l).ok())
                        .ok_or_else(|| InvalidSchema::MalformedExtension {
                            property: property.to_string(),
                            reason: format!("length must be a positive integer, got {length}"),
                        })?;
                }
                spec
            }
        };

        if spec.length == 0 {
            return Err(InvalidSchema::MalformedExtension {
                property: property.to_string(),
                reason: "generated password length must be positive".to_string(),
            });
        }

        Ok(spec)
    }
}
