//! Property declarations: type resolution, typed values, and coercion

use serde_json::Value;
use std::fmt;
use thiserror::Error;

use crate::schema::error::InvalidSchema;
use crate::schema::extension::{Extension, GeneratedPassword};

/// Declared type of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    String,
    Integer,
    Number,
    Boolean,
}

impl PropertyType {
    /// Resolve a declared type tag
    ///
    /// `int` and `integer` are synonyms; `number` is floating point.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(PropertyType::String),
            "int" | "integer" => Some(PropertyType::Integer),
            "number" => Some(PropertyType::Number),
            "boolean" => Some(PropertyType::Boolean),
            _ => None,
        }
    }

    /// Get the canonical tag for this type
    pub fn as_tag(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Integer => "integer",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
        }
    }

    /// Convert a textual value into this type
    pub fn parse_value(&self, text: &str) -> Result<PropertyValue, ValueParseError> {
        match self {
            PropertyType::String => Ok(PropertyValue::String(text.to_string())),
            PropertyType::Integer => text
                .trim()
                .parse::<i64>()
                .map(PropertyValue::Integer)
                .map_err(|_| ValueParseError::Integer {
                    value: text.to_string(),
                }),
            PropertyType::Number => text
                .trim()
                .parse::<f64>()
                .map(PropertyValue::Number)
                .map_err(|_| ValueParseError::Number {
                    value: text.to_string(),
                }),
            PropertyType::Boolean => match text {
                "true" => Ok(PropertyValue::Boolean(true)),
                "false" => Ok(PropertyValue::Boolean(false)),
                _ => Err(ValueParseError::Boolean {
                    value: text.to_string(),
                }),
            },
        }
    }

    /// Coerce a parsed YAML node into this type
    ///
    /// Strings follow the same rules as [`PropertyType::parse_value`];
    /// native scalars must already match the target type. Integers widen
    /// to number.
    pub fn coerce(&self, value: &Value) -> Result<PropertyValue, ValueParseError> {
        if let Value::String(text) = value {
            return self.parse_value(text);
        }

        match (self, value) {
            (PropertyType::Integer, Value::Number(n)) => n
                .as_i64()
                .map(PropertyValue::Integer)
                .ok_or_else(|| self.mismatch(value)),
            (PropertyType::Number, Value::Number(n)) => n
                .as_f64()
                .map(PropertyValue::Number)
                .ok_or_else(|| self.mismatch(value)),
            (PropertyType::Boolean, Value::Bool(b)) => Ok(PropertyValue::Boolean(*b)),
            _ => Err(self.mismatch(value)),
        }
    }

    fn mismatch(&self, value: &Value) -> ValueParseError {
        let value = value.to_string();
        match self {
            PropertyType::String => ValueParseError::String { value },
            PropertyType::Integer => ValueParseError::Integer { value },
            PropertyType::Number => ValueParseError::Number { value },
            PropertyType::Boolean => ValueParseError::Boolean { value },
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// A value carried by a property, matching its declared type
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
}

impl PropertyValue {
    /// Get the type this value belongs to
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::String(_) => PropertyType::String,
            PropertyValue::Integer(_) => PropertyType::Integer,
            PropertyValue::Number(_) => PropertyType::Number,
            PropertyValue::Boolean(_) => PropertyType::Boolean,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => write!(f, "{}", s),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Number(n) => write!(f, "{}", n),
            PropertyValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Errors that can occur when converting a textual value to a typed one
#[derive(Debug, Error)]
pub enum ValueParseError {
    #[error("'{value}' is not a valid integer")]
    Integer { value: String },

    #[error("'{value}' is not a valid number")]
    Number { value: String },

    #[error("'{value}' is not a valid boolean (expected 'true' or 'false')")]
    Boolean { value: String },

    #[error("{value} is not a string")]
    String { value: String },
}

/// One named, typed configuration entry with optional default and
/// optional extension metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    name: String,
    property_type: PropertyType,
    default: Option<PropertyValue>,
    extension: Option<Extension>,
}

impl Property {
    /// Build a property from its declaration mapping
    pub(crate) fn from_definition(name: &str, definition: &Value) -> Result<Self, InvalidSchema> {
        let fields = definition
            .as_object()
            .ok_or_else(|| InvalidSchema::MalformedProperty {
                property: name.to_string(),
            })?;

        let tag = fields.get("type").ok_or_else(|| InvalidSchema::MissingType {
            property: name.to_string(),
        })?;
        let property_type = tag
            .as_str()
            .and_then(PropertyType::from_tag)
            .ok_or_else(|| InvalidSchema::UnknownType {
                property: name.to_string(),
                tag: tag.to_string(),
            })?;

        // An explicit null is the same as no default at all
        let default = match fields.get("default") {
            None | Some(Value::Null) => None,
            Some(value) => Some(property_type.coerce(value).map_err(|_| {
                InvalidSchema::DefaultTypeMismatch {
                    property: name.to_string(),
                    value: value.to_string(),
                    tag: property_type.as_tag(),
                }
            })?),
        };

        let extension = match fields.get(Extension::KEY) {
            None => None,
            Some(block) => Some(Extension::from_definition(name, block)?),
        };

        Ok(Self {
            name: name.to_string(),
            property_type,
            default,
            extension,
        })
    }

    /// Get the property name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the resolved property type
    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    /// Get the declared default, if one was given
    pub fn default(&self) -> Option<&PropertyValue> {
        self.default.as_ref()
    }

    /// Get the extension attached to this property, if any
    pub fn extension(&self) -> Option<&Extension> {
        self.extension.as_ref()
    }

    /// Get the extension's type name, if an extension is attached
    pub fn xtype(&self) -> Option<&str> {
        self.extension.as_ref().map(Extension::xtype)
    }

    /// Get the generated-password parameters, if this property carries them
    pub fn password(&self) -> Option<&GeneratedPassword> {
        self.extension.as_ref().and_then(Extension::password)
    }

    /// Convert a textual value (e.g. supplied on a command line) into this
    /// property's declared type
    pub fn str_to_type(&self, text: &str) -> Result<PropertyValue, ValueParseError> {
        self.property_type.parse_value(text)
    }

    /// Test this property against a partial filter definition
    ///
    /// Every key present in the filter must match the corresponding
    /// attribute of the property; keys the filter does not name are
    /// unconstrained, and unrecognized keys are ignored.
    pub fn matches_definition(&self, definition: &Value) -> bool {
        let Some(fields) = definition.as_object() else {
            return false;
        };

        if let Some(name) = fields.get("name") {
            if name.as_str() != Some(self.name.as_str()) {
                return false;
            }
        }

        if let Some(tag) = fields.get("type") {
            match tag.as_str().and_then(PropertyType::from_tag) {
                Some(resolved) if resolved == self.property_type => {}
                _ => return false,
            }
        }

        if let Some(extension) = fields.get(Extension::KEY) {
            let wanted = extension.get("type").and_then(Value::as_str);
            match (&self.extension, wanted) {
                (Some(attached), Some(xtype)) if attached.xtype() == xtype => {}
                _ => return false,
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn property(name: &str, definition: Value) -> Property {
        Property::from_definition(name, &definition).unwrap()
    }

    #[test]
    fn test_type_tag_resolution() {
        assert_eq!(PropertyType::from_tag("string"), Some(PropertyType::String));
        assert_eq!(PropertyType::from_tag("int"), Some(PropertyType::Integer));
        assert_eq!(
            PropertyType::from_tag("integer"),
            Some(PropertyType::Integer)
        );
        assert_eq!(PropertyType::from_tag("number"), Some(PropertyType::Number));
        assert_eq!(
            PropertyType::from_tag("boolean"),
            Some(PropertyType::Boolean)
        );
        assert_eq!(PropertyType::from_tag("float"), None);
        assert_eq!(PropertyType::from_tag("STRING"), None);
    }

    #[test]
    fn test_str_to_type_int() {
        let p = property("pi", json!({"type": "int"}));
        assert_eq!(p.str_to_type("5").unwrap(), PropertyValue::Integer(5));
    }

    #[test]
    fn test_str_to_type_number() {
        let p = property("pn", json!({"type": "number"}));
        assert_eq!(p.str_to_type("5.2").unwrap(), PropertyValue::Number(5.2));
    }

    #[test]
    fn test_str_to_type_boolean() {
        let p = property("pb", json!({"type": "boolean"}));
        assert_eq!(p.str_to_type("true").unwrap(), PropertyValue::Boolean(true));
        assert_eq!(
            p.str_to_type("false").unwrap(),
            PropertyValue::Boolean(false)
        );
        assert!(matches!(
            p.str_to_type("yes").unwrap_err(),
            ValueParseError::Boolean { .. }
        ));
    }

    #[test]
    fn test_str_to_type_string_is_identity() {
        let p = property("ps", json!({"type": "string"}));
        assert_eq!(
            p.str_to_type("5").unwrap(),
            PropertyValue::String("5".to_string())
        );
    }

    #[test]
    fn test_str_to_type_rejects_non_numeric() {
        let p = property("pi", json!({"type": "int"}));
        assert!(matches!(
            p.str_to_type("abc").unwrap_err(),
            ValueParseError::Integer { .. }
        ));

        let p = property("pn", json!({"type": "number"}));
        assert!(matches!(
            p.str_to_type("abc").unwrap_err(),
            ValueParseError::Number { .. }
        ));
    }

    #[test]
    fn test_coerce_native_values() {
        assert_eq!(
            PropertyType::Integer.coerce(&json!(3)).unwrap(),
            PropertyValue::Integer(3)
        );
        assert_eq!(
            PropertyType::Number.coerce(&json!(1.5)).unwrap(),
            PropertyValue::Number(1.5)
        );
        // integers widen to number
        assert_eq!(
            PropertyType::Number.coerce(&json!(5)).unwrap(),
            PropertyValue::Number(5.0)
        );
        assert_eq!(
            PropertyType::Boolean.coerce(&json!(false)).unwrap(),
            PropertyValue::Boolean(false)
        );
        assert_eq!(
            PropertyType::String.coerce(&json!("hello")).unwrap(),
            PropertyValue::String("hello".to_string())
        );
    }

    #[test]
    fn test_coerce_strings_through_parse_rules() {
        assert_eq!(
            PropertyType::Integer.coerce(&json!("5")).unwrap(),
            PropertyValue::Integer(5)
        );
        assert_eq!(
            PropertyType::Number.coerce(&json!("5.2")).unwrap(),
            PropertyValue::Number(5.2)
        );
        assert_eq!(
            PropertyType::Boolean.coerce(&json!("true")).unwrap(),
            PropertyValue::Boolean(true)
        );
    }

    #[test]
    fn test_coerce_mismatches() {
        // a bare number is not a string
        assert!(PropertyType::String.coerce(&json!(10)).is_err());
        // a float is not an integer
        assert!(PropertyType::Integer.coerce(&json!(3.5)).is_err());
        // a bool is not a number
        assert!(PropertyType::Number.coerce(&json!(true)).is_err());
        // arbitrary text is not a boolean
        assert!(PropertyType::Boolean.coerce(&json!("maybe")).is_err());
    }

    #[test]
    fn test_absent_default_is_none() {
        let p = property("pi", json!({"type": "int"}));
        assert!(p.default().is_none());
    }

    #[test]
    fn test_null_default_is_none() {
        let p = property("pi", json!({"type": "int", "default": null}));
        assert!(p.default().is_none());
    }

    #[test]
    fn test_zero_default_is_present() {
        let p = property("pi", json!({"type": "int", "default": 0}));
        assert_eq!(p.default(), Some(&PropertyValue::Integer(0)));
    }

    #[test]
    fn test_unknown_type_tag_fails() {
        let err = Property::from_definition("p", &json!({"type": "float"})).unwrap_err();
        assert!(matches!(err, InvalidSchema::UnknownType { .. }));
    }

    #[test]
    fn test_missing_type_fails() {
        let err = Property::from_definition("p", &json!({"default": 3})).unwrap_err();
        assert!(matches!(err, InvalidSchema::MissingType { .. }));
    }

    #[test]
    fn test_non_mapping_declaration_fails() {
        let err = Property::from_definition("p", &json!("string")).unwrap_err();
        assert!(matches!(err, InvalidSchema::MalformedProperty { .. }));
    }

    #[test]
    fn test_matches_definition() {
        let property_int = property("propertyInt", json!({"type": "int"}));
        let property_password = property(
            "propertyPassword",
            json!({
                "type": "string",
                "x-google-marketplace": {"type": "GENERATED_PASSWORD"},
            }),
        );

        assert!(property_int.matches_definition(&json!({"name": "propertyInt"})));
        assert!(!property_int.matches_definition(&json!({"name": "propertyPassword"})));
        assert!(property_int.matches_definition(&json!({"type": "int"})));
        assert!(!property_int.matches_definition(&json!({"type": "string"})));
        assert!(!property_int.matches_definition(&json!({
            "x-google-marketplace": {"type": "GENERATED_PASSWORD"},
        })));
        assert!(property_password.matches_definition(&json!({
            "x-google-marketplace": {"type": "GENERATED_PASSWORD"},
        })));
        assert!(property_password.matches_definition(&json!({
            "type": "string",
            "x-google-marketplace": {"type": "GENERATED_PASSWORD"},
        })));
    }

    #[test]
    fn test_matches_definition_resolves_type_synonyms() {
        let p = property("count", json!({"type": "integer"}));
        assert!(p.matches_definition(&json!({"type": "int"})));
        assert!(p.matches_definition(&json!({"type": "integer"})));
    }

    #[test]
    fn test_matches_definition_ignores_unknown_keys() {
        let p = property("count", json!({"type": "int"}));
        assert!(p.matches_definition(&json!({"type": "int", "comment": "ignored"})));
    }

    #[test]
    fn test_matches_definition_unresolvable_filter_type() {
        let p = property("count", json!({"type": "int"}));
        assert!(!p.matches_definition(&json!({"type": "bignum"})));
    }

    #[test]
    fn test_property_value_accessors() {
        assert_eq!(PropertyValue::Integer(3).as_i64(), Some(3));
        assert_eq!(PropertyValue::Integer(3).as_f64(), None);
        assert_eq!(PropertyValue::Number(1.5).as_f64(), Some(1.5));
        assert_eq!(PropertyValue::Boolean(true).as_bool(), Some(true));
        assert_eq!(PropertyValue::String("a".into()).as_str(), Some("a"));
    }

    #[test]
    fn test_property_value_display() {
        assert_eq!(PropertyValue::String("abc".into()).to_string(), "abc");
        assert_eq!(PropertyValue::Integer(7).to_string(), "7");
        assert_eq!(PropertyValue::Boolean(false).to_string(), "false");
    }
}
