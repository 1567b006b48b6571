//! Error types for schema loading

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// A schema definition that cannot be accepted.
///
/// Loading is atomic: any of these failures means no `Schema` is produced.
#[derive(Debug, Error, Diagnostic)]
pub enum InvalidSchema {
    #[error("YAML syntax error: {0}")]
    #[diagnostic(code(mct::schema::yaml))]
    Yaml(#[from] serde_yml::Error),

    #[error("schema document must be a mapping, got {found}")]
    #[diagnostic(code(mct::schema::document))]
    NotAMapping { found: String },

    #[error("'{section}' must be a {expected}")]
    #[diagnostic(code(mct::schema::section))]
    MalformedSection {
        section: &'static str,
        expected: &'static str,
    },

    #[error("property '{property}' must be declared as a mapping")]
    #[diagnostic(code(mct::schema::property))]
    MalformedProperty { property: String },

    #[error("property '{property}' is missing a type")]
    #[diagnostic(code(mct::schema::missing_type))]
    MissingType { property: String },

    #[error("property '{property}' has unknown type {tag}")]
    #[diagnostic(code(mct::schema::unknown_type))]
    UnknownType { property: String, tag: String },

    #[error("property '{property}' default {value} does not match type '{tag}'")]
    #[diagnostic(code(mct::schema::default_mismatch))]
    DefaultTypeMismatch {
        property: String,
        value: String,
        tag: &'static str,
    },

    #[error("property '{property}' has unknown extension type '{xtype}'")]
    #[diagnostic(code(mct::schema::unknown_extension))]
    UnknownExtension { property: String, xtype: String },

    #[error("property '{property}' has a malformed extension: {reason}")]
    #[diagnostic(code(mct::schema::extension))]
    MalformedExtension { property: String, reason: String },

    #[error("required property '{name}' is not declared under 'properties'")]
    #[diagnostic(code(mct::schema::unknown_required))]
    UnknownRequired { name: String },
}

/// Failure to load a schema from a file
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("failed to read schema file '{}'", path.display())]
    #[diagnostic(code(mct::schema::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Invalid(#[from] InvalidSchema),
}
