//! Schema error diagnostics with source locations
//!
//! Wraps an [`InvalidSchema`] together with the YAML text it came from, so
//! the error renders with a label pointing at the offending declaration.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::schema::InvalidSchema;

/// An [`InvalidSchema`] rendered against its YAML source
#[derive(Debug, Error, Diagnostic)]
#[error("{cause}")]
#[diagnostic(code(mct::schema::invalid))]
pub struct SchemaDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("{}", self.hint)]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    hint: String,

    cause: InvalidSchema,
}

impl SchemaDiagnostic {
    /// Attach source context to a schema error
    pub fn new(cause: InvalidSchema, source: &str, filename: &str) -> Self {
        let (span, hint) = locate(&cause, source);
        let help = generate_help(&cause);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span,
            help,
            hint,
            cause,
        }
    }

    /// Get the underlying schema error
    pub fn cause(&self) -> &InvalidSchema {
        &self.cause
    }
}

/// Find the span the error should point at
fn locate(cause: &InvalidSchema, source: &str) -> (SourceSpan, String) {
    let fallback = SourceSpan::from(0..source.len().min(1));

    match cause {
        InvalidSchema::Yaml(err) => {
            let span = err
                .location()
                .map(|loc| {
                    let offset = line_col_to_offset(source, loc.line(), loc.column());
                    SourceSpan::from(offset..offset.saturating_add(1))
                })
                .unwrap_or(fallback);
            (span, "invalid YAML".to_string())
        }
        InvalidSchema::NotAMapping { .. } => (fallback, "expected a mapping here".to_string()),
        InvalidSchema::MalformedSection { section, .. } => (
            key_span(source, section).unwrap_or(fallback),
            format!("this '{section}' section"),
        ),
        InvalidSchema::MalformedProperty { property }
        | InvalidSchema::MissingType { property }
        | InvalidSchema::UnknownType { property, .. }
        | InvalidSchema::DefaultTypeMismatch { property, .. }
        | InvalidSchema::UnknownExtension { property, .. }
        | InvalidSchema::MalformedExtension { property, .. } => (
            key_span(source, property).unwrap_or(fallback),
            "declared here".to_string(),
        ),
        InvalidSchema::UnknownRequired { name } => (
            list_item_span(source, name)
                .or_else(|| key_span(source, "required"))
                .unwrap_or(fallback),
            "listed as required here".to_string(),
        ),
    }
}

/// Generate helpful suggestions for common schema mistakes
fn generate_help(cause: &InvalidSchema) -> Option<String> {
    match cause {
        InvalidSchema::Yaml(_) => {
            Some("Check YAML syntax - proper indentation, colons, quotes".to_string())
        }
        InvalidSchema::UnknownType { .. } => {
            Some("Valid property types are: string, int, integer, number, boolean".to_string())
        }
        InvalidSchema::UnknownExtension { .. } => {
            Some("The only recognized extension type is GENERATED_PASSWORD".to_string())
        }
        InvalidSchema::UnknownRequired { .. } => {
            Some("Every name under 'required' must be declared under 'properties'".to_string())
        }
        InvalidSchema::DefaultTypeMismatch { tag, .. } => {
            Some(format!("The default must be a valid {tag} literal"))
        }
        _ => None,
    }
}

/// Find the span of `key:` in the source, searching line by line
fn key_span(source: &str, key: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in source.lines() {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(key) {
            if rest.trim_start().starts_with(':') {
                let indent = line.len() - trimmed.len();
                return Some((offset + indent, key.len()).into());
            }
        }
        offset += line.len() + 1;
    }
    None
}

/// Find the span of a `- item` sequence entry
fn list_item_span(source: &str, item: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in source.lines() {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix('-') {
            if rest.trim() == item {
                let start = offset + (line.len() - rest.trim_start().len());
                return Some((start, item.len()).into());
            }
        }
        offset += line.len() + 1;
    }
    None
}

/// Convert a 1-based line/column to a byte offset
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let mut offset = 0;
    for (index, text) in source.lines().enumerate() {
        if index + 1 == line {
            return offset + column.saturating_sub(1).min(text.len());
        }
        offset += text.len() + 1;
    }
    source.len()
}
