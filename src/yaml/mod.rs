//! YAML source handling - schema diagnostics with source locations

pub mod diagnostics;

pub use diagnostics::SchemaDiagnostic;
