//! Schema system - property declarations, validation, and typed access

pub mod error;
pub mod extension;
pub mod loader;
pub mod property;

pub use error::{InvalidSchema, LoadError};
pub use extension::{Extension, GeneratedPassword};
pub use loader::Schema;
pub use property::{Property, PropertyType, PropertyValue, ValueParseError};
