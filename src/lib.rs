//! MCT: Marketplace Config Toolkit
//!
//! Validates declarative parameter schemas for deployment packages,
//! expressed as plain-text YAML, and exposes typed access to their
//! properties.

pub mod cli;
pub mod schema;
pub mod yaml;
