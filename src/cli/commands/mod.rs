//! Command implementations

pub mod completions;
pub mod show;
pub mod validate;
