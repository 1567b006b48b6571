//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand};

use crate::cli::commands::{
    completions::CompletionsArgs, show::ShowArgs, validate::ValidateArgs,
};

#[derive(Parser)]
#[command(name = "mct")]
#[command(author, version, about = "Marketplace Config Toolkit")]
#[command(
    long_about = "Validates declarative parameter schemas for marketplace deployment packages and reports typed property information."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate schema files
    Validate(ValidateArgs),

    /// Show the properties a schema declares
    Show(ShowArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}
