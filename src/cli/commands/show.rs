//! `mct show` command - Inspect the properties a schema declares

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::schema::{Property, Schema};

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Schema file to inspect
    pub path: PathBuf,

    /// Show the canonical JSON representation instead of a formatted summary
    #[arg(long)]
    pub raw: bool,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let schema = Schema::load_file(&args.path)?;

    if args.raw {
        let text = std::fs::read_to_string(&args.path).into_diagnostic()?;
        let document: serde_json::Value = serde_yml::from_str(&text).into_diagnostic()?;
        println!(
            "{}",
            serde_json::to_string_pretty(&document).into_diagnostic()?
        );
        return Ok(());
    }

    println!("{}\n", style(args.path.display().to_string()).bold());
    println!(
        "{:<28} {:<10} {:<10} {:<16} {}",
        "NAME", "TYPE", "REQUIRED", "DEFAULT", "EXTENSION"
    );
    println!("{}", "-".repeat(80));

    for (name, property) in schema.properties() {
        println!(
            "{:<28} {:<10} {:<10} {:<16} {}",
            name,
            property.property_type().as_tag(),
            if schema.is_required(name) { "yes" } else { "" },
            property
                .default()
                .map(|d| d.to_string())
                .unwrap_or_default(),
            describe_extension(property),
        );
    }

    println!(
        "\n{} properties, {} required",
        schema.properties().len(),
        schema.required().len()
    );
    Ok(())
}

fn describe_extension(property: &Property) -> String {
    let Some(xtype) = property.xtype() else {
        return String::new();
    };

    match property.password() {
        Some(password) => format!(
            "{} (length {}, symbols {}, base64 {})",
            xtype, password.length, password.include_symbols, password.base64
        ),
        None => xtype.to_string(),
    }
}
