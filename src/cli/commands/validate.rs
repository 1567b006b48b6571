//! `mct validate` command - Validate schema files

use console::style;
use miette::Result;
use std::path::PathBuf;
use walkdir::WalkDir;

use crate::schema::Schema;
use crate::yaml::SchemaDiagnostic;

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Schema files or directories to validate
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Show summary only, don't show individual errors
    #[arg(long)]
    pub summary: bool,
}

/// Validation statistics
#[derive(Default)]
struct ValidationStats {
    files_checked: usize,
    files_passed: usize,
    files_failed: usize,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let files = expand_paths(&args.paths);
    if files.is_empty() {
        return Err(miette::miette!("no schema files found under the given paths"));
    }

    println!(
        "{} Validating {} file(s)...\n",
        style("→").blue(),
        files.len()
    );

    let mut stats = ValidationStats::default();

    for path in &files {
        stats.files_checked += 1;

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                if !args.summary {
                    println!("{} {} - {}", style("✗").red(), path.display(), e);
                }
                stats.files_failed += 1;
                continue;
            }
        };

        match Schema::load_str(&content) {
            Ok(schema) => {
                stats.files_passed += 1;
                if !args.summary {
                    println!(
                        "{} {} ({} properties, {} required)",
                        style("✓").green(),
                        path.display(),
                        schema.properties().len(),
                        schema.required().len()
                    );
                }
            }
            Err(e) => {
                stats.files_failed += 1;
                if !args.summary {
                    println!("{} {}", style("✗").red(), path.display());
                    let report = miette::Report::new(SchemaDiagnostic::new(
                        e,
                        &content,
                        &path.display().to_string(),
                    ));
                    eprintln!("{:?}", report);
                }
            }
        }
    }

    println!();
    println!(
        "{} checked, {} passed, {} failed",
        stats.files_checked,
        style(stats.files_passed).green(),
        style(stats.files_failed).red()
    );

    if stats.files_failed > 0 {
        return Err(miette::miette!(
            "{} schema file(s) failed validation",
            stats.files_failed
        ));
    }
    Ok(())
}

/// Expand directories to the YAML files they contain
fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let candidate = entry.path();
                if candidate
                    .extension()
                    .map_or(false, |e| e == "yaml" || e == "yml")
                {
                    files.push(candidate.to_path_buf());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_expand_paths_finds_yaml_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.yaml"), "properties: {}\n").unwrap();
        fs::write(dir.path().join("b.yml"), "properties: {}\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "not yaml").unwrap();

        let files = expand_paths(&[dir.path().to_path_buf()]);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_expand_paths_keeps_explicit_files() {
        let files = expand_paths(&[PathBuf::from("schema.yaml")]);
        assert_eq!(files, [PathBuf::from("schema.yaml")]);
    }
}
