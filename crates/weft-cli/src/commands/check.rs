//! Implementation of the `weft check` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use miette::{IntoDiagnostic, Result, miette};
use owo_colors::OwoColorize;
use serde::Serialize;
use weft::TextStore;

use crate::output::WeftDiagnostic;

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Files to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Font names `\font{}` commands may reference (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub fonts: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Serialize)]
struct CheckResult {
    file: String,
    ok: bool,
    entries: usize,
    error: Option<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<i32> {
    let mut results: Vec<CheckResult> = Vec::new();
    let mut first_failure: Option<WeftDiagnostic> = None;

    for file in &args.files {
        let content = read_to_string(file)
            .map_err(|e| miette!("Failed to read {}: {}", file.display(), e))?;

        match TextStore::compile(&content, args.fonts.clone()) {
            Ok(store) => {
                results.push(CheckResult {
                    file: file.display().to_string(),
                    ok: true,
                    entries: store.entry_count(),
                    error: None,
                });
            }
            Err(e) => {
                results.push(CheckResult {
                    file: file.display().to_string(),
                    ok: false,
                    entries: 0,
                    error: Some(e.to_string()),
                });
                if first_failure.is_none() {
                    first_failure = Some(WeftDiagnostic::from_compile_error(file, &content, &e));
                }
            }
        }
    }

    let failed = results.iter().any(|r| !r.ok);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).into_diagnostic()?
        );
    } else {
        for result in &results {
            if result.ok {
                println!(
                    "{} {} ({} entries)",
                    "ok".green(),
                    result.file,
                    result.entries
                );
            } else {
                println!("{} {}", "error".red(), result.file);
            }
        }
        if let Some(diagnostic) = first_failure {
            return Err(diagnostic.into());
        }
    }

    if failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}
