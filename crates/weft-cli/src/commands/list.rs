//! Implementation of the `weft list` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;
use weft::TextStore;

use crate::output::WeftDiagnostic;
use crate::output::table::{EntryRow, format_entry_table};

/// Arguments for the list command.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// File with entry definitions
    #[arg(required = true)]
    pub source: PathBuf,

    /// Font names `\font{}` commands may reference (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub fonts: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for one entry.
#[derive(Debug, Serialize)]
struct EntryJson {
    name: String,
    params: usize,
    attributes: Vec<String>,
    alternatives: usize,
}

/// Run the list command.
pub fn run_list(args: ListArgs) -> Result<i32> {
    let content = read_to_string(&args.source)
        .map_err(|e| miette!("Failed to read {}: {}", args.source.display(), e))?;

    let store = match TextStore::compile(&content, args.fonts) {
        Ok(store) => store,
        Err(e) => {
            let diagnostic = WeftDiagnostic::from_compile_error(&args.source, &content, &e);
            return Err(diagnostic.into());
        }
    };

    let rows: Vec<EntryRow> = store
        .entries()
        .map(|(_, entry)| {
            let attributes = entry
                .result_attributes
                .as_slice()
                .iter()
                .filter_map(|&id| store.attributes().name(id).map(str::to_string))
                .collect();
            EntryRow {
                name: entry.name.clone(),
                params: entry.param_count as usize,
                attributes,
                alternatives: store.matchers(entry.matchers).len(),
            }
        })
        .collect();

    if args.json {
        let json_rows: Vec<EntryJson> = rows
            .iter()
            .map(|row| EntryJson {
                name: row.name.clone(),
                params: row.params,
                attributes: row.attributes.clone(),
                alternatives: row.alternatives,
            })
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&json_rows).into_diagnostic()?
        );
    } else {
        println!("{}", format_entry_table(&rows));
    }

    Ok(exitcode::OK)
}
