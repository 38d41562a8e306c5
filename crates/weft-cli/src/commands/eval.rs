//! Implementation of the `weft eval` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use miette::{Result, miette};
use serde::Serialize;
use weft::{Locale, Value};

use crate::output::WeftDiagnostic;

/// Arguments for the eval command.
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Language code for classification (e.g., en, de, ru)
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// File with entry definitions
    #[arg(long, required = true)]
    pub source: PathBuf,

    /// Name of the entry to instantiate
    #[arg(long, required = true)]
    pub entry: String,

    /// Positional call parameters (repeatable); integers classify as numbers
    #[arg(short = 'p', long = "param")]
    pub params: Vec<String>,

    /// Font names `\font{}` commands may reference (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub fonts: Vec<String>,

    /// Output as JSON, including format markers
    #[arg(long)]
    pub json: bool,
}

/// JSON output for eval results.
#[derive(Serialize)]
struct EvalResult {
    text: String,
    markers: Vec<MarkerJson>,
}

/// One format marker in JSON output.
#[derive(Serialize)]
struct MarkerJson {
    position: usize,
    payload: String,
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> Result<i32> {
    let content = read_to_string(&args.source)
        .map_err(|e| miette!("Failed to read {}: {}", args.source.display(), e))?;

    let mut locale = Locale::builder()
        .language(args.lang)
        .fonts(args.fonts)
        .build();
    if let Err(e) = locale.load_source(&content) {
        if let weft::LoadError::Compile { source, .. } = &e {
            let diagnostic = WeftDiagnostic::from_compile_error(&args.source, &content, source);
            return Err(diagnostic.into());
        }
        return Err(miette!("Failed to load {}: {}", args.source.display(), e));
    }

    // Parameters are positional; values that parse as integers classify
    // as numbers, everything else passes through as a string.
    let params: Vec<Value> = args
        .params
        .into_iter()
        .map(|raw| match raw.parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::from(raw),
        })
        .collect();

    match locale.instantiate(&args.entry, &params) {
        Ok(result) => {
            if args.json {
                let output = EvalResult {
                    text: result.text.clone(),
                    markers: result
                        .markers
                        .iter()
                        .map(|m| MarkerJson {
                            position: m.position,
                            payload: format!("{:?}", m.payload),
                        })
                        .collect(),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output)
                        .expect("JSON serialization should not fail")
                );
            } else {
                println!("{}", result);
            }
            Ok(exitcode::OK)
        }
        Err(e) => {
            if args.json {
                let output = serde_json::json!({
                    "error": e.to_string()
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&output)
                        .expect("JSON serialization should not fail")
                );
            } else {
                eprintln!("Evaluation error: {}", e);
            }
            Ok(exitcode::DATAERR)
        }
    }
}
