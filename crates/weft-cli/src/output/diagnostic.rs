//! Miette diagnostic wrapper for weft compile errors.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;
use weft::{CompileError, ParseError};

/// A miette-compatible diagnostic for weft compile errors.
///
/// Parse errors carry a source position and get a labeled span; other
/// compile errors point at the file as a whole.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(weft::compile))]
pub struct WeftDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl WeftDiagnostic {
    /// Create a diagnostic from a compile error with source context.
    pub fn from_compile_error(path: &Path, content: &str, err: &CompileError) -> Self {
        let (line, column, help) = match err {
            CompileError::Parse(parse) => {
                let (line, column) = parse_position(parse);
                let help = match parse {
                    ParseError::UnknownCommand { suggestions, .. } if !suggestions.is_empty() => {
                        Some(format!("did you mean '\\{}'?", suggestions.join("', '\\")))
                    }
                    ParseError::InvalidParameterIndex { .. } => {
                        Some("parameter placeholders are 1-based: \\1, \\2, ...".to_string())
                    }
                    _ => None,
                };
                (line, column, help)
            }
            _ => (1, 1, None),
        };

        // Convert line:column to byte offset.
        // Sum of (line_length + 1) for lines before error line, plus column.
        let offset = content
            .lines()
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + column.saturating_sub(1);

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = offset.min(content.len());

        WeftDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message: err.to_string(),
            help,
        }
    }
}

/// The 1-based source position a parse error points at.
fn parse_position(err: &ParseError) -> (usize, usize) {
    match err {
        ParseError::Syntax { line, column, .. }
        | ParseError::UnterminatedBlock { line, column }
        | ParseError::InvalidParameterIndex { line, column, .. }
        | ParseError::UnknownCommand { line, column, .. } => (*line, *column),
    }
}
