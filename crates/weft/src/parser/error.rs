//! Parse error types for the entry-definition grammar.

use thiserror::Error;

/// An error that occurred while parsing entry-definition source text.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// A block was opened but never closed before end of input.
    #[error("unterminated block starting at {line}:{column}")]
    UnterminatedBlock { line: usize, column: usize },

    /// `\0` — parameter placeholders are 1-based.
    #[error("invalid parameter index {index} at {line}:{column}: indices are 1-based")]
    InvalidParameterIndex {
        index: u32,
        line: usize,
        column: usize,
    },

    /// An inline command that is not `it`, `font`, or `match`.
    #[error("unknown command '\\{name}' at {line}:{column}{}", format_suggestions(.suggestions))]
    UnknownCommand {
        name: String,
        line: usize,
        column: usize,
        suggestions: Vec<String>,
    },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean '\\{}'?)", suggestions.join("', '\\"))
    }
}
