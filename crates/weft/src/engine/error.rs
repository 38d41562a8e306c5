//! Error types for loading and instantiation.

use std::path::PathBuf;

use thiserror::Error;

use crate::store::{CompileError, EntryId};

/// Errors that occur while loading entry-definition sources.
///
/// A failed load never activates a partially-compiled store; the previously
/// active store (if any) stays in place.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a source file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Compilation failed; positions are relative to the named source.
    #[error("{path}: {source}")]
    Compile {
        path: PathBuf,
        #[source]
        source: CompileError,
    },

    /// Attempted to reload a source that was loaded from a string.
    #[error("cannot reload '{language}': was loaded from string, not file")]
    NoPathForReload { language: String },
}

/// An error that occurred while instantiating an entry.
#[derive(Debug, Error)]
pub enum EvalError {
    /// No source has been loaded yet.
    #[error("no entry source loaded")]
    NoStore,

    /// Entry not found by name.
    #[error("entry not found: '{name}'{}", format_suggestions(.suggestions))]
    EntryNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    /// Entry not found by id (store/id version skew).
    #[error("entry not found for id: {id}")]
    EntryNotFoundById { id: EntryId },

    /// Wrong number of parameters for the entry.
    #[error("entry '{entry}' expects {expected} parameters, got {got}")]
    ParameterCount {
        entry: String,
        expected: usize,
        got: usize,
    },

    /// A match key or parameter marker referenced a parameter slot the call
    /// did not provide. Indicates store/caller skew, not user input.
    #[error("parameter index {index} out of range while instantiating '{entry}'")]
    ParameterIndexOutOfRange { entry: String, index: usize },

    /// No alternative in a conditioned group matched and the locale is
    /// configured to treat that as an error.
    #[error("no alternative matched in entry '{entry}'")]
    NoMatchingAlternative { entry: String },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean '{}'?)", suggestions.join("', '"))
    }
}
