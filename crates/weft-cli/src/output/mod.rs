//! Output formatting: tables and miette diagnostics.

mod diagnostic;
pub mod table;

pub use diagnostic::WeftDiagnostic;
