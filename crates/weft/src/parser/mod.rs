//! Entry-definition grammar parser.
//!
//! Turns plain UTF-8 source text into [`EntryDef`](ast::EntryDef) values.
//! Lowering into the flat-table store happens in [`crate::store`].

pub mod ast;
mod error;
mod source;

pub use error::ParseError;
pub use source::{parse_conditions, parse_entry, parse_source};
