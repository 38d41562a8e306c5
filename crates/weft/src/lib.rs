//! Localized text templating: a compiler from a small entry-definition
//! grammar to a compact flat-table store, plus a runtime that instantiates
//! entries against call parameters, selecting among plural/gender-
//! conditioned alternatives and splicing parameter text while preserving
//! formatting-span offsets exactly.
//!
//! # Example
//!
//! ```
//! use weft::{Locale, args};
//!
//! let mut locale = Locale::builder().language("en").build();
//! locale
//!     .load_source(
//!         r"
//!         sword {masc} { sword }
//!         pick_up { You pick up the \it{\1}. }
//!         ",
//!     )
//!     .unwrap();
//!
//! let sword = locale.instantiate("sword", &args![]).unwrap();
//! let line = locale.instantiate("pick_up", &args![sword]).unwrap();
//! assert_eq!(line.to_string(), "You pick up the sword.");
//! ```

pub mod engine;
pub mod parser;
pub mod store;
mod suggest;
pub mod types;

pub use engine::{Classifier, EvalError, LoadError, Locale, NoMatchPolicy};
pub use store::{
    AttributeRegistry, CompileError, EntryId, PREDEFINED_ATTRIBUTES, StoreBuilder, TextStore,
};
pub use suggest::compute_suggestions;
pub use types::{AttrId, AttrList, FormatMarker, FormatPayload, StyleTag, StyledText, Value};

// Re-export the parse error alongside the compile error it nests in.
pub use parser::ParseError;

/// Creates a `Vec<Value>` of call parameters from mixed literal values.
///
/// Values are converted via `Into<Value>`, so integers, floats, strings,
/// and [`StyledText`] instances can be passed directly.
///
/// # Example
///
/// ```
/// use weft::{Value, args};
///
/// let params = args![3, "Alice"];
/// assert_eq!(params.len(), 2);
/// assert_eq!(params[0].as_number(), Some(3));
/// assert_eq!(params[1].as_str(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! args {
    [] => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    [ $($value:expr),+ $(,)? ] => {
        {
            let mut params = ::std::vec::Vec::<$crate::Value>::new();
            $(
                params.push(::std::convert::Into::<$crate::Value>::into($value));
            )+
            params
        }
    };
}
