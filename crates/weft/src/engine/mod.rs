//! The runtime half of the engine: plural classification, the instantiation
//! algorithm, and the user-facing [`Locale`] front-end.

mod classifier;
mod error;
mod instantiate;
mod locale;

pub use classifier::Classifier;
pub use error::{EvalError, LoadError};
pub use locale::Locale;

/// Behavior when no alternative of a conditioned group matches and none is
/// unconditional.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NoMatchPolicy {
    /// The run contributes empty text.
    #[default]
    Skip,
    /// Instantiation fails with [`EvalError::NoMatchingAlternative`].
    Error,
}
