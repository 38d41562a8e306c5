//! CLI command implementations.

mod check;
mod eval;
mod list;

pub use check::{CheckArgs, run_check};
pub use eval::{EvalArgs, run_eval};
pub use list::{ListArgs, run_list};
