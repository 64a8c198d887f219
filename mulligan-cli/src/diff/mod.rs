//! Character-level diffs between names
//!
//! A [`RenameResult`] is an ordered list of [`Diff`] segments describing how
//! one name turned into another. Operations build results directly; the
//! engine here derives one from two plain strings.

mod engine;
mod result;

pub use engine::{compute_diff, compute_diff_with, DiffStrategy};
pub use result::{Diff, DiffOperation, RenameResult};
