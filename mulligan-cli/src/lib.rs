//! Mulligan: batch renaming through configurable operation pipelines
//!
//! Names run through a [`sequence::RenameOperationSequence`] of pure
//! [`operations::RenameOperation`]s. Each stage reports a character-level
//! [`diff::RenameResult`] so a preview can show exactly what changed, and
//! [`rename`] applies a whole batch through a naming store.

pub mod config;
pub mod core;
pub mod diff;
pub mod operations;
pub mod presets;
pub mod rename;
pub mod sequence;

pub use crate::core::error::{MulliganError, Result};
