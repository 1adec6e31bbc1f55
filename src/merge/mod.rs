//! Combining items and their enchantments.

pub mod engine;

pub use engine::{combine_levels, MergeEngine, MergeOutcome, MergeRejection};
