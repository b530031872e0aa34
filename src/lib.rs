//! NPC dialogue store — mood-keyed dialogue lines with persistent view counts.
//!
//! Loads a comma-delimited dialogue file into an index keyed by
//! (entity, mood), serves random lines from the matching bucket while
//! counting how often each line was shown, and writes the counts back
//! into the same file on shutdown.

pub mod core;
pub mod schema;
