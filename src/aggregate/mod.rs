//! Roster aggregation and merge policy.
//!
//! This is the heart of the tool: discover students from the submission
//! logs, fill each assignment slot with a first-match-wins scan across the
//! servers, then let competition overrides replace whatever was merged.

pub mod roster;

pub use roster::*;
