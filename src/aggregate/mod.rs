//! Stat aggregation.
//!
//! This module merges scored per-category records into one row per player,
//! per season and then across the two seasons, and derives each player's
//! price from the weighted season totals.

pub mod compile;
pub mod merge;
pub mod price;
pub mod types;
