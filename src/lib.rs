//! Reports over a log of found coins and bills
//!
//! `load` turns the CSV log into rows, `util` holds everything that
//! aggregates them: grouping, streaks, per-currency sums, yearly awards
//! and the coin metadata table.

pub mod load;
pub mod util;

pub use util::row::Row;
