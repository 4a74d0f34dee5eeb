//! Implementations that are useful accross the whole project
//!
//! Row definition, day arithmetic and aggregation

pub mod array;
pub mod awards;
pub mod coin;
pub mod date;
pub mod division;
pub mod group;
pub mod row;
pub mod streak;
pub mod sum;
