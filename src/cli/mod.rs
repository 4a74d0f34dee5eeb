//! Everything that talks to the terminal or writes files

pub mod args;
pub mod logging;
pub mod plot;
pub mod report;
pub mod table;
