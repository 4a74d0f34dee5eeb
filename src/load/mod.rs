//! Reading the log of found items

pub mod error;
pub mod parse;

use crate::util::row::Row;

/// Read and validate all rows of `filename`
///
/// `None` if the file could not be read or contains fatal errors, in which
/// case `errs` says why. Warnings alone do not prevent loading.
pub fn read_rows(filename: &str, errs: &mut error::Record) -> Option<Vec<Row>> {
    let contents = match std::fs::read_to_string(filename) {
        Ok(contents) => contents,
        Err(e) => {
            errs.make("Cannot read file")
                .text(format!("Initial file loaded is '{}': {}", filename, e))
                .hint("pass the path to the log as the first argument");
            return None;
        }
    };
    let rows = parse::extract(filename, errs, &contents);
    if errs.is_fatal() {
        None
    } else {
        Some(rows)
    }
}
