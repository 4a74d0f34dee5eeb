//! Convert the contents of a log file into rows

#![allow(clippy::upper_case_acronyms)]

use pest::Parser;
use pest_derive::Parser;

use crate::load::error;
use crate::util::{coin, date, row::Row};

/// Wrapper around Pest's `Pair`
type Pair<'i> = pest::iterators::Pair<'i, Rule>;

/// Pest-generated parser
#[derive(Parser)]
#[grammar = "load/pennies.pest"]
pub struct PenniesParser;

// extract the four fields of a row
macro_rules! quadruplet {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No 1st"));
        let snd = items.next().unwrap_or_else(|| panic!("No 2nd"));
        let thr = items.next().unwrap_or_else(|| panic!("No 3rd"));
        let fth = items.next().unwrap_or_else(|| panic!("No 4th"));
        assert!(items.next().is_none());
        (fst, snd, thr, fth)
    }};
}

/// Get the rows of `contents`, read from file `path`
///
/// The return value may be non-empty even if some errors occured: it holds
/// every row that validated. Callers should check `errs.is_fatal()` rather
/// than the length of the result.
pub fn extract(path: &str, errs: &mut error::Record, contents: &str) -> Vec<Row> {
    match PenniesParser::parse(Rule::file, contents) {
        Ok(mut pairs) => match pairs.next() {
            Some(file) => validate(path, errs, file),
            None => Vec::new(),
        },
        Err(e) => {
            errs.make("Parsing failure")
                .from(e.with_path(path))
                .hint("each line should look like '1735862400000,Zach,0.01,USD'");
            Vec::new()
        }
    }
}

/// Check every row, record problems, keep the valid ones
fn validate(path: &str, errs: &mut error::Record, file: Pair) -> Vec<Row> {
    let mut rows = Vec::new();
    for pair in file.into_inner() {
        match pair.as_rule() {
            Rule::row => {
                if let Some(row) = validate_row(path, errs, pair) {
                    rows.push(row);
                }
            }
            Rule::header | Rule::EOI => (),
            _ => unreachable!(),
        }
    }
    tracing::debug!(path, rows = rows.len(), "rows loaded");
    rows
}

fn validate_row(path: &str, errs: &mut error::Record, pair: Pair) -> Option<Row> {
    let loc = (path, pair.as_span());
    let (timestamp, person, denomination, currency) = quadruplet!(pair);

    let ms = match timestamp.as_str().parse::<i64>() {
        Ok(ms) => ms,
        Err(e) => {
            errs.make("Invalid timestamp")
                .span(&(path, timestamp.as_span()), format!("cannot be read as an integer: {}", e))
                .hint("timestamps are milliseconds since 1970-01-01T00:00:00Z");
            return None;
        }
    };
    let timestamp = match date::from_millis(ms) {
        Some(ts) => ts,
        None => {
            errs.make("Timestamp out of range")
                .span(&(path, timestamp.as_span()), "not a representable date")
                .hint("timestamps are milliseconds since 1970-01-01T00:00:00Z");
            return None;
        }
    };
    // the grammar only lets through digits with an optional fractional part
    let denomination = match denomination.as_str().parse::<f64>() {
        Ok(d) if d.is_finite() => d,
        _ => {
            errs.make("Invalid denomination")
                .span(&(path, denomination.as_span()), "not a finite face value");
            return None;
        }
    };

    let row = Row::new(timestamp, person_name(person), denomination, currency.as_str());
    let key = row.coin();
    if coin::find(&key).is_none() {
        errs.make("Unknown coin")
            .nonfatal()
            .span(&loc, format!("no metadata for '{}'", key))
            .text("The row is kept but drawn with a placeholder")
            .hint("add the denomination to the coin table");
    }
    Some(row)
}

/// Name with the quoting removed
fn person_name(pair: Pair) -> String {
    match pair.into_inner().next() {
        Some(inner) if inner.as_rule() == Rule::quoted_text => inner.as_str().replace("\"\"", "\""),
        Some(inner) => inner.as_str().to_string(),
        None => String::new(),
    }
}
