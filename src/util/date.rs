//! Day-precise projections of a timestamp
//!
//! Every calendar computation in the crate goes through this module, and
//! all of them are done in UTC: the day a find belongs to, its year and its
//! weekday never depend on the local timezone of the machine producing the
//! report.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};

/// Instant at which an item was found
pub type Timestamp = DateTime<Utc>;

/// Convert epoch milliseconds, `None` if out of the representable range
pub fn from_millis(ms: i64) -> Option<Timestamp> {
    Utc.timestamp_millis_opt(ms).single()
}

/// Calendar day (UTC) of an instant
pub fn day(ts: Timestamp) -> NaiveDate {
    ts.date_naive()
}

/// Calendar year (UTC) of an instant
pub fn year(ts: Timestamp) -> i32 {
    ts.year()
}

/// Weekday index (UTC) with a Sunday-first convention: `0` is Sunday, `6` is Saturday
pub fn weekday(ts: Timestamp) -> u32 {
    ts.weekday().num_days_from_sunday()
}

/// Calendar bins for counting finds over time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    Day,
    /// Sunday to Saturday
    Week,
    Month,
}

impl Interval {
    /// First day of the bin holding `day`
    pub fn floor(self, day: NaiveDate) -> NaiveDate {
        match self {
            Interval::Day => day,
            Interval::Week => day
                .checked_sub_days(Days::new(day.weekday().num_days_from_sunday() as u64))
                .unwrap_or(day),
            Interval::Month => day.with_day(1).unwrap_or(day),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Interval::Day => write!(f, "day"),
            Interval::Week => write!(f, "week"),
            Interval::Month => write!(f, "month"),
        }
    }
}

impl FromStr for Interval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Interval::Day),
            "week" => Ok(Interval::Week),
            "month" => Ok(Interval::Month),
            _ => Err(format!("'{}' is not an interval (day, week or month)", s)),
        }
    }
}

/// Short labels for weekday indexes
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
