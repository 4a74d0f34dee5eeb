use std::fmt;

use chrono::NaiveDate;

use crate::util::date::{self, Timestamp};

/// One found item
///
/// Rows are never mutated once loaded. Two identical rows are two finds:
/// nothing in the crate deduplicates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub timestamp: Timestamp,
    pub person: String,
    /// face value, non-negative
    pub denomination: f64,
    /// 3-letter currency code (`USD`, `EUR`, ...)
    pub currency: String,
}

impl Row {
    pub fn new<P, C>(timestamp: Timestamp, person: P, denomination: f64, currency: C) -> Self
    where
        P: ToString,
        C: ToString,
    {
        Self {
            timestamp,
            person: person.to_string(),
            denomination,
            currency: currency.to_string(),
        }
    }

    /// UTC calendar day of the find
    pub fn day(&self) -> NaiveDate {
        date::day(self.timestamp)
    }

    /// UTC year of the find
    pub fn year(&self) -> i32 {
        date::year(self.timestamp)
    }

    /// UTC weekday of the find, `0` is Sunday
    pub fn weekday(&self) -> u32 {
        date::weekday(self.timestamp)
    }

    /// Key into the coin metadata table
    pub fn coin(&self) -> CoinKey {
        CoinKey::new(self.denomination, &self.currency)
    }

    pub fn is_usd(&self) -> bool {
        self.currency == "USD"
    }
}

/// Identifier of a denomination in a currency: `"{denomination}{currency}"`
///
/// The metadata table is joined on this exact text, so the denomination is
/// always written in its shortest decimal form: `0.01USD`, `0.1CAD`, `1EUR`
/// (never `1.0EUR` or `0.10CAD`). `f64`'s `Display` gives exactly that and
/// does not depend on any locale.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoinKey(String);

impl CoinKey {
    pub fn new(denomination: f64, currency: &str) -> Self {
        Self(format!("{}{}", denomination, currency))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CoinKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(denomination: f64, currency: &str) -> Row {
        Row::new(Utc.with_ymd_and_hms(2025, 1, 6, 15, 0, 0).unwrap(), "Zach", denomination, currency)
    }

    macro_rules! key {
        ( $d:expr, $c:expr => $k:expr ) => {
            assert_eq!(row($d, $c).coin().as_str(), $k)
        };
    }

    #[test]
    fn coin_keys() {
        key!(0.01, "USD" => "0.01USD");
        key!(0.05, "USD" => "0.05USD");
        key!(0.1, "CAD" => "0.1CAD");
        key!(0.25, "TRY" => "0.25TRY");
        key!(1.0, "EUR" => "1EUR");
        key!(20.0, "USD" => "20USD");
        key!(5.0, "JPY" => "5JPY");
    }

    #[test]
    fn projections() {
        let r = row(0.01, "USD");
        assert_eq!(r.year(), 2025);
        assert_eq!(r.weekday(), 1);
        assert_eq!(r.day(), NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
        assert!(r.is_usd());
        assert!(!row(1.0, "EUR").is_usd());
    }
}
