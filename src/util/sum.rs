use std::collections::BTreeMap;

use crate::util::{group::Groups, row::Row};

/// Number and total face value of finds in one currency
#[derive(Debug, Clone, PartialEq)]
pub struct Sum {
    pub currency: String,
    pub count: usize,
    pub sum: f64,
}

/// Per-currency totals, most frequent currency first, then by currency code
pub fn sum_by_currency<'r, I>(rows: I) -> Vec<Sum>
where
    I: IntoIterator<Item = &'r Row>,
{
    let mut sums = Groups::by(rows, |row: &&Row| row.currency.clone())
        .into_iter()
        .map(|(currency, rows)| Sum {
            currency,
            count: rows.len(),
            sum: rows.iter().map(|r| r.denomination).sum(),
        })
        .collect::<Vec<_>>();
    sums.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.currency.cmp(&b.currency)));
    sums
}

/// Per-currency totals keyed by currency code
pub fn sum_map_by_currency<'r, I>(rows: I) -> BTreeMap<String, Sum>
where
    I: IntoIterator<Item = &'r Row>,
{
    sum_by_currency(rows)
        .into_iter()
        .map(|sum| (sum.currency.clone(), sum))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(denomination: f64, currency: &str) -> Row {
        Row::new(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(), "Dad", denomination, currency)
    }

    macro_rules! close {
        ( $a:expr, $b:expr ) => {
            assert!(($a - $b).abs() < 1e-9, "{} != {}", $a, $b)
        };
    }

    #[test]
    fn totals_per_currency() {
        let rows = vec![
            row(0.01, "USD"),
            row(1.0, "EUR"),
            row(0.25, "USD"),
            row(0.01, "USD"),
            row(0.5, "EUR"),
            row(10.0, "JPY"),
            row(0.01, "CAD"),
        ];
        let sums = sum_by_currency(&rows);
        let order = sums.iter().map(|s| s.currency.as_str()).collect::<Vec<_>>();
        assert_eq!(order, vec!["USD", "EUR", "CAD", "JPY"]);
        assert_eq!(sums[0].count, 3);
        close!(sums[0].sum, 0.27);
        close!(sums[1].sum, 1.5);
        assert_eq!(sums[2].count, 1);
    }

    #[test]
    fn keyed() {
        let rows = vec![row(0.05, "USD"), row(0.05, "USD")];
        let map = sum_map_by_currency(&rows);
        assert_eq!(map.len(), 1);
        assert_eq!(map["USD"].count, 2);
        close!(map["USD"].sum, 0.1);
        assert!(map.get("EUR").is_none());
    }

    #[test]
    fn empty() {
        let rows: Vec<Row> = Vec::new();
        assert!(sum_by_currency(&rows).is_empty());
    }
}
