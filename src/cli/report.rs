//! Terminal tables for each part of the report

use chrono::NaiveDate;
use num_traits::FromPrimitive;

use pennies::util::{
    array,
    awards::{self, Award, RankMode},
    coin,
    date::{Interval, WEEKDAY_LABELS},
    division::Division,
    group,
    row::Row,
    streak::{self, Streak},
    sum,
};

use crate::cli::table::Table;

/// Family members first in their usual order, then everyone else by name
fn display_order(a: &str, b: &str) -> std::cmp::Ordering {
    match (Division::family_rank(a), Division::family_rank(b)) {
        (Some(ra), Some(rb)) => ra.cmp(&rb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn division(person: &str) -> String {
    Division::of(person).to_string()
}

fn place(idx: usize, person: &str) -> String {
    format!("{}. {}", idx + 1, person)
}

fn amount(s: &sum::Sum) -> String {
    format!("{} {}", coin::format_amount(s.sum, &s.currency), s.currency)
}

/// Finds of `year` per person and currency
pub fn totals(rows: &[Row], year: i32) -> Table {
    let currencies = sum::sum_map_by_currency(rows.iter().filter(|r| r.year() == year))
        .into_keys()
        .collect::<Vec<_>>();
    let mut columns = vec!["Division".to_string(), "Finds".to_string()];
    columns.extend(currencies.iter().cloned());
    let mut table = Table::with_columns("Person", &columns).with_title(format!("Totals {}", year));

    let mut persons = group::by_person(rows)
        .into_iter()
        .map(|(person, rows)| {
            let sums = sum::sum_map_by_currency(rows.into_iter().filter(|r| r.year() == year));
            (person, sums)
        })
        .filter(|(_, sums)| !sums.is_empty())
        .collect::<Vec<_>>();
    persons.sort_by(|(a, _), (b, _)| display_order(a, b));
    for (person, sums) in persons {
        let mut line = vec![
            division(person),
            sums.values().map(|s| s.count).sum::<usize>().to_string(),
        ];
        for currency in &currencies {
            line.push(
                sums.get(currency)
                    .map(|s| format!("{} × {}", s.count, amount(s)))
                    .unwrap_or_default(),
            );
        }
        table.push_line(person, line);
    }
    table
}

/// Number of streaks and the longest one of every person
pub fn streaks(rows: &[Row]) -> Table {
    let mut table = Table::with_columns("Person", &["Division", "Streaks", "Longest", "From", "To", "Finds"])
        .with_title("Streaks");
    for (person, streaks) in streak::streaks_by_person(rows) {
        let mut line = vec![division(person), streaks.len().to_string()];
        if let Some(longest) = Streak::longest(&streaks) {
            line.push(format!("{} days", longest.days));
            line.push(longest.start.to_string());
            line.push(longest.end.to_string());
            line.push(longest.coins.to_string());
        }
        table.push_line(person, line);
    }
    table
}

/// Top `count` of one award for `year`
pub fn award(rows: &[Row], which: Award, year: i32, count: usize) -> Table {
    let title = format!("{} {}", which.title(), year);
    match which {
        Award::Rookies | Award::TopFriends => {
            let standings = if which == Award::Rookies {
                awards::top_rookies(rows, year, count)
            } else {
                awards::top_friends(rows, year, count)
            };
            let mut table = Table::with_columns("Person", &["Division", "Finds"]).with_title(title);
            for (i, s) in standings.iter().enumerate() {
                table.push_line(place(i, s.person), vec![division(s.person), s.this_year.to_string()]);
            }
            table
        }
        Award::MostImprovedCount | Award::MostImprovedPercent => {
            let mode = if which == Award::MostImprovedCount {
                RankMode::Count
            } else {
                RankMode::Percent
            };
            let columns = [
                "Division".to_string(),
                "Change".to_string(),
                year.to_string(),
                (year - 1).to_string(),
            ];
            let mut table = Table::with_columns("Person", &columns).with_title(title);
            for (i, imp) in awards::most_improved(rows, year, count, mode).iter().enumerate() {
                let change = match mode {
                    RankMode::Count => format!("+{}", imp.change),
                    RankMode::Percent => format!("+{:.0}%", imp.change * 100.0),
                };
                table.push_line(
                    place(i, imp.person),
                    vec![
                        division(imp.person),
                        change,
                        imp.this_year.to_string(),
                        imp.last_year.to_string(),
                    ],
                );
            }
            table
        }
        Award::TopInternational => {
            let mut table =
                Table::with_columns("Person", &["Division", "Finds", "Currencies"]).with_title(title);
            for (i, intl) in awards::top_international(rows, year, count).iter().enumerate() {
                let currencies = intl
                    .currency_counts
                    .iter()
                    .map(|s| format!("{} × {}", s.currency, s.count))
                    .collect::<Vec<_>>()
                    .join(", ");
                table.push_line(
                    place(i, intl.person),
                    vec![division(intl.person), intl.total().to_string(), currencies],
                );
            }
            table
        }
        Award::MostValuable => {
            let mut table =
                Table::with_columns("Person", &["Division", "Value", "Finds"]).with_title(title);
            for (i, v) in awards::most_valuable(rows, year, count).iter().enumerate() {
                table.push_line(
                    place(i, v.person),
                    vec![
                        division(v.person),
                        format!("{} {}", coin::format_amount(v.value, &v.currency), v.currency),
                        v.count.to_string(),
                    ],
                );
            }
            table
        }
    }
}

/// Every award of `year`, in display order
pub fn all_awards(rows: &[Row], year: i32, count: usize) -> Vec<Table> {
    (0..Award::COUNT)
        .filter_map(Award::from_usize)
        .map(|which| award(rows, which, year, count))
        .collect()
}

/// Finds of every person in every year
pub fn all_time(rows: &[Row]) -> Table {
    let (years, lines) = awards::all_time(rows);
    let mut columns = years.iter().map(i32::to_string).collect::<Vec<_>>();
    columns.push("Total".to_string());
    let mut table = Table::with_columns("Person", &columns).with_title("All time");
    for (i, entry) in lines.iter().enumerate() {
        let mut line = years
            .iter()
            .map(|year| {
                let count = entry
                    .years
                    .iter()
                    .find(|(y, _)| y == year)
                    .map(|(_, sums)| sums.iter().map(|s| s.count).sum::<usize>())
                    .unwrap_or(0);
                match entry.get(*year, "USD") {
                    Some(usd) => format!("{} ({})", count, amount(usd)),
                    None if count > 0 => count.to_string(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>();
        line.push(entry.count().to_string());
        table.push_line(place(i, entry.person), line);
    }
    table
}

fn trend(change: Option<i64>) -> String {
    match change {
        None => "new".to_string(),
        Some(0) => "=".to_string(),
        Some(n) if n > 0 => format!("↑{}", n),
        Some(n) => format!("↓{}", -n),
    }
}

/// Place of every person in each year, and the latest move
pub fn ranks(rows: &[Row]) -> Table {
    let mut years = group::by_year(rows).keys().copied().collect::<Vec<_>>();
    years.sort_unstable();
    let mut columns = years.iter().map(i32::to_string).collect::<Vec<_>>();
    columns.push("Trend".to_string());
    let mut table = Table::with_columns("Person", &columns).with_title("Yearly ranks");
    for (person, entries) in awards::yearly_ranks(rows) {
        let mut line = years
            .iter()
            .map(|year| {
                entries
                    .iter()
                    .find(|e| e.year == *year)
                    .map(|e| format!("{}.", e.rank + 1))
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();
        line.push(array::last(&entries).map(|e| trend(e.change)).unwrap_or_default());
        table.push_line(person, line);
    }
    table
}

/// Finds per person and day of the week
pub fn weekdays(rows: &[Row]) -> Table {
    let mut table = Table::with_columns("Person", &WEEKDAY_LABELS).with_title("Weekdays");
    let mut persons = group::by_person_by_weekday(rows).into_iter().collect::<Vec<_>>();
    persons.sort_by(|(a, _), (b, _)| display_order(a, b));
    for (person, days) in persons {
        let line = (0..WEEKDAY_LABELS.len() as u32)
            .map(|day| days.get(&day).map(Vec::len).unwrap_or(0).to_string())
            .collect();
        table.push_line(person, line);
    }
    table
}

/// Finds of `year` per person and denomination
pub fn coins(rows: &[Row], year: i32) -> Table {
    let of_year = rows
        .iter()
        .filter(|r| r.year() == year)
        .cloned()
        .collect::<Vec<_>>();
    let by_coin = group::by_coin_by_person(&of_year);
    let names = by_coin
        .keys()
        .map(|key| coin::lookup(key).name)
        .collect::<Vec<_>>();
    let mut table = Table::with_columns("Person", &names).with_title(format!("Coins {}", year));
    let mut persons = group::by_person(&of_year).keys().copied().collect::<Vec<_>>();
    persons.sort_by(|a, b| display_order(a, b));
    for person in persons {
        let line = by_coin
            .values()
            .map(|finders| {
                finders
                    .get(person)
                    .map(|rows| rows.len().to_string())
                    .unwrap_or_default()
            })
            .collect();
        table.push_line(person, line);
    }
    table
}

/// Activity of every person over the bins of `interval` in `year`
pub fn intervals(rows: &[Row], year: i32, interval: Interval) -> Table {
    let of_year = rows
        .iter()
        .filter(|r| r.year() == year)
        .cloned()
        .collect::<Vec<_>>();
    let active = format!("Active {}s", interval);
    let best = format!("Best {}", interval);
    let columns = [
        "Division".to_string(),
        active,
        "Finds".to_string(),
        best,
        "Most".to_string(),
    ];
    let mut table = Table::with_columns("Person", &columns)
        .with_title(format!("Finds per {} {}", interval, year));
    for (person, bins) in group::by_person_by_interval(&of_year, interval) {
        let finds = bins.values().map(Vec::len).sum::<usize>();
        // earliest bin on equal counts
        let (start, most) = bins
            .iter()
            .map(|(start, rows)| (*start, rows.len()))
            .fold(None, |top: Option<(NaiveDate, usize)>, (start, n)| match top {
                Some((_, m)) if m >= n => top,
                _ => Some((start, n)),
            })
            .map(|(start, n)| (start.to_string(), n.to_string()))
            .unwrap_or_default();
        table.push_line(
            person,
            vec![division(person), bins.len().to_string(), finds.to_string(), start, most],
        );
    }
    table
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(person: &str, y: i32, m: u32, d: u32, denomination: f64, currency: &str) -> Row {
        Row::new(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(), person, denomination, currency)
    }

    fn sample() -> Vec<Row> {
        vec![
            row("Alice", 2023, 5, 1, 0.01, "USD"),
            row("Mom", 2023, 5, 1, 0.01, "USD"),
            row("Mom", 2024, 5, 1, 0.25, "USD"),
            row("Mom", 2024, 5, 2, 0.25, "USD"),
            row("Zach", 2024, 5, 1, 1.0, "EUR"),
            row("Alice", 2024, 5, 3, 0.01, "USD"),
        ]
    }

    fn lines(table: &Table) -> Vec<String> {
        table.to_string().lines().map(str::to_string).collect()
    }

    #[test]
    fn order() {
        let mut names = vec!["Alice", "Noah", "Bob", "Zach", "Mom"];
        names.sort_by(|a, b| display_order(a, b));
        assert_eq!(names, vec!["Zach", "Mom", "Noah", "Alice", "Bob"]);
    }

    #[test]
    fn totals_table() {
        let text = lines(&totals(&sample(), 2024));
        assert_eq!(text[0], "Totals 2024");
        assert!(text[2].contains("EUR") && text[2].contains("USD"));
        assert!(text[4].starts_with("│ Zach"));
        assert!(text[4].contains("1 × 1.00 EUR"));
        assert!(text[5].starts_with("│ Mom"));
        assert!(text[5].contains("2 × 0.50 USD"));
        assert!(text[6].starts_with("│ Alice"));
        assert!(text[4].contains("│   Family │"));
        assert!(text[6].contains("│  Friends │"));
    }

    #[test]
    fn streak_table() {
        let table = streaks(&sample());
        let text = lines(&table);
        assert_eq!(text.len(), 6);
        assert!(text[4].starts_with("│ Mom"));
        assert!(text[4].contains("2 days"));
        assert!(text[4].contains("2024-05-01"));
        assert!(text[4].contains("Family"));
    }

    #[test]
    fn every_award() {
        let tables = all_awards(&sample(), 2024, 5);
        assert_eq!(tables.len(), Award::COUNT);
        let rookies = lines(&tables[0]);
        assert_eq!(rookies[0], "Rookies 2024");
        assert!(rookies[4].contains("1. Zach"));
        assert!(rookies[4].contains("Family"));
        assert!(rookies[2].contains("Division"));
        let percent = lines(&tables[2]);
        assert!(percent[4].contains("1. Mom"));
        assert!(percent[4].contains("+100%"));
        assert!(lines(&tables[3])[4].contains("EUR × 1"));
        assert!(lines(&tables[5])[4].contains("1. Alice"));
    }

    #[test]
    fn trends() {
        assert_eq!(trend(None), "new");
        assert_eq!(trend(Some(0)), "=");
        assert_eq!(trend(Some(2)), "↑2");
        assert_eq!(trend(Some(-1)), "↓1");
    }

    #[test]
    fn rank_table() {
        let text = lines(&ranks(&sample()));
        assert!(text[2].contains("2023") && text[2].contains("Trend"));
        let alice = text.iter().find(|l| l.starts_with("│ Alice")).unwrap();
        assert!(alice.contains("↓1"));
        let zach = text.iter().find(|l| l.starts_with("│ Zach")).unwrap();
        assert!(zach.contains("new"));
    }

    #[test]
    fn weekday_table() {
        let text = lines(&weekdays(&sample()));
        // 2024-05-01 is a Wednesday
        assert_eq!(text[4], "│ Zach   │   0 │   0 │   0 │   1 │   0 │   0 │   0 │");
    }

    #[test]
    fn coin_table() {
        let text = lines(&coins(&sample(), 2024));
        assert_eq!(text[0], "Coins 2024");
        assert_eq!(text[2], "│ Person │ Quarter │ 1 Euro │ Penny │");
        assert_eq!(text[4], "│ Zach   │         │      1 │       │");
        assert_eq!(text[5], "│ Mom    │       2 │        │       │");
        assert_eq!(text[6], "│ Alice  │         │        │     1 │");
        assert_eq!(lines(&coins(&sample(), 2022)).len(), 5);
    }

    #[test]
    fn interval_table() {
        let text = lines(&intervals(&sample(), 2024, Interval::Day));
        assert_eq!(text[0], "Finds per day 2024");
        assert!(text[2].contains("Active days") && text[2].contains("Best day"));
        // two single-find days, the earliest one is shown
        assert_eq!(
            text[4],
            "│ Mom    │   Family │           2 │     2 │ 2024-05-01 │    1 │"
        );
        assert!(text[5].starts_with("│ Zach"));
        assert!(text[6].starts_with("│ Alice  │  Friends"));

        let text = lines(&intervals(&sample(), 2024, Interval::Week));
        // 2024-05-01 is a Wednesday
        assert!(text[4].starts_with("│ Mom"));
        assert!(text[4].contains("│ 2024-04-28 │    2 │"));
    }
}
