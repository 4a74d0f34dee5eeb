//! Property-based tests for the aggregations over random logs.

use chrono::{Days, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;

use pennies::util::{
    array,
    awards::{self, RankMode},
    group,
    streak::{self, Streak},
};
use pennies::Row;

const PERSONS: [&str; 4] = ["Zach", "Mom", "Alice", "Bob"];

/// Rows spread over a few weeks around new year, several per day possible
fn arb_rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0..PERSONS.len(), 0u64..60, 0u32..24), 0..80).prop_map(|finds| {
        finds
            .into_iter()
            .map(|(person, offset, hour)| {
                let start = Utc.with_ymd_and_hms(2023, 12, 1, hour, 0, 0).unwrap();
                let timestamp = start.checked_add_days(Days::new(offset)).unwrap();
                Row::new(timestamp, PERSONS[person], 0.01, "USD")
            })
            .collect()
    })
}

/// Rows over several years, to exercise the yearly awards
fn arb_yearly_rows() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec((0..PERSONS.len(), 2021i32..2025, 1u32..13), 0..60).prop_map(|finds| {
        finds
            .into_iter()
            .map(|(person, year, month)| {
                let timestamp = Utc.with_ymd_and_hms(year, month, 10, 12, 0, 0).unwrap();
                Row::new(timestamp, PERSONS[person], 0.25, "USD")
            })
            .collect()
    })
}

fn finds_on(rows: &[&Row], day: NaiveDate) -> usize {
    rows.iter().filter(|r| r.day() == day).count()
}

fn next_day(day: NaiveDate) -> NaiveDate {
    day.succ_opt().unwrap()
}

proptest! {
    #[test]
    fn streaks_are_maximal_runs(rows in arb_rows()) {
        for (_, rows) in group::by_person(&rows) {
            let streaks = streak::to_streaks(rows.iter().copied());
            for s in &streaks {
                prop_assert!(s.days >= 2);
                prop_assert_eq!((s.end - s.start).num_days() + 1, s.days as i64);
                let mut coins = 0;
                for day in s.start.iter_days().take(s.days) {
                    let n = finds_on(&rows, day);
                    prop_assert!(n > 0);
                    coins += n;
                }
                prop_assert_eq!(coins, s.coins);
                prop_assert_eq!(finds_on(&rows, next_day(s.end)), 0);
                prop_assert_eq!(finds_on(&rows, s.start.pred_opt().unwrap()), 0);
            }
            for pair in streaks.windows(2) {
                // disjoint, chronological and separated by at least one empty day
                prop_assert!(next_day(pair[0].end) < pair[1].start);
            }
        }
    }

    #[test]
    fn streaks_ignore_row_order(rows in arb_rows()) {
        let forward = streak::to_streaks(rows.iter());
        let backward = streak::to_streaks(rows.iter().rev());
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn longest_streak_is_listed_first(rows in arb_rows()) {
        for (_, streaks) in streak::streaks_by_person(&rows) {
            let longest = Streak::longest(&streaks).unwrap();
            prop_assert_eq!(longest.days, streaks[0].days);
            prop_assert!(streaks.iter().all(|s| s.days <= longest.days));
        }
    }

    #[test]
    fn grouping_keeps_every_row(rows in arb_rows()) {
        let by_person = group::by_person(&rows);
        prop_assert_eq!(by_person.values().map(Vec::len).sum::<usize>(), rows.len());
        let nested = group::by_person_by_year(&rows);
        for (person, years) in nested.iter() {
            let total = years.values().map(Vec::len).sum::<usize>();
            prop_assert_eq!(total, by_person.get(person).map(Vec::len).unwrap_or(0));
        }
    }

    #[test]
    fn rookies_were_absent_last_year(rows in arb_yearly_rows(), year in 2021i32..2025) {
        let years = group::by_person_by_year(&rows);
        for rookie in awards::top_rookies(&rows, year, PERSONS.len()) {
            let history = years.get(rookie.person).unwrap();
            prop_assert!(history.get(&(year - 1)).is_none());
            prop_assert_eq!(history.get(&year).map(Vec::len), Some(rookie.this_year));
        }
    }

    #[test]
    fn improvements_are_positive(rows in arb_yearly_rows(), year in 2021i32..2025) {
        for mode in [RankMode::Count, RankMode::Percent] {
            let improved = awards::most_improved(&rows, year, PERSONS.len(), mode);
            for imp in &improved {
                prop_assert!(imp.change > 0.0);
                prop_assert!(imp.this_year > imp.last_year);
                prop_assert!(imp.last_year > 0);
            }
            for pair in improved.windows(2) {
                prop_assert!(pair[0].change >= pair[1].change);
            }
        }
    }

    #[test]
    fn slices_cover_the_input(items in prop::collection::vec(any::<u8>(), 0..40), size in 1usize..8) {
        let lines = array::slices(size, &items);
        prop_assert_eq!(lines.concat(), items.clone());
        if let Some(last) = array::last(&lines) {
            prop_assert!(!last.is_empty() && last.len() <= size);
        }
        for line in lines.iter().rev().skip(1) {
            prop_assert_eq!(line.len(), size);
        }
    }
}
