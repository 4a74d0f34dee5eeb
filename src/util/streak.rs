//! Consecutive-day streaks
//!
//! A streak is a run of at least two consecutive UTC calendar days with at
//! least one find on each day. A single isolated day is not a streak.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::util::{group, row::Row};

/// A maximal run of consecutive days with finds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak {
    /// first day, inclusive
    pub start: NaiveDate,
    /// last day, inclusive
    pub end: NaiveDate,
    /// `end - start + 1`, at least 2
    pub days: usize,
    /// number of rows over all days of the run
    pub coins: usize,
}

impl Streak {
    /// Longest of several streaks, the earliest one on equal length
    pub fn longest(streaks: &[Streak]) -> Option<&Streak> {
        streaks
            .iter()
            .min_by_key(|s| (Reverse(s.days), s.start))
    }
}

/// Run being accumulated while walking the days
struct Tracker {
    start: NaiveDate,
    last: NaiveDate,
    coins: usize,
}

impl Tracker {
    fn open(day: NaiveDate, coins: usize) -> Self {
        Self {
            start: day,
            last: day,
            coins,
        }
    }

    /// `day` is the day right after the run
    fn continues(&self, day: NaiveDate) -> bool {
        self.last.succ_opt() == Some(day)
    }

    fn extend(&mut self, day: NaiveDate, coins: usize) {
        self.last = day;
        self.coins += coins;
    }

    /// Single-day runs are dropped
    fn close(self) -> Option<Streak> {
        let days = (self.last - self.start).num_days() as usize + 1;
        if days >= 2 {
            Some(Streak {
                start: self.start,
                end: self.last,
                days,
                coins: self.coins,
            })
        } else {
            None
        }
    }
}

/// Every streak in `rows`, in chronological order
///
/// `rows` are typically all the finds of one person, in any order.
pub fn to_streaks<'r, I>(rows: I) -> Vec<Streak>
where
    I: IntoIterator<Item = &'r Row>,
{
    let mut by_day = BTreeMap::<NaiveDate, usize>::new();
    for row in rows {
        *by_day.entry(row.day()).or_default() += 1;
    }

    let mut found = Vec::new();
    let mut current: Option<Tracker> = None;
    for (day, coins) in by_day {
        match current {
            Some(ref mut tracker) if tracker.continues(day) => tracker.extend(day, coins),
            _ => {
                found.extend(current.take().and_then(Tracker::close));
                current = Some(Tracker::open(day, coins));
            }
        }
    }
    // no empty day closes the last run
    found.extend(current.and_then(Tracker::close));
    found
}

/// Streaks of every person having at least one
///
/// Each person's streaks are sorted longest first, and persons by number
/// of streaks (most first), then by name.
pub fn streaks_by_person(rows: &[Row]) -> Vec<(&str, Vec<Streak>)> {
    let mut table = group::by_person(rows)
        .into_iter()
        .map(|(person, rows)| {
            let mut streaks = to_streaks(rows);
            streaks.sort_by_key(|s| Reverse(s.days));
            (person, streaks)
        })
        .filter(|(_, streaks)| !streaks.is_empty())
        .collect::<Vec<_>>();
    table.sort_by(|(pa, sa), (pb, sb)| sb.len().cmp(&sa.len()).then_with(|| pa.cmp(pb)));
    table
}
