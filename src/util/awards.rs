//! Year-over-year rankings
//!
//! Every ranking is a pure function of the rows, a target year and the
//! number of places to keep. All of them group rows by person then by UTC
//! year, and all of them return an empty list rather than an error when
//! nobody is eligible (e.g. improvements for the first year of data).
//!
//! Ties not otherwise specified are broken by person name.

use std::cmp::Ordering;

use num_derive::FromPrimitive;

use crate::util::{
    division::Division,
    group::{self, Groups},
    row::Row,
    sum::{self, Sum},
};

/// The awards handed out for a year, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum Award {
    Rookies = 0,
    MostImprovedCount,
    MostImprovedPercent,
    TopInternational,
    MostValuable,
    TopFriends,
}

impl Award {
    pub const COUNT: usize = 6;

    pub fn title(self) -> &'static str {
        match self {
            Award::Rookies => "Rookies",
            Award::MostImprovedCount => "Most improved (count)",
            Award::MostImprovedPercent => "Most improved (percent)",
            Award::TopInternational => "Top international",
            Award::MostValuable => "Most valuable",
            Award::TopFriends => "Top friends",
        }
    }
}

/// How improvement between two years is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMode {
    /// `this - last`
    Count,
    /// `(this - last) / last`
    Percent,
}

impl RankMode {
    fn change(self, this_year: usize, last_year: usize) -> f64 {
        match self {
            RankMode::Count => this_year as f64 - last_year as f64,
            RankMode::Percent => {
                debug_assert!(last_year > 0);
                (this_year as f64 - last_year as f64) / last_year as f64
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Standing<'r> {
    pub person: &'r str,
    pub this_year: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Improvement<'r> {
    pub person: &'r str,
    /// always positive
    pub change: f64,
    pub this_year: usize,
    pub last_year: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct International<'r> {
    pub person: &'r str,
    /// most frequent currency first
    pub currency_counts: Vec<Sum>,
}

impl International<'_> {
    pub fn total(&self) -> usize {
        self.currency_counts.iter().map(|c| c.count).sum()
    }
}

/// Finds of one person in one currency
#[derive(Debug, Clone, PartialEq)]
pub struct Valuable<'r> {
    pub person: &'r str,
    pub currency: String,
    pub count: usize,
    pub value: f64,
}

type ByPersonByYear<'r> = Groups<&'r str, Groups<i32, Vec<&'r Row>>>;

fn count_in(years: &Groups<i32, Vec<&Row>>, year: i32) -> Option<usize> {
    years.get(&year).map(Vec::len)
}

fn by_count_then_name(a: (&str, usize), b: (&str, usize)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Persons with finds in `year` but none in `year - 1`, most finds first
///
/// Only the immediately preceding year is checked: someone returning after
/// skipping a year counts as a rookie again.
pub fn top_rookies(rows: &[Row], year: i32, count: usize) -> Vec<Standing<'_>> {
    let mut rookies = group::by_person_by_year(rows)
        .into_iter()
        .filter_map(|(person, years)| match (count_in(&years, year), count_in(&years, year - 1)) {
            (Some(this_year), None) => Some(Standing { person, this_year }),
            _ => None,
        })
        .collect::<Vec<_>>();
    rookies.sort_by(|a, b| by_count_then_name((a.person, a.this_year), (b.person, b.this_year)));
    rookies.truncate(count);
    rookies
}

fn improvements(by_person: ByPersonByYear<'_>, year: i32, mode: RankMode) -> Vec<Improvement<'_>> {
    by_person
        .into_iter()
        .filter_map(|(person, years)| {
            let this_year = count_in(&years, year)?;
            let last_year = count_in(&years, year - 1)?;
            if this_year > last_year {
                Some(Improvement {
                    person,
                    change: mode.change(this_year, last_year),
                    this_year,
                    last_year,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Persons with more finds in `year` than in `year - 1`, largest change first
pub fn most_improved(rows: &[Row], year: i32, count: usize, mode: RankMode) -> Vec<Improvement<'_>> {
    let mut changes = improvements(group::by_person_by_year(rows), year, mode);
    changes.sort_by(|a, b| b.change.total_cmp(&a.change).then_with(|| a.person.cmp(b.person)));
    changes.truncate(count);
    changes
}

/// Non-USD finds of `year` per person and currency, most international finds first
pub fn top_international(rows: &[Row], year: i32, count: usize) -> Vec<International<'_>> {
    let mut ranking = group::by_person_by_year(rows)
        .into_iter()
        .filter_map(|(person, years)| {
            let foreign = years.get(&year)?.iter().copied().filter(|r| !r.is_usd());
            let currency_counts = sum::sum_by_currency(foreign);
            if currency_counts.is_empty() {
                None
            } else {
                Some(International {
                    person,
                    currency_counts,
                })
            }
        })
        .collect::<Vec<_>>();
    ranking.sort_by(|a, b| by_count_then_name((a.person, a.total()), (b.person, b.total())));
    ranking.truncate(count);
    ranking
}

/// Per-person per-currency values found in `year`, highest value first
///
/// Values of different currencies are compared as plain numbers: no
/// exchange rate is ever applied.
pub fn most_valuable(rows: &[Row], year: i32, count: usize) -> Vec<Valuable<'_>> {
    let mut values = group::by_person_by_year(rows)
        .into_iter()
        .filter_map(|(person, years)| {
            let sums = sum::sum_by_currency(years.get(&year)?.iter().copied());
            Some(sums.into_iter().map(move |s| Valuable {
                person,
                currency: s.currency,
                count: s.count,
                value: s.sum,
            }))
        })
        .flatten()
        .collect::<Vec<_>>();
    values.sort_by(|a, b| b.value.total_cmp(&a.value).then_with(|| a.person.cmp(b.person)));
    values.truncate(count);
    values
}

/// Persons of the Friends division with finds in `year`, most finds first
pub fn top_friends(rows: &[Row], year: i32, count: usize) -> Vec<Standing<'_>> {
    let mut friends = group::by_person_by_year(rows)
        .into_iter()
        .filter(|(person, _)| Division::of(person) == Division::Friends)
        .filter_map(|(person, years)| {
            count_in(&years, year).map(|this_year| Standing { person, this_year })
        })
        .collect::<Vec<_>>();
    friends.sort_by(|a, b| by_count_then_name((a.person, a.this_year), (b.person, b.this_year)));
    friends.truncate(count);
    friends
}

/// Position of a person among all persons of one year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankEntry {
    pub year: i32,
    /// 0 is the person with the most finds that year
    pub rank: usize,
    /// places gained since the previous ranked year, `None` on the first one
    pub change: Option<i64>,
}

/// Yearly rank of every person, in order of first appearance
///
/// Years are listed in increasing order and only years in which the person
/// found something are present.
pub fn yearly_ranks(rows: &[Row]) -> Vec<(&str, Vec<RankEntry>)> {
    let mut by_year = group::by_year_by_person(rows);
    by_year.sort_by(|(a, _), (b, _)| a.cmp(b));
    let standings = by_year
        .iter()
        .map(|(year, persons)| {
            let mut counts = persons.iter().map(|(p, rows)| (*p, rows.len())).collect::<Vec<_>>();
            counts.sort_by(|a, b| by_count_then_name(*a, *b));
            (*year, counts.into_iter().map(|(p, _)| p).collect::<Vec<_>>())
        })
        .collect::<Vec<_>>();

    group::by_person(rows)
        .keys()
        .map(|person| {
            let mut entries: Vec<RankEntry> = Vec::new();
            for (year, order) in &standings {
                if let Some(rank) = order.iter().position(|p| p == person) {
                    let change = entries.last().map(|prev| prev.rank as i64 - rank as i64);
                    entries.push(RankEntry { year: *year, rank, change });
                }
            }
            (*person, entries)
        })
        .collect()
}

/// One line of the all-time table
#[derive(Debug, Clone, PartialEq)]
pub struct AllTime<'r> {
    pub person: &'r str,
    /// per-currency sums of each year the person found something, increasing years
    pub years: Vec<(i32, Vec<Sum>)>,
    /// per-currency sums over all years
    pub total: Vec<Sum>,
}

impl AllTime<'_> {
    pub fn count(&self) -> usize {
        self.total.iter().map(|s| s.count).sum()
    }

    /// Sums for one year and currency
    pub fn get(&self, year: i32, currency: &str) -> Option<&Sum> {
        self.years
            .iter()
            .find(|(y, _)| *y == year)
            .and_then(|(_, sums)| sums.iter().find(|s| s.currency == currency))
    }
}

/// Every person's totals per year, most finds first; also returns all years in increasing order
pub fn all_time(rows: &[Row]) -> (Vec<i32>, Vec<AllTime<'_>>) {
    let mut all_years = group::by_year(rows).keys().copied().collect::<Vec<_>>();
    all_years.sort_unstable();

    let mut table = group::by_person_by_year(rows)
        .into_iter()
        .map(|(person, by_year)| {
            let mut years = by_year
                .iter()
                .map(|(year, rows)| (*year, sum::sum_by_currency(rows.iter().copied())))
                .collect::<Vec<_>>();
            years.sort_by_key(|(year, _)| *year);
            let total = sum::sum_by_currency(by_year.values().flatten().copied());
            AllTime { person, years, total }
        })
        .collect::<Vec<_>>();
    table.sort_by(|a, b| by_count_then_name((a.person, a.count()), (b.person, b.count())));
    (all_years, table)
}
