//! Ordered multi-key grouping
//!
//! `Groups` keeps its keys in order of first appearance and the items of
//! each group in their original relative order. Nesting is done with
//! `then`, which regroups every group by a second key, so grouping by
//! person then year gives a `Groups<&str, Groups<i32, Vec<&Row>>>`.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use chrono::NaiveDate;

use crate::util::{
    date::Interval,
    division::Division,
    row::{CoinKey, Row},
};

/// Ordered mapping from a key to a value (usually a `Vec` of grouped items)
#[derive(Debug, Clone)]
pub struct Groups<K, V> {
    index: HashMap<K, usize>,
    entries: Vec<(K, V)>,
}

impl<K, V> Default for Groups<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K, T> Groups<K, Vec<T>>
where
    K: Eq + Hash + Clone,
{
    /// Group `items` by the output of `key`
    ///
    /// `key` must be a pure function of the item. An empty input gives an
    /// empty mapping.
    pub fn by<I, F>(items: I, key: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> K,
    {
        let mut groups = Self::default();
        for item in items {
            let k = key(&item);
            match groups.index.get(&k) {
                Some(&idx) => groups.entries[idx].1.push(item),
                None => {
                    groups.index.insert(k.clone(), groups.entries.len());
                    groups.entries.push((k, vec![item]));
                }
            }
        }
        groups
    }

    /// Regroup the contents of every group by a second key
    pub fn then<K2, F>(self, key: F) -> Groups<K, Groups<K2, Vec<T>>>
    where
        K2: Eq + Hash + Clone,
        F: Fn(&T) -> K2,
    {
        self.map(|items| Groups::by(items, &key))
    }
}

impl<K, V> Groups<K, V> {
    /// Transform every value, keeping keys and their order
    pub fn map<W, F>(self, mut f: F) -> Groups<K, W>
    where
        F: FnMut(V) -> W,
    {
        Groups {
            index: self.index,
            entries: self.entries.into_iter().map(|(k, v)| (k, f(v))).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> Groups<K, V>
where
    K: Eq + Hash,
{
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains_key(key)
    }
}

impl<K, V> Groups<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Reorder the groups, replacing the order of first appearance
    pub fn sort_by<F>(&mut self, cmp: F)
    where
        F: FnMut(&(K, V), &(K, V)) -> Ordering,
    {
        self.entries.sort_by(cmp);
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, (k, _))| (k.clone(), idx))
            .collect();
    }
}

impl<K, V> IntoIterator for Groups<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Rows of each person
pub type ByPerson<'r> = Groups<&'r str, Vec<&'r Row>>;

fn person<'r>(row: &&'r Row) -> &'r str {
    &row.person
}

pub fn by_person(rows: &[Row]) -> ByPerson<'_> {
    Groups::by(rows.iter(), person)
}

pub fn by_year(rows: &[Row]) -> Groups<i32, Vec<&Row>> {
    Groups::by(rows.iter(), |row| row.year())
}

pub fn by_coin(rows: &[Row]) -> Groups<CoinKey, Vec<&Row>> {
    Groups::by(rows.iter(), |row| row.coin())
}

/// Keys are weekday indexes, `0` is Sunday
pub fn by_weekday(rows: &[Row]) -> Groups<u32, Vec<&Row>> {
    Groups::by(rows.iter(), |row| row.weekday())
}

pub fn by_person_by_year(rows: &[Row]) -> Groups<&str, Groups<i32, Vec<&Row>>> {
    by_person(rows).then(|row| row.year())
}

pub fn by_year_by_person(rows: &[Row]) -> Groups<i32, ByPerson<'_>> {
    by_year(rows).then(person)
}

pub fn by_person_by_weekday(rows: &[Row]) -> Groups<&str, Groups<u32, Vec<&Row>>> {
    by_person(rows).then(|row| row.weekday())
}

pub fn by_coin_by_person(rows: &[Row]) -> Groups<CoinKey, ByPerson<'_>> {
    by_coin(rows).then(person)
}

/// Finds of every person binned by `interval`, bins in chronological order
///
/// Persons are sorted by division (family first), then by number of
/// non-empty bins (most first), then by name.
pub fn by_person_by_interval(
    rows: &[Row],
    interval: Interval,
) -> Vec<(&str, Groups<NaiveDate, Vec<&Row>>)> {
    let mut binned = by_person(rows)
        .then(|row| interval.floor(row.day()))
        .into_iter()
        .map(|(person, mut bins)| {
            bins.sort_by(|(a, _), (b, _)| a.cmp(b));
            (person, bins)
        })
        .collect::<Vec<_>>();
    binned.sort_by(|(pa, a), (pb, b)| {
        Division::of(pa)
            .cmp(&Division::of(pb))
            .then_with(|| b.len().cmp(&a.len()))
            .then_with(|| pa.cmp(pb))
    });
    binned
}
