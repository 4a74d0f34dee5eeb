use std::fmt;
use std::str::FromStr;

use crate::util::row::Row;

/// Family members, in display order
pub const ORDERED_NAMES: [&str; 4] = ["Zach", "Dad", "Mom", "Noah"];

/// Which leaderboard a person competes in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Division {
    Family,
    Friends,
}

impl Division {
    /// Family for the known names (case-sensitive), Friends for anyone else
    pub fn of(person: &str) -> Self {
        if ORDERED_NAMES.contains(&person) {
            Division::Family
        } else {
            Division::Friends
        }
    }

    /// Position of a family member in `ORDERED_NAMES`
    pub fn family_rank(person: &str) -> Option<usize> {
        ORDERED_NAMES.iter().position(|name| *name == person)
    }

    /// Rows found by members of this division
    pub fn filter(self, rows: &[Row]) -> Vec<Row> {
        rows.iter()
            .filter(|row| Division::of(&row.person) == self)
            .cloned()
            .collect()
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Division::Family => write!(f, "Family"),
            Division::Friends => write!(f, "Friends"),
        }
    }
}

impl FromStr for Division {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "family" => Ok(Division::Family),
            "friends" | "friend" => Ok(Division::Friends),
            _ => Err(format!("'{}' is not a division (family or friends)", s)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Division::*, *};

    #[test]
    fn classify() {
        assert_eq!(Division::of("Zach"), Family);
        assert_eq!(Division::of("Mom"), Family);
        assert_eq!(Division::of("Noah"), Family);
        assert_eq!(Division::of("Dad"), Family);
        assert_eq!(Division::of("dad"), Friends);
        assert_eq!(Division::of("Alice"), Friends);
        assert_eq!(Division::of(""), Friends);
    }

    #[test]
    fn ranks() {
        assert_eq!(Division::family_rank("Zach"), Some(0));
        assert_eq!(Division::family_rank("Noah"), Some(3));
        assert_eq!(Division::family_rank("Alice"), None);
    }

    #[test]
    fn parse() {
        assert_eq!("family".parse::<Division>(), Ok(Family));
        assert_eq!("Friends".parse::<Division>(), Ok(Friends));
        assert!("cousins".parse::<Division>().is_err());
    }
}
