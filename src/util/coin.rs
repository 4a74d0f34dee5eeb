//! Display metadata of every known denomination
//!
//! The table is keyed by `CoinKey` text (`"0.01USD"`, `"1EUR"`, ...).
//! Diameters are in inches.
//!
//! Sources:
//! - https://www.usmint.gov/learn/coin-and-medal-programs/coin-specifications
//! - https://www.fleur-de-coin.com/eurocoins/specifications
//! - https://en.wikipedia.org/wiki/Coins_of_the_pound_sterling#Specifications
//! - https://en.wikipedia.org/wiki/Penny_(Canadian_coin)
//! - https://en.wikipedia.org/wiki/Mexican_peso

use crate::util::row::CoinKey;

const MM: f64 = 1.0 / 10.0 / 2.54;
const BILL: f64 = 7.0 / 3.0;

/// How a denomination is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// plain disc
    Round { diameter: f64, color: &'static str },
    /// bimetallic disc: a core and a ring
    TwoColor {
        diameter: f64,
        inner: &'static str,
        outer: &'static str,
    },
    /// disc with a hole in the middle
    Holed {
        diameter: f64,
        inner_diameter: f64,
        color: &'static str,
    },
    /// regular polygon inscribed in `diameter`
    Polygon {
        diameter: f64,
        sides: u8,
        color: &'static str,
    },
    /// rectangular note, `ratio` is width over height
    Bill { ratio: f64, color: &'static str },
}

impl Shape {
    /// Main fill color
    pub fn color(&self) -> &'static str {
        match *self {
            Shape::Round { color, .. }
            | Shape::Holed { color, .. }
            | Shape::Polygon { color, .. }
            | Shape::Bill { color, .. } => color,
            Shape::TwoColor { outer, .. } => outer,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coin {
    pub name: &'static str,
    pub short_name: Option<&'static str>,
    pub shape: Shape,
}

impl Coin {
    /// Short name if there is one, full name otherwise
    pub fn label(&self) -> &'static str {
        self.short_name.unwrap_or(self.name)
    }
}

/// Stand-in for keys missing from the table
pub const UNKNOWN: Coin = Coin {
    name: "Unknown coin",
    short_name: Some("?"),
    shape: Shape::Round {
        diameter: 0.75,
        color: "black",
    },
};

macro_rules! round {
    ( $name:expr, $short:expr, $diameter:expr, $color:expr ) => {
        Coin {
            name: $name,
            short_name: $short,
            shape: Shape::Round {
                diameter: $diameter,
                color: $color,
            },
        }
    };
}

macro_rules! bill {
    ( $name:expr, $short:expr, $ratio:expr, $color:expr ) => {
        Coin {
            name: $name,
            short_name: $short,
            shape: Shape::Bill {
                ratio: $ratio,
                color: $color,
            },
        }
    };
}

const COINS: &[(&str, Coin)] = &[
    ("0.01USD", round!("Penny", None, 0.75, "burlywood")),
    ("0.05USD", round!("Nickel", None, 0.835, "gray")),
    ("0.1USD", round!("Dime", None, 0.705, "gray")),
    ("0.25USD", round!("Quarter", None, 0.955, "gray")),
    ("1USD", bill!("Dollar Bill", Some("$1 bill"), BILL, "green")),
    ("5USD", bill!("5 Dollar Bill", Some("$5 bill"), BILL, "green")),
    ("10USD", bill!("10 Dollar Bill", Some("$10 bill"), BILL, "green")),
    ("20USD", bill!("20 Dollar Bill", Some("$20 bill"), BILL, "green")),
    ("50USD", bill!("50 Dollar Bill", Some("$50 bill"), BILL, "green")),
    ("0.01EUR", round!("Euro Penny", Some("1 cent"), 16.25 * MM, "brown")),
    ("0.02EUR", round!("2 Euro Cent", Some("2 cent"), 18.77 * MM, "red")),
    ("0.05EUR", round!("5 Euro Cent", Some("5 cent"), 21.25 * MM, "red")),
    ("0.1EUR", round!("10 Euro Cent", Some("10 cent"), 19.75 * MM, "silver")),
    ("0.5EUR", round!("50 Euro Cent", Some("50 cent"), 24.25 * MM, "brown")),
    (
        "1EUR",
        Coin {
            name: "1 Euro",
            short_name: None,
            shape: Shape::TwoColor {
                diameter: 23.25 * MM,
                inner: "gainsboro",
                outer: "burlywood",
            },
        },
    ),
    ("10EUR", bill!("10 Euro", None, 127.0 / 67.0, "orange")),
    ("0.01GBP", round!("1 Pence", None, 20.3 * MM, "brown")),
    ("0.02GBP", round!("2 Pence", None, 25.9 * MM, "brown")),
    ("0.05GBP", round!("5 Pence", None, 18.0 * MM, "silver")),
    (
        "0.2GBP",
        Coin {
            name: "20 Pence",
            short_name: None,
            shape: Shape::Polygon {
                diameter: 21.4 * MM,
                sides: 7,
                color: "silver",
            },
        },
    ),
    ("0.01CAD", round!("Canadian Penny", Some("Penny"), 19.05 * MM, "brown")),
    // https://en.wikipedia.org/wiki/Dime_(Canadian_coin)
    ("0.1CAD", round!("Canadian Dime", Some("Dime"), 18.03 * MM, "silver")),
    ("0.25CAD", round!("Canadian Quarter", Some("Quarter"), 23.88 * MM, "silver")),
    // https://en.wikipedia.org/wiki/Loonie
    (
        "1CAD",
        Coin {
            name: "Loonie",
            short_name: None,
            shape: Shape::Polygon {
                diameter: 26.5 * MM,
                sides: 11,
                color: "wheat",
            },
        },
    ),
    // https://en.numista.com/catalogue/pieces10140.html
    ("0.02MXP", round!("2 Centavo", None, 25.0 * MM, "brown")),
    ("0.5MXP", round!("50 Centavo", None, 17.0 * MM, "silver")),
    (
        "1MXP",
        Coin {
            name: "1 Peso",
            short_name: None,
            shape: Shape::TwoColor {
                diameter: 21.0 * MM,
                inner: "antiquewhite",
                outer: "silver",
            },
        },
    ),
    // https://en.numista.com/818
    ("5MXP", round!("5 Pesos", None, 27.24 * MM, "wheat")),
    ("0.25TRY", round!("Turkish Quarter", Some("Quarter"), 20.5 * MM, "brown")),
    // https://en.wikipedia.org/wiki/Penny_(New_Zealand_coin), drawn at half size
    ("0.01NZD", round!("NZ Penny", Some("Penny"), 31.75 * MM / 2.0, "brown")),
    ("0.1NZD", round!("NZ Dime", Some("Dime"), 20.5 * MM, "silver")),
    ("1JPY", round!("1 Yen", None, 20.0 * MM, "silver")),
    (
        "5JPY",
        Coin {
            name: "5 Yen",
            short_name: None,
            shape: Shape::Holed {
                diameter: 22.0 * MM,
                inner_diameter: 5.0 * MM,
                color: "burlywood",
            },
        },
    ),
    ("10JPY", round!("10 Yen", None, 23.5 * MM, "orange")),
    ("0.2AUD", round!("20 Australian cents", Some("20 cents"), 28.52 * MM, "silver")),
    ("1AUD", round!("Australian Dollar", Some("Dollar"), 25.0 * MM, "brown")),
    ("0.05SGD", round!("5 Singapore Cent", Some("5 cents"), 16.75 * MM, "gold")),
    ("2CHF", round!("2 Franc", None, 27.4 * MM, "silver")),
    // https://en.numista.com/809
    ("0.2HUF", round!("20 Forint", None, 26.3 * MM, "tan")),
];

/// Metadata for `key`, if known
pub fn find(key: &CoinKey) -> Option<&'static Coin> {
    COINS
        .iter()
        .find(|(k, _)| *k == key.as_str())
        .map(|(_, coin)| coin)
}

/// Metadata for `key`, falling back to `UNKNOWN` with a warning
pub fn lookup(key: &CoinKey) -> &'static Coin {
    match find(key) {
        Some(coin) => coin,
        None => {
            tracing::warn!(coin = %key, "no metadata for coin, drawing a placeholder");
            &UNKNOWN
        }
    }
}

/// Every known key, in table order
pub fn known_keys() -> impl Iterator<Item = &'static str> {
    COINS.iter().map(|(k, _)| *k)
}

/// Amount of money in a currency: two decimals, none for yen
pub fn format_amount(value: f64, currency: &str) -> String {
    if currency == "JPY" {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known() {
        let penny = lookup(&CoinKey::new(0.01, "USD"));
        assert_eq!(penny.name, "Penny");
        assert_eq!(penny.label(), "Penny");
        assert_eq!(penny.shape.color(), "burlywood");

        let loonie = lookup(&CoinKey::new(1.0, "CAD"));
        assert!(matches!(loonie.shape, Shape::Polygon { sides: 11, .. }));

        let yen = lookup(&CoinKey::new(5.0, "JPY"));
        assert!(matches!(yen.shape, Shape::Holed { .. }));

        let euro = lookup(&CoinKey::new(1.0, "EUR"));
        assert_eq!(euro.shape.color(), "burlywood");

        assert_eq!(lookup(&CoinKey::new(20.0, "USD")).label(), "$20 bill");
    }

    #[test]
    fn unknown_falls_back() {
        let key = CoinKey::new(0.03, "USD");
        assert!(find(&key).is_none());
        assert_eq!(lookup(&key), &UNKNOWN);
    }

    #[test]
    fn keys_are_unique() {
        let mut keys = known_keys().collect::<Vec<_>>();
        let n = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), n);
    }

    #[test]
    fn keys_match_key_format() {
        // every table key must be producible from a (denomination, currency) pair
        for key in known_keys() {
            let split = key.len() - 3;
            let denomination = key[..split].parse::<f64>().unwrap();
            assert_eq!(CoinKey::new(denomination, &key[split..]).as_str(), key);
        }
    }

    #[test]
    fn amounts() {
        assert_eq!(format_amount(0.27, "USD"), "0.27");
        assert_eq!(format_amount(3.0, "EUR"), "3.00");
        assert_eq!(format_amount(16.0, "JPY"), "16");
    }
}
