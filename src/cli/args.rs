//! Command line arguments

use std::path::PathBuf;

use clap::{value_t, App, Arg, ArgMatches};

use pennies::util::{date::Interval, division::Division};

/// Everything the report needs to know from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub file: String,
    /// `None` means the latest year of the data
    pub year: Option<i32>,
    pub count: usize,
    pub division: Option<Division>,
    pub interval: Interval,
    pub plot_dir: Option<PathBuf>,
    pub log: String,
}

fn app() -> App<'static, 'static> {
    App::new("pennies")
        .about("Reports and charts over a log of found coins and bills")
        .arg(
            Arg::with_name("FILE")
                .help("CSV log: timestamp,person,denomination,currency")
                .index(1)
                .env("PENNIES_FILE")
                .default_value("pennies.csv"),
        )
        .arg(
            Arg::with_name("year")
                .long("year")
                .short("y")
                .takes_value(true)
                .value_name("YEAR")
                .help("Year of the awards [default: latest year of the data]"),
        )
        .arg(
            Arg::with_name("count")
                .long("count")
                .short("n")
                .takes_value(true)
                .value_name("N")
                .default_value("5")
                .help("Number of places in each ranking"),
        )
        .arg(
            Arg::with_name("division")
                .long("division")
                .short("d")
                .takes_value(true)
                .possible_values(&["family", "friends"])
                .help("Only show persons of one division"),
        )
        .arg(
            Arg::with_name("interval")
                .long("interval")
                .short("i")
                .takes_value(true)
                .possible_values(&["day", "week", "month"])
                .default_value("week")
                .help("Bins of the finds-over-time table"),
        )
        .arg(
            Arg::with_name("plot")
                .long("plot")
                .takes_value(true)
                .value_name("DIR")
                .help("Write cumulative.svg and coins.svg into DIR"),
        )
        .arg(
            Arg::with_name("log")
                .long("log")
                .takes_value(true)
                .value_name("FILTER")
                .env("RUST_LOG")
                .default_value("warn")
                .help("Log filter, e.g. 'debug' or 'pennies=debug'"),
        )
}

/// Parse the process arguments, exiting with a usage message on failure
pub fn settings() -> Settings {
    let matches = app().get_matches();
    from_matches(&matches).unwrap_or_else(|e| e.exit())
}

fn from_matches(matches: &ArgMatches) -> clap::Result<Settings> {
    let year = if matches.is_present("year") {
        Some(value_t!(matches, "year", i32)?)
    } else {
        None
    };
    let division = if matches.is_present("division") {
        Some(value_t!(matches, "division", Division)?)
    } else {
        None
    };
    Ok(Settings {
        file: matches.value_of("FILE").unwrap_or("pennies.csv").to_string(),
        year,
        count: value_t!(matches, "count", usize)?,
        division,
        interval: value_t!(matches, "interval", Interval)?,
        plot_dir: matches.value_of("plot").map(PathBuf::from),
        log: matches.value_of("log").unwrap_or("warn").to_string(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! parse {
        ( $( $arg:expr ),* ) => {{
            let matches = app().get_matches_from_safe(vec!["pennies" $( , $arg )*]);
            matches.and_then(|m| from_matches(&m))
        }};
    }

    #[test]
    fn explicit() {
        let settings = parse!("log.csv", "--year", "2023", "-n", "3", "--division", "friends", "-i", "month", "--plot", "out", "--log", "debug").unwrap();
        assert_eq!(settings.file, "log.csv");
        assert_eq!(settings.year, Some(2023));
        assert_eq!(settings.count, 3);
        assert_eq!(settings.division, Some(Division::Friends));
        assert_eq!(settings.interval, Interval::Month);
        assert_eq!(settings.plot_dir, Some(PathBuf::from("out")));
        assert_eq!(settings.log, "debug");
    }

    #[test]
    fn defaults() {
        let settings = parse!("log.csv").unwrap();
        assert_eq!(settings.year, None);
        assert_eq!(settings.count, 5);
        assert_eq!(settings.division, None);
        assert_eq!(settings.interval, Interval::Week);
        assert_eq!(settings.plot_dir, None);
    }

    #[test]
    fn invalid() {
        assert!(parse!("--year", "last").is_err());
        assert!(parse!("--count", "-1").is_err());
        assert!(parse!("--division", "cousins").is_err());
        assert!(parse!("--interval", "year").is_err());
    }
}
