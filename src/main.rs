mod cli;

use std::process::ExitCode;

use pennies::{load, Row};

use cli::{
    args::Settings,
    plot::{CoinChart, Plotter},
    report,
};

fn main() -> ExitCode {
    let settings = cli::args::settings();
    cli::logging::init(&settings.log);

    let mut errs = load::error::Record::new();
    let rows = load::read_rows(&settings.file, &mut errs);
    eprint!("{}", errs);
    let rows = match rows {
        Some(rows) => rows,
        None => return ExitCode::FAILURE,
    };
    let year = match settings.year.or_else(|| rows.iter().map(Row::year).max()) {
        Some(year) => year,
        None => {
            println!("No finds in '{}'", settings.file);
            return ExitCode::SUCCESS;
        }
    };
    tracing::debug!(rows = rows.len(), year, "report");

    // awards are decided over everyone, the division only narrows the per-person tables
    let persons = match settings.division {
        Some(division) => {
            println!("Division: {}\n", division);
            division.filter(&rows)
        }
        None => rows.clone(),
    };
    print_report(&settings, &rows, &persons, year);
    match &settings.plot_dir {
        Some(dir) => match save_plots(dir, &persons, year) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(dir = %dir.display(), error = %e, "cannot write plots");
                ExitCode::FAILURE
            }
        },
        None => ExitCode::SUCCESS,
    }
}

fn print_report(settings: &Settings, rows: &[Row], persons: &[Row], year: i32) {
    println!("{}", report::totals(persons, year));
    println!("{}", report::streaks(persons));
    for table in report::all_awards(rows, year, settings.count) {
        println!("{}", table);
    }
    println!("{}", report::all_time(persons));
    println!("{}", report::ranks(persons));
    println!("{}", report::weekdays(persons));
    println!("{}", report::coins(persons, year));
    println!("{}", report::intervals(persons, year, settings.interval));
}

fn save_plots(dir: &std::path::Path, rows: &[Row], year: i32) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    Plotter::from(rows, year).save_cumulative_plot(dir.join("cumulative.svg"))?;
    CoinChart::from(rows, year).save(dir.join("coins.svg"))?;
    tracing::info!(dir = %dir.display(), "plots written");
    Ok(())
}
