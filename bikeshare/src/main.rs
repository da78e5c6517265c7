//! # bikeshare
//!
//! An interactive report over US bikeshare trip logs.
//!
//! ## Overview
//!
//! bikeshare is built on top of bikesharelib. It asks for a city, a month
//! and a day, loads the matching trips and prints:
//!
//! - **Time of travel**: most common month, day and start hour
//! - **Stations**: most popular start and end stations and trip
//! - **Duration**: total and mean trip duration
//! - **Users**: counts by type and gender, birth year range and mode
//!
//! It then offers to page through the raw rows five at a time, and to start
//! over.
//!
//! ## Usage
//!
//! ```bash
//! # City files (chicago.csv, new_york_city.csv, washington.csv) in the current directory
//! bikeshare
//!
//! # City files elsewhere
//! bikeshare --data-dir ./data
//!
//! # Filter on the actual day of the week
//! bikeshare --day-filter weekday
//!
//! # Debug logging on stderr
//! RUST_LOG=debug bikeshare
//! ```

mod pager;
mod prompt;
mod render;
mod session;

use std::io;
use std::process::ExitCode;

use bikesharelib::{CityTable, DayFilterMode};
use clap::{Arg, ArgMatches, Command};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use crate::prompt::Prompter;
use crate::session::Settings;

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("bikeshare")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Explore US bikeshare trip data interactively")
        .arg(
            Arg::new("data-dir")
                .short('d')
                .long("data-dir")
                .default_value(".")
                .help("Directory containing the city CSV files"),
        )
        .arg(
            Arg::new("day-filter")
                .long("day-filter")
                .value_parser(["day-of-month", "weekday"])
                .default_value("day-of-month")
                .help("How the day filter matches trips: by day of the month (historical reports) or by weekday"),
        )
}

/// Build settings from matches
fn build_settings(matches: &ArgMatches) -> Result<Settings, anyhow::Error> {
    let data_dir = matches
        .get_one::<String>("data-dir")
        .map(|s| s.as_str())
        .unwrap_or(".");
    let day_mode = matches
        .get_one::<String>("day-filter")
        .map(|s| s.parse::<DayFilterMode>())
        .transpose()
        .map_err(anyhow::Error::msg)?
        .unwrap_or_default();

    Ok(Settings {
        cities: CityTable::new().data_dir(data_dir),
        day_mode,
    })
}

fn init_logging() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let matches = build_command().get_matches();
    let settings = match build_settings(&matches) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    debug!(?settings, "starting session");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    match session::run(&mut prompter, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
