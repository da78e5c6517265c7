//! # bikesharelib
//!
//! Load, filter and summarise US bikeshare trip logs.
//!
//! ## Overview
//!
//! Trip logs are published as one CSV file per city. This library reads a
//! city's file into memory, derives month/day/hour columns from each trip's
//! start time, filters by month and day, and computes descriptive
//! statistics:
//!
//! - **Time**: most common month, day and start hour
//! - **Stations**: most popular start station, end station and trip
//! - **Duration**: total and mean trip duration
//! - **Users**: counts by user type and gender, birth year range and mode
//!
//! All functions return plain data; printing is left to the caller.
//!
//! ## Example
//!
//! ```rust
//! use bikesharelib::{duration_stats, load_trips, City, CityTable, DayFilterMode, Selection};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(
//!     dir.path().join("washington.csv"),
//!     "Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n\
//!      2017-06-21 08:36:34,2017-06-21 08:44:43,489,A St,B St,Subscriber\n",
//! )
//! .unwrap();
//!
//! let cities = CityTable::new().data_dir(dir.path());
//! let table = load_trips(&cities, &Selection::all(City::Washington), DayFilterMode::default())
//!     .unwrap();
//! assert_eq!(table.len(), 1);
//! assert_eq!(duration_stats(&table).total, 489.0);
//! ```

pub mod config;
pub mod error;
pub mod loader;
pub mod options;
pub mod stats;
pub mod table;
pub mod trip;

pub use config::CityTable;
pub use error::BikeshareError;
pub use loader::{apply_selection, load_trips, parse_timestamp, read_trip_file, read_trips};
pub use options::{title_case, City, DayFilterMode, Month, Named, PeriodFilter, Selection, Weekday};
pub use stats::{
    birth_year_stats, duration_stats, mode, station_stats, time_stats, user_stats, value_counts,
    BirthYearStats, DurationStats, StationStats, TimeStats, UserStats,
};
pub use table::{PageTable, TableRow, PAGE_SIZE};
pub use trip::{TripRecord, TripTable};

/// Result type for bikesharelib operations
pub type Result<T> = std::result::Result<T, BikeshareError>;
