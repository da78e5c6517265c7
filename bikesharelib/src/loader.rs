//! Trip log loading and filtering.
//!
//! This module reads a city's CSV file into a [`TripTable`], derives the
//! month/day/hour columns from `Start Time`, and applies the month and day
//! filters of a [`Selection`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::debug;

use crate::config::CityTable;
use crate::error::BikeshareError;
use crate::options::{DayFilterMode, Selection};
use crate::trip::{derive_day, derive_hour, derive_month, TripRecord, TripTable};
use crate::Result;

/// Columns every city file must provide.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    "Start Time",
    "Start Station",
    "End Station",
    "Trip Duration",
    "User Type",
];

pub const GENDER_COLUMN: &str = "Gender";
pub const BIRTH_YEAR_COLUMN: &str = "Birth Year";

/// Accepted `Start Time` layouts, tried in order.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// One CSV row as it appears on disk. Empty cells deserialize to `None`.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time", default)]
    start_time: Option<String>,
    #[serde(rename = "Start Station", default)]
    start_station: Option<String>,
    #[serde(rename = "End Station", default)]
    end_station: Option<String>,
    #[serde(rename = "Trip Duration", default)]
    trip_duration: Option<String>,
    #[serde(rename = "User Type", default)]
    user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    birth_year: Option<String>,
}

/// Parse a `Start Time` value.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Load a city's trips and apply the selection's filters.
///
/// # Example
///
/// ```rust,ignore
/// use bikesharelib::{load_trips, City, CityTable, DayFilterMode, Month, Selection};
///
/// let cities = CityTable::new().data_dir("data");
/// let selection = Selection::all(City::Chicago).with_month(Month::March);
/// let table = load_trips(&cities, &selection, DayFilterMode::default())?;
/// assert!(table.rows.iter().all(|r| r.month == Some(3)));
/// ```
pub fn load_trips(
    cities: &CityTable,
    selection: &Selection,
    mode: DayFilterMode,
) -> Result<TripTable> {
    let path = cities.path_for(selection.city);
    let table = read_trip_file(&path, mode)?;
    let loaded = table.len();
    let table = apply_selection(table, selection);
    debug!(
        city = selection.city.name(),
        path = %path.display(),
        loaded,
        kept = table.len(),
        "loaded trips"
    );
    Ok(table)
}

/// Read an entire trip file without filtering.
pub fn read_trip_file(path: &Path, mode: DayFilterMode) -> Result<TripTable> {
    let file = File::open(path).map_err(|source| BikeshareError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    read_trips(file, path, mode)
}

/// Read trips from any reader. `path` is only used in error messages.
///
/// Empty cells and rows cut short are read as missing values. A non-empty
/// value that does not parse is an error.
pub fn read_trips<R: Read>(reader: R, path: &Path, mode: DayFilterMode) -> Result<TripTable> {
    let csv_err = |source: csv::Error| BikeshareError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers().map_err(csv_err)?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(BikeshareError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            });
        }
    }

    let mut table = TripTable {
        columns: headers.iter().map(str::to_string).collect(),
        rows: Vec::new(),
        has_gender: headers.iter().any(|h| h == GENDER_COLUMN),
        has_birth_year: headers.iter().any(|h| h == BIRTH_YEAR_COLUMN),
    };

    for (position, result) in rdr.records().enumerate() {
        let mut record = result.map_err(csv_err)?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        while record.len() < headers.len() {
            record.push_field("");
        }
        let raw: RawTrip = record.deserialize(Some(&headers)).map_err(csv_err)?;

        let parse_err = |field: &str, value: &str| BikeshareError::Parse {
            path: path.to_path_buf(),
            line,
            field: field.to_string(),
            value: value.to_string(),
        };

        let start_time = match non_empty(raw.start_time) {
            Some(v) => Some(
                parse_timestamp(&v).ok_or_else(|| parse_err("Start Time", &v))?,
            ),
            None => None,
        };
        let duration = match non_empty(raw.trip_duration) {
            Some(v) => Some(
                v.trim()
                    .parse::<f64>()
                    .map_err(|_| parse_err("Trip Duration", &v))?,
            ),
            None => None,
        };
        let birth_year = match non_empty(raw.birth_year) {
            Some(v) => Some(
                v.trim()
                    .parse::<f64>()
                    .map_err(|_| parse_err("Birth Year", &v))?,
            ),
            None => None,
        };

        table.rows.push(TripRecord {
            position,
            month: start_time.as_ref().map(derive_month),
            day: start_time.as_ref().map(|ts| derive_day(ts, mode)),
            hour: start_time.as_ref().map(derive_hour),
            start_time,
            start_station: non_empty(raw.start_station).unwrap_or_default(),
            end_station: non_empty(raw.end_station).unwrap_or_default(),
            duration,
            user_type: non_empty(raw.user_type),
            gender: non_empty(raw.gender),
            birth_year,
            fields: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(table)
}

/// Keep only rows that pass the selection's month and day filters.
///
/// A row without a start time fails every concrete month or day filter.
pub fn apply_selection(mut table: TripTable, selection: &Selection) -> TripTable {
    if !selection.month.is_all() {
        table
            .rows
            .retain(|r| r.month.is_some_and(|m| selection.month.matches(m)));
    }
    if !selection.day.is_all() {
        table
            .rows
            .retain(|r| r.day.is_some_and(|d| selection.day.matches(d)));
    }
    table
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{City, Month, Weekday};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const CHICAGO: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1,2017-03-02 08:00:00,2017-03-02 08:10:00,600,Canal St,Clark St,Subscriber,Male,1985.0
2,2017-03-06 09:30:00,2017-03-06 09:40:00,600,Canal St,State St,Customer,,
3,2017-04-02 17:05:00,2017-04-02 17:25:00,1200,State St,Canal St,Subscriber,Female,1992.0
4,2017-05-14 17:45:00,2017-05-14 17:50:00,300,Clark St,Canal St,,Male,1985.0
";

    const WASHINGTON: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type
0,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber
1,2017-03-11 10:40:00,2017-03-11 10:46:00,402.549,Yuma St & Tenley Circle NW,Connecticut Ave & Yuma St NW,Subscriber
";

    fn read(data: &str, mode: DayFilterMode) -> Result<TripTable> {
        read_trips(data.as_bytes(), &PathBuf::from("test.csv"), mode)
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2017-01-01 00:07:57").is_some());
        assert!(parse_timestamp("2017-01-01 00:07:57.123").is_some());
        assert!(parse_timestamp("01/31/2017 13:05").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_read_full_table() {
        let table = read(CHICAGO, DayFilterMode::DayOfMonth).unwrap();
        assert_eq!(table.len(), 4);
        assert!(table.has_gender);
        assert!(table.has_birth_year);
        assert_eq!(table.columns[1], "Start Time");

        let first = &table.rows[0];
        assert_eq!(first.position, 0);
        assert_eq!(first.month, Some(3));
        assert_eq!(first.day, Some(2));
        assert_eq!(first.hour, Some(8));
        assert_eq!(first.birth_year, Some(1985.0));
        assert_eq!(first.fields.len(), 9);

        let second = &table.rows[1];
        assert_eq!(second.gender, None);
        assert_eq!(second.birth_year, None);
        assert_eq!(table.rows[3].user_type, None);
    }

    #[test]
    fn test_optional_columns_absent() {
        let table = read(WASHINGTON, DayFilterMode::DayOfMonth).unwrap();
        assert_eq!(table.len(), 2);
        assert!(!table.has_gender);
        assert!(!table.has_birth_year);
        let duration = table.rows[0].duration.unwrap();
        assert!((duration - 489.066).abs() < 1e-9);
    }

    #[test]
    fn test_missing_required_column() {
        let data = "Start Time,Start Station,End Station,User Type\n";
        let err = read(data, DayFilterMode::DayOfMonth).unwrap_err();
        assert!(matches!(
            err,
            BikeshareError::MissingColumn { ref column, .. } if column == "Trip Duration"
        ));
    }

    #[test]
    fn test_bad_timestamp_reports_line() {
        let data = "Start Time,Start Station,End Station,Trip Duration,User Type\n\
                    not-a-date,A,B,10,Subscriber\n";
        let err = read(data, DayFilterMode::DayOfMonth).unwrap_err();
        match err {
            BikeshareError::Parse { line, field, .. } => {
                assert_eq!(line, 2);
                assert_eq!(field, "Start Time");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_duration_is_still_fatal() {
        let data = "Start Time,Start Station,End Station,Trip Duration,User Type\n\
                    2017-03-02 08:00:00,A,B,ten,Subscriber\n";
        let err = read(data, DayFilterMode::DayOfMonth).unwrap_err();
        assert!(matches!(
            err,
            BikeshareError::Parse { ref field, ref value, .. }
                if field == "Trip Duration" && value == "ten"
        ));
    }

    #[test]
    fn test_blank_cells_and_short_rows_are_missing_values() {
        let data = format!(
            "{WASHINGTON}\
             2,2017-03-11 10:40:00,,,C,,Subscriber\n\
             3,,,,D,E,Customer\n\
             4,2017-03-12 11:00:00\n"
        );
        let table = read(&data, DayFilterMode::DayOfMonth).unwrap();
        assert_eq!(table.len(), 5);

        let blank = &table.rows[2];
        assert_eq!(blank.duration, None);
        assert_eq!(blank.month, Some(3));
        assert_eq!(blank.start_station, "C");
        assert_eq!(blank.end_station, "");
        assert_eq!(blank.user_type.as_deref(), Some("Subscriber"));

        let no_start = &table.rows[3];
        assert_eq!(no_start.start_time, None);
        assert_eq!(no_start.month, None);
        assert_eq!(no_start.day, None);
        assert_eq!(no_start.hour, None);

        let short = &table.rows[4];
        assert_eq!(short.hour, Some(11));
        assert_eq!(short.duration, None);
        assert_eq!(short.start_station, "");
        assert_eq!(short.user_type, None);
        assert_eq!(short.fields.len(), table.columns.len());

        // Rows without a start time drop out under any concrete filter
        let march = Selection::all(City::Washington).with_month(Month::March);
        let filtered = apply_selection(table.clone(), &march);
        assert_eq!(filtered.len(), 3);
        assert!(filtered.rows.iter().all(|r| r.start_time.is_some()));
        assert_eq!(apply_selection(table, &Selection::all(City::Washington)).len(), 5);
    }

    #[test]
    fn test_all_all_keeps_everything() {
        let table = read(CHICAGO, DayFilterMode::DayOfMonth).unwrap();
        let full = table.clone();
        let filtered = apply_selection(table, &Selection::all(City::Chicago));
        assert_eq!(filtered, full);
    }

    #[test]
    fn test_month_filter() {
        let table = read(CHICAGO, DayFilterMode::DayOfMonth).unwrap();
        let selection = Selection::all(City::Chicago).with_month(Month::March);
        let filtered = apply_selection(table, &selection);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.rows.iter().all(|r| r.month == Some(3)));
    }

    #[test]
    fn test_month_filter_every_month() {
        let table = read(CHICAGO, DayFilterMode::DayOfMonth).unwrap();
        let mut kept = 0;
        for m in Month::ALL {
            let selection = Selection::all(City::Chicago).with_month(m);
            let filtered = apply_selection(table.clone(), &selection);
            assert!(filtered.rows.iter().all(|r| r.month == Some(m.number())));
            kept += filtered.len();
        }
        assert_eq!(kept, table.len());
    }

    #[test]
    fn test_day_filter_uses_day_of_month_by_default() {
        // Monday is index 2, so day-of-month 2 matches regardless of weekday
        let table = read(CHICAGO, DayFilterMode::DayOfMonth).unwrap();
        let selection = Selection::all(City::Chicago)
            .with_month(Month::March)
            .with_day(Weekday::Monday);
        let filtered = apply_selection(table, &selection);
        assert_eq!(filtered.len(), 1);
        assert_eq!(
            filtered.rows[0].start_time,
            parse_timestamp("2017-03-02 08:00:00")
        );
    }

    #[test]
    fn test_day_filter_weekday_mode() {
        let table = read(CHICAGO, DayFilterMode::Weekday).unwrap();
        let selection = Selection::all(City::Chicago).with_day(Weekday::Monday);
        let filtered = apply_selection(table, &selection);
        assert_eq!(filtered.len(), 1);
        assert_eq!(
            filtered.rows[0].start_time,
            parse_timestamp("2017-03-06 09:30:00")
        );
    }

    #[test]
    fn test_load_trips_from_data_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("chicago.csv"), CHICAGO).unwrap();
        let cities = CityTable::new().data_dir(dir.path());

        let table = load_trips(
            &cities,
            &Selection::all(City::Chicago).with_month(Month::April),
            DayFilterMode::DayOfMonth,
        )
        .unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0].position, 2);
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let cities = CityTable::new().data_dir(dir.path());
        let err = load_trips(
            &cities,
            &Selection::all(City::Washington),
            DayFilterMode::DayOfMonth,
        )
        .unwrap_err();
        assert!(matches!(err, BikeshareError::FileRead { .. }));
        assert!(err.to_string().contains("washington.csv"));
    }
}
