//! Core data structures for loaded trips

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;

use crate::options::DayFilterMode;

/// Separator placed between the two station names of a trip combination.
pub const COMBINATION_SEPARATOR: &str = "\nEnd:";

/// Calendar month of a start time (1..=12)
pub fn derive_month(ts: &NaiveDateTime) -> u32 {
    ts.month()
}

/// The `day` value of a start time under the given mode.
pub fn derive_day(ts: &NaiveDateTime, mode: DayFilterMode) -> u32 {
    match mode {
        DayFilterMode::DayOfMonth => ts.day(),
        DayFilterMode::Weekday => ts.weekday().number_from_sunday(),
    }
}

/// Hour of day of a start time (0..=23)
pub fn derive_hour(ts: &NaiveDateTime) -> u32 {
    ts.hour()
}

/// A single trip, with its derived columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    /// 0-based row index in the source file
    pub position: usize,
    /// `None` when the source field is empty or the row is cut short; the
    /// derived columns are then `None` too
    pub start_time: Option<NaiveDateTime>,
    /// Empty when the source field is empty
    pub start_station: String,
    pub end_station: String,
    /// Trip duration in seconds
    pub duration: Option<f64>,
    /// `None` when the source field is empty
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<f64>,
    /// Derived month number
    pub month: Option<u32>,
    /// Derived day number (see [`DayFilterMode`])
    pub day: Option<u32>,
    /// Derived start hour
    pub hour: Option<u32>,
    /// Raw source fields, in column order
    pub fields: Vec<String>,
}

impl TripRecord {
    /// Start and end station joined into one trip label, or `None` when
    /// either station is missing.
    pub fn combination(&self) -> Option<String> {
        if self.start_station.is_empty() || self.end_station.is_empty() {
            return None;
        }
        Some(format!(
            "Start:{}{}{}",
            self.start_station, COMBINATION_SEPARATOR, self.end_station
        ))
    }
}

/// An in-memory trip table in source file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripTable {
    /// Source header row
    pub columns: Vec<String>,
    pub rows: Vec<TripRecord>,
    /// Whether the source has a `Gender` column
    pub has_gender: bool,
    /// Whether the source has a `Birth Year` column
    pub has_birth_year: bool,
}

impl TripTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows `[offset, offset + size)`, clamped to the table. Past the end
    /// this is an empty slice.
    pub fn page(&self, offset: usize, size: usize) -> &[TripRecord] {
        let start = offset.min(self.rows.len());
        let end = offset.saturating_add(size).min(self.rows.len());
        &self.rows[start..end]
    }
}
