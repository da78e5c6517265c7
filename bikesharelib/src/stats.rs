//! Descriptive statistics over a trip table.
//!
//! Every function here is a pure reduction over a [`TripTable`]; rendering
//! and timing are left to callers.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use crate::trip::{TripRecord, TripTable};

/// Label used for rows whose user type is empty.
pub const UNKNOWN_USER_TYPE: &str = "Unknown";

/// Count occurrences of each value.
///
/// Ordered by descending count; values with equal counts keep the order in
/// which they first appeared.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut index: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<(T, usize)> = Vec::new();
    for value in values {
        match index.get(&value) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value.clone(), counts.len());
                counts.push((value, 1));
            }
        }
    }
    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Most frequent value, ties broken by first appearance. `None` when empty.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    value_counts(values).into_iter().next().map(|(v, _)| v)
}

/// Most common times of travel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimeStats {
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: Option<u32>,
}

/// Most popular stations and trip
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StationStats {
    pub start_station: Option<String>,
    pub end_station: Option<String>,
    /// Most frequent start/end combination
    pub trip: Option<String>,
}

/// Total and average trip duration, in seconds
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DurationStats {
    /// Trips with a duration; rows missing one are skipped
    pub count: usize,
    pub total: f64,
    /// `None` when no trip has a duration
    pub mean: Option<f64>,
}

/// Earliest, latest and most common birth year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i64,
    pub latest: i64,
    pub most_common: i64,
}

/// User demographics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<(String, usize)>,
    /// `None` when the table has no gender column
    pub genders: Option<Vec<(String, usize)>>,
    /// `None` when the table has no birth year column or no year is filled in
    pub birth_years: Option<BirthYearStats>,
}

pub fn time_stats(table: &TripTable) -> TimeStats {
    TimeStats {
        month: mode(table.rows.iter().filter_map(|r| r.month)),
        day: mode(table.rows.iter().filter_map(|r| r.day)),
        hour: mode(table.rows.iter().filter_map(|r| r.hour)),
    }
}

/// Empty station names are left out, as is any trip missing either end.
pub fn station_stats(table: &TripTable) -> StationStats {
    let names = |station: fn(&TripRecord) -> &str| {
        mode(table.rows.iter().map(station).filter(|s| !s.is_empty())).map(String::from)
    };
    StationStats {
        start_station: names(|r| r.start_station.as_str()),
        end_station: names(|r| r.end_station.as_str()),
        trip: mode(table.rows.iter().filter_map(|r| r.combination())),
    }
}

pub fn duration_stats(table: &TripTable) -> DurationStats {
    let durations: Vec<f64> = table.rows.iter().filter_map(|r| r.duration).collect();
    let count = durations.len();
    let total = durations.iter().fold(0.0, |acc, d| acc + d);
    let mean = if count == 0 {
        None
    } else {
        Some(total / count as f64)
    };
    DurationStats { count, total, mean }
}

pub fn user_stats(table: &TripTable) -> UserStats {
    let user_types = value_counts(
        table
            .rows
            .iter()
            .map(|r| r.user_type.as_deref().unwrap_or(UNKNOWN_USER_TYPE)),
    )
    .into_iter()
    .map(|(t, n)| (t.to_string(), n))
    .collect();

    let genders = table.has_gender.then(|| {
        value_counts(table.rows.iter().filter_map(|r| r.gender.as_deref()))
            .into_iter()
            .map(|(g, n)| (g.to_string(), n))
            .collect()
    });

    let birth_years = if table.has_birth_year {
        birth_year_stats(table.rows.iter().filter_map(|r| r.birth_year))
    } else {
        None
    };

    UserStats {
        user_types,
        genders,
        birth_years,
    }
}

/// Min, max and mode of birth years, truncated to whole years.
pub fn birth_year_stats<I>(years: I) -> Option<BirthYearStats>
where
    I: IntoIterator<Item = f64>,
{
    let years: Vec<i64> = years
        .into_iter()
        .filter(|y| y.is_finite())
        .map(|y| y as i64)
        .collect();
    Some(BirthYearStats {
        earliest: *years.iter().min()?,
        latest: *years.iter().max()?,
        most_common: mode(years.iter().copied())?,
    })
}
