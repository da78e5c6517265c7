//! Filter selection types for trip loading.
//!
//! This module contains the closed sets a user chooses from (city, month,
//! day of week) plus the options that control how rows are matched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Title-case a string the way the prompts display selections.
///
/// Every alphabetic character that follows a non-alphabetic one (or starts
/// the string) is upper-cased; all other alphabetic characters are
/// lower-cased.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

/// One of the three cities with published trip data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    /// All cities in prompt order
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case name, as typed by users
    pub fn name(&self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Display name
    pub fn title(&self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// Normalize raw user input into the text that is echoed back and matched.
    ///
    /// Input is lower-cased, and anything mentioning "new york" is widened
    /// to "new york city".
    pub fn normalize(input: &str) -> String {
        let lowered = input.to_lowercase();
        if lowered.contains("new york") {
            City::NewYorkCity.name().to_string()
        } else {
            lowered
        }
    }

    /// Resolve raw user input to a city, if it names one.
    pub fn resolve(input: &str) -> Option<City> {
        let normalized = City::normalize(input);
        City::ALL.into_iter().find(|c| c.name() == normalized)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Months covered by the data set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
        }
    }

    /// 1-based position in the month list
    pub fn number(&self) -> u32 {
        Month::ALL.iter().position(|m| m == self).unwrap_or(0) as u32 + 1
    }
}

/// Days of the week, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// 1-based position in the week, Sunday = 1
    pub fn number(&self) -> u32 {
        Weekday::ALL.iter().position(|d| d == self).unwrap_or(0) as u32 + 1
    }
}

/// Something with a fixed, named set of values that can be picked from a prompt.
pub trait Named: Copy + Sized + 'static {
    /// Every value, in prompt order
    fn values() -> &'static [Self];
    /// Display name
    fn label(&self) -> &'static str;
    /// 1-based index used when filtering rows
    fn index(&self) -> u32;
}

impl Named for Month {
    fn values() -> &'static [Self] {
        &Month::ALL
    }
    fn label(&self) -> &'static str {
        self.name()
    }
    fn index(&self) -> u32 {
        self.number()
    }
}

impl Named for Weekday {
    fn values() -> &'static [Self] {
        &Weekday::ALL
    }
    fn label(&self) -> &'static str {
        self.name()
    }
    fn index(&self) -> u32 {
        self.number()
    }
}

/// A month or day selection, where `All` disables the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodFilter<T> {
    All,
    Only(T),
}

impl<T: Named> PeriodFilter<T> {
    /// Resolve raw user input.
    ///
    /// The input is title-cased first. An exact name wins; otherwise any
    /// input containing "All" (so "all", "ALL" or "show all") is the wildcard.
    pub fn resolve(input: &str) -> Option<Self> {
        let titled = title_case(input);
        if let Some(value) = T::values().iter().find(|v| v.label() == titled) {
            return Some(PeriodFilter::Only(*value));
        }
        if titled.contains("All") {
            return Some(PeriodFilter::All);
        }
        None
    }

    /// Whether a derived 1-based value passes this filter
    pub fn matches(&self, derived: u32) -> bool {
        match self {
            PeriodFilter::All => true,
            PeriodFilter::Only(v) => v.index() == derived,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, PeriodFilter::All)
    }
}

impl<T: Named> fmt::Display for PeriodFilter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodFilter::All => f.write_str("All"),
            PeriodFilter::Only(v) => f.write_str(v.label()),
        }
    }
}

/// How the `day` column is derived from a trip's start time.
///
/// The historical report compares the requested weekday's index against
/// the day of the month. That comparison is kept as the default so the
/// numbers match previously published reports; `Weekday` filters on the
/// actual day of the week instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DayFilterMode {
    /// `day` is the day of the month (1..=31)
    #[default]
    DayOfMonth,
    /// `day` is the day of the week, Sunday = 1
    Weekday,
}

impl FromStr for DayFilterMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day-of-month" | "dom" | "month-day" => Ok(DayFilterMode::DayOfMonth),
            "weekday" | "day-of-week" | "dow" => Ok(DayFilterMode::Weekday),
            _ => Err(format!("Unknown day filter mode: {}", s)),
        }
    }
}

/// A complete, validated filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub city: City,
    pub month: PeriodFilter<Month>,
    pub day: PeriodFilter<Weekday>,
}

impl Selection {
    /// Select every row of a city
    pub fn all(city: City) -> Self {
        Self {
            city,
            month: PeriodFilter::All,
            day: PeriodFilter::All,
        }
    }

    /// Builder: restrict to a month
    pub fn with_month(mut self, month: Month) -> Self {
        self.month = PeriodFilter::Only(month);
        self
    }

    /// Builder: restrict to a day
    pub fn with_day(mut self, day: Weekday) -> Self {
        self.day = PeriodFilter::Only(day);
        self
    }
}
