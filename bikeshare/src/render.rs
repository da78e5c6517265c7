//! Report rendering for the four statistics sections

use std::fmt::Display;
use std::io::{self, Write};
use std::time::Instant;

use bikesharelib::{
    duration_stats, station_stats, time_stats, user_stats, BirthYearStats, TripTable,
};
use console::style;

use crate::prompt::rule;

/// Placeholder for a statistic that has no value (empty table)
const NOT_AVAILABLE: &str = "n/a";

fn show<T: Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Print a section heading.
fn heading<W: Write>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}\n", style(title).bold())
}

/// Print the elapsed time and the closing rule of a section.
fn finish<W: Write>(out: &mut W, started: Instant) -> io::Result<()> {
    writeln!(
        out,
        "\nThis took {} seconds.",
        started.elapsed().as_secs_f64()
    )?;
    writeln!(out, "{}", rule())
}

/// Format category counts as two aligned columns, labels left, counts right.
pub fn format_counts(counts: &[(String, usize)]) -> String {
    let label_width = counts.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let count_width = counts
        .iter()
        .map(|(_, n)| n.to_string().len())
        .max()
        .unwrap_or(0);
    counts
        .iter()
        .map(|(label, n)| {
            format!(
                "{:<lw$}    {:>cw$}",
                label,
                n,
                lw = label_width,
                cw = count_width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Most frequent times of travel
pub fn print_time_stats<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    heading(out, "Calculating The Most Frequent Times of Travel...")?;
    let started = Instant::now();

    let stats = time_stats(table);
    writeln!(out, "The most common month is: {}", show(stats.month))?;
    writeln!(out, "The most common day is: {}", show(stats.day))?;
    writeln!(out, "The most common start hour is: {}", show(stats.hour))?;

    finish(out, started)
}

/// Most popular stations and trip
pub fn print_station_stats<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    heading(out, "Calculating The Most Popular Stations and Trip...")?;
    let started = Instant::now();

    let stats = station_stats(table);
    writeln!(
        out,
        "The most commonly used start station is:\n{}",
        show(stats.start_station)
    )?;
    writeln!(
        out,
        "\nThe most commonly used end station is:\n{}",
        show(stats.end_station)
    )?;
    writeln!(
        out,
        "\nThe most frequent combination of start station and end station is:\n{}",
        show(stats.trip)
    )?;

    finish(out, started)
}

/// Total and mean trip duration
pub fn print_duration_stats<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    heading(out, "Calculating Trip Duration...")?;
    let started = Instant::now();

    let stats = duration_stats(table);
    writeln!(
        out,
        "The sum of the trip durations is: {} seconds",
        stats.total
    )?;
    writeln!(
        out,
        "The mean travel time is: {} seconds",
        show(stats.mean)
    )?;

    finish(out, started)
}

fn print_birth_years<W: Write>(out: &mut W, years: &BirthYearStats) -> io::Result<()> {
    writeln!(out, "The earliest year of birth is: {}", years.earliest)?;
    writeln!(out, "The most recent year of birth is: {}", years.latest)?;
    writeln!(out, "The most common year of birth is: {}", years.most_common)
}

/// User type, gender and birth year breakdown.
///
/// The gender and birth year parts only appear when the city's file has
/// those columns.
pub fn print_user_stats<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    heading(out, "Calculating User Stats...")?;
    let started = Instant::now();

    let stats = user_stats(table);
    writeln!(
        out,
        "The count of users by type is:\n{}\n",
        format_counts(&stats.user_types)
    )?;

    if let Some(genders) = &stats.genders {
        writeln!(
            out,
            "The count of users by gender is:\n{}\n",
            format_counts(genders)
        )?;
    }

    if let Some(years) = &stats.birth_years {
        print_birth_years(out, years)?;
    }

    finish(out, started)
}

/// All four sections, in report order.
pub fn print_report<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    print_time_stats(out, table)?;
    print_station_stats(out, table)?;
    print_duration_stats(out, table)?;
    print_user_stats(out, table)
}
