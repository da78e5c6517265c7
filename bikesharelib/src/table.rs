//! Table-ready page of raw trip rows.
//!
//! This module provides `PageTable`, a presentation-ready slice of a
//! [`TripTable`] that can be printed as padded text or serialized.
//!
//! The data flow is:
//! 1. Raw rows (source fields per trip)
//! 2. Page (offset/size window over the filtered table)
//! 3. PageTable (headers, rows with labels, derived columns appended)

use serde::{Deserialize, Serialize};

use crate::trip::{TripRecord, TripTable};

/// Rows shown per page.
pub const PAGE_SIZE: usize = 5;

/// Names of the derived columns appended after the source columns.
pub const DERIVED_COLUMNS: [&str; 3] = ["month", "day", "hour"];

/// Widest a single cell may be before it is shortened.
const MAX_CELL_WIDTH: usize = 40;

/// A single row in the table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRow {
    /// Row label (position of the trip in its source file)
    pub label: String,
    /// Values for each column (as strings, ready for display)
    pub values: Vec<String>,
}

/// One page of trips, ready to print.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageTable {
    /// e.g. "Rows 5..10 of 12"
    pub title: String,
    /// Column headers: [label_header, column1, column2, ...]
    pub headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl PageTable {
    /// Build the page `[offset, offset + size)` of a trip table.
    pub fn from_page(table: &TripTable, offset: usize, size: usize) -> Self {
        let mut headers = vec![String::new()];
        headers.extend(table.columns.iter().map(|c| display_header(c)));
        headers.extend(DERIVED_COLUMNS.iter().map(|c| c.to_string()));

        let rows: Vec<TableRow> = table
            .page(offset, size)
            .iter()
            .map(|r| to_table_row(r, table.columns.len()))
            .collect();

        let end = offset.saturating_add(size);
        let title = if rows.is_empty() {
            format!("Empty page (rows {}..{} of {})", offset, end, table.len())
        } else {
            format!(
                "Rows {}..{} of {}",
                offset,
                end.min(table.len()),
                table.len()
            )
        };

        PageTable {
            title,
            headers,
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column widths, counting the header and every row.
    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| cell_width(h)).collect();
        for row in &self.rows {
            let cells = std::iter::once(&row.label).chain(row.values.iter());
            for (i, cell) in cells.enumerate() {
                if i < widths.len() {
                    widths[i] = widths[i].max(cell_width(cell));
                }
            }
        }
        widths
    }

    /// Render as left-aligned text columns. An empty page renders as its
    /// title only.
    pub fn render(&self) -> String {
        if self.rows.is_empty() {
            return format!("{}\n", self.title);
        }

        let widths = self.widths();
        let mut out = String::new();
        push_line(&mut out, self.headers.iter(), &widths);
        for row in &self.rows {
            push_line(
                &mut out,
                std::iter::once(&row.label).chain(row.values.iter()),
                &widths,
            );
        }
        out
    }
}

/// The unnamed index column some exports carry shows up as an empty header.
fn display_header(name: &str) -> String {
    if name.trim().is_empty() {
        "#".to_string()
    } else {
        name.to_string()
    }
}

/// Convert a TripRecord to a TableRow, padding short records. Missing
/// derived values show as empty cells.
fn to_table_row(record: &TripRecord, column_count: usize) -> TableRow {
    let mut values: Vec<String> = record.fields.clone();
    values.resize(column_count, String::new());
    for derived in [record.month, record.day, record.hour] {
        values.push(derived.map(|v| v.to_string()).unwrap_or_default());
    }
    TableRow {
        label: record.position.to_string(),
        values,
    }
}

fn cell_width(s: &str) -> usize {
    s.chars().count().min(MAX_CELL_WIDTH)
}

/// Truncate a value to fit within max_len, adding ".." suffix if needed
fn truncate_cell(value: &str, max_len: usize) -> String {
    if value.chars().count() > max_len {
        let kept: String = value.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", kept)
    } else {
        value.to_string()
    }
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a String>, widths: &[usize]) {
    let line: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| {
            format!(
                "{:<width$}",
                truncate_cell(cell, MAX_CELL_WIDTH),
                width = width
            )
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}
