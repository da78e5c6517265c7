//! Error types for bikesharelib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or exploring trip data
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// Failed to open a city data file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Malformed CSV content
    #[error("failed to parse CSV '{path}': {source}")]
    Csv { path: PathBuf, source: csv::Error },

    /// A required column is absent from the header row
    #[error("missing required column '{column}' in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    /// A field could not be converted to its expected type
    #[error("invalid {field} '{value}' in '{path}' at line {line}")]
    Parse {
        path: PathBuf,
        line: u64,
        field: String,
        value: String,
    },

    /// Standard input was closed while waiting for an answer
    #[error("input closed while waiting for an answer")]
    InputClosed,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
