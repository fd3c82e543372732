//! Line codec shared by the persisted entities
//!
//! Every entity is stored as one comma-separated line. Field order and
//! count are fixed per entity; a line that does not fit is rejected with
//! a [`ParseError`] and the store decides what to do with it.

use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use thiserror::Error;

/// Timestamp layout written to disk
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Minute-precision layout found in older files
const LEGACY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Why a stored line could not be turned back into an entity
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}

impl ParseError {
    pub(crate) fn invalid(field: &'static str, value: &str) -> Self {
        Self::InvalidField {
            field,
            value: value.to_string(),
        }
    }
}

/// An entity with a fixed line layout in its own file
pub trait Record: Sized {
    /// File name inside the data directory
    const FILE_NAME: &'static str;

    /// Serialize to a single line (no trailing newline)
    fn to_line(&self) -> String;

    /// Parse a line produced by [`Record::to_line`]
    fn from_line(line: &str) -> Result<Self, ParseError>;
}

/// Split on every comma and require exactly `expected` fields.
pub(crate) fn split_exact(line: &str, expected: usize) -> Result<Vec<&str>, ParseError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != expected {
        return Err(ParseError::FieldCount {
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

/// Split into at most `expected` fields; the last field keeps any commas.
pub(crate) fn split_leading(line: &str, expected: usize) -> Result<Vec<&str>, ParseError> {
    let fields: Vec<&str> = line.splitn(expected, ',').collect();
    if fields.len() != expected {
        return Err(ParseError::FieldCount {
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

pub(crate) fn parse_bool(field: &'static str, value: &str) -> Result<bool, ParseError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ParseError::invalid(field, value))
    }
}

pub(crate) fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal, ParseError> {
    Decimal::from_str(value.trim()).map_err(|_| ParseError::invalid(field, value))
}

pub(crate) fn parse_timestamp(field: &'static str, value: &str) -> Result<NaiveDateTime, ParseError> {
    let value = value.trim();
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, LEGACY_TIMESTAMP_FORMAT))
        .map_err(|_| ParseError::invalid(field, value))
}

pub(crate) fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
