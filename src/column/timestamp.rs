use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::column::bitmask::BitMask;
use crate::error::{Error, Result};

/// Datetime formats tried in order when parsing date-like input.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

/// Date-only formats, promoted to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y"];

/// Parse a raw string into a naive timestamp, trying the supported
/// formats in order. Returns `None` when no format matches.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ts);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date.and_hms_opt(0, 0, 0)?);
        }
    }
    None
}

/// Naive timestamp column (no timezone).
#[derive(Debug, Clone)]
pub struct TimestampColumn {
    pub(crate) data: Arc<[NaiveDateTime]>,
    pub(crate) nulls: Option<BitMask>,
    pub(crate) name: String,
}

impl TimestampColumn {
    pub fn new(name: impl Into<String>, data: Vec<NaiveDateTime>) -> Self {
        Self {
            data: data.into(),
            nulls: None,
            name: name.into(),
        }
    }

    pub fn with_nulls(
        name: impl Into<String>,
        data: Vec<NaiveDateTime>,
        nulls: Vec<bool>,
    ) -> Result<Self> {
        if nulls.len() != data.len() {
            return Err(Error::LengthMismatch {
                expected: data.len(),
                found: nulls.len(),
            });
        }
        let mask = BitMask::from_flags(&nulls);
        Ok(Self {
            data: data.into(),
            nulls: if mask.any() { Some(mask) } else { None },
            name: name.into(),
        })
    }

    pub fn from_options(name: impl Into<String>, values: Vec<Option<NaiveDateTime>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(|v| v.is_none()).collect();
        let data: Vec<NaiveDateTime> =
            values.into_iter().map(|v| v.unwrap_or_default()).collect();
        Self::with_nulls(name, data, nulls).unwrap()
    }

    /// Parse raw strings into timestamps; values no format accepts
    /// become null.
    pub fn parse(name: impl Into<String>, raw: &[&str]) -> Self {
        Self::from_options(name, raw.iter().map(|s| parse_timestamp(s)).collect())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_null(&self, pos: usize) -> bool {
        self.nulls.as_ref().is_some_and(|m| m.is_null(pos))
    }

    pub fn get(&self, pos: usize) -> Result<Option<NaiveDateTime>> {
        if pos >= self.data.len() {
            return Err(Error::IndexOutOfBounds {
                index: pos,
                size: self.data.len(),
            });
        }
        if self.is_null(pos) {
            return Ok(None);
        }
        Ok(Some(self.data[pos]))
    }

    pub fn values(&self) -> &[NaiveDateTime] {
        &self.data
    }

    pub fn null_count(&self) -> usize {
        self.nulls.as_ref().map_or(0, |m| m.null_count())
    }

    pub(crate) fn take(&self, positions: &[usize]) -> Self {
        let data: Vec<NaiveDateTime> = positions.iter().map(|&p| self.data[p]).collect();
        Self {
            data: data.into(),
            nulls: self.nulls.as_ref().map(|m| m.take(positions)).filter(|m| m.any()),
            name: self.name.clone(),
        }
    }

    /// Earliest non-null timestamp.
    pub fn min(&self) -> Option<NaiveDateTime> {
        self.non_null_iter().min()
    }

    /// Latest non-null timestamp.
    pub fn max(&self) -> Option<NaiveDateTime> {
        self.non_null_iter().max()
    }

    fn non_null_iter(&self) -> impl Iterator<Item = NaiveDateTime> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.is_null(*i))
            .map(|(_, &v)| v)
    }
}
