use std::sync::Arc;

use crate::column::bitmask::BitMask;
use crate::error::{Error, Result};

/// 64-bit integer column.
#[derive(Debug, Clone)]
pub struct IntColumn {
    pub(crate) data: Arc<[i64]>,
    pub(crate) nulls: Option<BitMask>,
    pub(crate) name: String,
}

impl IntColumn {
    /// Create a column with no nulls.
    pub fn new(name: impl Into<String>, data: Vec<i64>) -> Self {
        Self {
            data: data.into(),
            nulls: None,
            name: name.into(),
        }
    }

    /// Create a column with an explicit per-position null flag.
    pub fn with_nulls(name: impl Into<String>, data: Vec<i64>, nulls: Vec<bool>) -> Result<Self> {
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

    /// Create a column from optional values; `None` becomes null.
    pub fn from_options(name: impl Into<String>, values: Vec<Option<i64>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(|v| v.is_none()).collect();
        let data: Vec<i64> = values.into_iter().map(|v| v.unwrap_or_default()).collect();
        // length check cannot fail here
        Self::with_nulls(name, data, nulls).unwrap()
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

    /// Whether the given position is null.
    pub fn is_null(&self, pos: usize) -> bool {
        self.nulls.as_ref().is_some_and(|m| m.is_null(pos))
    }

    /// Value at the given position, `None` when null.
    pub fn get(&self, pos: usize) -> Result<Option<i64>> {
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

    /// Raw values. Positions flagged null hold an unspecified filler.
    pub fn values(&self) -> &[i64] {
        &self.data
    }

    pub fn null_count(&self) -> usize {
        self.nulls.as_ref().map_or(0, |m| m.null_count())
    }

    /// Gather the given positions into a new column.
    pub(crate) fn take(&self, positions: &[usize]) -> Self {
        let data: Vec<i64> = positions.iter().map(|&p| self.data[p]).collect();
        Self {
            data: data.into(),
            nulls: self.nulls.as_ref().map(|m| m.take(positions)).filter(|m| m.any()),
            name: self.name.clone(),
        }
    }

    /// Sum of non-null values, saturating at the i64 bounds.
    pub fn sum(&self) -> i64 {
        match &self.nulls {
            None => self
                .data
                .iter()
                .fold(0i64, |acc, v| acc.saturating_add(*v)),
            Some(mask) => self
                .data
                .iter()
                .enumerate()
                .filter(|(i, _)| !mask.is_null(*i))
                .fold(0i64, |acc, (_, v)| acc.saturating_add(*v)),
        }
    }

    /// Minimum of non-null values.
    pub fn min(&self) -> Option<i64> {
        self.non_null_iter().min()
    }

    /// Maximum of non-null values.
    pub fn max(&self) -> Option<i64> {
        self.non_null_iter().max()
    }

    /// Mean of non-null values, `None` when all values are null.
    pub fn mean(&self) -> Option<f64> {
        let count = self.len() - self.null_count();
        if count == 0 {
            return None;
        }
        Some(self.sum() as f64 / count as f64)
    }

    fn non_null_iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.is_null(*i))
            .map(|(_, &v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_saturates_instead_of_overflowing() {
        let col = IntColumn::new("big", vec![i64::MAX, 1]);
        assert_eq!(col.sum(), i64::MAX);

        let col = IntColumn::new("small", vec![i64::MIN, -1]);
        assert_eq!(col.sum(), i64::MIN);
    }

    #[test]
    fn sum_skips_nulls() {
        let col = IntColumn::from_options("likes", vec![Some(10), None, Some(7)]);
        assert_eq!(col.sum(), 17);
    }
}
