use std::sync::Arc;

use crate::column::bitmask::BitMask;
use crate::error::{Error, Result};

/// 64-bit floating point column.
///
/// NaN is a value, not a null; only positions flagged in the bitmap are
/// treated as missing.
#[derive(Debug, Clone)]
pub struct FloatColumn {
    pub(crate) data: Arc<[f64]>,
    pub(crate) nulls: Option<BitMask>,
    pub(crate) name: String,
}

impl FloatColumn {
    pub fn new(name: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            data: data.into(),
            nulls: None,
            name: name.into(),
        }
    }

    pub fn with_nulls(name: impl Into<String>, data: Vec<f64>, nulls: Vec<bool>) -> Result<Self> {
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

    pub fn from_options(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(|v| v.is_none()).collect();
        let data: Vec<f64> = values.into_iter().map(|v| v.unwrap_or_default()).collect();
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

    pub fn is_null(&self, pos: usize) -> bool {
        self.nulls.as_ref().is_some_and(|m| m.is_null(pos))
    }

    pub fn get(&self, pos: usize) -> Result<Option<f64>> {
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

    pub fn values(&self) -> &[f64] {
        &self.data
    }

    pub fn null_count(&self) -> usize {
        self.nulls.as_ref().map_or(0, |m| m.null_count())
    }

    pub(crate) fn take(&self, positions: &[usize]) -> Self {
        let data: Vec<f64> = positions.iter().map(|&p| self.data[p]).collect();
        Self {
            data: data.into(),
            nulls: self.nulls.as_ref().map(|m| m.take(positions)).filter(|m| m.any()),
            name: self.name.clone(),
        }
    }

    /// Sum of non-null values.
    pub fn sum(&self) -> f64 {
        self.non_null_iter().sum()
    }

    /// Minimum of non-null values under total ordering.
    pub fn min(&self) -> Option<f64> {
        self.non_null_iter().min_by(|a, b| a.total_cmp(b))
    }

    /// Maximum of non-null values under total ordering.
    pub fn max(&self) -> Option<f64> {
        self.non_null_iter().max_by(|a, b| a.total_cmp(b))
    }

    /// Mean of non-null values, `None` when all values are null.
    pub fn mean(&self) -> Option<f64> {
        let count = self.len() - self.null_count();
        if count == 0 {
            return None;
        }
        Some(self.sum() / count as f64)
    }

    fn non_null_iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.is_null(*i))
            .map(|(_, &v)| v)
    }
}
