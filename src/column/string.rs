use std::sync::Arc;

use crate::column::bitmask::BitMask;
use crate::error::{Error, Result};

/// UTF-8 string column.
#[derive(Debug, Clone)]
pub struct StrColumn {
    pub(crate) data: Arc<[String]>,
    pub(crate) nulls: Option<BitMask>,
    pub(crate) name: String,
}

impl StrColumn {
    pub fn new(name: impl Into<String>, data: Vec<String>) -> Self {
        Self {
            data: data.into(),
            nulls: None,
            name: name.into(),
        }
    }

    /// Create a column from string slices with no nulls.
    pub fn from_strs(name: impl Into<String>, data: &[&str]) -> Self {
        Self::new(name, data.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_nulls(
        name: impl Into<String>,
        data: Vec<String>,
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

    pub fn from_options(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(|v| v.is_none()).collect();
        let data: Vec<String> = values.into_iter().map(|v| v.unwrap_or_default()).collect();
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

    pub fn get(&self, pos: usize) -> Result<Option<&str>> {
        if pos >= self.data.len() {
            return Err(Error::IndexOutOfBounds {
                index: pos,
                size: self.data.len(),
            });
        }
        if self.is_null(pos) {
            return Ok(None);
        }
        Ok(Some(&self.data[pos]))
    }

    pub fn values(&self) -> &[String] {
        &self.data
    }

    pub fn null_count(&self) -> usize {
        self.nulls.as_ref().map_or(0, |m| m.null_count())
    }

    pub(crate) fn take(&self, positions: &[usize]) -> Self {
        let data: Vec<String> = positions.iter().map(|&p| self.data[p].clone()).collect();
        Self {
            data: data.into(),
            nulls: self.nulls.as_ref().map(|m| m.take(positions)).filter(|m| m.any()),
            name: self.name.clone(),
        }
    }
}
