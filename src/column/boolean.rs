use std::sync::Arc;

use crate::column::bitmask::BitMask;
use crate::error::{Error, Result};

/// Boolean column. Doubles as a row mask, with nulls following
/// three-valued logic under `and`/`or`/`not`.
#[derive(Debug, Clone)]
pub struct BoolColumn {
    pub(crate) data: Arc<[bool]>,
    pub(crate) nulls: Option<BitMask>,
    pub(crate) name: String,
}

impl BoolColumn {
    pub fn new(name: impl Into<String>, data: Vec<bool>) -> Self {
        Self {
            data: data.into(),
            nulls: None,
            name: name.into(),
        }
    }

    pub fn with_nulls(name: impl Into<String>, data: Vec<bool>, nulls: Vec<bool>) -> Result<Self> {
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

    pub fn from_options(name: impl Into<String>, values: Vec<Option<bool>>) -> Self {
        let nulls: Vec<bool> = values.iter().map(|v| v.is_none()).collect();
        let data: Vec<bool> = values.into_iter().map(|v| v.unwrap_or_default()).collect();
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

    pub fn get(&self, pos: usize) -> Result<Option<bool>> {
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

    pub fn values(&self) -> &[bool] {
        &self.data
    }

    pub fn null_count(&self) -> usize {
        self.nulls.as_ref().map_or(0, |m| m.null_count())
    }

    pub(crate) fn take(&self, positions: &[usize]) -> Self {
        let data: Vec<bool> = positions.iter().map(|&p| self.data[p]).collect();
        Self {
            data: data.into(),
            nulls: self.nulls.as_ref().map(|m| m.take(positions)).filter(|m| m.any()),
            name: self.name.clone(),
        }
    }

    /// Positions holding a non-null `true`.
    pub fn true_positions(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&i| !self.is_null(i) && self.data[i])
            .collect()
    }

    /// Pointwise three-valued AND.
    ///
    /// null AND false = false, null AND true = null.
    pub fn and(&self, other: &BoolColumn) -> Result<BoolColumn> {
        self.check_len(other)?;
        let mut data = Vec::with_capacity(self.len());
        let mut nulls = Vec::with_capacity(self.len());
        for i in 0..self.len() {
            let a = if self.is_null(i) { None } else { Some(self.data[i]) };
            let b = if other.is_null(i) { None } else { Some(other.data[i]) };
            let out = match (a, b) {
                (Some(false), _) | (_, Some(false)) => Some(false),
                (Some(true), Some(true)) => Some(true),
                _ => None,
            };
            nulls.push(out.is_none());
            data.push(out.unwrap_or_default());
        }
        BoolColumn::with_nulls(self.name.clone(), data, nulls)
    }

    /// Pointwise three-valued OR.
    ///
    /// null OR true = true, null OR false = null.
    pub fn or(&self, other: &BoolColumn) -> Result<BoolColumn> {
        self.check_len(other)?;
        let mut data = Vec::with_capacity(self.len());
        let mut nulls = Vec::with_capacity(self.len());
        for i in 0..self.len() {
            let a = if self.is_null(i) { None } else { Some(self.data[i]) };
            let b = if other.is_null(i) { None } else { Some(other.data[i]) };
            let out = match (a, b) {
                (Some(true), _) | (_, Some(true)) => Some(true),
                (Some(false), Some(false)) => Some(false),
                _ => None,
            };
            nulls.push(out.is_none());
            data.push(out.unwrap_or_default());
        }
        BoolColumn::with_nulls(self.name.clone(), data, nulls)
    }

    /// Pointwise three-valued NOT. NOT null = null.
    pub fn not(&self) -> BoolColumn {
        let data: Vec<bool> = self.data.iter().map(|v| !v).collect();
        let nulls: Vec<bool> = (0..self.len()).map(|i| self.is_null(i)).collect();
        // lengths match by construction
        BoolColumn::with_nulls(self.name.clone(), data, nulls).unwrap()
    }

    fn check_len(&self, other: &BoolColumn) -> Result<()> {
        if self.len() != other.len() {
            return Err(Error::LengthMismatch {
                expected: self.len(),
                found: other.len(),
            });
        }
        Ok(())
    }
}
