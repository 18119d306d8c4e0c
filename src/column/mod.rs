//! Typed column storage.
//!
//! One struct per element type, each holding `Arc<[T]>` data and an
//! optional packed null bitmap, wrapped by the [`Column`] enum for
//! uniform access from [`crate::table::Table`].

mod bitmask;
mod boolean;
mod float;
mod int;
mod string;
mod timestamp;

pub use bitmask::BitMask;
pub use boolean::BoolColumn;
pub use float::FloatColumn;
pub use int::IntColumn;
pub use string::StrColumn;
pub use timestamp::{parse_timestamp, TimestampColumn};

use chrono::NaiveDateTime;

use crate::cell::{Cell, ColumnType};
use crate::error::{Error, Result};

/// A named, typed, fixed-length sequence of values with an explicit
/// null bitmap.
#[derive(Debug, Clone)]
pub enum Column {
    Int(IntColumn),
    Float(FloatColumn),
    Bool(BoolColumn),
    Str(StrColumn),
    Timestamp(TimestampColumn),
}

macro_rules! dispatch {
    ($self:expr, $col:ident => $body:expr) => {
        match $self {
            Column::Int($col) => $body,
            Column::Float($col) => $body,
            Column::Bool($col) => $body,
            Column::Str($col) => $body,
            Column::Timestamp($col) => $body,
        }
    };
}

impl Column {
    pub fn name(&self) -> &str {
        dispatch!(self, c => c.name())
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        dispatch!(self, c => c.set_name(name))
    }

    /// Return the same column under a new name.
    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.set_name(name);
        self
    }

    pub fn len(&self) -> usize {
        dispatch!(self, c => c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Int(_) => ColumnType::Int,
            Column::Float(_) => ColumnType::Float,
            Column::Bool(_) => ColumnType::Bool,
            Column::Str(_) => ColumnType::Str,
            Column::Timestamp(_) => ColumnType::Timestamp,
        }
    }

    pub fn is_null(&self, pos: usize) -> bool {
        dispatch!(self, c => c.is_null(pos))
    }

    pub fn null_count(&self) -> usize {
        dispatch!(self, c => c.null_count())
    }

    /// Value at the given position as a dynamic cell.
    pub fn cell(&self, pos: usize) -> Result<Cell> {
        match self {
            Column::Int(c) => Ok(c.get(pos)?.map_or(Cell::Null, Cell::Int)),
            Column::Float(c) => Ok(c.get(pos)?.map_or(Cell::Null, Cell::Float)),
            Column::Bool(c) => Ok(c.get(pos)?.map_or(Cell::Null, Cell::Bool)),
            Column::Str(c) => Ok(c
                .get(pos)?
                .map_or(Cell::Null, |s| Cell::Str(s.to_string()))),
            Column::Timestamp(c) => Ok(c.get(pos)?.map_or(Cell::Null, Cell::Timestamp)),
        }
    }

    /// All values as dynamic cells, in row order.
    pub fn cells(&self) -> Vec<Cell> {
        // positions are in range by construction
        (0..self.len()).map(|i| self.cell(i).unwrap()).collect()
    }

    /// Gather the given positions into a new column. Callers validate
    /// positions against the column length.
    pub(crate) fn take(&self, positions: &[usize]) -> Column {
        match self {
            Column::Int(c) => Column::Int(c.take(positions)),
            Column::Float(c) => Column::Float(c.take(positions)),
            Column::Bool(c) => Column::Bool(c.take(positions)),
            Column::Str(c) => Column::Str(c.take(positions)),
            Column::Timestamp(c) => Column::Timestamp(c.take(positions)),
        }
    }

    /// Build a column of the given type from dynamic cells. Every cell
    /// must be null or of the matching type.
    pub fn from_cells(
        name: impl Into<String>,
        column_type: ColumnType,
        cells: &[Cell],
    ) -> Result<Column> {
        let name = name.into();
        for cell in cells {
            if let Some(found) = cell.column_type() {
                if found != column_type {
                    return Err(Error::ColumnTypeMismatch {
                        name: name.clone(),
                        expected: column_type,
                        found,
                    });
                }
            }
        }
        let col = match column_type {
            ColumnType::Int => Column::Int(IntColumn::from_options(
                name,
                cells
                    .iter()
                    .map(|c| match c {
                        Cell::Int(v) => Some(*v),
                        _ => None,
                    })
                    .collect(),
            )),
            ColumnType::Float => Column::Float(FloatColumn::from_options(
                name,
                cells
                    .iter()
                    .map(|c| match c {
                        Cell::Float(v) => Some(*v),
                        _ => None,
                    })
                    .collect(),
            )),
            ColumnType::Bool => Column::Bool(BoolColumn::from_options(
                name,
                cells
                    .iter()
                    .map(|c| match c {
                        Cell::Bool(v) => Some(*v),
                        _ => None,
                    })
                    .collect(),
            )),
            ColumnType::Str => Column::Str(StrColumn::from_options(
                name,
                cells
                    .iter()
                    .map(|c| match c {
                        Cell::Str(v) => Some(v.clone()),
                        _ => None,
                    })
                    .collect(),
            )),
            ColumnType::Timestamp => Column::Timestamp(TimestampColumn::from_options(
                name,
                cells
                    .iter()
                    .map(|c| match c {
                        Cell::Timestamp(v) => Some(*v),
                        _ => None,
                    })
                    .collect(),
            )),
        };
        Ok(col)
    }

    /// Build a column from dynamic cells, inferring the type from the
    /// first non-null cell. An all-null input defaults to Float.
    pub fn from_cells_inferred(name: impl Into<String>, cells: &[Cell]) -> Result<Column> {
        let column_type = cells
            .iter()
            .find_map(|c| c.column_type())
            .unwrap_or(ColumnType::Float);
        Column::from_cells(name, column_type, cells)
    }
}

impl From<IntColumn> for Column {
    fn from(col: IntColumn) -> Self {
        Column::Int(col)
    }
}

impl From<FloatColumn> for Column {
    fn from(col: FloatColumn) -> Self {
        Column::Float(col)
    }
}

impl From<BoolColumn> for Column {
    fn from(col: BoolColumn) -> Self {
        Column::Bool(col)
    }
}

impl From<StrColumn> for Column {
    fn from(col: StrColumn) -> Self {
        Column::Str(col)
    }
}

impl From<TimestampColumn> for Column {
    fn from(col: TimestampColumn) -> Self {
        Column::Timestamp(col)
    }
}

/// Maps a Rust element type to its typed column representation.
///
/// This is the seam that keeps user functions statically typed: apply
/// and aggregate take explicit function values over a declared element
/// type instead of untyped callables.
pub trait Element: Clone + Default + Sized {
    const COLUMN_TYPE: ColumnType;

    /// Borrow the raw values and null bitmap of a column holding this
    /// element type.
    fn unpack(column: &Column) -> Result<(&[Self], Option<&BitMask>)>;

    /// Build a column from values plus a per-position null flag.
    fn pack(name: &str, values: Vec<Self>, nulls: Vec<bool>) -> Column;
}

impl Element for i64 {
    const COLUMN_TYPE: ColumnType = ColumnType::Int;

    fn unpack(column: &Column) -> Result<(&[Self], Option<&BitMask>)> {
        match column {
            Column::Int(c) => Ok((&c.data, c.nulls.as_ref())),
            other => Err(unpack_mismatch(other, Self::COLUMN_TYPE)),
        }
    }

    fn pack(name: &str, values: Vec<Self>, nulls: Vec<bool>) -> Column {
        // lengths match by construction
        Column::Int(IntColumn::with_nulls(name, values, nulls).unwrap())
    }
}

impl Element for f64 {
    const COLUMN_TYPE: ColumnType = ColumnType::Float;

    fn unpack(column: &Column) -> Result<(&[Self], Option<&BitMask>)> {
        match column {
            Column::Float(c) => Ok((&c.data, c.nulls.as_ref())),
            other => Err(unpack_mismatch(other, Self::COLUMN_TYPE)),
        }
    }

    fn pack(name: &str, values: Vec<Self>, nulls: Vec<bool>) -> Column {
        Column::Float(FloatColumn::with_nulls(name, values, nulls).unwrap())
    }
}

impl Element for bool {
    const COLUMN_TYPE: ColumnType = ColumnType::Bool;

    fn unpack(column: &Column) -> Result<(&[Self], Option<&BitMask>)> {
        match column {
            Column::Bool(c) => Ok((&c.data, c.nulls.as_ref())),
            other => Err(unpack_mismatch(other, Self::COLUMN_TYPE)),
        }
    }

    fn pack(name: &str, values: Vec<Self>, nulls: Vec<bool>) -> Column {
        Column::Bool(BoolColumn::with_nulls(name, values, nulls).unwrap())
    }
}

impl Element for String {
    const COLUMN_TYPE: ColumnType = ColumnType::Str;

    fn unpack(column: &Column) -> Result<(&[Self], Option<&BitMask>)> {
        match column {
            Column::Str(c) => Ok((&c.data, c.nulls.as_ref())),
            other => Err(unpack_mismatch(other, Self::COLUMN_TYPE)),
        }
    }

    fn pack(name: &str, values: Vec<Self>, nulls: Vec<bool>) -> Column {
        Column::Str(StrColumn::with_nulls(name, values, nulls).unwrap())
    }
}

impl Element for NaiveDateTime {
    const COLUMN_TYPE: ColumnType = ColumnType::Timestamp;

    fn unpack(column: &Column) -> Result<(&[Self], Option<&BitMask>)> {
        match column {
            Column::Timestamp(c) => Ok((&c.data, c.nulls.as_ref())),
            other => Err(unpack_mismatch(other, Self::COLUMN_TYPE)),
        }
    }

    fn pack(name: &str, values: Vec<Self>, nulls: Vec<bool>) -> Column {
        Column::Timestamp(TimestampColumn::with_nulls(name, values, nulls).unwrap())
    }
}

fn unpack_mismatch(column: &Column, expected: ColumnType) -> Error {
    Error::ColumnTypeMismatch {
        name: column.name().to_string(),
        expected,
        found: column.column_type(),
    }
}
