use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Runtime type of a column's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// Boolean
    Bool,
    /// UTF-8 string
    Str,
    /// Naive timestamp (no timezone)
    Timestamp,
}

impl Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnType::Int => "int64",
            ColumnType::Float => "float64",
            ColumnType::Bool => "bool",
            ColumnType::Str => "str",
            ColumnType::Timestamp => "timestamp",
        };
        write!(f, "{}", name)
    }
}

/// A single dynamically typed value.
///
/// Cells appear only at the edges of the engine: raw construction input,
/// group keys, aggregation results, sort comparisons and index labels.
/// Column storage itself stays typed.
///
/// Float semantics: equality and hashing are bitwise (`to_bits`), so NaN
/// groups with NaN; ordering uses `total_cmp`, so NaN sorts after all
/// finite values but before nulls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Cell {
    /// Missing value
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Timestamp(NaiveDateTime),
}

impl Cell {
    /// Whether this cell is the missing value.
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// The column type this cell belongs to, or `None` for null.
    pub fn column_type(&self) -> Option<ColumnType> {
        match self {
            Cell::Null => None,
            Cell::Int(_) => Some(ColumnType::Int),
            Cell::Float(_) => Some(ColumnType::Float),
            Cell::Bool(_) => Some(ColumnType::Bool),
            Cell::Str(_) => Some(ColumnType::Str),
            Cell::Timestamp(_) => Some(ColumnType::Timestamp),
        }
    }

    /// Type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Cell::Null => "null",
            Cell::Int(_) => "int64",
            Cell::Float(_) => "float64",
            Cell::Bool(_) => "bool",
            Cell::Str(_) => "str",
            Cell::Timestamp(_) => "timestamp",
        }
    }

    /// Compare two cells of the same runtime type.
    ///
    /// Null is only comparable to null. Any cross-type pair is an
    /// `IncomparableTypes` error; callers that need a null policy
    /// (sorting, masking) handle nulls before calling this.
    pub fn try_cmp(&self, other: &Cell) -> Result<Ordering> {
        match (self, other) {
            (Cell::Null, Cell::Null) => Ok(Ordering::Equal),
            (Cell::Int(a), Cell::Int(b)) => Ok(a.cmp(b)),
            (Cell::Float(a), Cell::Float(b)) => Ok(a.total_cmp(b)),
            (Cell::Bool(a), Cell::Bool(b)) => Ok(a.cmp(b)),
            (Cell::Str(a), Cell::Str(b)) => Ok(a.cmp(b)),
            (Cell::Timestamp(a), Cell::Timestamp(b)) => Ok(a.cmp(b)),
            _ => Err(Error::IncomparableTypes {
                left: self.type_name().to_string(),
                right: other.type_name().to_string(),
            }),
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Null, Cell::Null) => true,
            (Cell::Int(a), Cell::Int(b)) => a == b,
            (Cell::Float(a), Cell::Float(b)) => a.to_bits() == b.to_bits(),
            (Cell::Bool(a), Cell::Bool(b)) => a == b,
            (Cell::Str(a), Cell::Str(b)) => a == b,
            (Cell::Timestamp(a), Cell::Timestamp(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Cell::Null => 0u8.hash(state),
            Cell::Int(v) => {
                1u8.hash(state);
                v.hash(state);
            }
            Cell::Float(v) => {
                2u8.hash(state);
                v.to_bits().hash(state);
            }
            Cell::Bool(v) => {
                3u8.hash(state);
                v.hash(state);
            }
            Cell::Str(v) => {
                4u8.hash(state);
                v.hash(state);
            }
            Cell::Timestamp(v) => {
                5u8.hash(state);
                v.hash(state);
            }
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => write!(f, ""),
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Bool(v) => write!(f, "{}", v),
            Cell::Str(v) => write!(f, "{}", v),
            Cell::Timestamp(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Str(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Str(value)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(value: NaiveDateTime) -> Self {
        Cell::Timestamp(value)
    }
}

impl<T> From<Option<T>> for Cell
where
    T: Into<Cell>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Cell::Null,
        }
    }
}
