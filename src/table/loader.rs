//! Table construction from raw string records: typing, null
//! sentinels, date parsing, fill values and index promotion.

use std::collections::HashMap;

use log::{debug, warn};

use crate::cell::{Cell, ColumnType};
use crate::column::{
    parse_timestamp, BoolColumn, Column, FloatColumn, IntColumn, StrColumn, TimestampColumn,
};
use crate::error::{Error, Result};
use crate::table::Table;

/// Values treated as missing on input, matched exactly.
const NULL_SENTINELS: &[&str] = &["", "NA", "N/A", "null", "NaN"];

/// Raw rows as produced by an input collaborator: a header list and
/// string field values aligned to it.
#[derive(Debug, Clone)]
pub struct RawRows {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawRows {
    /// Validate that every row has one field per header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        for row in &rows {
            if row.len() != headers.len() {
                return Err(Error::LengthMismatch {
                    expected: headers.len(),
                    found: row.len(),
                });
            }
        }
        Ok(RawRows { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Options controlling [`Table::from_records`]: which columns to
/// retain (and their order), declared types, date-like columns, the
/// index column and per-column null-fill values.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    columns: Vec<String>,
    dtypes: HashMap<String, ColumnType>,
    parse_dates: Vec<String>,
    index_column: Option<String>,
    fill_values: HashMap<String, Cell>,
}

impl LoadOptions {
    /// Retain the given columns, in the given order. Columns without a
    /// declared type default to `Str`.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        LoadOptions {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Declare a column's type.
    pub fn dtype(mut self, column: impl Into<String>, dtype: ColumnType) -> Self {
        self.dtypes.insert(column.into(), dtype);
        self
    }

    /// Mark a column as date-like; it is parsed into timestamps.
    pub fn parse_date(mut self, column: impl Into<String>) -> Self {
        self.parse_dates.push(column.into());
        self
    }

    /// Promote a column to the row index after typing.
    pub fn index_column(mut self, column: impl Into<String>) -> Self {
        self.index_column = Some(column.into());
        self
    }

    /// Replace nulls in a column with the given value, applied only
    /// after typed conversion has been attempted.
    pub fn fill(mut self, column: impl Into<String>, value: impl Into<Cell>) -> Self {
        self.fill_values.insert(column.into(), value.into());
        self
    }

    /// Effective type of a retained column.
    fn effective_dtype(&self, column: &str) -> ColumnType {
        if self.parse_dates.iter().any(|c| c == column) {
            ColumnType::Timestamp
        } else {
            self.dtypes.get(column).copied().unwrap_or(ColumnType::Str)
        }
    }

    /// Reject option entries naming unknown columns or contradicting
    /// each other, before any row is processed.
    fn validate(&self, headers: &[String]) -> Result<()> {
        for column in &self.columns {
            if !headers.contains(column) {
                return Err(Error::ColumnNotFound(column.clone()));
            }
        }
        for column in self.dtypes.keys() {
            self.require_retained(column)?;
        }
        for column in &self.parse_dates {
            self.require_retained(column)?;
            if let Some(dtype) = self.dtypes.get(column) {
                if *dtype != ColumnType::Timestamp {
                    return Err(Error::InvalidInput(format!(
                        "column {} is date-like but declared as {}",
                        column, dtype
                    )));
                }
            }
        }
        if let Some(column) = &self.index_column {
            self.require_retained(column)?;
        }
        for (column, value) in &self.fill_values {
            self.require_retained(column)?;
            let expected = self.effective_dtype(column);
            match value.column_type() {
                None => {
                    return Err(Error::InvalidInput(format!(
                        "fill value for column {} must not be null",
                        column
                    )))
                }
                Some(found) if found != expected => {
                    return Err(Error::ColumnTypeMismatch {
                        name: column.clone(),
                        expected,
                        found,
                    })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    fn require_retained(&self, column: &str) -> Result<()> {
        if !self.columns.iter().any(|c| c == column) {
            return Err(Error::ColumnNotFound(column.to_string()));
        }
        Ok(())
    }
}

impl Table {
    /// Build a table from raw string records.
    ///
    /// Each retained column is converted to its declared type. A value
    /// that is a null sentinel or fails conversion becomes null rather
    /// than an error; a fill value, when given, replaces those nulls
    /// after typing. Row order and requested column order are
    /// preserved. Option entries naming unknown columns fail before
    /// any row is processed.
    pub fn from_records(raw: &RawRows, options: &LoadOptions) -> Result<Table> {
        options.validate(raw.headers())?;

        let mut columns = Vec::with_capacity(options.columns.len());
        for name in &options.columns {
            // retained names are validated against headers above
            let field = raw.headers().iter().position(|h| h == name).unwrap();
            let dtype = options.effective_dtype(name);
            let fill = options.fill_values.get(name);
            columns.push(build_column(name, dtype, raw.rows(), field, fill));
        }

        let mut table = Table::new(columns)?;
        if let Some(index_column) = &options.index_column {
            table.set_index_from_column(index_column)?;
        }
        debug!(
            "built table: {} rows, {} columns",
            table.row_count(),
            table.column_count()
        );
        Ok(table)
    }
}

fn build_column(
    name: &str,
    dtype: ColumnType,
    rows: &[Vec<String>],
    field: usize,
    fill: Option<&Cell>,
) -> Column {
    let mut failed = 0usize;
    let column = match dtype {
        ColumnType::Int => {
            let values = typed_values(rows, field, &mut failed, |raw| {
                raw.trim().parse::<i64>().ok()
            });
            Column::Int(IntColumn::from_options(
                name,
                filled(values, fill, |c| match c {
                    Cell::Int(v) => Some(*v),
                    _ => None,
                }),
            ))
        }
        ColumnType::Float => {
            let values = typed_values(rows, field, &mut failed, |raw| {
                raw.trim().parse::<f64>().ok()
            });
            Column::Float(FloatColumn::from_options(
                name,
                filled(values, fill, |c| match c {
                    Cell::Float(v) => Some(*v),
                    _ => None,
                }),
            ))
        }
        ColumnType::Bool => {
            let values = typed_values(rows, field, &mut failed, parse_bool);
            Column::Bool(BoolColumn::from_options(
                name,
                filled(values, fill, |c| match c {
                    Cell::Bool(v) => Some(*v),
                    _ => None,
                }),
            ))
        }
        ColumnType::Str => {
            let values = typed_values(rows, field, &mut failed, |raw| Some(raw.to_string()));
            Column::Str(StrColumn::from_options(
                name,
                filled(values, fill, |c| match c {
                    Cell::Str(v) => Some(v.clone()),
                    _ => None,
                }),
            ))
        }
        ColumnType::Timestamp => {
            let values = typed_values(rows, field, &mut failed, parse_timestamp);
            Column::Timestamp(TimestampColumn::from_options(
                name,
                filled(values, fill, |c| match c {
                    Cell::Timestamp(v) => Some(*v),
                    _ => None,
                }),
            ))
        }
    };
    if failed > 0 {
        warn!(
            "column {}: {} values failed {} conversion and were marked null",
            name, failed, dtype
        );
    }
    column
}

/// Convert one raw field across all rows. Sentinels become `None`
/// silently; parse failures become `None` and are counted.
fn typed_values<T>(
    rows: &[Vec<String>],
    field: usize,
    failed: &mut usize,
    parse: impl Fn(&str) -> Option<T>,
) -> Vec<Option<T>> {
    rows.iter()
        .map(|row| {
            let raw = row[field].as_str();
            if NULL_SENTINELS.contains(&raw) {
                return None;
            }
            let value = parse(raw);
            if value.is_none() {
                *failed += 1;
            }
            value
        })
        .collect()
}

/// Replace `None` slots with the fill value, when one was supplied.
/// The fill's type was checked against the column type up front.
fn filled<T: Clone>(
    values: Vec<Option<T>>,
    fill: Option<&Cell>,
    extract: impl Fn(&Cell) -> Option<T>,
) -> Vec<Option<T>> {
    match fill.and_then(extract) {
        None => values,
        Some(fill_value) => values
            .into_iter()
            .map(|v| v.or_else(|| Some(fill_value.clone())))
            .collect(),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" | "True" | "TRUE" | "1" => Some(true),
        "false" | "False" | "FALSE" | "0" => Some(false),
        _ => None,
    }
}
