//! Row and column selection: positional ranges, index labels and
//! boolean masks with three-valued logic.

use std::cmp::Ordering;
use std::ops::Range;

use crate::cell::Cell;
use crate::column::BoolColumn;
use crate::error::{Error, Result};
use crate::index::{Index, Label};
use crate::table::Table;

/// A boolean column paired with the index of the table it was built
/// from. Null entries mean "unknown" and never select a row.
#[derive(Debug, Clone)]
pub struct Mask {
    values: BoolColumn,
    index: Index,
}

impl Mask {
    pub fn new(values: BoolColumn, index: Index) -> Result<Self> {
        if values.len() != index.len() {
            return Err(Error::LengthMismatch {
                expected: index.len(),
                found: values.len(),
            });
        }
        Ok(Mask { values, index })
    }

    pub fn values(&self) -> &BoolColumn {
        &self.values
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pointwise AND under three-valued logic. Both masks must carry
    /// the same index.
    pub fn and(&self, other: &Mask) -> Result<Mask> {
        self.check_index(other)?;
        Ok(Mask {
            values: self.values.and(&other.values)?,
            index: self.index.clone(),
        })
    }

    /// Pointwise OR under three-valued logic. Both masks must carry
    /// the same index.
    pub fn or(&self, other: &Mask) -> Result<Mask> {
        self.check_index(other)?;
        Ok(Mask {
            values: self.values.or(&other.values)?,
            index: self.index.clone(),
        })
    }

    /// Pointwise NOT. NOT null stays null.
    pub fn not(&self) -> Mask {
        Mask {
            values: self.values.not(),
            index: self.index.clone(),
        }
    }

    fn check_index(&self, other: &Mask) -> Result<()> {
        if !self.index.same_labels(&other.index) {
            return Err(Error::IndexMismatch(
                "mask operands carry different indices".to_string(),
            ));
        }
        Ok(())
    }
}

impl Table {
    /// New table with the named columns, in the requested order. The
    /// index and column storage are shared.
    pub fn select_columns(&self, names: &[&str]) -> Result<Table> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            columns.push(self.column(name)?.clone());
        }
        Table::with_index(columns, self.index().clone())
    }

    /// Rows in the given positional range, keeping their labels.
    pub fn select_rows_by_position(&self, range: Range<usize>) -> Result<Table> {
        if range.end > self.row_count() {
            return Err(Error::IndexOutOfBounds {
                index: range.end,
                size: self.row_count(),
            });
        }
        let positions: Vec<usize> = range.collect();
        self.take_rows(&positions)
    }

    /// Rows carrying the given labels, in the requested label order.
    /// Non-unique labels contribute every match; an absent label is a
    /// configuration error.
    pub fn select_rows_by_label(&self, labels: &[Label]) -> Result<Table> {
        let mut positions = Vec::new();
        for label in labels {
            let matches = self.index().lookup(label);
            if matches.is_empty() {
                return Err(Error::LabelNotFound(label.to_string()));
            }
            positions.extend(matches);
        }
        self.take_rows(&positions)
    }

    /// Rows where the mask holds a non-null `true`. The mask's index
    /// must be identical to this table's index.
    pub fn select_by_mask(&self, mask: &Mask) -> Result<Table> {
        if !mask.index().same_labels(self.index()) {
            return Err(Error::IndexMismatch(
                "mask index differs from table index".to_string(),
            ));
        }
        self.take_rows(&mask.values().true_positions())
    }

    /// Build a mask from a predicate over a column's cells. Null cells
    /// produce null mask entries without invoking the predicate.
    pub fn mask_with<F>(&self, column: &str, pred: F) -> Result<Mask>
    where
        F: Fn(&Cell) -> bool,
    {
        let col = self.column(column)?;
        let mut data = Vec::with_capacity(col.len());
        let mut nulls = Vec::with_capacity(col.len());
        for pos in 0..col.len() {
            let cell = col.cell(pos)?;
            if cell.is_null() {
                nulls.push(true);
                data.push(false);
            } else {
                nulls.push(false);
                data.push(pred(&cell));
            }
        }
        Mask::new(
            BoolColumn::with_nulls(column, data, nulls)?,
            self.index().clone(),
        )
    }

    /// Mask of rows where the column equals `value`.
    pub fn mask_eq(&self, column: &str, value: &Cell) -> Result<Mask> {
        self.compare_mask(column, value, |ord| ord == Ordering::Equal)
    }

    /// Mask of rows where the column differs from `value`.
    pub fn mask_ne(&self, column: &str, value: &Cell) -> Result<Mask> {
        self.compare_mask(column, value, |ord| ord != Ordering::Equal)
    }

    /// Mask of rows where the column is greater than `value`.
    pub fn mask_gt(&self, column: &str, value: &Cell) -> Result<Mask> {
        self.compare_mask(column, value, |ord| ord == Ordering::Greater)
    }

    /// Mask of rows where the column is at least `value`.
    pub fn mask_ge(&self, column: &str, value: &Cell) -> Result<Mask> {
        self.compare_mask(column, value, |ord| ord != Ordering::Less)
    }

    /// Mask of rows where the column is less than `value`.
    pub fn mask_lt(&self, column: &str, value: &Cell) -> Result<Mask> {
        self.compare_mask(column, value, |ord| ord == Ordering::Less)
    }

    /// Mask of rows where the column is at most `value`.
    pub fn mask_le(&self, column: &str, value: &Cell) -> Result<Mask> {
        self.compare_mask(column, value, |ord| ord != Ordering::Greater)
    }

    /// Rows where none of the listed columns is null. An empty list
    /// means all columns.
    pub fn drop_nulls(&self, columns: &[&str]) -> Result<Table> {
        let names: Vec<&str> = if columns.is_empty() {
            self.column_names()
        } else {
            columns.to_vec()
        };
        let mut checked = Vec::with_capacity(names.len());
        for name in names {
            checked.push(self.column(name)?);
        }
        let positions: Vec<usize> = (0..self.row_count())
            .filter(|&row| checked.iter().all(|c| !c.is_null(row)))
            .collect();
        self.take_rows(&positions)
    }

    /// Null cells compare as null; a comparison value of a different
    /// type than the column is rejected up front.
    fn compare_mask<F>(&self, column: &str, value: &Cell, pred: F) -> Result<Mask>
    where
        F: Fn(Ordering) -> bool,
    {
        let col = self.column(column)?;
        match value.column_type() {
            None => {
                return Err(Error::InvalidInput(
                    "comparison value must not be null".to_string(),
                ))
            }
            Some(found) if found != col.column_type() => {
                return Err(Error::IncomparableTypes {
                    left: col.column_type().to_string(),
                    right: value.type_name().to_string(),
                })
            }
            Some(_) => {}
        }
        let mut data = Vec::with_capacity(col.len());
        let mut nulls = Vec::with_capacity(col.len());
        for pos in 0..col.len() {
            let cell = col.cell(pos)?;
            if cell.is_null() {
                nulls.push(true);
                data.push(false);
            } else {
                nulls.push(false);
                data.push(pred(cell.try_cmp(value)?));
            }
        }
        Mask::new(
            BoolColumn::with_nulls(column, data, nulls)?,
            self.index().clone(),
        )
    }
}
