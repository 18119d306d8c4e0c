//! Split-apply-combine: partition a table by key columns, aggregate
//! each partition, recombine into a new table.

use std::collections::HashMap;

use log::debug;

use crate::cell::Cell;
use crate::column::Column;
use crate::error::{Error, Result};
use crate::index::{Index, Label};
use crate::table::Table;

/// Partitions of a table by key column values.
///
/// A null in a key column is a valid, distinct group key, not an
/// excluded row. Partition order is the order in which distinct keys
/// are first encountered; it lives only as long as one group/aggregate
/// call.
#[derive(Debug)]
pub struct GroupedView<'a> {
    table: &'a Table,
    groups: Vec<Group>,
}

#[derive(Debug)]
struct Group {
    key: Label,
    rows: Vec<usize>,
}

impl Table {
    /// Partition rows by the tuple of values in `key_columns`.
    /// Unknown key columns fail before any partitioning work begins.
    pub fn group_by(&self, key_columns: &[&str]) -> Result<GroupedView<'_>> {
        if key_columns.is_empty() {
            return Err(Error::InvalidInput(
                "group_by requires at least one key column".to_string(),
            ));
        }
        let mut keys = Vec::with_capacity(key_columns.len());
        for name in key_columns {
            keys.push(self.column(name)?);
        }

        let mut slot_of: HashMap<Label, usize> = HashMap::new();
        let mut groups: Vec<Group> = Vec::new();
        for row in 0..self.row_count() {
            let key = make_key(&keys, row)?;
            match slot_of.get(&key) {
                Some(&slot) => groups[slot].rows.push(row),
                None => {
                    slot_of.insert(key.clone(), groups.len());
                    groups.push(Group {
                        key,
                        rows: vec![row],
                    });
                }
            }
        }
        debug!(
            "grouped {} rows into {} partitions by {:?}",
            self.row_count(),
            groups.len(),
            key_columns
        );
        Ok(GroupedView {
            table: self,
            groups,
        })
    }

    /// Pivot-style summary: group by the index columns, then apply one
    /// aggregation function to each value column.
    pub fn pivot_table<F>(
        &self,
        index_columns: &[&str],
        value_columns: &[&str],
        aggregate_fn: F,
    ) -> Result<Table>
    where
        F: Fn(&str, &[Cell]) -> Result<Cell>,
    {
        self.group_by(index_columns)?
            .aggregate(value_columns, aggregate_fn)
    }
}

fn make_key(keys: &[&Column], row: usize) -> Result<Label> {
    if keys.len() == 1 {
        return Ok(Label::One(keys[0].cell(row)?));
    }
    let mut cells = Vec::with_capacity(keys.len());
    for key in keys {
        cells.push(key.cell(row)?);
    }
    Ok(Label::Tuple(cells))
}

impl GroupedView<'_> {
    /// Number of partitions.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Distinct keys in first-encounter order.
    pub fn keys(&self) -> Vec<&Label> {
        self.groups.iter().map(|g| &g.key).collect()
    }

    /// Row positions of the partition with the given key.
    pub fn group_rows(&self, key: &Label) -> Option<&[usize]> {
        self.groups
            .iter()
            .find(|g| &g.key == key)
            .map(|g| g.rows.as_slice())
    }

    /// One-column table of partition sizes, indexed by key.
    pub fn size(&self) -> Result<Table> {
        let counts: Vec<Cell> = self
            .groups
            .iter()
            .map(|g| Cell::Int(g.rows.len() as i64))
            .collect();
        let column = Column::from_cells("count", crate::cell::ColumnType::Int, &counts)?;
        Table::with_index(vec![column], self.key_index())
    }

    /// Apply `aggregate_fn` once per (partition, target column) pair.
    ///
    /// The function receives the target column's values restricted to
    /// the partition, nulls included, in their original relative
    /// order, and returns one scalar. The result table is indexed by
    /// the distinct keys in first-encounter order. Unknown target
    /// columns fail before any work.
    pub fn aggregate<F>(&self, target_columns: &[&str], aggregate_fn: F) -> Result<Table>
    where
        F: Fn(&str, &[Cell]) -> Result<Cell>,
    {
        let mut targets = Vec::with_capacity(target_columns.len());
        for name in target_columns {
            targets.push(self.table.column(name)?);
        }

        let mut columns = Vec::with_capacity(targets.len());
        for target in targets {
            let mut scalars = Vec::with_capacity(self.groups.len());
            for group in &self.groups {
                let mut cells = Vec::with_capacity(group.rows.len());
                for &row in &group.rows {
                    cells.push(target.cell(row)?);
                }
                scalars.push(aggregate_fn(target.name(), &cells)?);
            }
            columns.push(Column::from_cells_inferred(target.name(), &scalars)?);
        }
        Table::with_index(columns, self.key_index())
    }

    fn key_index(&self) -> Index {
        let labels: Vec<Label> = self.groups.iter().map(|g| g.key.clone()).collect();
        Index::from_labels(labels, None)
    }
}

/// Ready-made aggregation functions matching the signature expected by
/// [`GroupedView::aggregate`].
pub mod agg {
    use crate::cell::Cell;
    use crate::error::{Error, Result};

    /// Count of non-null values.
    pub fn count(_column: &str, values: &[Cell]) -> Result<Cell> {
        Ok(Cell::Int(
            values.iter().filter(|c| !c.is_null()).count() as i64
        ))
    }

    /// Number of rows in the partition, nulls included.
    pub fn size(_column: &str, values: &[Cell]) -> Result<Cell> {
        Ok(Cell::Int(values.len() as i64))
    }

    /// Sum of non-null values. Integer columns stay integer; an
    /// all-null partition sums to null. An integer sum that would
    /// overflow i64 is an error.
    pub fn sum(column: &str, values: &[Cell]) -> Result<Cell> {
        let mut int_sum: Option<i64> = None;
        let mut float_sum: Option<f64> = None;
        for cell in values {
            match cell {
                Cell::Null => {}
                Cell::Int(v) => {
                    let total = int_sum.unwrap_or(0).checked_add(*v).ok_or_else(|| {
                        Error::InvalidInput(format!(
                            "integer overflow summing column {}",
                            column
                        ))
                    })?;
                    int_sum = Some(total);
                }
                Cell::Float(v) => float_sum = Some(float_sum.unwrap_or(0.0) + v),
                other => {
                    return Err(Error::InvalidInput(format!(
                        "sum is not defined for {} values in column {}",
                        other.type_name(),
                        column
                    )))
                }
            }
        }
        match (int_sum, float_sum) {
            (Some(i), None) => Ok(Cell::Int(i)),
            (None, Some(f)) => Ok(Cell::Float(f)),
            (None, None) => Ok(Cell::Null),
            // typed columns cannot mix variants
            (Some(i), Some(f)) => Ok(Cell::Float(i as f64 + f)),
        }
    }

    /// Mean of non-null values as a float; null for an all-null
    /// partition.
    pub fn mean(column: &str, values: &[Cell]) -> Result<Cell> {
        let mut total = 0.0;
        let mut count = 0usize;
        for cell in values {
            match cell {
                Cell::Null => {}
                Cell::Int(v) => {
                    total += *v as f64;
                    count += 1;
                }
                Cell::Float(v) => {
                    total += v;
                    count += 1;
                }
                other => {
                    return Err(Error::InvalidInput(format!(
                        "mean is not defined for {} values in column {}",
                        other.type_name(),
                        column
                    )))
                }
            }
        }
        if count == 0 {
            return Ok(Cell::Null);
        }
        Ok(Cell::Float(total / count as f64))
    }

    /// Smallest non-null value; null for an all-null partition.
    pub fn min(_column: &str, values: &[Cell]) -> Result<Cell> {
        extremum(values, std::cmp::Ordering::Less)
    }

    /// Largest non-null value; null for an all-null partition.
    pub fn max(_column: &str, values: &[Cell]) -> Result<Cell> {
        extremum(values, std::cmp::Ordering::Greater)
    }

    /// First non-null value; null for an all-null partition.
    pub fn first(_column: &str, values: &[Cell]) -> Result<Cell> {
        Ok(values
            .iter()
            .find(|c| !c.is_null())
            .cloned()
            .unwrap_or(Cell::Null))
    }

    /// Last non-null value; null for an all-null partition.
    pub fn last(_column: &str, values: &[Cell]) -> Result<Cell> {
        Ok(values
            .iter()
            .rev()
            .find(|c| !c.is_null())
            .cloned()
            .unwrap_or(Cell::Null))
    }

    fn extremum(values: &[Cell], keep: std::cmp::Ordering) -> Result<Cell> {
        let mut best: Option<&Cell> = None;
        for cell in values {
            if cell.is_null() {
                continue;
            }
            best = match best {
                None => Some(cell),
                Some(current) => {
                    if cell.try_cmp(current)? == keep {
                        Some(cell)
                    } else {
                        Some(current)
                    }
                }
            };
        }
        Ok(best.cloned().unwrap_or(Cell::Null))
    }
}
