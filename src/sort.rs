//! Stable multi-key row sorting.

use std::cmp::Ordering;

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::table::Table;

impl Table {
    /// Sort rows by one or more columns. `ascending` carries one flag
    /// per sort key.
    ///
    /// The sort is stable: ties keep original row order. Nulls sort
    /// last under an ascending key and first under a descending key.
    /// Index labels travel with their rows.
    pub fn sort_by(&self, by: &[&str], ascending: &[bool]) -> Result<Table> {
        if by.is_empty() {
            return Err(Error::InvalidInput(
                "sort_by requires at least one column".to_string(),
            ));
        }
        if ascending.len() != by.len() {
            return Err(Error::LengthMismatch {
                expected: by.len(),
                found: ascending.len(),
            });
        }
        let mut keys = Vec::with_capacity(by.len());
        for name in by {
            keys.push(self.column(name)?.cells());
        }

        let mut permutation: Vec<usize> = (0..self.row_count()).collect();
        permutation.sort_by(|&a, &b| {
            for (key, cells) in keys.iter().enumerate() {
                let ord = cmp_with_nulls(&cells[a], &cells[b], ascending[key]);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            Ordering::Equal
        });
        self.take_rows(&permutation)
    }

    /// Sort rows by a single column.
    pub fn sort_by_column(&self, by: &str, ascending: bool) -> Result<Table> {
        self.sort_by(&[by], &[ascending])
    }
}

fn cmp_with_nulls(a: &Cell, b: &Cell, ascending: bool) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => {
            if ascending {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (false, true) => {
            if ascending {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (false, false) => {
            // cells come from one typed column, so cross-type
            // comparison is unreachable here
            let ord = a.try_cmp(b).unwrap_or(Ordering::Equal);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        }
    }
}
