//! The central table type: an ordered mapping of column name to
//! [`Column`], all columns sharing one [`Index`].

mod loader;
mod select;

pub use loader::{LoadOptions, RawRows};
pub use select::Mask;

use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::column::Column;
use crate::error::{Error, Result};
use crate::index::Index;

/// Ordered collection of equal-length named columns plus a row index.
///
/// Read operations never mutate; they return new tables whose columns
/// share storage with the source. `set_column` and `set_index` are the
/// only mutators.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    lookup: HashMap<String, usize>,
    index: Index,
}

impl Table {
    /// Build a table from columns with a default positional index.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let len = columns.first().map_or(0, |c| c.len());
        Self::with_index(columns, Index::range(len))
    }

    /// Build a table from columns sharing the given index.
    pub fn with_index(columns: Vec<Column>, index: Index) -> Result<Self> {
        let mut lookup = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            if column.len() != index.len() {
                return Err(Error::LengthMismatch {
                    expected: index.len(),
                    found: column.len(),
                });
            }
            if lookup.insert(column.name().to_string(), i).is_some() {
                return Err(Error::DuplicateColumnName(column.name().to_string()));
            }
        }
        Ok(Table {
            columns,
            lookup,
            index,
        })
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.index.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// Columns in insertion order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Whether a column with the given name exists.
    pub fn contains_column(&self, name: &str) -> bool {
        self.lookup.contains_key(name)
    }

    /// Borrow a column by name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.lookup
            .get(name)
            .map(|&i| &self.columns[i])
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// The row index.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// Replace an existing column or append a new one, in place.
    ///
    /// The column is stored under `name` regardless of its own name.
    /// On an empty table the first column establishes the row count.
    pub fn set_column(&mut self, name: &str, column: Column) -> Result<()> {
        if self.columns.is_empty() && self.index.len() == 0 {
            self.index = Index::range(column.len());
        }
        if column.len() != self.index.len() {
            return Err(Error::LengthMismatch {
                expected: self.index.len(),
                found: column.len(),
            });
        }
        let column = column.renamed(name);
        match self.lookup.get(name) {
            Some(&i) => self.columns[i] = column,
            None => {
                self.lookup.insert(name.to_string(), self.columns.len());
                self.columns.push(column);
            }
        }
        Ok(())
    }

    /// Replace the row index, in place.
    pub fn set_index(&mut self, index: Index) -> Result<()> {
        if index.len() != self.row_count() {
            return Err(Error::LengthMismatch {
                expected: self.row_count(),
                found: index.len(),
            });
        }
        self.index = index;
        Ok(())
    }

    /// Promote a column to the row index, removing it from the column
    /// mapping. Labels need not be unique.
    pub fn set_index_from_column(&mut self, name: &str) -> Result<()> {
        let pos = *self
            .lookup
            .get(name)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))?;
        let column = self.columns.remove(pos);
        self.lookup.remove(name);
        for slot in self.lookup.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        self.index = Index::from_cells(column.cells(), Some(name.to_string()));
        Ok(())
    }

    /// First `n` rows (fewer when the table is shorter).
    pub fn head(&self, n: usize) -> Result<Table> {
        let end = n.min(self.row_count());
        let positions: Vec<usize> = (0..end).collect();
        self.take_rows(&positions)
    }

    /// Gather the given row positions into a new table, preserving the
    /// labels of the selected rows.
    pub(crate) fn take_rows(&self, positions: &[usize]) -> Result<Table> {
        for &p in positions {
            if p >= self.row_count() {
                return Err(Error::IndexOutOfBounds {
                    index: p,
                    size: self.row_count(),
                });
            }
        }
        let columns = self.columns.iter().map(|c| c.take(positions)).collect();
        Table::with_index(columns, self.index.take(positions))
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const PREVIEW_ROWS: usize = 10;
        write!(f, "index")?;
        for column in &self.columns {
            write!(f, "\t{}", column.name())?;
        }
        writeln!(f)?;
        let shown = self.row_count().min(PREVIEW_ROWS);
        for row in 0..shown {
            let label = self.index.label(row).map_err(|_| fmt::Error)?;
            write!(f, "{}", label)?;
            for column in &self.columns {
                let cell = column.cell(row).map_err(|_| fmt::Error)?;
                write!(f, "\t{}", cell)?;
            }
            writeln!(f)?;
        }
        if self.row_count() > shown {
            writeln!(f, "... {} rows total", self.row_count())?;
        }
        Ok(())
    }
}
