//! Row labels for [`crate::table::Table`].
//!
//! An index is either positional (`Range`) or labeled. Labels may be
//! single cells or tuples of cells (the result of grouping by several
//! key columns), and labeled indices may contain duplicates, in which
//! case label lookup returns every match.

use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::cell::Cell;
use crate::error::{Error, Result};

/// A row label: one cell, or a tuple of cells for multi-key group
/// results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    One(Cell),
    Tuple(Vec<Cell>),
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::One(cell) => write!(f, "{}", cell),
            Label::Tuple(cells) => {
                write!(f, "(")?;
                for (i, cell) in cells.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", cell)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<Cell> for Label {
    fn from(value: Cell) -> Self {
        Label::One(value)
    }
}

impl From<i64> for Label {
    fn from(value: i64) -> Self {
        Label::One(Cell::Int(value))
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label::One(Cell::Str(value.to_string()))
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label::One(Cell::Str(value))
    }
}

/// Ordered sequence of labels with a label-to-positions map.
/// Duplicate labels are allowed.
#[derive(Debug, Clone)]
pub struct LabelIndex {
    labels: Vec<Label>,
    positions: HashMap<Label, Vec<usize>>,
    name: Option<String>,
}

impl LabelIndex {
    pub fn new(labels: Vec<Label>, name: Option<String>) -> Self {
        let mut positions: HashMap<Label, Vec<usize>> = HashMap::with_capacity(labels.len());
        for (i, label) in labels.iter().enumerate() {
            positions.entry(label.clone()).or_default().push(i);
        }
        LabelIndex {
            labels,
            positions,
            name,
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Positions of every occurrence of the label, in row order.
    pub fn lookup(&self, label: &Label) -> &[usize] {
        self.positions.get(label).map_or(&[], |v| v.as_slice())
    }
}

impl PartialEq for LabelIndex {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
    }
}

/// Row index of a table: positional or labeled.
#[derive(Debug, Clone)]
pub enum Index {
    /// Positional labels `start..start + len`. Slicing a range index
    /// keeps the original positions as labels.
    Range { start: usize, len: usize },
    Labeled(LabelIndex),
}

impl Index {
    /// Default positional index over `0..len`.
    pub fn range(len: usize) -> Self {
        Index::Range { start: 0, len }
    }

    /// Labeled index from cells, e.g. a column promoted to the index.
    pub fn from_cells(cells: Vec<Cell>, name: Option<String>) -> Self {
        let labels = cells.into_iter().map(Label::One).collect();
        Index::Labeled(LabelIndex::new(labels, name))
    }

    /// Labeled index from ready-made labels.
    pub fn from_labels(labels: Vec<Label>, name: Option<String>) -> Self {
        Index::Labeled(LabelIndex::new(labels, name))
    }

    pub fn len(&self) -> usize {
        match self {
            Index::Range { len, .. } => *len,
            Index::Labeled(idx) => idx.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label at the given position.
    pub fn label(&self, pos: usize) -> Result<Label> {
        if pos >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index: pos,
                size: self.len(),
            });
        }
        match self {
            Index::Range { start, .. } => Ok(Label::One(Cell::Int((start + pos) as i64))),
            Index::Labeled(idx) => Ok(idx.labels()[pos].clone()),
        }
    }

    /// All labels, materialized in row order.
    pub fn labels(&self) -> Vec<Label> {
        match self {
            Index::Range { start, len } => (0..*len)
                .map(|i| Label::One(Cell::Int((start + i) as i64)))
                .collect(),
            Index::Labeled(idx) => idx.labels().to_vec(),
        }
    }

    /// Positions of every row carrying the label, in row order. Empty
    /// when the label is absent.
    pub fn lookup(&self, label: &Label) -> Vec<usize> {
        match self {
            Index::Range { start, len } => match label {
                Label::One(Cell::Int(v)) => {
                    let v = *v;
                    if v >= *start as i64 && v < (*start + *len) as i64 {
                        vec![v as usize - *start]
                    } else {
                        Vec::new()
                    }
                }
                _ => Vec::new(),
            },
            Index::Labeled(idx) => idx.lookup(label).to_vec(),
        }
    }

    /// Whether two indices carry the same labels in the same order.
    /// A range index equals a labeled index of the same integer cells.
    pub fn same_labels(&self, other: &Index) -> bool {
        if self.len() != other.len() {
            return false;
        }
        match (self, other) {
            (
                Index::Range { start: a, len: _ },
                Index::Range { start: b, len: _ },
            ) => a == b,
            (Index::Labeled(a), Index::Labeled(b)) => a == b,
            _ => self.labels() == other.labels(),
        }
    }

    /// Gather the labels at the given positions into a new index.
    /// A contiguous ascending slice of a range index stays a range.
    pub(crate) fn take(&self, positions: &[usize]) -> Index {
        if let Index::Range { start, .. } = self {
            let contiguous = positions
                .windows(2)
                .all(|w| w[1] == w[0] + 1);
            if contiguous {
                let first = positions.first().copied().unwrap_or(0);
                return Index::Range {
                    start: start + first,
                    len: positions.len(),
                };
            }
        }
        let labels = positions
            .iter()
            .map(|&p| match self {
                Index::Range { start, .. } => Label::One(Cell::Int((start + p) as i64)),
                Index::Labeled(idx) => idx.labels()[p].clone(),
            })
            .collect();
        Index::Labeled(LabelIndex::new(labels, self.name().map(str::to_string)))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Index::Range { .. } => None,
            Index::Labeled(idx) => idx.name(),
        }
    }
}
