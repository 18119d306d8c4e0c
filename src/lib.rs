//! tabrs: a small in-memory tabular data engine.
//!
//! Typed columnar storage with explicit null bitmaps, label or
//! positional row indices, boolean masking with three-valued logic,
//! element-wise transformation, split-apply-combine grouping and
//! stable multi-key sorting. Raw rows come from an external reader
//! (adapters in [`io`]); finished tables go to an external renderer
//! through the [`vis`] seam.
//!
//! ```
//! use tabrs::{agg, ColumnType, LoadOptions, RawRows, Table};
//!
//! let raw = RawRows::new(
//!     vec!["lang".to_string(), "likes".to_string()],
//!     vec![
//!         vec!["en".to_string(), "10".to_string()],
//!         vec!["es".to_string(), "3".to_string()],
//!         vec!["en".to_string(), "5".to_string()],
//!     ],
//! )
//! .unwrap();
//! let options = LoadOptions::new(["lang", "likes"]).dtype("likes", ColumnType::Int);
//! let posts = Table::from_records(&raw, &options).unwrap();
//!
//! let per_lang = posts.group_by(&["lang"]).unwrap().aggregate(&["likes"], agg::sum).unwrap();
//! assert_eq!(per_lang.row_count(), 2);
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod groupby;
pub mod index;
pub mod io;
pub mod table;
pub mod vis;

mod sort;
mod transform;

// Re-export commonly used types
pub use cell::{Cell, ColumnType};
pub use column::{
    BitMask, BoolColumn, Column, Element, FloatColumn, IntColumn, StrColumn, TimestampColumn,
};
pub use error::{Error, Result};
pub use groupby::{agg, GroupedView};
pub use index::{Index, Label, LabelIndex};
pub use table::{LoadOptions, Mask, RawRows, Table};
pub use vis::{PlotConfig, PlotKind, Renderer};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
