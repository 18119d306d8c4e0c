//! Element-wise transformation of columns with statically typed,
//! fallible function values.

use crate::column::{Column, Element};
use crate::error::{Error, Result};

impl Column {
    /// Apply `f` to every value, producing a new column under `name`.
    ///
    /// The input column must not contain nulls: hitting one aborts
    /// with `Error::Transform` naming the offending row. Callers
    /// either drop nulls first ([`crate::table::Table::drop_nulls`])
    /// or use [`Column::apply_skip_null`]. A failing `f` also aborts
    /// the whole apply; no partial column is ever returned.
    pub fn apply<T, U, F>(&self, name: &str, f: F) -> Result<Column>
    where
        T: Element,
        U: Element,
        F: Fn(&T) -> Result<U>,
    {
        let (values, nulls) = T::unpack(self)?;
        let mut out = Vec::with_capacity(values.len());
        for (row, value) in values.iter().enumerate() {
            if nulls.is_some_and(|m| m.is_null(row)) {
                return Err(Error::Transform {
                    row,
                    message: "null value; drop nulls first or use apply_skip_null".to_string(),
                });
            }
            let mapped = f(value).map_err(|e| Error::Transform {
                row,
                message: e.to_string(),
            })?;
            out.push(mapped);
        }
        let len = out.len();
        Ok(U::pack(name, out, vec![false; len]))
    }

    /// Like [`Column::apply`], but null positions stay null and `f`
    /// is never invoked for them.
    pub fn apply_skip_null<T, U, F>(&self, name: &str, f: F) -> Result<Column>
    where
        T: Element,
        U: Element,
        F: Fn(&T) -> Result<U>,
    {
        let (values, nulls) = T::unpack(self)?;
        let mut out = Vec::with_capacity(values.len());
        let mut out_nulls = Vec::with_capacity(values.len());
        for (row, value) in values.iter().enumerate() {
            if nulls.is_some_and(|m| m.is_null(row)) {
                out.push(U::default());
                out_nulls.push(true);
                continue;
            }
            let mapped = f(value).map_err(|e| Error::Transform {
                row,
                message: e.to_string(),
            })?;
            out.push(mapped);
            out_nulls.push(false);
        }
        Ok(U::pack(name, out, out_nulls))
    }
}
