//! JSON adapter: record-oriented arrays of objects.

use std::io::Read;

use serde_json::{Map, Number, Value};

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::table::{RawRows, Table};

/// Serialize a table to an array of JSON objects, one per row.
/// Non-finite floats serialize as null.
pub fn to_json_records(table: &Table) -> Result<Value> {
    let mut records = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let mut object = Map::new();
        for column in table.columns() {
            object.insert(column.name().to_string(), cell_to_json(&column.cell(row)?));
        }
        records.push(Value::Object(object));
    }
    Ok(Value::Array(records))
}

/// Serialize a table to a JSON string of records.
pub fn to_json_string(table: &Table) -> Result<String> {
    Ok(serde_json::to_string(&to_json_records(table)?)?)
}

/// Convert an array of JSON objects into raw rows. Headers are the
/// keys of the first record, in order; missing keys read as null.
pub fn from_json_records(value: &Value) -> Result<RawRows> {
    let records = value
        .as_array()
        .ok_or_else(|| Error::InvalidInput("expected a JSON array of objects".to_string()))?;
    let first = match records.first() {
        Some(Value::Object(object)) => object,
        Some(_) => {
            return Err(Error::InvalidInput(
                "expected a JSON array of objects".to_string(),
            ))
        }
        None => return RawRows::new(Vec::new(), Vec::new()),
    };
    let headers: Vec<String> = first.keys().cloned().collect();

    let mut rows = Vec::with_capacity(records.len());
    for record in records {
        let object = record
            .as_object()
            .ok_or_else(|| Error::InvalidInput("expected a JSON array of objects".to_string()))?;
        let row = headers
            .iter()
            .map(|key| object.get(key).map_or(String::new(), json_to_raw))
            .collect();
        rows.push(row);
    }
    RawRows::new(headers, rows)
}

/// Read a JSON array of records into raw rows.
pub fn read_json<R: Read>(reader: R) -> Result<RawRows> {
    let value: Value = serde_json::from_reader(reader)?;
    from_json_records(&value)
}

fn cell_to_json(cell: &Cell) -> Value {
    match cell {
        Cell::Null => Value::Null,
        Cell::Int(v) => Value::Number((*v).into()),
        Cell::Float(v) => Number::from_f64(*v).map_or(Value::Null, Value::Number),
        Cell::Bool(v) => Value::Bool(*v),
        Cell::Str(v) => Value::String(v.clone()),
        Cell::Timestamp(v) => Value::String(v.format("%Y-%m-%d %H:%M:%S").to_string()),
    }
}

fn json_to_raw(value: &Value) -> String {
    match value {
        // empty string is the null sentinel on the raw-row contract
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
