//! CSV adapter: delimited text in, [`RawRows`] out, and back.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::Result;
use crate::table::{RawRows, Table};

/// Read CSV with a header row into raw rows.
pub fn read_csv<R: Read>(reader: R) -> Result<RawRows> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);
    let headers: Vec<String> = rdr.headers()?.iter().map(|s| s.to_string()).collect();
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    RawRows::new(headers, rows)
}

/// Read a CSV file into raw rows.
pub fn read_csv_path(path: impl AsRef<Path>) -> Result<RawRows> {
    read_csv(File::open(path)?)
}

/// Write a table as CSV, index first. Nulls become empty fields.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let index_name = table.index().name().unwrap_or("index").to_string();
    let mut header = vec![index_name];
    header.extend(table.column_names().iter().map(|n| n.to_string()));
    wtr.write_record(&header)?;

    for row in 0..table.row_count() {
        let mut record = vec![table.index().label(row)?.to_string()];
        for column in table.columns() {
            record.push(column.cell(row)?.to_string());
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write a table to a CSV file, index first.
pub fn write_csv_path(table: &Table, path: impl AsRef<Path>) -> Result<()> {
    write_csv(table, File::create(path)?)
}
