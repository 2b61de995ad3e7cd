//! CSV export of a loaded table.

use std::io::Write;
use std::path::Path;

use crate::error::LoadResult;
use crate::types::LoadedTable;

/// Write `table` as CSV: a header of labels, then one record per matrix row.
///
/// `NaN` cells are written as empty fields; everything else uses `f32` display formatting, so
/// category ids come out as plain integers.
pub fn write_table_csv<W: Write>(table: &LoadedTable, writer: W) -> LoadResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    write_records(table, &mut wtr)
}

/// Write `table` as CSV to `path`, creating or truncating the file.
pub fn write_table_csv_to_path(table: &LoadedTable, path: impl AsRef<Path>) -> LoadResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    write_records(table, &mut wtr)
}

fn write_records<W: Write>(table: &LoadedTable, wtr: &mut csv::Writer<W>) -> LoadResult<()> {
    wtr.write_record(&table.labels)?;
    let mut record: Vec<String> = Vec::with_capacity(table.column_count());
    for row in table.matrix.iter_rows() {
        record.clear();
        record.extend(row.iter().map(|v| format_cell(*v)));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

fn format_cell(v: f32) -> String {
    if v.is_nan() { String::new() } else { v.to_string() }
}
