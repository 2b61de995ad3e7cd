//! Line source: turns text into a [`RawTable`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{LoadError, LoadResult};
use crate::types::RawTable;

use super::tokenize::split_fields;

/// Read a raw table from a file.
pub fn read_raw_table_from_path(path: impl AsRef<Path>) -> LoadResult<RawTable> {
    let file = File::open(path)?;
    read_raw_table(BufReader::new(file))
}

/// Read a raw table from buffered text.
///
/// Rules:
///
/// - The first line is the header; a source with no lines fails with
///   [`LoadError::EmptyInput`].
/// - Lines end with `\n` or `\r\n`; the terminator is removed.
/// - Data lines that are empty once the terminator is removed are skipped.
/// - Bytes that are not valid UTF-8 are replaced, not rejected.
///
/// A header with no data rows is returned as-is; the engine reports it as empty input once
/// columns have been resolved.
pub fn read_raw_table<R: BufRead>(mut reader: R) -> LoadResult<RawTable> {
    let mut buf = Vec::new();

    let headers = match next_line(&mut reader, &mut buf)? {
        Some(line) => split_fields(&line),
        None => {
            return Err(LoadError::EmptyInput {
                message: "source has no header line".to_string(),
            });
        }
    };

    let mut rows = Vec::new();
    while let Some(line) = next_line(&mut reader, &mut buf)? {
        if line.is_empty() {
            continue;
        }
        rows.push(split_fields(&line));
    }

    Ok(RawTable::new(headers, rows))
}

fn next_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> LoadResult<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(buf).into_owned()))
}
