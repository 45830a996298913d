//! CSV serialization.

use crate::column::ColumnSpec;
use crate::value::Value;
use std::io::{self, Write};

/// Write one title line and one line per row. Every field is wrapped
/// in double quotes regardless of content, fields are joined by the
/// delimiter, lines are LF-terminated.
///
/// Quote characters inside a field are written as-is; the output is
/// not RFC 4180 escaped, so content embedding quotes or the delimiter
/// does not round-trip.
pub(crate) fn write_table<W: Write>(
    writer: &mut W,
    delimiter: char,
    columns: &[ColumnSpec],
    rows: &[Vec<Value>],
) -> io::Result<()> {
    let mut delim = [0u8; 4];
    let delim = delimiter.encode_utf8(&mut delim).as_bytes();

    for (i, spec) in columns.iter().enumerate() {
        if i > 0 {
            writer.write_all(delim)?;
        }
        write!(writer, "\"{}\"", spec.title)?;
    }
    writer.write_all(b"\n")?;

    for row in rows {
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                writer.write_all(delim)?;
            }
            write!(writer, "\"{value}\"")?;
        }
        writer.write_all(b"\n")?;
    }

    Ok(())
}
