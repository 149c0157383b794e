//! Rendering of pipeline results as CSV text.
//!
//! Output follows whatever row order the caller hands in; nothing is
//! re-sorted here. An input with no rows at all renders as the empty
//! string rather than a lone newline.

use csv::WriterBuilder;

use crate::assign::Partition;
use crate::error::Result;

/// Encodes rows of fields as CSV, one line per row.
///
/// Rows may have differing lengths. A row without any fields is
/// written as a single empty field so that it still occupies a line.
pub fn csv_string<R, F, S>(rows: R) -> Result<String>
where
    R: IntoIterator<Item = F>,
    F: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());
    let mut wrote_any = false;
    for row in rows {
        let mut fields = row.into_iter().peekable();
        if fields.peek().is_none() {
            writer.write_record([""])?;
        } else {
            writer.write_record(fields)?;
        }
        wrote_any = true;
    }
    if !wrote_any {
        return Ok(String::new());
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Rows for a labeled partition: each cluster becomes one row holding
/// the centroid label followed by its members.
pub fn partition_rows(partition: &Partition) -> Vec<Vec<String>> {
    partition
        .entries()
        .iter()
        .map(|(label, members)| {
            let mut row = Vec::with_capacity(members.len() + 1);
            row.push(label.clone());
            row.extend(members.iter().cloned());
            row
        })
        .collect()
}
