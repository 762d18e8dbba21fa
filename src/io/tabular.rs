//! Excerpt → notary CSV table
//!
//! Columns `excerpt`, `notary`, `notary_name`. Empty cells deserialize to
//! `None`; spreadsheet `NaN` markers are left for the linker to skip.

use super::IoError;
use crate::adapter::NotaryRow;
use std::io::Read;
use std::path::Path;

/// Read every row of a notary table
pub fn read_notary_rows(reader: impl Read) -> Result<Vec<NotaryRow>, IoError> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut rows = Vec::new();
    for record in csv.deserialize::<NotaryRow>() {
        rows.push(record?);
    }
    Ok(rows)
}

pub fn read_notary_rows_file(path: &Path) -> Result<Vec<NotaryRow>, IoError> {
    let file = std::fs::File::open(path).map_err(|e| IoError::file(path, e))?;
    read_notary_rows(std::io::BufReader::new(file))
}
