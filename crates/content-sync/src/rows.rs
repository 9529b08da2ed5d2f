use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use crate::identity;
use crate::locale::{DEFAULT_LOCALE, LocaleMap};

/// Errors that can occur while streaming rows out of the file. Either
/// variant is fatal to the whole run.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("could not open {path}: {message}")]
    Open { path: String, message: String },

    #[error("malformed record at row {row}: {message}")]
    Record { row: usize, message: String },
}

/// One data row: a complete locale→value mapping plus its 1-based
/// physical position in the file (header included).
#[derive(Debug, Clone)]
pub struct CsvRow {
    row_number: usize,
    values: HashMap<String, String>,
}

impl CsvRow {
    pub fn new(row_number: usize, values: HashMap<String, String>) -> Self {
        Self { row_number, values }
    }

    pub fn row_number(&self) -> usize {
        self.row_number
    }

    /// The raw value for a locale code. Missing columns read as empty,
    /// never as absent.
    pub fn value(&self, code: &str) -> &str {
        self.values.get(code).map_or("", String::as_str)
    }

    /// The item name for this row (§ identity): the `default` column
    /// value, or the positional fallback when blank.
    pub fn item_name(&self) -> String {
        identity::item_name(self.value(DEFAULT_LOCALE), self.row_number)
    }
}

/// Streaming reader over the data rows of a CSV file.
///
/// The file is read headerless with the configured locale order assigned
/// to columns positionally; the first physical record (the actual header
/// line) is skipped before anything is yielded. One pass, not
/// restartable — a second pass requires reopening the source.
pub struct RowReader {
    records: csv::StringRecordsIntoIter<File>,
    codes: Vec<String>,
    row_number: usize,
}

/// Open a row reader over `path` using the locale order from `locales`
/// as column identity.
pub fn read_rows(path: &Path, locales: &LocaleMap) -> Result<RowReader, ReadError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| ReadError::Open {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    Ok(RowReader {
        records: reader.into_records(),
        codes: locales.codes().map(str::to_owned).collect(),
        row_number: 0,
    })
}

impl Iterator for RowReader {
    type Item = Result<CsvRow, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = self.records.next()?;
            self.row_number += 1;

            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    return Some(Err(ReadError::Record {
                        row: self.row_number,
                        message: e.to_string(),
                    }));
                }
            };

            // Row 1 is the header line; it supplies column identity only.
            if self.row_number == 1 {
                continue;
            }

            let values = self
                .codes
                .iter()
                .enumerate()
                .map(|(index, code)| {
                    (code.clone(), record.get(index).unwrap_or("").to_owned())
                })
                .collect();

            return Some(Ok(CsvRow {
                row_number: self.row_number,
                values,
            }));
        }
    }
}
