use std::path::Path;

use crate::locale::LocaleMap;

/// Errors that can occur while validating the input file. Any of them
/// aborts the run before a single remote call is made.
#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error("missing required locale columns: {}", .0.join(", "))]
    MissingHeaders(Vec<String>),

    #[error("no data rows found beyond the header")]
    EmptyData,

    #[error("failed to read CSV: {0}")]
    Read(String),
}

/// First pass over the file: confirm every configured locale code appears
/// in the header row and at least one data row follows it.
///
/// The reader (and the file handle under it) is dropped before this
/// returns; the processing pass opens the file independently.
pub fn validate(path: &Path, locales: &LocaleMap) -> Result<(), ValidateError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| ValidateError::Read(e.to_string()))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ValidateError::Read(e.to_string()))?
        .iter()
        .map(|header| header.trim().to_owned())
        .collect();

    let missing: Vec<String> = locales
        .codes()
        .filter(|code| !headers.iter().any(|header| header == code))
        .map(str::to_owned)
        .collect();

    if !missing.is_empty() {
        return Err(ValidateError::MissingHeaders(missing));
    }

    match reader.records().next() {
        Some(Ok(_)) => Ok(()),
        Some(Err(e)) => Err(ValidateError::Read(e.to_string())),
        None => Err(ValidateError::EmptyData),
    }
}
