//! CSV plumbing shared by the repositories.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DataError;

/// Reads every row of `path`, failing if any `required` column is absent.
pub(crate) fn read_rows<T: DeserializeOwned>(
    path: &Path,
    required: &[&'static str],
) -> Result<Vec<T>, DataError> {
    if !path.is_file() {
        return Err(DataError::MissingInput(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|e| DataError::io(path, e))?;
    read_rows_from(file, path, required)
}

/// Reads rows from any reader; `path` only labels errors.
pub(crate) fn read_rows_from<T: DeserializeOwned, R: Read>(
    source: R,
    path: &Path,
    required: &[&'static str],
) -> Result<Vec<T>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader.headers().map_err(|e| DataError::csv(path, e))?;
    if let Some(column) = required
        .iter()
        .copied()
        .find(|column| !headers.iter().any(|h| h == *column))
    {
        return Err(DataError::MissingColumn {
            path: path.to_path_buf(),
            column,
        });
    }

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| DataError::csv(path, e))
}

/// Writes `columns` as the header row followed by `rows`, creating parent
/// directories. The header is written even when there are no rows.
pub(crate) fn write_rows<T: Serialize>(
    path: &Path,
    columns: &[&str],
    rows: impl IntoIterator<Item = T>,
) -> Result<usize, DataError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DataError::io(path, e))?;
    }
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| DataError::csv(path, e))?;

    writer
        .write_record(columns)
        .map_err(|e| DataError::csv(path, e))?;
    let mut written = 0;
    for row in rows {
        writer.serialize(row).map_err(|e| DataError::csv(path, e))?;
        written += 1;
    }
    writer.flush().map_err(|e| DataError::io(path, e))?;
    Ok(written)
}
