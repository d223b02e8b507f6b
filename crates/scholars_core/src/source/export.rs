//! CSV export of filtered context views.
//!
//! # Invariants
//! - Output starts with a UTF-8 BOM and a header row, even for zero rows.
//! - Columns follow [`CONTEXT_COLUMNS`], so an export reloads through the
//!   context reader unchanged.
//! - The file is written in a single call from a fully materialized buffer.

use super::normalize::UTF8_BOM;
use crate::model::context::{ContextRecord, CONTEXT_COLUMNS};
use csv::WriterBuilder;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// File name used when the caller does not choose one.
pub const EXPORT_FILE_NAME: &str = "filtered_context.csv";

#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Io { path: PathBuf, source: std::io::Error },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "failed to encode context rows: {err}"),
            Self::Io { path, source } => {
                write!(f, "failed to write export `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// Encodes context rows as BOM-prefixed CSV.
pub fn context_to_csv_bytes<'a, I>(rows: I) -> Result<Vec<u8>, ExportError>
where
    I: IntoIterator<Item = &'a ContextRecord>,
{
    let mut buffer = UTF8_BOM.to_vec();
    {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(&mut buffer);
        writer.write_record(CONTEXT_COLUMNS)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer
            .flush()
            .map_err(|err| ExportError::Csv(csv::Error::from(err)))?;
    }
    Ok(buffer)
}

/// Writes context rows to `path`, replacing any existing file.
///
/// Returns the number of data rows written.
pub fn export_context<'a, I>(rows: I, path: &Path) -> Result<usize, ExportError>
where
    I: IntoIterator<Item = &'a ContextRecord>,
{
    let rows: Vec<&ContextRecord> = rows.into_iter().collect();
    let bytes = context_to_csv_bytes(rows.iter().copied())?;

    if let Err(source) = fs::write(path, bytes) {
        error!(
            "event=context_export module=source status=error path={} error={}",
            path.display(),
            source
        );
        return Err(ExportError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    info!(
        "event=context_export module=source status=ok path={} rows={}",
        path.display(),
        rows.len()
    );
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::context_to_csv_bytes;
    use crate::model::context::ContextRecord;

    #[test]
    fn empty_export_still_has_bom_and_header() {
        let bytes = context_to_csv_bytes(std::iter::empty()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "\u{feff}chapter,place,Character1,Character2,Activity,snippet\n"
        );
    }

    #[test]
    fn absent_fields_are_written_as_empty_cells() {
        let row = ContextRecord::new(3, "Nanjing").with_characters("Fan Jin", None);
        let bytes = context_to_csv_bytes([&row]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.ends_with("3,Nanjing,Fan Jin,,,\n"));
    }
}
