//! Source table I/O: loading the three CSV inputs and exporting views.
//!
//! # Responsibility
//! - Read the gazetteer, chapter-frequency and context tables.
//! - Normalize headers and null sentinels before any other logic runs.
//! - Write filtered context views back out as CSV.
//!
//! # Invariants
//! - A load either returns all three tables or fails as a whole.
//! - Load failures are reported as one aggregated [`LoadError`].

use crate::pipeline::aggregate::CountOverflow;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod export;
mod load;
pub mod normalize;

pub use export::{context_to_csv_bytes, export_context, ExportError, EXPORT_FILE_NAME};
pub use load::{load_tables, read_chapter_frequencies, read_contexts, read_places, RawTables};

/// The three input tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Places,
    ChapterFrequency,
    Context,
}

impl TableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Places => "places",
            Self::ChapterFrequency => "chapter_frequency",
            Self::Context => "context",
        }
    }
}

impl Display for TableKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to load one table.
#[derive(Debug)]
pub enum TableLoadError {
    /// The source file does not exist.
    Missing { table: TableKind, path: PathBuf },
    Io {
        table: TableKind,
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file is not well-formed delimited text.
    Csv {
        table: TableKind,
        path: PathBuf,
        source: csv::Error,
    },
    /// Required header columns are absent after header trimming.
    MissingColumns {
        table: TableKind,
        path: PathBuf,
        columns: Vec<String>,
    },
    /// A row parsed as text but holds an invalid value.
    InvalidRow {
        table: TableKind,
        path: PathBuf,
        line: u64,
        message: String,
    },
    /// Every row is valid but a per-place or per-chapter count sum overflows.
    CountOverflow {
        table: TableKind,
        path: PathBuf,
        source: CountOverflow,
    },
}

impl TableLoadError {
    pub fn table(&self) -> TableKind {
        match self {
            Self::Missing { table, .. }
            | Self::Io { table, .. }
            | Self::Csv { table, .. }
            | Self::MissingColumns { table, .. }
            | Self::InvalidRow { table, .. }
            | Self::CountOverflow { table, .. } => *table,
        }
    }
}

impl Display for TableLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing { table, path } => {
                write!(f, "{table} table not found at `{}`", path.display())
            }
            Self::Io {
                table,
                path,
                source,
            } => write!(f, "{table} table at `{}` is unreadable: {source}", path.display()),
            Self::Csv {
                table,
                path,
                source,
            } => write!(
                f,
                "{table} table at `{}` is not valid delimited text: {source}",
                path.display()
            ),
            Self::MissingColumns {
                table,
                path,
                columns,
            } => write!(
                f,
                "{table} table at `{}` is missing columns: {}",
                path.display(),
                columns.join(", ")
            ),
            Self::InvalidRow {
                table,
                path,
                line,
                message,
            } => write!(
                f,
                "{table} table at `{}` line {line}: {message}",
                path.display()
            ),
            Self::CountOverflow {
                table,
                path,
                source,
            } => write!(f, "{table} table at `{}`: {source}", path.display()),
        }
    }
}

impl Error for TableLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::CountOverflow { source, .. } => Some(source),
            Self::Missing { .. } | Self::MissingColumns { .. } | Self::InvalidRow { .. } => None,
        }
    }
}

/// Fatal load failure covering every table that could not be loaded.
#[derive(Debug)]
pub struct LoadError {
    failures: Vec<TableLoadError>,
}

impl LoadError {
    pub fn new(failures: Vec<TableLoadError>) -> Self {
        Self { failures }
    }

    pub fn failures(&self) -> &[TableLoadError] {
        &self.failures
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "data loading failed")?;
        for (idx, failure) in self.failures.iter().enumerate() {
            let separator = if idx == 0 { ": " } else { "; " };
            write!(f, "{separator}{failure}")?;
        }
        Ok(())
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.failures.first().map(|err| err as &(dyn Error + 'static))
    }
}

impl From<TableLoadError> for LoadError {
    fn from(value: TableLoadError) -> Self {
        Self::new(vec![value])
    }
}
