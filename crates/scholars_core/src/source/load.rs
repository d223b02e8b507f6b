//! CSV readers for the three source tables.
//!
//! # Responsibility
//! - Decode UTF-8 delimited text (optional BOM) with a header row.
//! - Validate the header shape and every row's typed values.
//! - Convert raw text cells into model records.
//!
//! # Invariants
//! - Headers are normalized before columns are looked up.
//! - Text cells go through [`normalize_cell`] before any other check.
//! - `load_tables` attempts every table, then fails with all failures or
//!   succeeds with all tables.

use super::normalize::{normalize_cell, normalize_header, present, strip_bom};
use super::{LoadError, TableKind, TableLoadError};
use crate::config::DataSourceConfig;
use crate::model::context::ContextRecord;
use crate::model::frequency::ChapterFrequency;
use crate::model::place::Place;
use crate::pipeline::aggregate::check_count_sums;
use csv::{ReaderBuilder, StringRecord};
use log::{debug, error, info};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Instant;

const PLACE_COLUMNS: [&str; 3] = ["place", "lat", "lon"];
const FREQUENCY_COLUMNS: [&str; 4] = ["place", "chapter", "count", "per_1k_chars"];
// `Character2` is optional.
const CONTEXT_REQUIRED_COLUMNS: [&str; 5] = ["chapter", "place", "Character1", "Activity", "snippet"];

/// The three tables as loaded, before any derivation.
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub places: Vec<Place>,
    pub chapter_frequencies: Vec<ChapterFrequency>,
    pub contexts: Vec<ContextRecord>,
}

#[derive(Debug, Deserialize)]
struct RawPlaceRow {
    place: Option<String>,
    lat: Option<String>,
    lon: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFrequencyRow {
    place: Option<String>,
    chapter: Option<String>,
    count: Option<String>,
    per_1k_chars: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawContextRow {
    chapter: Option<String>,
    place: Option<String>,
    #[serde(rename = "Character1")]
    character1: Option<String>,
    #[serde(rename = "Character2", default)]
    character2: Option<String>,
    #[serde(rename = "Activity")]
    activity: Option<String>,
    snippet: Option<String>,
}

/// Loads all three tables named by `config`.
///
/// # Errors
/// - Returns one [`LoadError`] listing every table that failed.
pub fn load_tables(config: &DataSourceConfig) -> Result<RawTables, LoadError> {
    let started_at = Instant::now();
    info!(
        "event=tables_load module=source status=start data_dir={} trim_values={}",
        config.data_dir.display(),
        config.trim_values
    );

    let places = read_places(&config.places_path(), config.trim_values);
    let chapter_frequencies = read_chapter_frequencies(&config.frequency_path(), config.trim_values);
    let contexts = read_contexts(&config.context_path(), config.trim_values);

    match (places, chapter_frequencies, contexts) {
        (Ok(places), Ok(chapter_frequencies), Ok(contexts)) => {
            info!(
                "event=tables_load module=source status=ok duration_ms={} places={} chapter_rows={} context_rows={}",
                started_at.elapsed().as_millis(),
                places.len(),
                chapter_frequencies.len(),
                contexts.len()
            );
            Ok(RawTables {
                places,
                chapter_frequencies,
                contexts,
            })
        }
        (places, chapter_frequencies, contexts) => {
            let failures: Vec<TableLoadError> = [
                places.err(),
                chapter_frequencies.err(),
                contexts.err(),
            ]
            .into_iter()
            .flatten()
            .collect();
            let err = LoadError::new(failures);
            error!(
                "event=tables_load module=source status=error duration_ms={} failed_tables={} error={}",
                started_at.elapsed().as_millis(),
                err.failures().len(),
                err
            );
            Err(err)
        }
    }
}

/// Reads the gazetteer table (`place, lat, lon`).
pub fn read_places(path: &Path, trim_values: bool) -> Result<Vec<Place>, TableLoadError> {
    let table = TableKind::Places;
    read_rows::<RawPlaceRow>(table, path, &PLACE_COLUMNS)?
        .into_iter()
        .map(|(line, row)| {
            place_from_raw(row, trim_values).map_err(|message| invalid_row(table, path, line, message))
        })
        .collect()
}

/// Reads the per-chapter frequency table (`place, chapter, count, per_1k_chars`).
pub fn read_chapter_frequencies(
    path: &Path,
    trim_values: bool,
) -> Result<Vec<ChapterFrequency>, TableLoadError> {
    let table = TableKind::ChapterFrequency;
    let rows = read_rows::<RawFrequencyRow>(table, path, &FREQUENCY_COLUMNS)?
        .into_iter()
        .map(|(line, row)| {
            frequency_from_raw(row, trim_values)
                .map_err(|message| invalid_row(table, path, line, message))
        })
        .collect::<Result<Vec<_>, _>>()?;
    check_count_sums(&rows).map_err(|source| TableLoadError::CountOverflow {
        table,
        path: path.to_path_buf(),
        source,
    })?;
    Ok(rows)
}

/// Reads the context table; also reads files produced by the exporter.
pub fn read_contexts(path: &Path, trim_values: bool) -> Result<Vec<ContextRecord>, TableLoadError> {
    let table = TableKind::Context;
    read_rows::<RawContextRow>(table, path, &CONTEXT_REQUIRED_COLUMNS)?
        .into_iter()
        .map(|(line, row)| {
            context_from_raw(row, trim_values).map_err(|message| invalid_row(table, path, line, message))
        })
        .collect()
}

fn read_rows<R: DeserializeOwned>(
    table: TableKind,
    path: &Path,
    required: &[&str],
) -> Result<Vec<(u64, R)>, TableLoadError> {
    if !path.is_file() {
        return Err(TableLoadError::Missing {
            table,
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|source| TableLoadError::Io {
        table,
        path: path.to_path_buf(),
        source,
    })?;
    let csv_error = |source: csv::Error| TableLoadError::Csv {
        table,
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(strip_bom(&bytes));
    let headers: StringRecord = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(normalize_header)
        .collect();

    let missing: Vec<String> = required
        .iter()
        .filter(|column| !headers.iter().any(|header| header == **column))
        .map(|column| (*column).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TableLoadError::MissingColumns {
            table,
            path: path.to_path_buf(),
            columns: missing,
        });
    }
    reader.set_headers(headers.clone());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map_or(0, |position| position.line());
        let row = record.deserialize::<R>(Some(&headers)).map_err(csv_error)?;
        rows.push((line, row));
    }

    debug!(
        "event=table_read module=source status=ok table={} rows={} path={}",
        table,
        rows.len(),
        path.display()
    );
    Ok(rows)
}

fn invalid_row(table: TableKind, path: &Path, line: u64, message: String) -> TableLoadError {
    TableLoadError::InvalidRow {
        table,
        path: path.to_path_buf(),
        line,
        message,
    }
}

fn place_from_raw(row: RawPlaceRow, trim_values: bool) -> Result<Place, String> {
    Ok(Place {
        name: required_text(row.place, "place", trim_values)?,
        lat: parse_coordinate(row.lat.as_deref(), "lat")?,
        lon: parse_coordinate(row.lon.as_deref(), "lon")?,
    })
}

fn frequency_from_raw(row: RawFrequencyRow, trim_values: bool) -> Result<ChapterFrequency, String> {
    Ok(ChapterFrequency {
        place: required_text(row.place, "place", trim_values)?,
        chapter: parse_chapter(row.chapter.as_deref())?,
        count: parse_whole(row.count.as_deref(), "count")?,
        per_1k_chars: parse_number(row.per_1k_chars.as_deref(), "per_1k_chars")?,
    })
}

fn context_from_raw(row: RawContextRow, trim_values: bool) -> Result<ContextRecord, String> {
    Ok(ContextRecord {
        chapter: parse_chapter(row.chapter.as_deref())?,
        place: normalize_cell(row.place, trim_values),
        character1: normalize_cell(row.character1, trim_values),
        character2: normalize_cell(row.character2, trim_values),
        activity: normalize_cell(row.activity, trim_values),
        snippet: normalize_cell(row.snippet, trim_values),
    })
}

fn required_text(raw: Option<String>, column: &str, trim_values: bool) -> Result<String, String> {
    normalize_cell(raw, trim_values).ok_or_else(|| format!("column `{column}` is empty"))
}

fn parse_coordinate(raw: Option<&str>, column: &str) -> Result<Option<f64>, String> {
    let Some(value) = raw.and_then(present) else {
        return Ok(None);
    };
    let parsed: f64 = value
        .parse()
        .map_err(|_| format!("column `{column}` is not a number: `{value}`"))?;
    Ok(parsed.is_finite().then_some(parsed))
}

fn parse_number(raw: Option<&str>, column: &str) -> Result<f64, String> {
    parse_coordinate(raw, column)?.ok_or_else(|| format!("column `{column}` is empty"))
}

// Integer columns may arrive as `3.0` when the exporter widened them to floats.
fn parse_whole(raw: Option<&str>, column: &str) -> Result<u64, String> {
    let value = raw
        .and_then(present)
        .ok_or_else(|| format!("column `{column}` is empty"))?;
    if let Ok(parsed) = value.parse::<u64>() {
        return Ok(parsed);
    }
    match value.parse::<f64>() {
        Ok(parsed) if parsed >= 0.0 && parsed.fract() == 0.0 && parsed <= u64::MAX as f64 => {
            Ok(parsed as u64)
        }
        _ => Err(format!(
            "column `{column}` is not a non-negative integer: `{value}`"
        )),
    }
}

fn parse_chapter(raw: Option<&str>) -> Result<u32, String> {
    let chapter = parse_whole(raw, "chapter")?;
    u32::try_from(chapter)
        .ok()
        .filter(|chapter| *chapter > 0)
        .ok_or_else(|| format!("column `chapter` is not a positive integer: `{chapter}`"))
}
