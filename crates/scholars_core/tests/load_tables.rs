use scholars_core::source::read_contexts;
use scholars_core::{DataContext, DataSourceConfig, LoadError, TableKind, TableLoadError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PLACES: &str = "\u{feff} place , lat ,lon\u{200b}\nNanjing,32.06,118.79\nHangzhou,30.27,120.15\nWuhe,nan,\n";
const FREQUENCY: &str = "place,chapter,count,per_1k_chars\nNanjing,1,3,0.5\nNanjing,2,5,0.8\nHangzhou,1,2,0.3\nWuhe,3,1,0.1\n";
const CONTEXT: &str = "\u{feff}chapter,place,Character1,Character2,Activity,snippet\n\
1,Nanjing,Fan Jin,nan,exam,\"He went to the capital, then returned.\"\n\
2,Nanjing,Zhou Jin,Fan Jin,visit,A visit\n\
3,Hangzhou,NaN,,travel,Nobody named\n";

fn write_dataset(dir: &Path, places: &str, frequency: &str, context: &str) -> DataSourceConfig {
    let config = DataSourceConfig::from_dir(dir);
    fs::write(config.places_path(), places).unwrap();
    fs::write(config.frequency_path(), frequency).unwrap();
    fs::write(config.context_path(), context).unwrap();
    config
}

#[test]
fn load_trims_headers_and_strips_bom() {
    let dir = TempDir::new().unwrap();
    let config = write_dataset(dir.path(), PLACES, FREQUENCY, CONTEXT);

    let ctx = DataContext::load(&config).unwrap();

    assert_eq!(ctx.places().len(), 3);
    assert_eq!(ctx.places()[0].name, "Nanjing");
    assert_eq!(ctx.places()[0].lon, Some(118.79));
    assert_eq!(ctx.places()[2].lat, None);
    assert_eq!(ctx.contexts().len(), 3);
}

#[test]
fn load_normalizes_null_sentinels_to_absent_values() {
    let dir = TempDir::new().unwrap();
    let config = write_dataset(dir.path(), PLACES, FREQUENCY, CONTEXT);

    let ctx = DataContext::load(&config).unwrap();
    let contexts = ctx.contexts();

    assert_eq!(contexts[0].record.character2, None);
    assert_eq!(
        contexts[0].record.snippet.as_deref(),
        Some("He went to the capital, then returned.")
    );
    assert_eq!(contexts[2].record.character1, None);
    assert_eq!(contexts[2].record.character2, None);
    assert_eq!(ctx.quality().contexts_without_character, 1);
    assert_eq!(ctx.quality().places_without_coordinates, 1);
}

#[test]
fn missing_tables_fail_the_whole_load_with_one_message() {
    let dir = TempDir::new().unwrap();
    let config = DataSourceConfig::from_dir(dir.path());
    fs::write(config.frequency_path(), FREQUENCY).unwrap();

    let err: LoadError = DataContext::load(&config).unwrap_err();

    let tables: Vec<TableKind> = err.failures().iter().map(TableLoadError::table).collect();
    assert_eq!(tables, vec![TableKind::Places, TableKind::Context]);
    let message = err.to_string();
    assert!(message.contains("places table not found"));
    assert!(message.contains("context table not found"));
}

#[test]
fn missing_required_column_is_a_load_error() {
    let dir = TempDir::new().unwrap();
    let config = write_dataset(
        dir.path(),
        PLACES,
        "place,chapter,per_1k_chars\nNanjing,1,0.5\n",
        CONTEXT,
    );

    let err = DataContext::load(&config).unwrap_err();

    assert_eq!(err.failures().len(), 1);
    match &err.failures()[0] {
        TableLoadError::MissingColumns { table, columns, .. } => {
            assert_eq!(*table, TableKind::ChapterFrequency);
            assert_eq!(columns, &vec!["count".to_string()]);
        }
        other => panic!("unexpected failure: {other}"),
    }
}

#[test]
fn invalid_values_report_the_line() {
    let dir = TempDir::new().unwrap();
    let config = write_dataset(
        dir.path(),
        PLACES,
        "place,chapter,count,per_1k_chars\nNanjing,1,3,0.5\nNanjing,0,5,0.8\n",
        CONTEXT,
    );

    let err = DataContext::load(&config).unwrap_err();

    match &err.failures()[0] {
        TableLoadError::InvalidRow { line, message, .. } => {
            assert_eq!(*line, 3);
            assert!(message.contains("chapter"));
        }
        other => panic!("unexpected failure: {other}"),
    }
}

#[test]
fn count_sums_that_overflow_fail_the_load() {
    let dir = TempDir::new().unwrap();
    let config = write_dataset(
        dir.path(),
        PLACES,
        "place,chapter,count,per_1k_chars\nNanjing,1,18446744073709551615,0.1\nNanjing,2,1,0.1\n",
        CONTEXT,
    );

    let err = DataContext::load(&config).unwrap_err();

    assert_eq!(err.failures().len(), 1);
    assert!(matches!(
        err.failures()[0],
        TableLoadError::CountOverflow {
            table: TableKind::ChapterFrequency,
            ..
        }
    ));
    assert!(err
        .to_string()
        .contains("count sum for place `Nanjing` overflows"));
}

#[test]
fn ragged_rows_are_a_csv_error() {
    let dir = TempDir::new().unwrap();
    let config = write_dataset(dir.path(), "place,lat,lon\nNanjing,32.06\n", FREQUENCY, CONTEXT);

    let err = DataContext::load(&config).unwrap_err();

    assert!(matches!(
        err.failures()[0],
        TableLoadError::Csv {
            table: TableKind::Places,
            ..
        }
    ));
}

#[test]
fn value_trimming_can_be_disabled() {
    let dir = TempDir::new().unwrap();
    let frequency = "place,chapter,count,per_1k_chars\n Nanjing ,1,3,0.5\n";
    let mut config = write_dataset(dir.path(), PLACES, frequency, CONTEXT);

    let trimmed = DataContext::load(&config).unwrap();
    assert!(trimmed.chapter_frequencies()[0].has_coordinates());
    assert_eq!(trimmed.quality().chapter_join_misses, 0);

    config.trim_values = false;
    let untrimmed = DataContext::load(&config).unwrap();
    assert_eq!(untrimmed.chapter_frequencies()[0].record.place, " Nanjing ");
    assert!(!untrimmed.chapter_frequencies()[0].has_coordinates());
    assert_eq!(untrimmed.quality().chapter_join_misses, 1);
}

#[test]
fn context_table_without_secondary_character_column_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("context.csv");
    fs::write(
        &path,
        "chapter,place,Character1,Activity,snippet\n4,Hangzhou,Kuang Chaoren,travel,On the road\n",
    )
    .unwrap();

    let rows = read_contexts(&path, true).unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].character1.as_deref(), Some("Kuang Chaoren"));
    assert_eq!(rows[0].character2, None);
}

#[test]
fn cold_reload_produces_identical_derived_tables() {
    let dir = TempDir::new().unwrap();
    let config = write_dataset(dir.path(), PLACES, FREQUENCY, CONTEXT);

    let first = DataContext::load(&config).unwrap();
    let second = DataContext::load(&config).unwrap();

    assert_eq!(first.total_frequencies(), second.total_frequencies());
    assert_eq!(first.chapter_frequencies(), second.chapter_frequencies());
    assert_eq!(first.contexts(), second.contexts());
    assert_eq!(first.valid_chapters(), second.valid_chapters());
    assert_eq!(first.graph_snapshot(), second.graph_snapshot());
}
