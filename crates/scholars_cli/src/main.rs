//! Command-line front end over `scholars_core`.
//!
//! # Responsibility
//! - Load the dataset once per invocation and answer one query as JSON.
//! - Export filtered context views on request.
//!
//! ## Usage
//!
//! ```sh
//! scholars --data-dir data overview
//! scholars --data-dir data chapter 3
//! scholars --data-dir data context --place Hangzhou --export filtered_context.csv
//! ```

use clap::{Parser, Subcommand};
use log::info;
use scholars_core::{
    default_log_level, export_context, init_logging, ContextFilter, DataContext,
    DataSourceConfig, LogTarget,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "scholars", version, about = "Query the Scholars place-mention dataset")]
struct Args {
    /// Directory holding the three source tables (overrides SCHOLARS_DATA_DIR).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep leading/trailing whitespace in values; only headers are trimmed.
    #[arg(long)]
    keep_value_padding: bool,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files; stderr when omitted.
    #[arg(long)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Book-wide totals of geocoded places.
    Overview,
    /// Chapter activity summary and the selectable chapters.
    Chapters,
    /// Geocoded places mentioned in one chapter.
    Chapter { number: u32 },
    /// Context snippets filtered by place and primary character.
    Context {
        #[arg(long)]
        place: Option<String>,
        #[arg(long)]
        character: Option<String>,
        /// Write the filtered rows as CSV to this path.
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Character-place relationship graph.
    Graph,
    /// Gazetteer place names and load-time data quality findings.
    Places,
}

#[derive(Serialize)]
struct ChaptersOutput<'a> {
    summary: &'a [scholars_core::ChapterSummary],
    valid_chapters: &'a [u32],
}

#[derive(Serialize)]
struct PlacesOutput<'a> {
    places: Vec<&'a str>,
    quality: &'a scholars_core::DataQualityReport,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    let logging = LogTarget::from_dir(args.log_dir.as_deref())
        .and_then(|target| init_logging(level, target));
    if let Err(err) = logging {
        eprintln!("logging disabled: {err}");
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = DataSourceConfig::from_env();
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if args.keep_value_padding {
        config.trim_values = false;
    }

    let ctx = DataContext::load(&config)?;

    match &args.command {
        Command::Overview => print_json(&ctx.overview()),
        Command::Chapters => print_json(&ChaptersOutput {
            summary: ctx.chapter_summary(),
            valid_chapters: ctx.valid_chapters(),
        }),
        Command::Chapter { number } => print_json(&ctx.chapter(*number)),
        Command::Context {
            place,
            character,
            export,
        } => {
            let filter = ContextFilter {
                place: place.clone(),
                character: character.clone(),
            };
            let view = ctx.context(&filter);
            if let Some(path) = export {
                let rows = export_context(view.records(), path)?;
                info!(
                    "event=cli_export module=cli status=ok rows={} path={}",
                    rows,
                    path.display()
                );
            }
            print_json(&view)
        }
        Command::Graph => print_json(&ctx.graph_snapshot()),
        Command::Places => print_json(&PlacesOutput {
            places: ctx.place_options(),
            quality: ctx.quality(),
        }),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
