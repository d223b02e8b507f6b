//! Data core for the *The Scholars* place-mention explorer.
//! Loads the gazetteer, chapter-frequency and context tables, derives the
//! joined and aggregated views, and answers the explorer's queries.

pub mod config;
pub mod graph;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod query;
pub mod service;
pub mod source;

pub use config::DataSourceConfig;
pub use graph::relationship::{NodeRole, RelationshipGraph};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::context::{ContextRecord, CONTEXT_COLUMNS};
pub use model::enriched::Enriched;
pub use model::frequency::{ChapterFrequency, ChapterSummary, TotalFrequency};
pub use model::place::{Place, PlaceTable};
pub use pipeline::aggregate::aggregate;
pub use pipeline::geocode::{join, PlaceKeyed};
pub use query::chapter::ChapterView;
pub use query::context::{ContextFilter, ContextView};
pub use query::overview::OverviewView;
pub use service::data_context::{DataContext, GraphEdgeView, GraphNodeView, GraphSnapshot};
pub use service::quality::DataQualityReport;
pub use source::{
    export_context, load_tables, ExportError, LoadError, RawTables, TableKind, TableLoadError,
    EXPORT_FILE_NAME,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
