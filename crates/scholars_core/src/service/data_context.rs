//! The loaded dataset: source tables plus every derived table.
//!
//! # Responsibility
//! - Run the pipeline once: load, aggregate, join, build the graph.
//! - Serve the overview, chapter, context and graph queries.
//!
//! # Invariants
//! - Never mutated after construction; callers hold it by reference.
//! - Derived tables are recomputed from the raw tables on every load, so a
//!   cold reload of the same files yields identical results.
//! - `valid_chapters` is computed once here, from the full chapter table.

use crate::config::DataSourceConfig;
use crate::graph::relationship::{NodeRole, RelationshipGraph};
use crate::model::context::ContextRecord;
use crate::model::enriched::Enriched;
use crate::model::frequency::{ChapterFrequency, ChapterSummary, TotalFrequency};
use crate::model::place::{Place, PlaceTable};
use crate::pipeline::aggregate::{aggregate, chapter_summary, valid_chapters};
use crate::pipeline::geocode::join;
use crate::query::chapter::{chapter_view, ChapterView};
use crate::query::context::{context_view, ContextFilter, ContextView};
use crate::query::overview::{overview, OverviewView};
use crate::service::quality::DataQualityReport;
use crate::source::{load_tables, LoadError, RawTables};
use log::{debug, info};
use serde::Serialize;
use std::time::Instant;

/// One graph node with its derived role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNodeView<'a> {
    pub name: &'a str,
    pub role: NodeRole,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdgeView<'a> {
    pub source: &'a str,
    pub target: &'a str,
}

/// Plain node/edge listing of the relationship graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphSnapshot<'a> {
    pub nodes: Vec<GraphNodeView<'a>>,
    pub edges: Vec<GraphEdgeView<'a>>,
}

/// Immutable, fully derived dataset for one process.
#[derive(Debug, Clone)]
pub struct DataContext {
    places: PlaceTable,
    chapter_frequencies: Vec<Enriched<ChapterFrequency>>,
    total_frequencies: Vec<Enriched<TotalFrequency>>,
    contexts: Vec<Enriched<ContextRecord>>,
    chapter_summary: Vec<ChapterSummary>,
    valid_chapters: Vec<u32>,
    graph: RelationshipGraph,
    quality: DataQualityReport,
}

impl DataContext {
    /// Loads the three tables named by `config` and derives everything.
    ///
    /// # Errors
    /// - Returns [`LoadError`] when any table is missing or malformed.
    pub fn load(config: &DataSourceConfig) -> Result<Self, LoadError> {
        let tables = load_tables(config)?;
        Ok(Self::from_tables(tables))
    }

    /// Derives every table from already-loaded source tables.
    pub fn from_tables(tables: RawTables) -> Self {
        let started_at = Instant::now();
        let RawTables {
            places,
            chapter_frequencies,
            contexts,
        } = tables;

        let places = PlaceTable::new(places);
        let totals = aggregate(&chapter_frequencies);
        let chapter_summary = chapter_summary(&chapter_frequencies);
        let valid_chapters = valid_chapters(&chapter_summary);
        let graph = RelationshipGraph::from_contexts(&contexts);
        let quality =
            DataQualityReport::collect(&places, &chapter_frequencies, &totals, &contexts);

        let context = Self {
            chapter_frequencies: join(&chapter_frequencies, &places),
            total_frequencies: join(&totals, &places),
            contexts: join(&contexts, &places),
            places,
            chapter_summary,
            valid_chapters,
            graph,
            quality,
        };

        quality.log();
        info!(
            "event=context_build module=service status=ok duration_ms={} places={} totals={} valid_chapters={} graph_nodes={} graph_edges={}",
            started_at.elapsed().as_millis(),
            context.places.len(),
            context.total_frequencies.len(),
            context.valid_chapters.len(),
            context.graph.node_count(),
            context.graph.edge_count()
        );
        context
    }

    pub fn places(&self) -> &[Place] {
        self.places.places()
    }

    /// Gazetteer names in table order, for the place selector.
    pub fn place_options(&self) -> Vec<&str> {
        self.places
            .places()
            .iter()
            .map(|place| place.name.as_str())
            .collect()
    }

    pub fn chapter_frequencies(&self) -> &[Enriched<ChapterFrequency>] {
        &self.chapter_frequencies
    }

    pub fn total_frequencies(&self) -> &[Enriched<TotalFrequency>] {
        &self.total_frequencies
    }

    pub fn contexts(&self) -> &[Enriched<ContextRecord>] {
        &self.contexts
    }

    /// Count sum per chapter, including chapters that sum to zero.
    pub fn chapter_summary(&self) -> &[ChapterSummary] {
        &self.chapter_summary
    }

    /// Chapters with at least one mention, ascending.
    pub fn valid_chapters(&self) -> &[u32] {
        &self.valid_chapters
    }

    pub fn quality(&self) -> &DataQualityReport {
        &self.quality
    }

    pub fn overview(&self) -> OverviewView<'_> {
        overview(&self.total_frequencies)
    }

    /// Geocoded, non-zero rows of `chapter`; empty for non-valid chapters.
    pub fn chapter(&self, chapter: u32) -> ChapterView<'_> {
        if self.valid_chapters.binary_search(&chapter).is_err() {
            debug!(
                "event=chapter_query module=service status=empty chapter={} reason=not_valid",
                chapter
            );
            return ChapterView::empty(chapter);
        }
        chapter_view(&self.chapter_frequencies, chapter)
    }

    pub fn context(&self, filter: &ContextFilter) -> ContextView<'_> {
        context_view(&self.contexts, filter)
    }

    pub fn relationship_graph(&self) -> &RelationshipGraph {
        &self.graph
    }

    /// Place when `name` is in the full gazetteer, character otherwise.
    pub fn node_role(&self, name: &str) -> NodeRole {
        if self.places.contains(name) {
            NodeRole::Place
        } else {
            NodeRole::Character
        }
    }

    /// Graph nodes labeled with their derived roles.
    pub fn graph_snapshot(&self) -> GraphSnapshot<'_> {
        GraphSnapshot {
            nodes: self
                .graph
                .nodes()
                .map(|name| GraphNodeView {
                    name,
                    role: self.node_role(name),
                })
                .collect(),
            edges: self
                .graph
                .edges()
                .into_iter()
                .map(|(source, target)| GraphEdgeView { source, target })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DataContext;
    use crate::graph::relationship::NodeRole;
    use crate::model::context::ContextRecord;
    use crate::model::frequency::ChapterFrequency;
    use crate::model::place::Place;
    use crate::query::context::ContextFilter;
    use crate::source::RawTables;

    fn context() -> DataContext {
        DataContext::from_tables(RawTables {
            places: vec![
                Place::new("Nanjing", Some(32.06), Some(118.79)),
                Place::new("Hangzhou", Some(30.27), Some(120.15)),
                Place::new("Wuhe", None, None),
            ],
            chapter_frequencies: vec![
                ChapterFrequency::new("Nanjing", 1, 3, 0.5),
                ChapterFrequency::new("Nanjing", 2, 5, 0.8),
                ChapterFrequency::new("Hangzhou", 1, 2, 0.3),
                ChapterFrequency::new("Wuhe", 3, 4, 0.6),
                ChapterFrequency::new("Hangzhou", 4, 0, 0.0),
            ],
            contexts: vec![
                ContextRecord::new(1, "Nanjing").with_characters("Fan Jin", None),
                ContextRecord::new(2, "Nanjing").with_characters("Zhou Jin", Some("Fan Jin")),
            ],
        })
    }

    #[test]
    fn valid_chapters_come_from_full_table() {
        let ctx = context();
        // Chapter 3 only mentions an ungeocoded place but is still valid.
        assert_eq!(ctx.valid_chapters(), &[1, 2, 3]);
        assert!(ctx.chapter(3).is_empty());
        assert!(ctx.chapter(4).is_empty());
        assert_eq!(ctx.chapter(1).rows.len(), 2);
    }

    #[test]
    fn overview_reports_top_geocoded_place() {
        let ctx = context();
        let view = ctx.overview();
        assert_eq!(view.location_count, 2);
        assert_eq!(view.top_place.unwrap().record.place, "Nanjing");
    }

    #[test]
    fn node_role_uses_full_gazetteer() {
        let ctx = context();
        assert_eq!(ctx.node_role("Nanjing"), NodeRole::Place);
        // Never a graph node, still a place.
        assert_eq!(ctx.node_role("Wuhe"), NodeRole::Place);
        assert_eq!(ctx.node_role("Fan Jin"), NodeRole::Character);

        let snapshot = ctx.graph_snapshot();
        assert_eq!(snapshot.nodes.len(), 3);
        assert_eq!(snapshot.edges.len(), 2);
    }

    #[test]
    fn place_options_keep_gazetteer_order() {
        let ctx = context();
        assert_eq!(ctx.place_options(), vec!["Nanjing", "Hangzhou", "Wuhe"]);
        assert_eq!(ctx.context(&ContextFilter::all()).snippet_count(), 2);
    }
}
