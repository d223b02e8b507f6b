//! Relationship extraction from context rows.
//!
//! # Responsibility
//! - Link each character to every place it appears at in the context table.
//!
//! # Invariants
//! - The graph is simple and undirected: a repeated (character, place)
//!   pair is one edge, and edges carry no weight.
//! - Only endpoints of edges become nodes; there are no isolated places.
//! - Labels are untyped strings. Whether a label is a place is decided by
//!   the caller against the full gazetteer, not stored here.

use crate::model::context::ContextRecord;
use crate::source::normalize::present;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::collections::HashMap;

/// Role of a graph label, derived from gazetteer membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeRole {
    Place,
    Character,
}

/// Simple undirected graph over character and place labels.
#[derive(Debug, Clone, Default)]
pub struct RelationshipGraph {
    graph: UnGraph<String, ()>,
    node_index: HashMap<String, NodeIndex>,
}

impl RelationshipGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the graph from context rows.
    ///
    /// Rows without a primary character or without a place add nothing.
    /// The secondary character is linked independently when present.
    pub fn from_contexts<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a ContextRecord>,
    {
        let mut graph = Self::new();
        for row in rows {
            let Some(place) = row.place.as_deref().and_then(present) else {
                continue;
            };
            let Some(primary) = row.character1.as_deref().and_then(present) else {
                continue;
            };
            graph.link(primary, place);
            if let Some(secondary) = row.character2.as_deref().and_then(present) {
                graph.link(secondary, place);
            }
        }
        graph
    }

    /// Adds the edge `character`–`place` unless it already exists.
    pub fn link(&mut self, character: &str, place: &str) {
        let a = self.ensure_node(character);
        let b = self.ensure_node(place);
        self.graph.update_edge(a, b, ());
    }

    fn ensure_node(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(label.to_string());
        self.node_index.insert(label.to_string(), idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Node labels in first-insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph
            .node_indices()
            .map(move |idx| self.graph[idx].as_str())
    }

    /// Edges as `(character, place)` label pairs in insertion order.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.graph
            .edge_references()
            .map(|edge| {
                (
                    self.graph[edge.source()].as_str(),
                    self.graph[edge.target()].as_str(),
                )
            })
            .collect()
    }

    pub fn contains_node(&self, label: &str) -> bool {
        self.node_index.contains_key(label)
    }

    /// Whether `a` and `b` are linked, in either direction.
    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        match (self.node_index.get(a), self.node_index.get(b)) {
            (Some(&a), Some(&b)) => self.graph.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    /// Labels adjacent to `label`, sorted.
    pub fn neighbors(&self, label: &str) -> Vec<&str> {
        let Some(&idx) = self.node_index.get(label) else {
            return Vec::new();
        };
        let mut neighbors: Vec<&str> = self
            .graph
            .neighbors(idx)
            .map(|other| self.graph[other].as_str())
            .collect();
        neighbors.sort_unstable();
        neighbors
    }

    pub fn degree(&self, label: &str) -> usize {
        self.neighbors(label).len()
    }
}
