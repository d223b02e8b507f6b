//! Book-wide overview of geocoded places.

use super::{centroid, first_max_by_count};
use crate::model::enriched::Enriched;
use crate::model::frequency::TotalFrequency;
use serde::Serialize;

/// Totals with coordinates, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewView<'a> {
    pub rows: Vec<&'a Enriched<TotalFrequency>>,
    pub location_count: usize,
    /// Highest total count; first occurrence wins on ties.
    pub top_place: Option<&'a Enriched<TotalFrequency>>,
}

impl<'a> OverviewView<'a> {
    /// Rows sorted by descending count; ties keep input order.
    pub fn rows_by_count_desc(&self) -> Vec<&'a Enriched<TotalFrequency>> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| b.record.count.cmp(&a.record.count));
        rows
    }

    /// Map center for the returned rows.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        centroid(&self.rows)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Selects every total that has both coordinates.
pub fn overview(totals: &[Enriched<TotalFrequency>]) -> OverviewView<'_> {
    let rows: Vec<&Enriched<TotalFrequency>> =
        totals.iter().filter(|row| row.has_coordinates()).collect();
    let top_place = first_max_by_count(&rows, |row| row.record.count);
    OverviewView {
        location_count: rows.len(),
        top_place,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::overview;
    use crate::model::enriched::Enriched;
    use crate::model::frequency::TotalFrequency;

    fn total(place: &str, count: u64, coords: Option<(f64, f64)>) -> Enriched<TotalFrequency> {
        Enriched::new(
            TotalFrequency {
                place: place.to_string(),
                count,
                per_1k_chars: 0.0,
            },
            coords.map(|c| c.0),
            coords.map(|c| c.1),
        )
    }

    #[test]
    fn overview_drops_rows_without_coordinates() {
        let totals = vec![
            total("Nanjing", 9, Some((32.0, 118.0))),
            total("Atlantis", 50, None),
            total("Hangzhou", 9, Some((30.0, 120.0))),
        ];

        let view = overview(&totals);

        assert_eq!(view.location_count, 2);
        assert!(view.rows.iter().all(|row| row.has_coordinates()));
        assert_eq!(view.top_place.unwrap().record.place, "Nanjing");
        assert_eq!(view.centroid(), Some((31.0, 119.0)));
    }

    #[test]
    fn overview_of_empty_table_is_empty() {
        let view = overview(&[]);
        assert!(view.is_empty());
        assert_eq!(view.location_count, 0);
        assert!(view.top_place.is_none());
        assert!(view.centroid().is_none());
    }

    #[test]
    fn rows_by_count_desc_is_stable() {
        let totals = vec![
            total("A", 1, Some((1.0, 1.0))),
            total("B", 4, Some((1.0, 1.0))),
            total("C", 4, Some((1.0, 1.0))),
        ];
        let view = overview(&totals);
        let order: Vec<&str> = view
            .rows_by_count_desc()
            .iter()
            .map(|row| row.record.place.as_str())
            .collect();
        assert_eq!(order, vec!["B", "C", "A"]);
    }
}
