//! Read-only queries consumed by the presentation layer.
//!
//! # Responsibility
//! - Answer the overview, chapter and context queries over joined tables.
//!
//! # Invariants
//! - Queries are pure and total: no I/O, no errors, possibly-empty results.
//! - Views borrow from the loaded tables; nothing is copied or mutated.

pub mod chapter;
pub mod context;
pub mod overview;

use crate::model::enriched::Enriched;

/// First row holding the maximum count; earlier rows win ties.
pub(crate) fn first_max_by_count<'a, T>(
    rows: &[&'a T],
    count: impl Fn(&T) -> u64,
) -> Option<&'a T> {
    let mut best: Option<&'a T> = None;
    for &row in rows {
        match best {
            Some(current) if count(row) <= count(current) => {}
            _ => best = Some(row),
        }
    }
    best
}

/// Mean latitude and longitude of the rows that have coordinates.
pub(crate) fn centroid<T>(rows: &[&Enriched<T>]) -> Option<(f64, f64)> {
    let points: Vec<(f64, f64)> = rows.iter().filter_map(|row| row.coordinates()).collect();
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (lat_sum, lon_sum) = points
        .iter()
        .fold((0.0_f64, 0.0_f64), |(lat, lon), &(p_lat, p_lon)| (lat + p_lat, lon + p_lon));
    Some((lat_sum / n, lon_sum / n))
}

#[cfg(test)]
mod tests {
    use super::{centroid, first_max_by_count};
    use crate::model::enriched::Enriched;

    #[test]
    fn first_max_prefers_first_occurrence() {
        let rows = [("a", 2_u64), ("b", 5), ("c", 5), ("d", 1)];
        let refs: Vec<&(&str, u64)> = rows.iter().collect();
        let best = first_max_by_count(&refs, |row| row.1).unwrap();
        assert_eq!(best.0, "b");
        let empty: Vec<&(&str, u64)> = Vec::new();
        assert!(first_max_by_count(&empty, |row| row.1).is_none());
    }

    #[test]
    fn centroid_averages_coordinates() {
        let a = Enriched::new((), Some(30.0), Some(120.0));
        let b = Enriched::new((), Some(32.0), Some(118.0));
        let c = Enriched::unmatched(());
        assert_eq!(centroid(&[&a, &b, &c]), Some((31.0, 119.0)));
        assert_eq!(centroid::<()>(&[&c]), None);
    }
}
