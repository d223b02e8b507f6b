//! Derivation steps run once per load: aggregation and geocoding.

pub mod aggregate;
pub mod geocode;
