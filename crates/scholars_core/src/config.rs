//! Data source configuration.
//!
//! # Responsibility
//! - Name the three input tables and the directory they live in.
//! - Carry load-time normalization switches.
//!
//! # Invariants
//! - Defaults match the file names shipped with the dataset.
//! - Environment overrides are applied only by [`DataSourceConfig::from_env`].

use log::{info, warn};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_PLACES_FILE: &str = "places.csv";
pub const DEFAULT_FREQUENCY_FILE: &str = "place_freq.csv";
pub const DEFAULT_CONTEXT_FILE: &str = "place_analysis_ch01-20_cha_act.csv";

pub const ENV_DATA_DIR: &str = "SCHOLARS_DATA_DIR";
pub const ENV_TRIM_VALUES: &str = "SCHOLARS_TRIM_VALUES";

/// Location of the three source tables plus normalization options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSourceConfig {
    pub data_dir: PathBuf,
    pub places_file: String,
    pub frequency_file: String,
    pub context_file: String,
    /// Trim leading/trailing whitespace from text values, not only headers.
    ///
    /// `false` keeps padded values as-is, so a padded place name misses the
    /// gazetteer join.
    pub trim_values: bool,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            places_file: DEFAULT_PLACES_FILE.to_string(),
            frequency_file: DEFAULT_FREQUENCY_FILE.to_string(),
            context_file: DEFAULT_CONTEXT_FILE.to_string(),
            trim_values: true,
        }
    }
}

impl DataSourceConfig {
    /// Default file names inside `dir`.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: dir.into(),
            ..Self::default()
        }
    }

    /// Defaults overridden by `SCHOLARS_DATA_DIR` and `SCHOLARS_TRIM_VALUES`.
    ///
    /// An unparseable `SCHOLARS_TRIM_VALUES` is ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var(ENV_DATA_DIR) {
            if !dir.trim().is_empty() {
                config.data_dir = PathBuf::from(dir.trim());
            }
        }

        if let Ok(raw) = env::var(ENV_TRIM_VALUES) {
            match parse_flag(&raw) {
                Some(flag) => config.trim_values = flag,
                None => warn!(
                    "event=config_load module=config status=ignored key={} value={}",
                    ENV_TRIM_VALUES, raw
                ),
            }
        }

        info!(
            "event=config_load module=config status=ok data_dir={} trim_values={}",
            config.data_dir.display(),
            config.trim_values
        );
        config
    }

    pub fn places_path(&self) -> PathBuf {
        self.data_dir.join(&self.places_file)
    }

    pub fn frequency_path(&self) -> PathBuf {
        self.data_dir.join(&self.frequency_file)
    }

    pub fn context_path(&self) -> PathBuf {
        self.data_dir.join(&self.context_file)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_flag, DataSourceConfig, DEFAULT_CONTEXT_FILE};
    use std::path::PathBuf;

    #[test]
    fn from_dir_joins_default_file_names() {
        let config = DataSourceConfig::from_dir("/data/scholars");
        assert_eq!(
            config.context_path(),
            PathBuf::from("/data/scholars").join(DEFAULT_CONTEXT_FILE)
        );
        assert_eq!(
            config.places_path(),
            PathBuf::from("/data/scholars/places.csv")
        );
        assert!(config.trim_values);
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
