use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::constants::{
    DEFAULT_CADENCE_MS, DEFAULT_HISTORY_SIZE, DEFAULT_MIN_CONSISTENCY, DEFAULT_STABILITY_WINDOW,
    DEFAULT_SUMMARY_MIN_POINTS, DEFAULT_SUMMARY_WINDOW_MS,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for one pipeline run. Missing fields in a config file take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Minimum milliseconds between two snapshots handed to the sink.
    pub cadence_ms: u64,
    /// Emotion history capacity.
    pub history_size: usize,
    /// Trailing entries considered by each stabilization vote.
    pub stability_window: usize,
    /// Share of face frames the modal emotion must hold.
    pub min_consistency: f64,
    pub summary_window_ms: u64,
    pub summary_min_points: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cadence_ms: DEFAULT_CADENCE_MS,
            history_size: DEFAULT_HISTORY_SIZE,
            stability_window: DEFAULT_STABILITY_WINDOW,
            min_consistency: DEFAULT_MIN_CONSISTENCY,
            summary_window_ms: DEFAULT_SUMMARY_WINDOW_MS,
            summary_min_points: DEFAULT_SUMMARY_MIN_POINTS,
        }
    }
}

impl PipelineConfig {
    /// Platform config location, e.g. `~/.config/bodysense/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("bodysense").join("config.json"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` when given; otherwise the default location if a file
    /// exists there, else built-in defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(default) if default.exists() => {
                log::info!("Using config {}", default.display());
                Self::load(&default)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_size == 0 {
            return Err(ConfigError::Invalid(
                "history_size must be at least 1".into(),
            ));
        }
        if self.stability_window == 0 {
            return Err(ConfigError::Invalid(
                "stability_window must be at least 1".into(),
            ));
        }
        if self.stability_window > self.history_size {
            return Err(ConfigError::Invalid(format!(
                "stability_window ({}) cannot exceed history_size ({})",
                self.stability_window, self.history_size
            )));
        }
        if !(0.0..=1.0).contains(&self.min_consistency) {
            return Err(ConfigError::Invalid(format!(
                "min_consistency must be between 0.0 and 1.0, got {}",
                self.min_consistency
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.cadence_ms, 2000);
        assert_eq!(config.history_size, 10);
        assert_eq!(config.stability_window, 5);
        assert_eq!(config.min_consistency, 0.4);
        assert_eq!(config.summary_window_ms, 30_000);
        assert_eq!(config.summary_min_points, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"cadence_ms": 500, "min_consistency": 0.6}}"#).unwrap();

        let config = PipelineConfig::load(file.path()).unwrap();
        assert_eq!(config.cadence_ms, 500);
        assert_eq!(config.min_consistency, 0.6);
        assert_eq!(config.history_size, 10);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            PipelineConfig::resolve(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "cadence_ms = 5").unwrap();
        assert!(matches!(
            PipelineConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = PipelineConfig {
            cadence_ms: 1000,
            ..PipelineConfig::default()
        };
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[rstest]
    #[case::zero_history(PipelineConfig { history_size: 0, ..PipelineConfig::default() })]
    #[case::zero_window(PipelineConfig { stability_window: 0, ..PipelineConfig::default() })]
    #[case::window_exceeds_history(PipelineConfig { stability_window: 11, ..PipelineConfig::default() })]
    #[case::negative_consistency(PipelineConfig { min_consistency: -0.1, ..PipelineConfig::default() })]
    #[case::consistency_above_one(PipelineConfig { min_consistency: 1.5, ..PipelineConfig::default() })]
    #[case::nan_consistency(PipelineConfig { min_consistency: f64::NAN, ..PipelineConfig::default() })]
    fn test_invalid_configs_rejected(#[case] config: PipelineConfig) {
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_cadence_is_allowed() {
        let config = PipelineConfig {
            cadence_ms: 0,
            ..PipelineConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
