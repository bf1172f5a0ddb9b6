//! CLI configuration
//!
//! Loaded from a TOML file. Every field is optional in the file; missing
//! fields take their defaults.

use checkgate_core::Thresholds;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// checkgate CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Checklist document to load when `--spec` is not given
    pub spec: Option<PathBuf>,
    /// Minimum progress percentage reported as "good"
    pub good_threshold: f64,
    /// Overrides the document's submission URL
    pub submit_url: Option<String>,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl CliConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With checklist document path
    #[inline]
    #[must_use]
    pub fn with_spec(mut self, spec: impl Into<PathBuf>) -> Self {
        self.spec = Some(spec.into());
        self
    }

    /// With good threshold
    #[inline]
    #[must_use]
    pub fn with_good_threshold(mut self, threshold: f64) -> Self {
        self.good_threshold = threshold;
        self
    }

    /// With submission URL override
    #[inline]
    #[must_use]
    pub fn with_submit_url(mut self, url: impl Into<String>) -> Self {
        self.submit_url = Some(url.into());
        self
    }

    /// Parse and check a TOML configuration
    ///
    /// # Errors
    /// Returns error on TOML syntax errors or out-of-range values
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.check()?;
        Ok(config)
    }

    /// Read a TOML configuration file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or is invalid
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject values outside their domain
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidThreshold`] unless `good_threshold` is
    /// within `0..=100`
    pub fn check(&self) -> Result<(), ConfigError> {
        if !(0.0..=100.0).contains(&self.good_threshold) {
            return Err(ConfigError::InvalidThreshold(self.good_threshold));
        }
        Ok(())
    }

    /// Status thresholds for summaries
    #[inline]
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            good: self.good_threshold,
        }
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            spec: None,
            good_threshold: Thresholds::default().good,
            submit_url: None,
            log_filter: "warn".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML syntax or shape error
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Threshold outside 0..=100
    #[error("good_threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = CliConfig::new();
        assert_eq!(config.spec, None);
        assert!((config.good_threshold - 70.0).abs() < f64::EPSILON);
        assert_eq!(config.log_filter, "warn");
        assert!(config.check().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = CliConfig::from_toml_str("good_threshold = 55.5\n").unwrap();
        assert!((config.good_threshold - 55.5).abs() < f64::EPSILON);
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.submit_url, None);
    }

    #[test]
    fn full_toml() {
        let text = r#"
spec = "checklists/release.yaml"
good_threshold = 80
submit_url = "https://tickets.example.com/new"
log_filter = "checkgate_core=debug"
"#;
        let config = CliConfig::from_toml_str(text).unwrap();
        assert_eq!(config.spec, Some(PathBuf::from("checklists/release.yaml")));
        assert!((config.thresholds().good - 80.0).abs() < f64::EPSILON);
        assert_eq!(config.submit_url.as_deref(), Some("https://tickets.example.com/new"));
        assert_eq!(config.log_filter, "checkgate_core=debug");
    }

    #[test]
    fn threshold_out_of_range() {
        assert!(matches!(
            CliConfig::from_toml_str("good_threshold = 120.0"),
            Err(ConfigError::InvalidThreshold(_))
        ));
        assert!(CliConfig::new().with_good_threshold(-1.0).check().is_err());
        assert!(CliConfig::new().with_good_threshold(f64::NAN).check().is_err());
    }

    #[test]
    fn syntax_error() {
        assert!(matches!(
            CliConfig::from_toml_str("good_threshold = "),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "submit_url = \"https://example.com/submit\"").unwrap();
        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.submit_url.as_deref(), Some("https://example.com/submit"));
    }

    #[test]
    fn builders() {
        let config = CliConfig::new()
            .with_spec("a.json")
            .with_good_threshold(90.0)
            .with_submit_url("https://x.example");
        assert_eq!(config.spec, Some(PathBuf::from("a.json")));
        assert_eq!(config.submit_url.as_deref(), Some("https://x.example"));
    }
}
