//! Plot configuration
//! Settings for bins, whiskers, rounding and figure sizes, loadable from JSON.

use crate::error::{EdaError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by the summary computations and the renderers.
///
/// Missing keys in a JSON file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Number of histogram bins.
    pub histogram_bins: usize,
    /// Whisker reach as a multiple of the interquartile range.
    pub whisker_coef: f64,
    /// Decimal places kept on per-category means.
    pub mean_decimals: u32,
    /// Diagnostic figure size in pixels (width, height).
    pub diagnostic_size: (u32, u32),
    /// Bar chart figure size in pixels (width, height).
    pub bar_size: (u32, u32),
    /// Font family used by the static renderer.
    pub font_family: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            histogram_bins: 30,
            whisker_coef: 1.5,
            mean_decimals: 2,
            diagnostic_size: (1600, 400),
            bar_size: (800, 500),
            font_family: "sans-serif".to_string(),
        }
    }
}

impl PlotConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)
            .map_err(|e| EdaError::Config(format!("{}: {}", path.display(), e)))?;
        log::debug!("Loaded plot config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: PlotConfig =
            serde_json::from_str(text).map_err(|e| EdaError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.histogram_bins == 0 {
            return Err(EdaError::Config("histogram_bins must be at least 1".into()));
        }
        if !(self.whisker_coef >= 0.0) {
            return Err(EdaError::Config("whisker_coef must be >= 0".into()));
        }
        if self.mean_decimals > 15 {
            return Err(EdaError::Config("mean_decimals must be at most 15".into()));
        }
        let sizes = [self.diagnostic_size, self.bar_size];
        if sizes.iter().any(|&(w, h)| w == 0 || h == 0) {
            return Err(EdaError::Config("figure sizes must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_figure_layout() {
        let config = PlotConfig::default();
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.mean_decimals, 2);
        assert_eq!(config.diagnostic_size, (1600, 400));
        assert_eq!(config.bar_size, (800, 500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PlotConfig::from_json(r#"{ "histogram_bins": 12 }"#).unwrap();
        assert_eq!(config.histogram_bins, 12);
        assert_eq!(config.whisker_coef, 1.5);
        assert_eq!(config.bar_size, (800, 500));
    }

    #[test]
    fn test_rejects_zero_bins() {
        let err = PlotConfig::from_json(r#"{ "histogram_bins": 0 }"#).unwrap_err();
        assert!(matches!(err, EdaError::Config(_)));
    }

    #[test]
    fn test_rejects_negative_coef() {
        assert!(PlotConfig::from_json(r#"{ "whisker_coef": -1.0 }"#).is_err());
    }

    #[test]
    fn test_mean_decimals_limit() {
        assert!(PlotConfig::from_json(r#"{ "mean_decimals": 400 }"#).is_err());
        assert!(PlotConfig::from_json(r#"{ "mean_decimals": 16 }"#).is_err());
        let config = PlotConfig::from_json(r#"{ "mean_decimals": 15 }"#).unwrap();
        assert_eq!(config.mean_decimals, 15);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "diagnostic_size": [1200, 300], "mean_decimals": 3 }}"#).unwrap();

        let config = PlotConfig::load(file.path()).unwrap();
        assert_eq!(config.diagnostic_size, (1200, 300));
        assert_eq!(config.mean_decimals, 3);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PlotConfig::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, EdaError::Io(_)));
    }
}
