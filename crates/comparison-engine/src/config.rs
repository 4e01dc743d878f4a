//! Comparison tolerances, loadable from TOML
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```toml
//! price_list_window_months = 3
//! disabled_checkpoints = ["Predominant Pitch"]
//!
//! [length]
//! relative_pct = 5.0
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How far apart two numbers may be and still count as the same measurement.
///
/// The allowed gap is the larger of `absolute` and `relative_pct` percent of
/// the larger magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    pub relative_pct: f64,
    pub absolute: f64,
}

impl Tolerance {
    pub const fn new(relative_pct: f64, absolute: f64) -> Self {
        Self {
            relative_pct,
            absolute,
        }
    }

    /// Largest difference accepted between `a` and `b`
    pub fn allowance(&self, a: f64, b: f64) -> f64 {
        let relative = self.relative_pct / 100.0 * a.abs().max(b.abs());
        relative.max(self.absolute)
    }

    pub fn allows(&self, a: f64, b: f64) -> bool {
        // Absorbs float noise such as 102.0 - 100.0 vs 2% of 102.0
        const EPSILON: f64 = 1e-9;
        (a - b).abs() <= self.allowance(a, b) + EPSILON
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(2.0, 1.0)
    }
}

/// Tolerances and switches for one comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    /// Roof area in square feet
    pub area: Tolerance,
    /// Roofing squares (100 sq ft each)
    pub squares: Tolerance,
    /// Linear measurements in feet
    pub length: Tolerance,
    /// Months the price list may differ from the claim date in either direction
    pub price_list_window_months: u32,
    /// Checkpoint names to skip entirely
    pub disabled_checkpoints: Vec<String>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            area: Tolerance::new(2.0, 1.0),
            squares: Tolerance::new(2.0, 0.5),
            length: Tolerance::new(2.0, 1.0),
            price_list_window_months: 5,
            disabled_checkpoints: Vec::new(),
        }
    }
}

impl ComparisonConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Example
    ///
    /// ```
    /// use comparison_engine::config::ComparisonConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = ComparisonConfig::from_str("price_list_window_months = 3")?;
    /// assert_eq!(config.price_list_window_months, 3);
    /// assert_eq!(config.length.relative_pct, 2.0);
    /// # Ok(())
    /// # }
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    /// Whether the named checkpoint should be evaluated
    pub fn is_enabled(&self, checkpoint: &str) -> bool {
        !self
            .disabled_checkpoints
            .iter()
            .any(|name| name.eq_ignore_ascii_case(checkpoint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ComparisonConfig::default();
        assert_eq!(config.area, Tolerance::new(2.0, 1.0));
        assert_eq!(config.squares, Tolerance::new(2.0, 0.5));
        assert_eq!(config.length, Tolerance::new(2.0, 1.0));
        assert_eq!(config.price_list_window_months, 5);
        assert!(config.disabled_checkpoints.is_empty());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = ComparisonConfig::from_str("").unwrap();
        assert_eq!(config, ComparisonConfig::default());
    }

    #[test]
    fn test_partial_toml_overrides_only_named_fields() {
        let toml = r#"
            price_list_window_months = 3
            disabled_checkpoints = ["Predominant Pitch"]

            [length]
            relative_pct = 5.0
        "#;
        let config = ComparisonConfig::from_str(toml).unwrap();

        assert_eq!(config.price_list_window_months, 3);
        assert_eq!(config.length, Tolerance::new(5.0, 1.0));
        assert_eq!(config.area, Tolerance::new(2.0, 1.0));
        assert!(!config.is_enabled("predominant pitch"));
        assert!(config.is_enabled("Ridge Length"));
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        let err = ComparisonConfig::from_str("price_list_window_months = \"soon\"").unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = ComparisonConfig::from_file("/nonexistent/compare.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_tolerance_uses_larger_of_relative_and_absolute() {
        let length = Tolerance::new(2.0, 1.0);
        // 2% of 20 is 0.4, so the 1 LF floor applies
        assert!(length.allows(20.0, 21.0));
        assert!(!length.allows(20.0, 21.5));
        // 2% of 500 is 10
        assert!(length.allows(500.0, 490.0));
        assert!(!length.allows(500.0, 489.0));
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        let area = Tolerance::new(2.0, 1.0);
        assert!(area.allows(100.0, 102.0));
        assert!(area.allows(102.0, 100.0));
    }
}
