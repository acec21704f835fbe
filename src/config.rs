//! Engine configuration
//!
//! Loaded from a JSON file or from environment variables:
//! - `ARTIFACT_DIR` (default `artifacts`)
//! - `CONVERSION_TABLE` (optional CSV; embedded table otherwise)
//! - `DEGENERATE_CLASS_THRESHOLD` (default 2)

use crate::predict::DEFAULT_DEGENERATE_CLASS_THRESHOLD;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding `artifacts.json`, `crop_model.json`, `fert_model.json`
    pub artifact_dir: PathBuf,

    /// CSV conversion table; the embedded table is used when unset
    pub conversion_table: Option<PathBuf>,

    /// Fertilizer decoders with this many labels or fewer are not trusted.
    /// The value 2 has no documented agronomic basis and needs domain review.
    pub degenerate_class_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            artifact_dir: PathBuf::from("artifacts"),
            conversion_table: None,
            degenerate_class_threshold: DEFAULT_DEGENERATE_CLASS_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file (missing keys take defaults)
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        serde_json::from_str(&contents).with_context(|| "Failed to parse config JSON")
    }

    /// Configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = lookup("ARTIFACT_DIR") {
            config.artifact_dir = PathBuf::from(dir);
        }
        if let Some(table) = lookup("CONVERSION_TABLE").filter(|s| !s.is_empty()) {
            config.conversion_table = Some(PathBuf::from(table));
        }
        if let Some(threshold) = lookup("DEGENERATE_CLASS_THRESHOLD") {
            config.degenerate_class_threshold = threshold
                .trim()
                .parse()
                .with_context(|| format!("DEGENERATE_CLASS_THRESHOLD must be an integer, got '{}'", threshold))?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.artifact_dir, PathBuf::from("artifacts"));
        assert!(config.conversion_table.is_none());
        assert_eq!(config.degenerate_class_threshold, 2);
    }

    #[test]
    fn test_env_overrides() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("ARTIFACT_DIR", "/opt/models"),
            ("CONVERSION_TABLE", "/opt/organic.csv"),
            ("DEGENERATE_CLASS_THRESHOLD", "3"),
        ]))
        .unwrap();
        assert_eq!(config.artifact_dir, PathBuf::from("/opt/models"));
        assert_eq!(config.conversion_table, Some(PathBuf::from("/opt/organic.csv")));
        assert_eq!(config.degenerate_class_threshold, 3);
    }

    #[test]
    fn test_bad_threshold_is_rejected() {
        assert!(EngineConfig::from_lookup(lookup(&[("DEGENERATE_CLASS_THRESHOLD", "two")])).is_err());
    }

    #[test]
    fn test_json_partial_config() {
        let config: EngineConfig = serde_json::from_str(r#"{"degenerate_class_threshold": 4}"#).unwrap();
        assert_eq!(config.degenerate_class_threshold, 4);
        assert_eq!(config.artifact_dir, PathBuf::from("artifacts"));
    }
}
