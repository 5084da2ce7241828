//! Project configuration file.
//!
//! ```toml
//! asset = "./models/concrete.glb"
//! all_paths = false
//!
//! [placement]
//! item_width = 1.24
//! gap_after_each_item = 0.2
//! stop_margin = 1.0
//! degenerate = "skip"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pathplace::PlacementConfig;
use serde::{Deserialize, Serialize};

/// Settings for one placement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Asset instantiated at every placement.
    pub asset: String,
    /// Place along every path of the input geometry, not only the first.
    pub all_paths: bool,
    /// Spacing parameters.
    pub placement: PlacementConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            asset: "./models/concrete.glb".to_string(),
            all_paths: false,
            placement: PlacementConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Load from a TOML file, or defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Parse from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.placement.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathplace::DegeneratePolicy;

    #[test]
    fn test_partial_file() {
        let config = ProjectConfig::from_toml(
            r#"
            asset = "barrier.glb"

            [placement]
            item_width = 2.5
            degenerate = "fail"
            "#,
        )
        .unwrap();
        assert_eq!(config.asset, "barrier.glb");
        assert_eq!(config.placement.item_width, 2.5);
        assert_eq!(config.placement.gap_after_each_item, 0.2);
        assert_eq!(config.placement.degenerate, DegeneratePolicy::Fail);
        assert!(!config.all_paths);
    }

    #[test]
    fn test_rejects_bad_width() {
        assert!(ProjectConfig::from_toml("[placement]\nitem_width = 0.0\n").is_err());
    }

    #[test]
    fn test_default_renders_and_parses() {
        let text = ProjectConfig::default().to_toml().unwrap();
        assert_eq!(ProjectConfig::from_toml(&text).unwrap(), ProjectConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("walls.toml");
        fs::write(&path, "all_paths = true\n").unwrap();
        let config = ProjectConfig::load(Some(&path)).unwrap();
        assert!(config.all_paths);
        assert!(ProjectConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
        assert_eq!(ProjectConfig::load(None).unwrap(), ProjectConfig::default());
    }
}
