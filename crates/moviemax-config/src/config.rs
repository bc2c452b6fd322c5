use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// What a catalog load yields when the source file is missing or unreadable.
///
/// Exactly one policy applies to a load; there is no mixing of the sample set
/// with partial file contents.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// An empty catalog
    Empty,
    /// The built-in sample catalog
    Sample,
}

pub const DEFAULT_FALLBACK_POLICY: FallbackPolicy = FallbackPolicy::Empty;

impl Default for FallbackPolicy {
    fn default() -> Self {
        DEFAULT_FALLBACK_POLICY
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub fallback: FallbackPolicy,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrackerConfig {
    #[serde(default = "default_tracker_path")]
    pub path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Longest description shown in compact views, in characters
    #[serde(default = "default_description_limit")]
    pub description_limit: usize,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data.json")
}

fn default_tracker_path() -> PathBuf {
    PathBuf::from("movies.json")
}

fn default_description_limit() -> usize {
    100
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            fallback: FallbackPolicy::default(),
        }
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            path: default_tracker_path(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            description_limit: default_description_limit(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        // Room for at least one character plus the ellipsis
        if self.display.description_limit < 4 {
            return Err(anyhow::anyhow!("display.description_limit must be at least 4"));
        }
        if self.catalog.path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("catalog.path cannot be empty"));
        }
        if self.tracker.path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("tracker.path cannot be empty"));
        }
        Ok(())
    }
}
