pub mod config;
pub mod paths;

pub use config::{CatalogConfig, Config, DisplayConfig, FallbackPolicy, TrackerConfig, DEFAULT_FALLBACK_POLICY};
pub use paths::{base_path_override, PathManager};
