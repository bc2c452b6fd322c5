use anyhow::Result;
use std::path::PathBuf;

/// Base directory from the `MOVIEMAX_HOME` environment variable, if set
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var_os("MOVIEMAX_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("moviemax");

        Ok(Self::from_base(base_dir))
    }

    /// Config files at the base level, logs in a subdirectory
    pub fn from_base(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            log_dir: base.join("logs"),
            config_dir: base,
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("moviemax.log")
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        // Platform config dir (e.g. ~/.config/moviemax on Linux), else the working directory
        Self::new().unwrap_or_else(|_| Self::from_base(".moviemax"))
    }
}
