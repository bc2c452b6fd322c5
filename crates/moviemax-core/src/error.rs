use std::path::PathBuf;
use thiserror::Error;

/// A catalog or tracker file could not be turned into entries.
///
/// The catalog recovers from every variant with its fallback policy; the tracker
/// surfaces them so a later save cannot clobber a file the user can still fix.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("catalog file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unsupported layout in {path}: expected an array of entries or an object with \"movies\"/\"series\" arrays")]
    UnsupportedShape { path: PathBuf },
}

/// A mutation could not be persisted. The in-memory list was left untouched.
#[derive(Debug, Error)]
pub enum CatalogWriteError {
    #[error("failed to serialize entries: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Load(#[from] CatalogLoadError),

    #[error(transparent)]
    Write(#[from] CatalogWriteError),

    #[error("title cannot be empty")]
    EmptyTitle,
}

#[derive(Debug, Error)]
pub enum TrailerError {
    #[error("invalid trailer URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("trailer URL must be http or https, got {0}")]
    UnsupportedScheme(String),

    #[error("no program found to open URLs (tried {0})")]
    NoOpener(String),

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
