use moviemax_config::FallbackPolicy;
use moviemax_models::{CatalogEntry, MediaKind, RawEntry};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::CatalogLoadError;
use crate::query::fold_case;

/// Where the entries of a [`CatalogStore`] came from
#[derive(Debug)]
pub enum LoadSource {
    File(PathBuf),
    Fallback {
        policy: FallbackPolicy,
        reason: CatalogLoadError,
    },
    /// Built directly from entries (tracker lists, tests)
    Memory,
}

/// The canonical, read-only list of catalog entries
#[derive(Debug)]
pub struct CatalogStore {
    entries: Vec<CatalogEntry>,
    source: LoadSource,
}

impl CatalogStore {
    /// Load a catalog file, falling back to `policy` when it is missing or unreadable.
    ///
    /// Never fails: the reason for a fallback is kept in [`CatalogStore::source`].
    pub fn load(path: &Path, policy: FallbackPolicy) -> Self {
        match read_catalog(path) {
            Ok(entries) => {
                info!("Loaded catalog from {} ({} entries)", path.display(), entries.len());
                Self {
                    entries,
                    source: LoadSource::File(path.to_path_buf()),
                }
            }
            Err(reason) => {
                match &reason {
                    CatalogLoadError::NotFound(_) => {
                        info!("{}; using {:?} fallback catalog", reason, policy)
                    }
                    _ => warn!("{}; using {:?} fallback catalog", reason, policy),
                }
                Self {
                    entries: fallback_entries(policy),
                    source: LoadSource::Fallback { policy, reason },
                }
            }
        }
    }

    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            source: LoadSource::Memory,
        }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn source(&self) -> &LoadSource {
        &self.source
    }

    /// The error that forced a fallback, if any
    pub fn load_error(&self) -> Option<&CatalogLoadError> {
        match &self.source {
            LoadSource::Fallback { reason, .. } => Some(reason),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries of one kind, in catalog order
    pub fn of_kind(&self, kind: MediaKind) -> Vec<&CatalogEntry> {
        self.entries.iter().filter(|e| e.kind == kind).collect()
    }

    /// Movies then series, the layout of the home view
    pub fn sections(&self) -> Vec<(MediaKind, Vec<&CatalogEntry>)> {
        [MediaKind::Movie, MediaKind::Series]
            .into_iter()
            .map(|kind| (kind, self.of_kind(kind)))
            .collect()
    }

    /// Exact title match, then a case-insensitive one
    pub fn find(&self, title: &str) -> Option<&CatalogEntry> {
        let title = title.trim();
        self.entries
            .iter()
            .find(|e| e.title == title)
            .or_else(|| {
                let folded = fold_case(title);
                self.entries.iter().find(|e| fold_case(&e.title) == folded)
            })
    }
}

/// Read and normalize a catalog file
pub fn read_catalog(path: &Path) -> Result<Vec<CatalogEntry>, CatalogLoadError> {
    if !path.exists() {
        return Err(CatalogLoadError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| CatalogLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    entries_from_value(value).ok_or_else(|| CatalogLoadError::UnsupportedShape {
        path: path.to_path_buf(),
    })
}

/// Normalize a decoded document into entries.
///
/// Accepts a flat array (each item typed by its own `type`, untyped items default
/// to movie) or an object with `movies` and `series` arrays (movies first, each
/// untyped item tagged with its section). Returns `None` for any other layout.
pub fn entries_from_value(value: Value) -> Option<Vec<CatalogEntry>> {
    match value {
        Value::Array(items) => Some(normalize_items(items, None)),
        Value::Object(mut map) => {
            if !map.contains_key("movies") && !map.contains_key("series") {
                return None;
            }

            let mut entries = Vec::new();
            for key in ["movies", "series"] {
                let origin = MediaKind::from_section(key);
                match map.remove(key) {
                    Some(Value::Array(items)) => entries.extend(normalize_items(items, origin)),
                    Some(Value::Null) | None => {}
                    Some(_) => return None,
                }
            }
            Some(entries)
        }
        _ => None,
    }
}

fn normalize_items(items: Vec<Value>, origin: Option<MediaKind>) -> Vec<CatalogEntry> {
    let total = items.len();
    let mut skipped = 0;

    let entries: Vec<CatalogEntry> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                skipped += 1;
                warn!("Skipping catalog item {}: expected an object, found {}", index, kind_name(&item));
                return None;
            }
            // Every RawEntry field is optional and untyped, so any object decodes
            let raw: RawEntry = serde_json::from_value(item).ok()?;
            let entry = CatalogEntry::from_raw(&raw, origin);
            if raw.type_text().is_some() && MediaKind::normalize(&entry.type_label).is_none() {
                debug!("Unrecognized type {:?} for {:?}, treating as {}", entry.type_label, entry.title, entry.kind);
            }
            Some(entry)
        })
        .collect();

    debug!(
        "normalize_items: origin={:?}, total={}, kept={}, skipped={}",
        origin,
        total,
        entries.len(),
        skipped
    );

    entries
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn fallback_entries(policy: FallbackPolicy) -> Vec<CatalogEntry> {
    match policy {
        FallbackPolicy::Empty => Vec::new(),
        FallbackPolicy::Sample => sample_catalog(),
    }
}

/// The built-in catalog used by [`FallbackPolicy::Sample`]
pub fn sample_catalog() -> Vec<CatalogEntry> {
    const SAMPLES: [(&str, MediaKind, &str); 6] = [
        ("Inception", MediaKind::Movie, "https://www.youtube.com/watch?v=8hP9D6kZseM"),
        ("Interstellar", MediaKind::Movie, "https://www.youtube.com/watch?v=zSWdZVtXT7E"),
        ("Dune", MediaKind::Movie, "https://www.youtube.com/watch?v=n9xhJrPXop4"),
        ("Breaking Bad", MediaKind::Series, "https://www.youtube.com/watch?v=HhesaQXLuRY"),
        ("Dark", MediaKind::Series, "https://www.youtube.com/watch?v=rrwycJ08PSA"),
        ("Stranger Things", MediaKind::Series, "https://www.youtube.com/watch?v=b9EkMc79ZSU"),
    ];

    SAMPLES
        .iter()
        .map(|(title, kind, trailer)| CatalogEntry::new(*title, *kind).with_trailer(*trailer))
        .collect()
}
