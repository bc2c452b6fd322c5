use moviemax_models::{CatalogEntry, RawEntry};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{CatalogLoadError, CatalogWriteError, TrackerError};

/// Write the full entry list as a JSON array, replacing the file.
///
/// Writes a sibling temp file and renames it over the target, so a failed write
/// leaves the previous content in place.
pub fn save_entries(entries: &[CatalogEntry], path: &Path) -> Result<(), CatalogWriteError> {
    let json = serde_json::to_string_pretty(entries).map_err(CatalogWriteError::Serialize)?;
    write_replacing(path, &json)?;
    debug!("Saved {} entries to {}", entries.len(), path.display());
    Ok(())
}

/// Write tracker records back exactly as held, one JSON array
pub fn save_records(records: &[Value], path: &Path) -> Result<(), CatalogWriteError> {
    let json = serde_json::to_string_pretty(records).map_err(CatalogWriteError::Serialize)?;
    write_replacing(path, &json)?;
    debug!("Saved {} tracker records to {}", records.len(), path.display());
    Ok(())
}

fn write_replacing(path: &Path, json: &str) -> Result<(), CatalogWriteError> {
    let write_err = |source| CatalogWriteError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let temp_path = path.with_extension("json.tmp");
    if let Err(e) = std::fs::write(&temp_path, json) {
        warn!("Failed to write {}: {}", temp_path.display(), e);
        let _ = std::fs::remove_file(&temp_path);
        return Err(write_err(e));
    }
    if let Err(e) = std::fs::rename(&temp_path, path) {
        warn!("Failed to replace {}: {}", path.display(), e);
        let _ = std::fs::remove_file(&temp_path);
        return Err(write_err(e));
    }
    Ok(())
}

/// Load the records of a tracker file untouched. A missing file is an empty list.
///
/// Items of any shape are kept so a later save writes them back as they were.
pub fn load_records(path: &Path) -> Result<Vec<Value>, CatalogLoadError> {
    if !path.exists() {
        debug!("Tracker file {} does not exist, starting empty", path.display());
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&content).map_err(|source| CatalogLoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Array(records) => Ok(records),
        _ => Err(CatalogLoadError::UnsupportedShape {
            path: path.to_path_buf(),
        }),
    }
}

/// An element of a tracker list, addressed by title
pub trait TrackedItem: Clone {
    /// `None` for items that have no title and can never be matched
    fn tracked_title(&self) -> Option<&str>;

    fn set_watched(&mut self);
}

impl TrackedItem for CatalogEntry {
    fn tracked_title(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn set_watched(&mut self) {
        self.watched = true;
    }
}

/// Raw records: only the `watched` key is touched, every other key is kept
impl TrackedItem for Value {
    fn tracked_title(&self) -> Option<&str> {
        self.get("title").and_then(Value::as_str)
    }

    fn set_watched(&mut self) {
        if let Value::Object(map) = self {
            map.insert("watched".to_string(), Value::Bool(true));
        }
    }
}

/// Remove the first item titled `title`; unchanged copy if there is none
pub fn delete<T: TrackedItem>(items: &[T], title: &str) -> Vec<T> {
    let mut result = items.to_vec();
    if let Some(index) = position(items, title) {
        result.remove(index);
    }
    result
}

/// Set `watched` on the first item titled `title`; unchanged copy if there is none
pub fn mark_watched<T: TrackedItem>(items: &[T], title: &str) -> Vec<T> {
    let mut result = items.to_vec();
    if let Some(index) = position(items, title) {
        result[index].set_watched();
    }
    result
}

fn position<T: TrackedItem>(items: &[T], title: &str) -> Option<usize> {
    items.iter().position(|item| item.tracked_title() == Some(title))
}

/// Typed view of the object records; other items are left out
fn view(records: &[Value]) -> Vec<CatalogEntry> {
    records
        .iter()
        .filter(|record| record.is_object())
        .filter_map(|record| serde_json::from_value::<RawEntry>(record.clone()).ok())
        .map(|raw| CatalogEntry::from_raw(&raw, None))
        .collect()
}

/// Result of a mutation that targets an entry by title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationOutcome {
    Applied,
    /// No entry had the title; nothing changed and nothing was written
    NotFound,
}

/// The persistent watched-list: every mutation is saved before it becomes visible.
///
/// Records are held as loaded so keys this program does not know survive a save.
/// If the save fails the in-memory list keeps its previous state and the caller
/// gets the [`CatalogWriteError`].
#[derive(Debug)]
pub struct TrackerStore {
    path: PathBuf,
    records: Vec<Value>,
    entries: Vec<CatalogEntry>,
}

impl TrackerStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TrackerError> {
        let path = path.into();
        let records = load_records(&path)?;
        let entries = view(&records);
        if entries.len() < records.len() {
            warn!(
                "Tracker {}: {} item(s) are not entries and are kept as-is",
                path.display(),
                records.len() - entries.len()
            );
        }
        info!("Opened tracker {} ({} entries)", path.display(), entries.len());
        Ok(Self { path, records, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn watched_count(&self) -> usize {
        self.entries.iter().filter(|e| e.watched).count()
    }

    pub fn add(&mut self, title: &str, note: &str) -> Result<(), TrackerError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TrackerError::EmptyTitle);
        }

        let mut next = self.records.clone();
        next.push(json!({ "title": title, "note": note.trim(), "watched": false }));
        self.commit(next)?;
        info!("Tracker: added {:?}", title);
        Ok(())
    }

    pub fn delete(&mut self, title: &str) -> Result<MutationOutcome, TrackerError> {
        if position(&self.records, title).is_none() {
            debug!("Tracker: delete {:?} not found", title);
            return Ok(MutationOutcome::NotFound);
        }
        let next = delete(&self.records, title);
        self.commit(next)?;
        info!("Tracker: deleted {:?}", title);
        Ok(MutationOutcome::Applied)
    }

    pub fn mark_watched(&mut self, title: &str) -> Result<MutationOutcome, TrackerError> {
        if position(&self.records, title).is_none() {
            debug!("Tracker: mark watched {:?} not found", title);
            return Ok(MutationOutcome::NotFound);
        }
        let next = mark_watched(&self.records, title);
        self.commit(next)?;
        info!("Tracker: marked {:?} as watched", title);
        Ok(MutationOutcome::Applied)
    }

    fn commit(&mut self, next: Vec<Value>) -> Result<(), CatalogWriteError> {
        save_records(&next, &self.path)?;
        self.entries = view(&next);
        self.records = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moviemax_models::MediaKind;
    use tempfile::TempDir;

    fn movie(title: &str) -> CatalogEntry {
        CatalogEntry::new(title, MediaKind::Movie)
    }

    #[test]
    fn test_delete_first_match_only() {
        let entries = vec![movie("Dune"), movie("Dark"), movie("Dune")];
        let result = delete(&entries, "Dune");
        let titles: Vec<&str> = result.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Dark", "Dune"]);
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let entries = vec![movie("Dune")];
        assert_eq!(delete(&entries, "Dark"), entries);
    }

    #[test]
    fn test_mark_watched_missing_is_noop() {
        let entries = vec![movie("Dune"), movie("Dark")];
        assert_eq!(mark_watched(&entries, "Inception"), entries);
    }

    #[test]
    fn test_mark_watched_first_match() {
        let entries = vec![movie("Dune"), movie("Dune")];
        let result = mark_watched(&entries, "Dune");
        assert!(result[0].watched);
        assert!(!result[1].watched);
        assert!(!entries[0].watched);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movies.json");
        let mut watched = movie("Dune");
        watched.watched = true;
        watched.note = "IMAX".to_string();
        let mut series = CatalogEntry::new("Mirzapur", MediaKind::Series);
        series.type_label = "Web Series".to_string();

        save_entries(&[watched.clone(), series.clone()], &path).unwrap();
        let store = TrackerStore::open(&path).unwrap();
        assert_eq!(store.entries(), &[watched, series]);
        assert!(!dir.path().join("movies.json.tmp").exists());
    }

    #[test]
    fn test_load_missing_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(load_records(&dir.path().join("movies.json")).unwrap().is_empty());
    }

    #[test]
    fn test_load_object_layout_is_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movies.json");
        std::fs::write(&path, r#"{"movies": []}"#).unwrap();
        assert!(matches!(
            TrackerStore::open(&path),
            Err(TrackerError::Load(CatalogLoadError::UnsupportedShape { .. }))
        ));
    }

    #[test]
    fn test_mutations_keep_unknown_keys_and_items() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movies.json");
        std::fs::write(
            &path,
            r#"[
                {"title": "Dune", "note": "", "watched": false, "added_on": "2024-01-01"},
                "stray",
                {"title": "Dark", "trailer_url": "https://example.com/dark"}
            ]"#,
        )
        .unwrap();

        let mut store = TrackerStore::open(&path).unwrap();
        assert_eq!(store.entries().len(), 2);
        assert_eq!(store.records().len(), 3);

        store.mark_watched("Dune").unwrap();
        let on_disk = load_records(&path).unwrap();
        assert_eq!(
            on_disk[0],
            json!({"title": "Dune", "note": "", "watched": true, "added_on": "2024-01-01"})
        );
        assert_eq!(on_disk[1], json!("stray"));
        assert_eq!(on_disk[2], json!({"title": "Dark", "trailer_url": "https://example.com/dark"}));

        store.delete("Dune").unwrap();
        assert_eq!(
            load_records(&path).unwrap(),
            vec![json!("stray"), json!({"title": "Dark", "trailer_url": "https://example.com/dark"})]
        );
    }

    #[test]
    fn test_mark_watched_on_records_touches_only_watched() {
        let records = vec![json!(3), json!({"title": "Dune", "rating": 8})];
        let result = mark_watched(&records, "Dune");
        assert_eq!(result[0], json!(3));
        assert_eq!(result[1], json!({"title": "Dune", "rating": 8, "watched": true}));
        assert_eq!(delete(&records, "Ghost"), records);
    }

    #[test]
    fn test_load_minimal_tracker_records() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movies.json");
        std::fs::write(&path, r#"[{"title": "Dune", "note": "", "watched": true}, {"title": "Dark", "note": "s1"}]"#).unwrap();

        let store = TrackerStore::open(&path).unwrap();
        let loaded = store.entries();
        assert_eq!(loaded.len(), 2);
        assert!(loaded[0].watched);
        assert!(!loaded[1].watched);
        assert_eq!(loaded[1].note, "s1");
    }

    #[test]
    fn test_tracker_open_malformed_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movies.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            TrackerStore::open(&path),
            Err(TrackerError::Load(CatalogLoadError::Decode { .. }))
        ));
    }

    #[test]
    fn test_tracker_mutations_are_written_through() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movies.json");

        let mut store = TrackerStore::open(&path).unwrap();
        store.add("Dune", "  with friends ").unwrap();
        store.add("Dark", "").unwrap();
        assert_eq!(load_records(&path).unwrap().len(), 2);

        assert_eq!(store.mark_watched("Dune").unwrap(), MutationOutcome::Applied);
        let on_disk = load_records(&path).unwrap();
        assert_eq!(on_disk[0], json!({"title": "Dune", "note": "with friends", "watched": true}));
        assert_eq!(store.watched_count(), 1);

        assert_eq!(store.delete("Dark").unwrap(), MutationOutcome::Applied);
        assert_eq!(load_records(&path).unwrap().len(), 1);

        let reopened = TrackerStore::open(&path).unwrap();
        assert_eq!(reopened.entries(), store.entries());
    }

    #[test]
    fn test_tracker_not_found_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("movies.json");
        let mut store = TrackerStore::open(&path).unwrap();

        assert_eq!(store.mark_watched("Ghost").unwrap(), MutationOutcome::NotFound);
        assert_eq!(store.delete("Ghost").unwrap(), MutationOutcome::NotFound);
        assert!(store.entries().is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_tracker_rejects_empty_title() {
        let dir = TempDir::new().unwrap();
        let mut store = TrackerStore::open(dir.path().join("movies.json")).unwrap();
        assert!(matches!(store.add("   ", "note"), Err(TrackerError::EmptyTitle)));
        assert!(store.entries().is_empty());
    }

    #[test]
    fn test_failed_write_leaves_memory_unchanged() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be makes the final rename fail
        let path = dir.path().join("movies.json");
        let mut store = TrackerStore::open(&path).unwrap();
        store.add("Dune", "").unwrap();

        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let result = store.mark_watched("Dune");
        assert!(matches!(result, Err(TrackerError::Write(CatalogWriteError::Write { .. }))));
        assert!(!store.entries()[0].watched);

        let result = store.add("Dark", "");
        assert!(matches!(result, Err(TrackerError::Write(_))));
        assert_eq!(store.entries().len(), 1);
    }
}
