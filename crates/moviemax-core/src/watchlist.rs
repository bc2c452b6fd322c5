use moviemax_models::CatalogEntry;
use serde::Serialize;
use tracing::debug;

/// Trait for items keyed by their display title
pub trait GetTitle {
    fn get_title(&self) -> &str;
}

impl GetTitle for CatalogEntry {
    fn get_title(&self) -> &str {
        &self.title
    }
}

/// Add `entry` if no element shares its title, otherwise remove every element
/// with that title. Returns the new list and whether the entry was added.
///
/// Toggling the same entry twice restores a list that did not hold its title.
pub fn toggle<T>(watchlist: &[T], entry: &T) -> (Vec<T>, bool)
where
    T: Clone + GetTitle,
{
    let title = entry.get_title();
    if contains_title(watchlist, title) {
        let remaining: Vec<T> = watchlist
            .iter()
            .filter(|item| item.get_title() != title)
            .cloned()
            .collect();
        (remaining, false)
    } else {
        let mut extended = watchlist.to_vec();
        extended.push(entry.clone());
        (extended, true)
    }
}

/// Append `entry` unless its title is already present
pub fn add<T>(watchlist: &[T], entry: &T) -> Vec<T>
where
    T: Clone + GetTitle,
{
    let mut result = watchlist.to_vec();
    if !contains_title(watchlist, entry.get_title()) {
        result.push(entry.clone());
    }
    result
}

pub fn contains_title<T: GetTitle>(items: &[T], title: &str) -> bool {
    items.iter().any(|item| item.get_title() == title)
}

/// Keep the first item for each title, preserving order
pub fn remove_duplicates_by_title<T>(items: Vec<T>) -> Vec<T>
where
    T: GetTitle,
{
    let mut result: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !contains_title(&result, item.get_title()) {
            result.push(item);
        }
    }
    result
}

/// The user's session watchlist: ordered, unique by title, in memory only
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Watchlist {
    items: Vec<CatalogEntry>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from existing entries, dropping repeated titles
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self {
            items: remove_duplicates_by_title(entries),
        }
    }

    /// Returns `true` if the entry was added, `false` if it was removed
    pub fn toggle(&mut self, entry: &CatalogEntry) -> bool {
        let (items, added) = toggle(&self.items, entry);
        self.items = items;
        debug!("Watchlist toggle {:?}: added={}, size={}", entry.title, added, self.items.len());
        added
    }

    /// Returns `false` when the title was already present
    pub fn add(&mut self, entry: &CatalogEntry) -> bool {
        let before = self.items.len();
        self.items = add(&self.items, entry);
        self.items.len() > before
    }

    /// Returns `false` when the title was not present
    pub fn remove(&mut self, title: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.title != title);
        self.items.len() < before
    }

    pub fn contains(&self, title: &str) -> bool {
        contains_title(&self.items, title)
    }

    pub fn items(&self) -> &[CatalogEntry] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a Watchlist {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
