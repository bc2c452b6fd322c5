use moviemax_models::{CatalogEntry, MediaKind};
use serde::Serialize;
use tracing::debug;

/// Lowercase one character at a time.
///
/// Unlike `str::to_lowercase` the result for a character never depends on its
/// neighbours (Greek final sigma), so a prefix of a folded string is the fold of
/// the prefix and substring search narrows monotonically.
pub fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Keep entries whose type matches `media_type` (case-insensitive).
///
/// A match is a substring of the entry's type label or kind name, or a query
/// that normalizes to the entry's kind, so "series" finds "Web Series" and
/// "web series" finds entries typed plainly "series". A blank query keeps everything.
pub fn filter_by_type<'a, I>(entries: I, media_type: &str) -> Vec<&'a CatalogEntry>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let needle = fold_case(media_type.trim());
    let wanted_kind = MediaKind::normalize(&needle);
    let filtered: Vec<&CatalogEntry> = entries
        .into_iter()
        .filter(|entry| type_matches(entry, &needle, wanted_kind))
        .collect();
    debug!("filter_by_type: query={:?}, result_count={}", needle, filtered.len());
    filtered
}

/// Keep entries whose category equals `category` ignoring case. A blank query
/// keeps everything.
pub fn filter_by_category<'a, I>(entries: I, category: &str) -> Vec<&'a CatalogEntry>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let needle = fold_case(category.trim());
    let filtered: Vec<&CatalogEntry> = entries
        .into_iter()
        .filter(|entry| category_matches(entry, &needle))
        .collect();
    debug!("filter_by_category: query={:?}, result_count={}", needle, filtered.len());
    filtered
}

/// Keep entries with a genre equal to `genre` ignoring case. A blank query keeps
/// everything.
pub fn filter_by_genre<'a, I>(entries: I, genre: &str) -> Vec<&'a CatalogEntry>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let needle = fold_case(genre.trim());
    let filtered: Vec<&CatalogEntry> = entries
        .into_iter()
        .filter(|entry| genre_matches(entry, &needle))
        .collect();
    debug!("filter_by_genre: query={:?}, result_count={}", needle, filtered.len());
    filtered
}

/// Case-insensitive title substring search.
///
/// An empty (or all-whitespace) query returns the whole input: a blank search
/// box shows everything, not nothing.
pub fn search<'a, I>(entries: I, query: &str) -> Vec<&'a CatalogEntry>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let needle = fold_case(query.trim());
    let filtered: Vec<&CatalogEntry> = entries
        .into_iter()
        .filter(|entry| title_matches(entry, &needle))
        .collect();
    debug!("search: query={:?}, result_count={}", needle, filtered.len());
    filtered
}

fn type_matches(entry: &CatalogEntry, needle: &str, wanted_kind: Option<MediaKind>) -> bool {
    needle.is_empty()
        || fold_case(&entry.type_label).contains(needle)
        || entry.kind.as_str().contains(needle)
        || wanted_kind == Some(entry.kind)
}

fn category_matches(entry: &CatalogEntry, needle: &str) -> bool {
    needle.is_empty() || fold_case(entry.category.trim()) == needle
}

fn genre_matches(entry: &CatalogEntry, needle: &str) -> bool {
    needle.is_empty() || entry.genres.iter().any(|g| fold_case(g.trim()) == needle)
}

fn title_matches(entry: &CatalogEntry, needle: &str) -> bool {
    needle.is_empty() || fold_case(&entry.title).contains(needle)
}

/// A combined view filter: type, then category, then genre, then title search.
///
/// Unset parts match everything, so `Query::default()` is the home view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = non_blank(media_type.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_blank(category.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = non_blank(genre.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = non_blank(search.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.media_type.is_none()
            && self.category.is_none()
            && self.genre.is_none()
            && self.search.is_none()
    }

    pub fn apply<'a, I>(&self, entries: I) -> Vec<&'a CatalogEntry>
    where
        I: IntoIterator<Item = &'a CatalogEntry>,
    {
        let needle = |part: &Option<String>| fold_case(part.as_deref().unwrap_or("").trim());
        let type_needle = needle(&self.media_type);
        let wanted_kind = MediaKind::normalize(&type_needle);
        let category_needle = needle(&self.category);
        let genre_needle = needle(&self.genre);
        let title_needle = needle(&self.search);

        entries
            .into_iter()
            .filter(|entry| {
                type_matches(entry, &type_needle, wanted_kind)
                    && category_matches(entry, &category_needle)
                    && genre_matches(entry, &genre_needle)
                    && title_matches(entry, &title_needle)
            })
            .collect()
    }

    /// Heading for a view produced by this query
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(media_type) = &self.media_type {
            parts.push(match MediaKind::normalize(media_type) {
                Some(kind) => kind.section_title().to_string(),
                None => format!("Type '{}'", media_type),
            });
        }
        if let Some(category) = &self.category {
            parts.push(format!("Category '{}'", category));
        }
        if let Some(genre) = &self.genre {
            parts.push(format!("Genre '{}'", genre));
        }
        if let Some(search) = &self.search {
            parts.push(format!("Search Results for '{}'", search));
        }

        if parts.is_empty() {
            "All Titles".to_string()
        } else {
            parts.join(" / ")
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
