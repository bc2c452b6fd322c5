use serde::Serialize;
use std::path::Path;

use crate::media::MediaKind;
use crate::raw::{non_empty_text, scalar_text, RawEntry};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_DESCRIPTION: &str = "No description available.";

/// A fully populated catalog record.
///
/// Built once at load time; every display field holds a value (possibly empty
/// text) so nothing downstream has to re-derive defaults.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogEntry {
    pub title: String,
    /// Type text as written in the source ("Web Series"), or the kind name when absent
    #[serde(rename = "type")]
    pub type_label: String,
    #[serde(skip)]
    pub kind: MediaKind,
    pub category: String,
    pub poster: String,
    pub year: String,
    pub rating: String,
    pub language: String,
    pub genres: Vec<String>,
    pub description: String,
    pub trailer: String,
    pub note: String,
    pub watched: bool,
}

impl CatalogEntry {
    /// Create an entry with every optional field defaulted
    pub fn new(title: impl Into<String>, kind: MediaKind) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title.trim().to_string()
        };

        Self {
            title,
            type_label: kind.as_str().to_string(),
            kind,
            category: String::new(),
            poster: String::new(),
            year: String::new(),
            rating: String::new(),
            language: String::new(),
            genres: Vec::new(),
            description: DEFAULT_DESCRIPTION.to_string(),
            trailer: String::new(),
            note: String::new(),
            watched: false,
        }
    }

    /// Normalize a raw record.
    ///
    /// `origin` is the kind implied by where the record was found (the `movies` or
    /// `series` section); it only applies when the record has no `type` of its own.
    /// Unrecognized type text keeps its label and falls back to the origin, then movie.
    pub fn from_raw(raw: &RawEntry, origin: Option<MediaKind>) -> Self {
        let (kind, type_label) = match raw.type_text() {
            Some(text) => {
                let kind = MediaKind::normalize(&text)
                    .or(origin)
                    .unwrap_or_default();
                (kind, text)
            }
            None => {
                let kind = origin.unwrap_or_default();
                (kind, kind.as_str().to_string())
            }
        };

        let text_or_empty = |value: Option<&serde_json::Value>| scalar_text(value).unwrap_or_default();

        Self {
            title: non_empty_text(raw.title.as_ref()).unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            type_label,
            kind,
            category: text_or_empty(raw.category.as_ref()),
            poster: text_or_empty(raw.poster.as_ref()),
            year: text_or_empty(raw.year.as_ref()),
            rating: text_or_empty(raw.rating.as_ref()),
            language: text_or_empty(raw.language.as_ref()),
            genres: raw.genres_list(),
            description: non_empty_text(raw.description.as_ref())
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            trailer: raw.trailer_text().unwrap_or_default(),
            note: text_or_empty(raw.note.as_ref()),
            watched: raw.watched_flag(),
        }
    }

    pub fn with_trailer(mut self, url: impl Into<String>) -> Self {
        self.trailer = url.into();
        self
    }

    pub fn is_series(&self) -> bool {
        self.kind == MediaKind::Series
    }

    /// `"2010 | ⭐ 8.8 | English"`; empty parts stay empty
    pub fn info_line(&self) -> String {
        format!("{} | ⭐ {} | {}", self.year, self.rating, self.language)
    }

    pub fn genres_line(&self) -> String {
        self.genres.join(", ")
    }

    /// Description cut to at most `limit` characters, ending in "..." when shortened
    pub fn short_description(&self, limit: usize) -> String {
        if self.description.chars().count() <= limit {
            return self.description.clone();
        }
        let keep = limit.saturating_sub(3);
        let mut short: String = self.description.chars().take(keep).collect();
        short.push_str("...");
        short
    }

    /// Poster path, only when it names a file that exists
    pub fn poster_path(&self) -> Option<&Path> {
        if self.poster.is_empty() {
            return None;
        }
        let path = Path::new(&self.poster);
        path.exists().then_some(path)
    }

    pub fn has_trailer(&self) -> bool {
        !self.trailer.trim().is_empty()
    }
}
