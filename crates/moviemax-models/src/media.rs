use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized kind of a catalog entry.
///
/// Source files spell this many ways ("Movie", "movie", "Web Series", "series"),
/// so every loader goes through [`MediaKind::normalize`] instead of comparing raw text.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Movie,
    Series,
}

impl MediaKind {
    /// Normalize free text into a kind (case-insensitive).
    ///
    /// Anything mentioning "series" is a series, so "Web Series" and "TV Series"
    /// land in the same bucket. Returns `None` for blank or unrecognized text.
    pub fn normalize(text: &str) -> Option<MediaKind> {
        let lowered = text.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }

        if lowered.contains("series") || matches!(lowered.as_str(), "show" | "tv" | "tv show") {
            Some(MediaKind::Series)
        } else if lowered.contains("movie") || lowered == "film" {
            Some(MediaKind::Movie)
        } else {
            None
        }
    }

    /// Kind implied by a section key of the `{"movies": [...], "series": [...]}` layout
    pub fn from_section(key: &str) -> Option<MediaKind> {
        match key {
            "movies" => Some(MediaKind::Movie),
            "series" => Some(MediaKind::Series),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
        }
    }

    /// Heading used when the catalog is shown in sections
    pub fn section_title(&self) -> &'static str {
        match self {
            MediaKind::Movie => "Movies",
            MediaKind::Series => "Web Series",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
