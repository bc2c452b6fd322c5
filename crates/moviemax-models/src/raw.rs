use serde::Deserialize;
use serde_json::Value;

/// An entry exactly as it appears in a catalog or tracker file.
///
/// Every field is an untyped JSON value so a record with an unexpected shape
/// (a numeric year, a string where a list was expected) still deserializes;
/// the typed view is built by [`crate::CatalogEntry::from_raw`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default, rename = "type")]
    pub media_type: Option<Value>,
    #[serde(default)]
    pub category: Option<Value>,
    #[serde(default)]
    pub poster: Option<Value>,
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default)]
    pub rating: Option<Value>,
    #[serde(default)]
    pub language: Option<Value>,
    #[serde(default)]
    pub genres: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub trailer: Option<Value>,
    #[serde(default)]
    pub trailer_url: Option<Value>,
    #[serde(default)]
    pub note: Option<Value>,
    #[serde(default)]
    pub watched: Option<Value>,
}

impl RawEntry {
    /// Source `type` text, if the record carries a usable one
    pub fn type_text(&self) -> Option<String> {
        non_empty_text(self.media_type.as_ref())
    }

    /// Trailer URL from either spelling, `trailer` winning when both are set
    pub fn trailer_text(&self) -> Option<String> {
        non_empty_text(self.trailer.as_ref()).or_else(|| non_empty_text(self.trailer_url.as_ref()))
    }

    pub fn genres_list(&self) -> Vec<String> {
        match &self.genres {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| non_empty_text(Some(item)))
                .collect(),
            Some(other) => non_empty_text(Some(other)).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Only a JSON `true` counts as watched
    pub fn watched_flag(&self) -> bool {
        matches!(self.watched, Some(Value::Bool(true)))
    }
}

/// Render a scalar JSON value as display text.
///
/// Strings are trimmed, numbers and booleans are formatted; nulls, arrays and
/// objects have no text form.
pub fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub fn non_empty_text(value: Option<&Value>) -> Option<String> {
    scalar_text(value).filter(|s| !s.is_empty())
}
