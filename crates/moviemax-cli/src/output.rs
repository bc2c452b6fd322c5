use clap::ValueEnum;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use moviemax_models::CatalogEntry;
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "✓".green(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "success",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors are shown even in quiet mode
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", "✗".red(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "error",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{}", msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "info",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => {
                println!("{} {}", "⚠".yellow(), msg.as_ref());
            }
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": "warning",
                    "message": msg.as_ref()
                }));
            }
        }
    }

    /// Plain text in human mode; skipped in JSON modes, where `json` carries the data
    pub fn println(&self, msg: impl AsRef<str>) {
        if self.quiet || self.format != OutputFormat::Human {
            return;
        }
        println!("{}", msg.as_ref());
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }

        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Human => {
                println!("{}", data);
            }
        }
    }
}

pub fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn header_cell(text: &str) -> Cell {
    Cell::new(text).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

fn check_mark(value: bool) -> String {
    if value {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

/// One row per entry with the compact card fields.
///
/// `on_watchlist` adds a ★ column when given.
pub fn entry_table<'a, I>(entries: I, description_limit: usize, on_watchlist: Option<&dyn Fn(&str) -> bool>) -> Table
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let mut table = styled_table();
    let mut header = vec![
        header_cell("Title"),
        header_cell("Type"),
        header_cell("Info"),
        header_cell("Genres"),
        header_cell("Description"),
        header_cell("Trailer"),
    ];
    if on_watchlist.is_some() {
        header.push(header_cell("★"));
    }
    table.set_header(header);

    for entry in entries {
        let mut row = vec![
            Cell::new(&entry.title).add_attribute(Attribute::Bold),
            Cell::new(&entry.type_label),
            Cell::new(entry.info_line()),
            Cell::new(entry.genres_line()),
            Cell::new(entry.short_description(description_limit)),
            Cell::new(check_mark(entry.has_trailer())),
        ];
        if let Some(listed) = on_watchlist {
            row.push(Cell::new(if listed(&entry.title) { "★" } else { "" }));
        }
        table.add_row(row);
    }
    table
}

/// Every field of one entry
pub fn entry_card(entry: &CatalogEntry, on_watchlist: Option<bool>) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header_cell(&entry.title)]);

    let poster = match entry.poster_path() {
        Some(path) => path.display().to_string(),
        None if entry.poster.is_empty() => "-".to_string(),
        None => format!("{} (missing)", entry.poster),
    };

    let mut rows: Vec<(&str, String)> = vec![
        ("Type", entry.type_label.clone()),
        ("Category", dash_if_empty(&entry.category)),
        ("Info", entry.info_line()),
        ("Genres", dash_if_empty(&entry.genres_line())),
        ("Description", entry.description.clone()),
        ("Poster", poster),
        ("Trailer", dash_if_empty(&entry.trailer)),
    ];
    if !entry.note.is_empty() {
        rows.push(("Note", entry.note.clone()));
    }
    if let Some(listed) = on_watchlist {
        rows.push(("Watchlist", check_mark(listed)));
    }

    for (label, value) in rows {
        table.add_row(vec![Cell::new(label).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}

fn dash_if_empty(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

/// JSON view of entries, with the normalized kind next to the source type label
pub fn entries_json<'a, I>(entries: I) -> serde_json::Value
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    serde_json::Value::Array(entries.into_iter().map(entry_json).collect())
}

pub fn entry_json(entry: &CatalogEntry) -> serde_json::Value {
    let mut value = serde_json::to_value(entry).unwrap_or_else(|_| json!({ "title": entry.title }));
    if let Some(object) = value.as_object_mut() {
        object.insert("kind".to_string(), json!(entry.kind.as_str()));
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use moviemax_models::MediaKind;

    fn dune() -> CatalogEntry {
        let mut entry = CatalogEntry::new("Dune", MediaKind::Movie)
            .with_trailer("https://www.youtube.com/watch?v=n9xhJrPXop4");
        entry.year = "2021".to_string();
        entry.rating = "8.0".to_string();
        entry.language = "English".to_string();
        entry.genres = vec!["Sci-Fi".to_string(), "Adventure".to_string()];
        entry.description = "A noble family becomes embroiled in a war for control over the galaxy's most valuable asset.".to_string();
        entry
    }

    #[test]
    fn test_entry_table_rows() {
        let entries = vec![dune(), CatalogEntry::new("Dark", MediaKind::Series)];
        let rendered = entry_table(&entries, 20, None).to_string();
        assert!(rendered.contains("Dune"));
        assert!(rendered.contains("Dark"));
        assert!(rendered.contains("2021 | ⭐ 8.0 | English"));
        assert!(!rendered.contains("★"));
    }

    #[test]
    fn test_entry_table_watchlist_column() {
        let entries = vec![dune()];
        let listed = |title: &str| title == "Dune";
        let rendered = entry_table(&entries, 20, Some(&listed)).to_string();
        assert!(rendered.contains("★"));
    }

    #[test]
    fn test_entry_card_shows_missing_fields_as_dash() {
        let entry = CatalogEntry::new("Untitled", MediaKind::Movie);
        let rendered = entry_card(&entry, Some(false)).to_string();
        assert!(rendered.contains("Category"));
        assert!(rendered.contains("Watchlist"));
        assert!(rendered.contains('-'));
    }

    #[test]
    fn test_entry_json_adds_kind() {
        let mut entry = CatalogEntry::new("Mirzapur", MediaKind::Series);
        entry.type_label = "Web Series".to_string();
        let value = entry_json(&entry);
        assert_eq!(value["type"], "Web Series");
        assert_eq!(value["kind"], "series");
        assert_eq!(entries_json(&vec![entry]).as_array().map(Vec::len), Some(1));
    }
}
