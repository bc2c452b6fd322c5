use crate::output::{entries_json, entry_card, entry_json, entry_table, Output};
use color_eyre::Result;
use moviemax_config::Config;
use moviemax_core::{play_trailer, CatalogStore, Library, LoadSource, Query, SystemOpener, TrailerOutcome, UrlOpener};
use moviemax_models::CatalogEntry;
use owo_colors::OwoColorize;
use serde_json::json;

/// Load the catalog from config, telling the user when a fallback was used
pub fn load_library(config: &Config, output: &Output) -> Library {
    let library = Library::from_config(config);
    report_source(library.catalog(), output);
    library
}

fn report_source(catalog: &CatalogStore, output: &Output) {
    if let LoadSource::Fallback { policy, reason } = catalog.source() {
        output.warn(format!(
            "{}; showing the {} fallback catalog",
            reason,
            format!("{:?}", policy).to_lowercase()
        ));
    }
}

pub fn run_home(config: &Config, output: &Output) -> Result<()> {
    let library = load_library(config, output);

    if !output.is_human() {
        let sections: serde_json::Map<String, serde_json::Value> = library
            .catalog()
            .sections()
            .into_iter()
            .map(|(kind, entries)| (kind.as_str().to_string(), entries_json(entries)))
            .collect();
        output.json(&serde_json::Value::Object(sections));
        return Ok(());
    }

    if library.catalog().is_empty() {
        output.info("The catalog is empty.");
        return Ok(());
    }

    for (kind, entries) in library.catalog().sections() {
        output.println(format!("\n{}", kind.section_title().bright_cyan().bold()));
        if entries.is_empty() {
            output.println("  (none)".bright_black().to_string());
            continue;
        }
        output.println(entry_table(entries, library.description_limit(), None).to_string());
    }
    Ok(())
}

/// Filters given to `moviemax list`
#[derive(Debug, Default)]
pub struct ListFilters {
    pub media_type: Option<String>,
    pub category: Option<String>,
    pub genre: Option<String>,
    pub search: Option<String>,
}

impl ListFilters {
    fn into_query(self) -> Query {
        let mut query = Query::new();
        if let Some(media_type) = self.media_type {
            query = query.with_type(media_type);
        }
        if let Some(category) = self.category {
            query = query.with_category(category);
        }
        if let Some(genre) = self.genre {
            query = query.with_genre(genre);
        }
        if let Some(search) = self.search {
            query = query.with_search(search);
        }
        query
    }
}

pub fn run_list(config: &Config, filters: ListFilters, output: &Output) -> Result<()> {
    let mut library = load_library(config, output);
    library.set_query(filters.into_query());

    let visible = library.visible();
    if !output.is_human() {
        output.json(&json!({
            "view": library.query().describe(),
            "query": library.query(),
            "count": visible.len(),
            "entries": entries_json(visible.iter().copied()),
        }));
        return Ok(());
    }

    output.println(format!("\n{}", library.query().describe().bright_cyan().bold()));
    if visible.is_empty() {
        output.info("No titles match.");
        return Ok(());
    }
    output.println(entry_table(visible.iter().copied(), library.description_limit(), None).to_string());
    output.println(format!("{} title(s)", visible.len()).bright_black().to_string());
    Ok(())
}

pub fn run_show(config: &Config, title: &str, output: &Output) -> Result<()> {
    let library = load_library(config, output);
    let entry = find_or_err(&library, title)?;

    if output.is_human() {
        output.println(entry_card(entry, None).to_string());
    } else {
        output.json(&entry_json(entry));
    }
    Ok(())
}

pub fn run_trailer(config: &Config, title: &str, output: &Output) -> Result<()> {
    let library = load_library(config, output);
    let entry = find_or_err(&library, title)?;
    open_trailer(entry, &SystemOpener, output)
}

/// Open an entry's trailer; a missing trailer is reported, not an error
pub fn open_trailer(entry: &CatalogEntry, opener: &dyn UrlOpener, output: &Output) -> Result<()> {
    let outcome = play_trailer(entry, opener)
        .map_err(|e| color_eyre::eyre::eyre!("Could not play trailer for '{}': {}", entry.title, e))?;

    match outcome {
        TrailerOutcome::Opened(url) => {
            output.success(format!("Opening trailer for '{}': {}", entry.title, url));
        }
        TrailerOutcome::Unavailable => {
            output.warn(format!("Trailer not available for '{}'", entry.title));
        }
    }
    Ok(())
}

fn find_or_err<'a>(library: &'a Library, title: &str) -> Result<&'a CatalogEntry> {
    library
        .find(title)
        .ok_or_else(|| color_eyre::eyre::eyre!("No title named '{}' in the catalog", title.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use moviemax_config::FallbackPolicy;
    use moviemax_core::TrailerError;
    use moviemax_models::MediaKind;
    use std::cell::RefCell;
    use tempfile::TempDir;
    use url::Url;

    #[derive(Default)]
    struct RecordingOpener {
        opened: RefCell<Vec<String>>,
    }

    impl UrlOpener for RecordingOpener {
        fn open(&self, url: &Url) -> std::result::Result<(), TrailerError> {
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    fn quiet_output() -> Output {
        Output::new(OutputFormat::Json, true)
    }

    fn sample_config(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.catalog.path = dir.path().join("data.json");
        config.catalog.fallback = FallbackPolicy::Sample;
        config
    }

    #[test]
    fn test_show_unknown_title_is_error() {
        let dir = TempDir::new().unwrap();
        let config = sample_config(&dir);
        assert!(run_show(&config, "Dune", &quiet_output()).is_ok());
        assert!(run_show(&config, "No Such Film", &quiet_output()).is_err());
    }

    #[test]
    fn test_list_and_home_run_against_file() {
        let dir = TempDir::new().unwrap();
        let config = sample_config(&dir);
        std::fs::write(
            &config.catalog.path,
            r#"{"movies": [{"title": "Dune"}], "series": [{"title": "Dark"}]}"#,
        )
        .unwrap();

        run_home(&config, &quiet_output()).unwrap();
        let filters = ListFilters {
            media_type: Some("series".to_string()),
            ..ListFilters::default()
        };
        run_list(&config, filters, &quiet_output()).unwrap();
    }

    #[test]
    fn test_list_filters_build_query() {
        let filters = ListFilters {
            media_type: Some("movie".to_string()),
            category: Some("Action".to_string()),
            genre: Some("  ".to_string()),
            search: None,
        };
        assert_eq!(
            filters.into_query(),
            Query::new().with_type("movie").with_category("Action")
        );
    }

    #[test]
    fn test_open_trailer_missing_is_not_error() {
        let opener = RecordingOpener::default();
        let entry = CatalogEntry::new("Dune", MediaKind::Movie);
        open_trailer(&entry, &opener, &quiet_output()).unwrap();
        assert!(opener.opened.borrow().is_empty());

        let entry = entry.with_trailer("https://www.youtube.com/watch?v=n9xhJrPXop4");
        open_trailer(&entry, &opener, &quiet_output()).unwrap();
        assert_eq!(opener.opened.borrow().len(), 1);
    }

    #[test]
    fn test_open_trailer_bad_url_is_error() {
        let opener = RecordingOpener::default();
        let entry = CatalogEntry::new("Dune", MediaKind::Movie).with_trailer("javascript:alert(1)");
        assert!(open_trailer(&entry, &opener, &quiet_output()).is_err());
        assert!(opener.opened.borrow().is_empty());
    }
}
