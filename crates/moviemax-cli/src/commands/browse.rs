use super::catalog::{load_library, open_trailer};
use super::prompts::{self, is_interactive};
use crate::output::{entry_card, entry_table, Output};
use color_eyre::Result;
use moviemax_config::Config;
use moviemax_core::{fold_case, Library, Query, SystemOpener};
use moviemax_models::{CatalogEntry, MediaKind};
use owo_colors::OwoColorize;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Home,
    Movies,
    Series,
    Search,
    Category,
    Genre,
    Details,
    ToggleWatchlist,
    Watchlist,
    Trailer,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 11] = [
        MenuItem::Home,
        MenuItem::Movies,
        MenuItem::Series,
        MenuItem::Search,
        MenuItem::Category,
        MenuItem::Genre,
        MenuItem::Details,
        MenuItem::ToggleWatchlist,
        MenuItem::Watchlist,
        MenuItem::Trailer,
        MenuItem::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuItem::Home => "Home",
            MenuItem::Movies => "Movies",
            MenuItem::Series => "Web Series",
            MenuItem::Search => "Search titles",
            MenuItem::Category => "Filter by category",
            MenuItem::Genre => "Filter by genre",
            MenuItem::Details => "Show details",
            MenuItem::ToggleWatchlist => "Add to / remove from watchlist",
            MenuItem::Watchlist => "Show watchlist",
            MenuItem::Trailer => "Play trailer",
            MenuItem::Quit => "Quit",
        };
        f.write_str(label)
    }
}

pub fn run_browse(config: &Config, output: &Output) -> Result<()> {
    if !output.is_human() || !is_interactive() {
        return Err(color_eyre::eyre::eyre!(
            "browse needs an interactive terminal and --output human; use 'moviemax list' instead"
        ));
    }

    let mut library = load_library(config, output);
    let mut selected = 0;

    loop {
        render_view(&library, output);

        let Some(index) = prompts::prompt_select("What next?", &MenuItem::ALL, selected)? else {
            break;
        };
        selected = index;
        let item = MenuItem::ALL[index];
        debug!("Browse menu: {:?}", item);

        match item {
            MenuItem::Home => library.show_home(),
            MenuItem::Movies => library.show_kind(MediaKind::Movie),
            MenuItem::Series => library.show_kind(MediaKind::Series),
            MenuItem::Search => {
                let text = prompts::prompt_string("Search titles", None)?;
                library.search(&text);
            }
            MenuItem::Category => {
                let choices = category_choices(library.catalog().entries());
                if choices.is_empty() {
                    output.warn("No categories in this catalog.");
                    continue;
                }
                if let Some(i) = prompts::prompt_select("Category", &choices, 0)? {
                    library.set_query(Query::new().with_category(choices[i].clone()));
                }
            }
            MenuItem::Genre => {
                let choices = genre_choices(library.catalog().entries());
                if choices.is_empty() {
                    output.warn("No genres in this catalog.");
                    continue;
                }
                if let Some(i) = prompts::prompt_select("Genre", &choices, 0)? {
                    library.set_query(Query::new().with_genre(choices[i].clone()));
                }
            }
            MenuItem::Details => {
                if let Some(title) = pick_title(&library)? {
                    if let Some(entry) = library.find(&title) {
                        output.println(entry_card(entry, Some(library.is_on_watchlist(&title))).to_string());
                    }
                }
            }
            MenuItem::ToggleWatchlist => {
                if let Some(title) = pick_title(&library)? {
                    match library.toggle_watchlist(&title) {
                        Some(true) => output.success(format!("Added '{}' to your watchlist", title)),
                        Some(false) => output.success(format!("Removed '{}' from your watchlist", title)),
                        None => output.warn(format!("'{}' is not in the catalog", title)),
                    }
                }
            }
            MenuItem::Watchlist => render_watchlist(&library, output),
            MenuItem::Trailer => {
                if let Some(title) = pick_title(&library)? {
                    if let Some(entry) = library.find(&title) {
                        // A failed launch should not end the session
                        if let Err(e) = open_trailer(entry, &SystemOpener, output) {
                            output.error(e.to_string());
                        }
                    }
                }
            }
            MenuItem::Quit => break,
        }
    }

    if !library.watchlist().is_empty() {
        output.info(format!(
            "Session watchlist: {}",
            library.watchlist().iter().map(|e| e.title.as_str()).collect::<Vec<_>>().join(", ")
        ));
    }
    Ok(())
}

fn render_view(library: &Library, output: &Output) {
    let visible = library.visible();
    output.println(format!("\n{}", library.query().describe().bright_cyan().bold()));
    if visible.is_empty() {
        output.info("No titles match.");
        return;
    }
    let listed = |title: &str| library.is_on_watchlist(title);
    output.println(entry_table(visible, library.description_limit(), Some(&listed)).to_string());
}

fn render_watchlist(library: &Library, output: &Output) {
    output.println(format!("\n{}", "Watchlist".bright_cyan().bold()));
    if library.watchlist().is_empty() {
        output.info("Your watchlist is empty.");
        return;
    }
    output.println(entry_table(library.watchlist(), library.description_limit(), None).to_string());
}

/// Choose a title from the current view, or from the whole catalog when the view is empty
fn pick_title(library: &Library) -> Result<Option<String>> {
    let mut titles: Vec<String> = library.visible().iter().map(|e| e.title.clone()).collect();
    if titles.is_empty() {
        titles = library.catalog().entries().iter().map(|e| e.title.clone()).collect();
    }
    Ok(prompts::prompt_select("Title", &titles, 0)?.map(|i| titles[i].clone()))
}

fn category_choices(entries: &[CatalogEntry]) -> Vec<String> {
    distinct_sorted(entries.iter().map(|e| &e.category))
}

fn genre_choices(entries: &[CatalogEntry]) -> Vec<String> {
    distinct_sorted(entries.iter().flat_map(|e| e.genres.iter()))
}

/// Non-blank names, first spelling kept, sorted ignoring case
fn distinct_sorted<'a>(names: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut choices = Vec::new();
    for name in names {
        let name = name.trim();
        if !name.is_empty() && seen.insert(fold_case(name)) {
            choices.push(name.to_string());
        }
    }
    choices.sort_by_key(|c| fold_case(c));
    choices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<CatalogEntry> {
        let mut dune = CatalogEntry::new("Dune", MediaKind::Movie);
        dune.category = "Sci-Fi".to_string();
        dune.genres = vec!["Adventure".to_string(), "sci-fi".to_string()];
        let mut dark = CatalogEntry::new("Dark", MediaKind::Series);
        dark.category = "mystery".to_string();
        dark.genres = vec!["Thriller".to_string(), " ".to_string(), "Adventure".to_string()];
        let heat = CatalogEntry::new("Heat", MediaKind::Movie);
        vec![dune, dark, heat]
    }

    #[test]
    fn test_category_choices_use_categories_only() {
        assert_eq!(
            category_choices(&entries()),
            vec!["mystery".to_string(), "Sci-Fi".to_string()]
        );
    }

    #[test]
    fn test_genre_choices_are_distinct() {
        assert_eq!(
            genre_choices(&entries()),
            vec!["Adventure".to_string(), "sci-fi".to_string(), "Thriller".to_string()]
        );
    }

    #[test]
    fn test_menu_labels() {
        let labels: Vec<String> = MenuItem::ALL.iter().map(|m| m.to_string()).collect();
        assert_eq!(labels.first().map(String::as_str), Some("Home"));
        assert_eq!(labels.last().map(String::as_str), Some("Quit"));
        assert!(labels.contains(&"Web Series".to_string()));
    }
}
