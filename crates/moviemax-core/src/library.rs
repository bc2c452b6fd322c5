use moviemax_config::Config;
use moviemax_models::{CatalogEntry, MediaKind};
use tracing::debug;

use crate::catalog::CatalogStore;
use crate::query::Query;
use crate::watchlist::Watchlist;

/// Application state for one browsing session.
///
/// Owns the catalog, the session watchlist and the query behind the current
/// view; front ends hold one of these instead of loose globals.
#[derive(Debug)]
pub struct Library {
    catalog: CatalogStore,
    watchlist: Watchlist,
    query: Query,
    description_limit: usize,
}

impl Library {
    pub fn new(catalog: CatalogStore) -> Self {
        Self {
            catalog,
            watchlist: Watchlist::new(),
            query: Query::default(),
            description_limit: moviemax_config::DisplayConfig::default().description_limit,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let catalog = CatalogStore::load(&config.catalog.path, config.catalog.fallback);
        Self::new(catalog).with_description_limit(config.display.description_limit)
    }

    pub fn with_description_limit(mut self, limit: usize) -> Self {
        self.description_limit = limit;
        self
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn watchlist(&self) -> &Watchlist {
        &self.watchlist
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn description_limit(&self) -> usize {
        self.description_limit
    }

    /// Entries of the current view
    pub fn visible(&self) -> Vec<&CatalogEntry> {
        self.query.apply(self.catalog.entries())
    }

    pub fn set_query(&mut self, query: Query) {
        debug!("View query: {:?}", query);
        self.query = query;
    }

    /// Back to the unfiltered home view
    pub fn show_home(&mut self) {
        self.set_query(Query::default());
    }

    pub fn show_kind(&mut self, kind: MediaKind) {
        self.set_query(Query::new().with_type(kind.as_str()));
    }

    /// Search the whole catalog; any type or category filter is dropped
    pub fn search(&mut self, text: &str) {
        self.set_query(Query::new().with_search(text));
    }

    pub fn find(&self, title: &str) -> Option<&CatalogEntry> {
        self.catalog.find(title)
    }

    /// Toggle a catalog title on the watchlist.
    ///
    /// `None` when the catalog has no such title, otherwise whether it was added.
    pub fn toggle_watchlist(&mut self, title: &str) -> Option<bool> {
        let entry = self.catalog.find(title)?;
        Some(self.watchlist.toggle(entry))
    }

    /// `None` when the catalog has no such title, `Some(false)` when already listed
    pub fn add_to_watchlist(&mut self, title: &str) -> Option<bool> {
        let entry = self.catalog.find(title)?;
        Some(self.watchlist.add(entry))
    }

    pub fn is_on_watchlist(&self, title: &str) -> bool {
        self.watchlist.contains(title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_catalog;
    use moviemax_config::{CatalogConfig, FallbackPolicy};

    fn library() -> Library {
        Library::new(CatalogStore::from_entries(sample_catalog()))
    }

    #[test]
    fn test_views() {
        let mut library = library();
        assert_eq!(library.visible().len(), 6);

        library.show_kind(MediaKind::Series);
        let titles: Vec<&str> = library.visible().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Breaking Bad", "Dark", "Stranger Things"]);

        library.search("in");
        let titles: Vec<&str> = library.visible().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Inception", "Interstellar", "Breaking Bad", "Stranger Things"]);
        assert!(library.query().media_type.is_none());

        library.search("");
        assert_eq!(library.visible().len(), 6);

        library.show_kind(MediaKind::Movie);
        library.show_home();
        assert!(library.query().is_empty());
    }

    #[test]
    fn test_watchlist_toggle_through_library() {
        let mut library = library();
        assert_eq!(library.toggle_watchlist("Dark"), Some(true));
        assert!(library.is_on_watchlist("Dark"));
        assert_eq!(library.add_to_watchlist("dark"), Some(false));
        assert_eq!(library.watchlist().len(), 1);

        assert_eq!(library.toggle_watchlist("Dark"), Some(false));
        assert!(library.watchlist().is_empty());

        assert_eq!(library.toggle_watchlist("Nope"), None);
        assert_eq!(library.add_to_watchlist("Nope"), None);
    }

    #[test]
    fn test_watchlist_does_not_touch_catalog() {
        let mut library = library();
        let before = library.catalog().entries().to_vec();
        library.toggle_watchlist("Dune");
        library.toggle_watchlist("Dark");
        assert_eq!(library.catalog().entries(), before.as_slice());
    }

    #[test]
    fn test_from_config_uses_fallback_and_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.catalog = CatalogConfig {
            path: dir.path().join("missing.json"),
            fallback: FallbackPolicy::Sample,
        };
        config.display.description_limit = 40;

        let library = Library::from_config(&config);
        assert_eq!(library.catalog().len(), 6);
        assert!(library.catalog().load_error().is_some());
        assert_eq!(library.description_limit(), 40);
    }
}
