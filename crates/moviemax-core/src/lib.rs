pub mod catalog;
pub mod error;
pub mod library;
pub mod persistence;
pub mod query;
pub mod trailer;
pub mod watchlist;

pub use catalog::{sample_catalog, CatalogStore, LoadSource};
pub use error::{CatalogLoadError, CatalogWriteError, TrackerError, TrailerError};
pub use library::Library;
pub use persistence::{load_records, save_entries, save_records, MutationOutcome, TrackedItem, TrackerStore};
pub use query::{filter_by_category, filter_by_genre, filter_by_type, fold_case, search, Query};
pub use trailer::{play_trailer, SystemOpener, TrailerOutcome, UrlOpener};
pub use watchlist::{GetTitle, Watchlist};
