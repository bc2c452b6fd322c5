pub mod entry;
pub mod media;
pub mod raw;

pub use entry::{CatalogEntry, DEFAULT_DESCRIPTION, DEFAULT_TITLE};
pub use media::MediaKind;
pub use raw::RawEntry;
