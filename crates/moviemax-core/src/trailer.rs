use moviemax_models::CatalogEntry;
use std::process::{Command, Stdio};
use tracing::{debug, info};
use url::Url;

use crate::error::TrailerError;

#[cfg(target_os = "macos")]
const OPENERS: &[&str] = &["open"];
#[cfg(target_os = "windows")]
const OPENERS: &[&str] = &["explorer"];
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const OPENERS: &[&str] = &["xdg-open", "sensible-browser", "x-www-browser"];

/// Hands a URL to something that can show it
pub trait UrlOpener {
    fn open(&self, url: &Url) -> Result<(), TrailerError>;
}

/// Opens URLs with the platform's default handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &Url) -> Result<(), TrailerError> {
        let program = OPENERS
            .iter()
            .find_map(|name| which::which(name).ok())
            .ok_or_else(|| TrailerError::NoOpener(OPENERS.join(", ")))?;

        debug!("Opening {} with {}", url, program.display());
        // Openers hand the URL to the browser and exit; the handle is not kept
        Command::new(&program)
            .arg(url.as_str())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| TrailerError::Spawn {
                program: program.display().to_string(),
                source,
            })?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrailerOutcome {
    Opened(Url),
    /// The entry has no trailer; playback is simply unavailable
    Unavailable,
}

/// Parsed trailer URL of an entry, `None` when it has none
pub fn trailer_url(entry: &CatalogEntry) -> Result<Option<Url>, TrailerError> {
    let raw = entry.trailer.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let url = Url::parse(raw).map_err(|source| TrailerError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(Some(url)),
        other => Err(TrailerError::UnsupportedScheme(other.to_string())),
    }
}

pub fn play_trailer(entry: &CatalogEntry, opener: &dyn UrlOpener) -> Result<TrailerOutcome, TrailerError> {
    match trailer_url(entry)? {
        Some(url) => {
            opener.open(&url)?;
            info!("Opened trailer for {:?}: {}", entry.title, url);
            Ok(TrailerOutcome::Opened(url))
        }
        None => {
            debug!("No trailer for {:?}", entry.title);
            Ok(TrailerOutcome::Unavailable)
        }
    }
}
