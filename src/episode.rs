use std::path::Path;

use chrono::{DateTime, Utc};
use url::Url;

use crate::collection::FeedConfig;
use crate::error::ExtractError;

/// Enclosure media type of an episode's audio file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnclosureKind {
    Mp3,
    M4a,
}

impl EnclosureKind {
    /// Detect the enclosure kind from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mp3" => Some(EnclosureKind::Mp3),
            "m4a" => Some(EnclosureKind::M4a),
            _ => None,
        }
    }

    /// MIME type written into the enclosure element
    pub fn mime_type(self) -> &'static str {
        match self {
            EnclosureKind::Mp3 => "audio/mpeg",
            EnclosureKind::M4a => "audio/mp4",
        }
    }
}

/// Tag values read from one audio file, defaulted for anything absent
#[derive(Debug, Clone, Default)]
pub struct RawTags {
    pub title: String,
    pub album: String,
    pub artist: String,
    pub comment: String,
    pub track: u32,
    pub disc: u32,
}

/// One feed entry, derived from exactly one audio file
#[derive(Debug, Clone)]
pub struct Episode {
    /// Track title
    pub title: String,
    /// Album tag, the series/program the episode belongs to
    pub show: String,
    /// Artist tag, the publisher attribution and primary sort key
    pub provider: String,
    /// Comment tag
    pub description: String,
    /// Track number, 0 when untagged
    pub episode_number: u32,
    /// Disc number, 0 when untagged
    pub series_number: u32,
    /// File modification time
    pub updated_at: DateTime<Utc>,
    pub size_bytes: u64,
    /// Resolved from the file path; never set independently
    pub enclosure_url: Url,
    pub kind: EnclosureKind,
}

impl Episode {
    /// Build an episode from a file's tags and filesystem metadata
    pub fn from_file(
        path: &Path,
        tags: RawTags,
        updated_at: DateTime<Utc>,
        size_bytes: u64,
        kind: EnclosureKind,
        config: &FeedConfig,
    ) -> Result<Self, ExtractError> {
        let enclosure_url = resolve_enclosure_url(path, &config.base_dir, &config.base_url)?;

        Ok(Self {
            title: tags.title,
            show: tags.album,
            provider: tags.artist,
            description: tags.comment,
            episode_number: tags.track,
            series_number: tags.disc,
            updated_at,
            size_bytes,
            enclosure_url,
            kind,
        })
    }
}

/// Resolve a file's enclosure URL against the feed's base URL.
///
/// The file path is expressed relative to the output directory and joined
/// onto the base URL, so the link layout mirrors the on-disk layout. Pure
/// function of its inputs: the same path, base directory and base URL always
/// produce the same URL.
pub fn resolve_enclosure_url(
    path: &Path,
    base_dir: &Path,
    base_url: &Url,
) -> Result<Url, ExtractError> {
    let abs = std::path::absolute(path).map_err(|source| ExtractError::ResolveFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let rel = abs
        .strip_prefix(base_dir)
        .map_err(|_| ExtractError::OutsideBaseDir {
            path: abs.clone(),
            base_dir: base_dir.to_path_buf(),
        })?;

    let mut parts = Vec::new();
    for component in rel.components() {
        let part = component
            .as_os_str()
            .to_str()
            .ok_or_else(|| ExtractError::NonUtf8Path(rel.to_path_buf()))?;
        parts.push(part);
    }
    let rel_path = parts.join("/");

    base_url
        .join(&rel_path)
        .map_err(|source| ExtractError::InvalidUrlPath {
            path: rel_path,
            source,
        })
}
