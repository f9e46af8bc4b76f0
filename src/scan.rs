// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use lofty::{Accessor, Probe, Tag, TaggedFileExt};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::collection::{Collection, FeedConfig, ShowDetector};
use crate::episode::{EnclosureKind, Episode, RawTags};
use crate::error::ScanError;

/// Walk the given roots and collect an episode for every audio file found.
///
/// Traversal is depth-first with lexicographically sorted entries, so the
/// discovery order (which drives the multi-show detector) is deterministic
/// for a fixed filesystem snapshot. A root that is a plain file is visited
/// as itself. The first error aborts the whole scan; no partial collection
/// is returned.
pub fn scan(roots: &[PathBuf], config: &FeedConfig) -> Result<Collection, ScanError> {
    let mut episodes = Vec::new();
    let mut detector = ShowDetector::default();

    for root in roots {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let Some(kind) = audio_kind(path) else {
                continue;
            };

            let episode = read_episode(path, kind, config)?;
            debug!(
                "{} s{} e{}: {}",
                episode.show, episode.series_number, episode.episode_number, episode.title
            );
            detector.observe(&episode.show);
            episodes.push(episode);
        }
    }

    info!("Discovered {} episodes", episodes.len());
    if episodes.is_empty() {
        warn!("No supported audio files found");
    }

    Ok(Collection {
        episodes,
        multi_show: detector.is_multi_show(),
    })
}

/// Detect whether a path names a supported audio file by its extension
fn audio_kind(path: &Path) -> Option<EnclosureKind> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(EnclosureKind::from_extension)
}

/// Read one audio file's tags and filesystem metadata into an episode
fn read_episode(
    path: &Path,
    kind: EnclosureKind,
    config: &FeedConfig,
) -> Result<Episode, ScanError> {
    let tagged_file = Probe::open(path)
        .and_then(|probe| probe.read())
        .map_err(|source| ScanError::TagReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

    // A file without any tag block still becomes an (untitled) episode
    let tags = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
        .map(read_tags)
        .unwrap_or_default();

    let metadata = std::fs::metadata(path).map_err(|source| ScanError::MetadataFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let updated_at = metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .map_err(|source| ScanError::MetadataFailed {
            path: path.to_path_buf(),
            source,
        })?;

    let episode = Episode::from_file(path, tags, updated_at, metadata.len(), kind, config)?;
    Ok(episode)
}

/// Copy the tag fields the feed needs, defaulting anything absent
fn read_tags(tag: &Tag) -> RawTags {
    RawTags {
        title: tag.title().map(|s| s.to_string()).unwrap_or_default(),
        album: tag.album().map(|s| s.to_string()).unwrap_or_default(),
        artist: tag.artist().map(|s| s.to_string()).unwrap_or_default(),
        comment: tag.comment().map(|s| s.to_string()).unwrap_or_default(),
        track: tag.track().unwrap_or(0),
        disc: tag.disk().unwrap_or(0),
    }
}
