// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use rss::extension::itunes::ITunesItemExtensionBuilder;
use rss::{Channel, ChannelBuilder, EnclosureBuilder, GuidBuilder, Item, ItemBuilder};

use crate::collection::{Collection, FeedConfig};
use crate::episode::Episode;
use crate::error::RenderError;

/// Assemble the feed document from a sorted collection.
///
/// Returns the channel together with the effective feed title: the
/// configured title when present, otherwise the show of the first
/// sorted-order episode that has one. `now` is captured once by the caller
/// and used for both the publish and last-build timestamps.
pub fn assemble(
    collection: &Collection,
    config: &FeedConfig,
    now: DateTime<Utc>,
) -> Result<(Channel, String), RenderError> {
    let title = feed_title(collection, config);

    let items = collection
        .episodes
        .iter()
        .map(|episode| build_item(episode, collection.multi_show))
        .collect::<Result<Vec<_>, _>>()?;

    let channel = ChannelBuilder::default()
        .title(title.clone())
        .link(config.base_url.to_string())
        .description(config.description.clone().unwrap_or_default())
        .pub_date(Some(now.to_rfc2822()))
        .last_build_date(Some(now.to_rfc2822()))
        .items(items)
        .build();

    Ok((channel, title))
}

/// Write the feed document to the output path.
///
/// The output handle lives only inside this function; nothing is retried on
/// failure.
pub fn write_feed(channel: &Channel, path: &Path) -> Result<(), RenderError> {
    let file = File::create(path).map_err(|source| RenderError::CreateFailed {
        path: path.to_path_buf(),
        source,
    })?;

    channel
        .pretty_write_to(file, b' ', 2)
        .map_err(|source| RenderError::EncodeFailed {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(())
}

fn feed_title(collection: &Collection, config: &FeedConfig) -> String {
    if let Some(title) = config.title.as_deref().filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    collection
        .episodes
        .iter()
        .map(|episode| episode.show.as_str())
        .find(|show| !show.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Convert one episode into a feed item
fn build_item(episode: &Episode, multi_show: bool) -> Result<Item, RenderError> {
    let title = if multi_show {
        format!("{}: {}", episode.show, episode.title)
    } else {
        episode.title.clone()
    };

    // RSS items need at least one of title and description
    if title.is_empty() && episode.description.is_empty() {
        return Err(RenderError::InvalidItem {
            url: episode.enclosure_url.to_string(),
        });
    }

    // Display-order hint for consumers; collides once episode numbers
    // reach 100, do not change the multiplier silently
    let order = (100 * episode.series_number + episode.episode_number).to_string();

    let enclosure = EnclosureBuilder::default()
        .url(episode.enclosure_url.to_string())
        .length(episode.size_bytes.to_string())
        .mime_type(episode.kind.mime_type().to_string())
        .build();

    let guid = GuidBuilder::default()
        .value(episode.enclosure_url.to_string())
        .permalink(true)
        .build();

    let itunes = ITunesItemExtensionBuilder::default()
        .order(Some(order))
        .build();

    Ok(ItemBuilder::default()
        .title(Some(title))
        .link(Some(episode.enclosure_url.to_string()))
        .guid(Some(guid))
        .description(Some(episode.description.clone()))
        .pub_date(Some(episode.updated_at.to_rfc2822()))
        .enclosure(Some(enclosure))
        .itunes_ext(Some(itunes))
        .build())
}
