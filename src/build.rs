use std::path::PathBuf;

use chrono::Utc;

use crate::collection::FeedConfig;
use crate::error::BuildError;
use crate::feed::{assemble, write_feed};
use crate::order::sort_episodes;
use crate::scan::scan;

/// Result of one feed build
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// Number of episodes in the rendered feed
    pub episodes: usize,
    /// The feed title that was written, supplied or inferred
    pub feed_title: String,
    /// Whether the episodes span more than one show
    pub multi_show: bool,
    /// Where the document was written
    pub output: PathBuf,
}

/// Run the whole pipeline: scan the roots, order the episodes, render the
/// feed.
///
/// This is the main entry point for the library. Stages run strictly in
/// sequence; the first error aborts the run with no partial output.
pub fn build_feed(roots: &[PathBuf], config: &FeedConfig) -> Result<BuildResult, BuildError> {
    let mut collection = scan(roots, config)?;
    sort_episodes(&mut collection.episodes);

    let (channel, feed_title) = assemble(&collection, config, Utc::now())?;
    write_feed(&channel, &config.output)?;

    Ok(BuildResult {
        episodes: collection.episodes.len(),
        feed_title,
        multi_show: collection.multi_show,
        output: config.output.clone(),
    })
}
