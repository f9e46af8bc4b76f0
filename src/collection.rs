use std::path::{Path, PathBuf};

use url::Url;

use crate::episode::Episode;

/// Externally supplied, read-only feed configuration
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// Base URL of the feed, including the feed file name
    pub base_url: Url,
    /// Absolute directory of the output file; enclosure URLs resolve
    /// relative to it
    pub base_dir: PathBuf,
    /// Destination path of the rendered document
    pub output: PathBuf,
    /// Feed title; inferred from the episodes when absent
    pub title: Option<String>,
    /// Feed description
    pub description: Option<String>,
}

impl FeedConfig {
    /// Build a config for the given output path, deriving the directory
    /// that enclosure URLs resolve against
    pub fn new(
        base_url: Url,
        output: PathBuf,
        title: Option<String>,
        description: Option<String>,
    ) -> std::io::Result<Self> {
        let base_dir = std::path::absolute(&output)?
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));

        Ok(Self {
            base_url,
            base_dir,
            output,
            title,
            description,
        })
    }
}

/// Episodes gathered by a scan, in discovery order until sorted
#[derive(Debug, Default)]
pub struct Collection {
    pub episodes: Vec<Episode>,
    /// True when the scan saw more than one distinct show
    pub multi_show: bool,
}

/// Single-pass detector for collections spanning more than one show.
///
/// Folded over episodes in discovery order, before any sorting. The first
/// non-empty show becomes the reference; any later non-empty show that
/// differs from it flips `multi_show`, which never reverts. Episodes without
/// a show neither flip the flag nor become the reference.
#[derive(Debug, Default)]
pub struct ShowDetector {
    first_show: String,
    multi_show: bool,
}

impl ShowDetector {
    pub fn observe(&mut self, show: &str) {
        if show.is_empty() {
            return;
        }
        if self.first_show.is_empty() {
            self.first_show = show.to_string();
        } else if show != self.first_show {
            self.multi_show = true;
        }
    }

    pub fn is_multi_show(&self) -> bool {
        self.multi_show
    }
}
