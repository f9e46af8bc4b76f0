pub mod build;
pub mod collection;
pub mod episode;
pub mod error;
pub mod feed;
pub mod order;
pub mod scan;

// Re-export main types for convenience
pub use build::{build_feed, BuildResult};
pub use collection::{Collection, FeedConfig, ShowDetector};
pub use episode::{resolve_enclosure_url, EnclosureKind, Episode, RawTags};
pub use error::{BuildError, ExtractError, RenderError, ScanError};
pub use feed::{assemble, write_feed};
pub use order::{episode_cmp, sort_episodes};
pub use scan::scan;
