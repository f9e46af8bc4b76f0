use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when resolving an episode's enclosure URL
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to resolve absolute path of {path}: {source}")]
    ResolveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File {path} is not inside the output directory {base_dir}")]
    OutsideBaseDir { path: PathBuf, base_dir: PathBuf },

    #[error("Path {0} contains non-UTF-8 components and cannot form a URL")]
    NonUtf8Path(PathBuf),

    #[error("Failed to resolve '{path}' against the base feed URL: {source}")]
    InvalidUrlPath {
        path: String,
        #[source]
        source: url::ParseError,
    },
}

/// Errors that can occur while scanning directory trees for audio files
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to walk directory tree: {0}")]
    WalkFailed(#[from] walkdir::Error),

    #[error("Failed to read tags from {path}: {source}")]
    TagReadFailed {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("Failed to read file metadata for {path}: {source}")]
    MetadataFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Errors that can occur while assembling and writing the feed document
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Episode {url} has neither a title nor a description to form a feed item")]
    InvalidItem { url: String },

    #[error("Failed to create output file {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize feed to {path}: {source}")]
    EncodeFailed {
        path: PathBuf,
        #[source]
        source: rss::Error,
    },
}

/// Top-level errors for feed builds
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}
