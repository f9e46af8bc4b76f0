//! End-to-end feed builds against real tagged files on disk

use std::path::Path;

use tempfile::tempdir;
use url::Url;

use podshelf::{FeedConfig, ScanError, build_feed, scan};

fn synchsafe(size: u32) -> [u8; 4] {
    [
        ((size >> 21) & 0x7F) as u8,
        ((size >> 14) & 0x7F) as u8,
        ((size >> 7) & 0x7F) as u8,
        (size & 0x7F) as u8,
    ]
}

fn text_frame(id: &[u8; 4], value: &str) -> Vec<u8> {
    let mut body = vec![0u8]; // latin-1
    body.extend_from_slice(value.as_bytes());

    let mut frame = Vec::new();
    frame.extend_from_slice(id);
    frame.extend_from_slice(&(body.len() as u32).to_be_bytes());
    frame.extend_from_slice(&[0, 0]);
    frame.extend_from_slice(&body);
    frame
}

fn comment_frame(value: &str) -> Vec<u8> {
    let mut body = vec![0u8]; // latin-1
    body.extend_from_slice(b"eng");
    body.push(0); // empty description
    body.extend_from_slice(value.as_bytes());

    let mut frame = Vec::new();
    frame.extend_from_slice(b"COMM");
    frame.extend_from_slice(&(body.len() as u32).to_be_bytes());
    frame.extend_from_slice(&[0, 0]);
    frame.extend_from_slice(&body);
    frame
}

/// Write a tiny but valid MP3: an ID3v2.3 tag followed by two silent
/// MPEG-1 layer III frames (128 kbps, 44.1 kHz)
fn write_mp3(
    path: &Path,
    title: &str,
    album: &str,
    artist: &str,
    comment: &str,
    track: &str,
    disc: &str,
) {
    let mut frames = Vec::new();
    frames.extend(text_frame(b"TIT2", title));
    frames.extend(text_frame(b"TALB", album));
    frames.extend(text_frame(b"TPE1", artist));
    frames.extend(text_frame(b"TRCK", track));
    frames.extend(text_frame(b"TPOS", disc));
    frames.extend(comment_frame(comment));

    let mut data = Vec::new();
    data.extend_from_slice(b"ID3");
    data.extend_from_slice(&[3, 0, 0]);
    data.extend_from_slice(&synchsafe(frames.len() as u32));
    data.extend_from_slice(&frames);
    for _ in 0..2 {
        data.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x00]);
        data.extend_from_slice(&[0u8; 413]);
    }

    std::fs::write(path, data).unwrap();
}

fn config_for(dir: &Path) -> FeedConfig {
    FeedConfig::new(
        Url::parse("https://x.example/feed/").unwrap(),
        dir.join("index.xml"),
        None,
        None,
    )
    .unwrap()
}

#[test]
fn scan_reads_tags_into_episode_fields() {
    let dir = tempdir().unwrap();
    write_mp3(
        &dir.path().join("ep1.mp3"),
        "Pilot",
        "Show A",
        "Acme",
        "The first one",
        "1",
        "1",
    );

    let collection = scan(&[dir.path().to_path_buf()], &config_for(dir.path())).unwrap();

    assert_eq!(collection.episodes.len(), 1);
    assert!(!collection.multi_show);
    let episode = &collection.episodes[0];
    assert_eq!(episode.title, "Pilot");
    assert_eq!(episode.show, "Show A");
    assert_eq!(episode.provider, "Acme");
    assert_eq!(episode.description, "The first one");
    assert_eq!(episode.episode_number, 1);
    assert_eq!(episode.series_number, 1);
    assert!(episode.size_bytes > 0);
    assert_eq!(
        episode.enclosure_url.as_str(),
        "https://x.example/feed/ep1.mp3"
    );
}

#[test]
fn scan_accepts_a_plain_file_as_root() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("ep1.mp3");
    write_mp3(&file, "Pilot", "Show A", "Acme", "x", "1", "1");

    let collection = scan(&[file], &config_for(dir.path())).unwrap();
    assert_eq!(collection.episodes.len(), 1);
}

#[test]
fn corrupt_file_fails_the_scan_despite_later_valid_files() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("a.mp3"), b"garbage").unwrap();
    write_mp3(&dir.path().join("b.mp3"), "Good", "Show", "Acme", "x", "1", "1");

    let result = scan(&[dir.path().to_path_buf()], &config_for(dir.path()));
    assert!(
        matches!(result, Err(ScanError::TagReadFailed { ref path, .. }) if path.ends_with("a.mp3"))
    );
}

#[test]
fn build_writes_a_feed_with_inferred_title_and_order_hint() {
    let dir = tempdir().unwrap();
    write_mp3(
        &dir.path().join("ep1.mp3"),
        "Pilot",
        "Show A",
        "Acme",
        "The first one",
        "1",
        "1",
    );
    let config = config_for(dir.path());

    let result = build_feed(&[dir.path().to_path_buf()], &config).unwrap();
    assert_eq!(result.episodes, 1);
    assert_eq!(result.feed_title, "Show A");
    assert!(!result.multi_show);

    let bytes = std::fs::read(&config.output).unwrap();
    let channel = rss::Channel::read_from(&bytes[..]).unwrap();
    assert_eq!(channel.title(), "Show A");
    assert_eq!(channel.link(), "https://x.example/feed/");
    assert_eq!(channel.items().len(), 1);

    let item = &channel.items()[0];
    assert_eq!(item.title(), Some("Pilot"));
    assert_eq!(item.link(), Some("https://x.example/feed/ep1.mp3"));
    assert_eq!(item.description(), Some("The first one"));
    assert_eq!(item.itunes_ext().unwrap().order(), Some("101"));

    let enclosure = item.enclosure().unwrap();
    assert_eq!(enclosure.url(), "https://x.example/feed/ep1.mp3");
    assert_eq!(enclosure.mime_type(), "audio/mpeg");
}

#[test]
fn build_orders_episodes_newest_installment_first() {
    let dir = tempdir().unwrap();
    write_mp3(
        &dir.path().join("a.mp3"),
        "Episode One",
        "Show A",
        "Acme",
        "x",
        "1",
        "1",
    );
    write_mp3(
        &dir.path().join("b.mp3"),
        "Episode Two",
        "Show A",
        "Acme",
        "x",
        "2",
        "1",
    );
    let config = config_for(dir.path());

    build_feed(&[dir.path().to_path_buf()], &config).unwrap();

    let bytes = std::fs::read(&config.output).unwrap();
    let channel = rss::Channel::read_from(&bytes[..]).unwrap();
    let titles: Vec<_> = channel.items().iter().filter_map(|i| i.title()).collect();
    assert_eq!(titles, vec!["Episode Two", "Episode One"]);
    assert_eq!(channel.items()[0].itunes_ext().unwrap().order(), Some("102"));
    assert_eq!(channel.items()[1].itunes_ext().unwrap().order(), Some("101"));
}

#[test]
fn build_prefixes_titles_when_shows_differ() {
    let dir = tempdir().unwrap();
    write_mp3(
        &dir.path().join("a.mp3"),
        "Pilot",
        "Show A",
        "Acme",
        "x",
        "1",
        "1",
    );
    write_mp3(
        &dir.path().join("b.mp3"),
        "Debut",
        "Show B",
        "Acme",
        "x",
        "1",
        "1",
    );
    let config = config_for(dir.path());

    let result = build_feed(&[dir.path().to_path_buf()], &config).unwrap();
    assert!(result.multi_show);

    let bytes = std::fs::read(&config.output).unwrap();
    let channel = rss::Channel::read_from(&bytes[..]).unwrap();
    // Show sorts descending, so Show B's episode comes first
    let titles: Vec<_> = channel.items().iter().filter_map(|i| i.title()).collect();
    assert_eq!(titles, vec!["Show B: Debut", "Show A: Pilot"]);
}
