use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use console::Emoji;
use tracing_subscriber::EnvFilter;
use url::Url;

use podshelf::{BuildResult, FeedConfig, build_feed};

// Emoji with fallback for terminals without Unicode support
static MICROPHONE: Emoji<'_, '_> = Emoji("🎙️  ", "");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static SUCCESS: Emoji<'_, '_> = Emoji("✅ ", "[+] ");
static FOLDER: Emoji<'_, '_> = Emoji("📁 ", "");

/// Generate a podcast RSS feed from local audio files
#[derive(Parser, Debug)]
#[command(name = "podshelf")]
#[command(about = "Generate a podcast RSS feed from local audio files")]
#[command(version)]
struct Args {
    /// URL of the feed file, including its filename
    #[arg(short, long)]
    url: Url,

    /// Output file for the rendered feed
    #[arg(short, long, default_value = "index.xml")]
    out: PathBuf,

    /// Feed title (inferred from the episodes when omitted)
    #[arg(short, long)]
    title: Option<String>,

    /// Feed description
    #[arg(short, long)]
    desc: Option<String>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - suppress status output
    #[arg(short, long)]
    quiet: bool,

    /// Files or directories to index
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    if !args.quiet {
        println!(
            "\n{}{} {}\n",
            MICROPHONE,
            "podshelf".bold().magenta(),
            "- Podcast Feed Generator".dimmed()
        );
        println!(
            "{SEARCH}Indexing {} path(s)",
            args.paths.len().to_string().cyan()
        );
    }

    match run(&args) {
        Ok(result) => {
            if !args.quiet {
                print_summary(&result);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<BuildResult> {
    let config = FeedConfig::new(
        args.url.clone(),
        args.out.clone(),
        args.title.clone(),
        args.desc.clone(),
    )
    .with_context(|| {
        format!(
            "Failed to resolve base directory of output file {}",
            args.out.display()
        )
    })?;

    build_feed(&args.paths, &config).context("Failed to build feed")
}

fn print_summary(result: &BuildResult) {
    let title = if result.feed_title.is_empty() {
        "(untitled)".to_string()
    } else {
        result.feed_title.clone()
    };

    println!(
        "\n{SUCCESS}{} {} episode(s) in {}{}",
        "Feed written:".bold().green(),
        result.episodes.to_string().cyan(),
        title.bold(),
        if result.multi_show {
            " (multiple shows)".dimmed().to_string()
        } else {
            String::new()
        }
    );
    println!(
        "\n{FOLDER}Output: {}\n",
        result.output.display().to_string().cyan()
    );
}

fn init_logging(args: &Args) {
    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = if args.quiet { "error" } else { filter };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}
