//! # Image-fetcher CLI
//!
//! Command-line interface for the image-fetcher library.
//! Takes image URLs as arguments, or prompts for them, and saves each image once.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use image_fetcher::{filename_from_url, FetchOptions, DEFAULT_OUTPUT_DIR};
use log::error;

mod cli;

/// Command-line interface for image-fetcher
#[derive(Parser)]
#[command(name = "image-fetcher")]
#[command(about = "Fetch images from URLs, skipping duplicates and name clashes")]
#[command(long_about = "Fetches each URL in turn and saves it when it is an image:
  image-fetcher https://example.com/cat.png          # Save to Fetched_Images/cat.png
  image-fetcher a.png b.png -o pictures              # Save into ./pictures
  image-fetcher                                      # Prompt for URLs on stdin

Duplicate content within one run is saved once. Existing files are never
overwritten: a clash on cat.png saves cat_1.png, then cat_2.png, and so on.")]
#[command(version = env!("IMAGE_FETCHER_VERSION"))]
struct Cli {
    /// Image URLs to fetch; prompts for a space-separated list when omitted
    urls: Vec<String>,

    /// Directory to save images into (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Show what would be fetched without fetching
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();

    if cli.verbose {
        eprintln!("🖼  Image-fetcher v{} starting...", env!("IMAGE_FETCHER_VERSION"));
    }

    println!("Welcome to the Ubuntu Image Fetcher");
    println!("A tool for mindfully collecting images from the web\n");

    let urls = if cli.urls.is_empty() {
        prompt_for_urls()?
    } else {
        cli.urls.clone()
    };

    if cli.dry_run {
        for url in &urls {
            let target = cli.output_dir.join(filename_from_url(url));
            eprintln!("🔍 [DRY RUN] Would fetch: {url} to {}", target.display());
        }
        return Ok(());
    }

    let progress = Arc::new(cli::ProgressManager::default());
    let options = FetchOptions {
        output_dir: cli.output_dir.clone(),
        timeout: Duration::from_secs(cli.timeout),
        progress: Some(progress.callback()),
        observer: Some(Arc::new(cli::ConsoleReporter::new(Arc::clone(&progress)))),
        ..Default::default()
    };

    let summary = image_fetcher::fetch_images(&urls, options)
        .await
        .with_context(|| format!("Could not start fetching into {}", cli.output_dir.display()))?;

    println!("\n{}", cli::summary_line(summary.saved));

    Ok(())
}

/// Ask for URLs on stdin
fn prompt_for_urls() -> anyhow::Result<Vec<String>> {
    print!("Please enter image URLs (separate multiple with spaces): ");
    io::stdout().flush().context("Failed to flush prompt")?;

    let mut input = String::new();
    io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read URLs from stdin")?;

    Ok(parse_url_list(&input))
}

/// Split whitespace-separated input into URLs
fn parse_url_list(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_list() {
        let urls = parse_url_list("  http://a.com/x.png\thttp://b.com/y.jpg \n");
        assert_eq!(urls, vec!["http://a.com/x.png", "http://b.com/y.jpg"]);
        assert!(parse_url_list("   \n").is_empty());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["image-fetcher", "http://example.com/cat.png"]).unwrap();
        assert_eq!(cli.urls, vec!["http://example.com/cat.png"]);
        assert_eq!(cli.output_dir, PathBuf::from("Fetched_Images"));
        assert_eq!(cli.timeout, 10);
        assert!(!cli.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_without_urls() {
        let cli = Cli::try_parse_from(["image-fetcher", "-o", "pics", "-t", "3"]).unwrap();
        assert!(cli.urls.is_empty());
        assert_eq!(cli.output_dir, PathBuf::from("pics"));
        assert_eq!(cli.timeout, 3);
    }

    #[test]
    fn test_cli_rejects_zero_timeout() {
        assert!(Cli::try_parse_from(["image-fetcher", "--timeout", "0"]).is_err());
    }
}
