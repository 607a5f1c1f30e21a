//! Console reporting for the image-fetcher CLI

use std::sync::Arc;

use image_fetcher::{FetchObserver, FetchOutcome};

use crate::cli::progress::ProgressManager;

/// Human-readable status lines for a finished URL
pub fn status_lines(url: &str, outcome: &FetchOutcome) -> Vec<String> {
    match outcome {
        FetchOutcome::Saved { filename, path } => vec![
            format!("✓ Successfully fetched: {filename}"),
            format!("✓ Image saved to {}", path.display()),
        ],
        FetchOutcome::NotAnImage { .. } => vec![format!("✗ Skipped (not an image): {url}")],
        FetchOutcome::Duplicate { .. } => {
            vec!["⚠ Duplicate detected. Skipping this image.".to_string()]
        }
        FetchOutcome::NetworkFailed(e) => {
            vec![format!("✗ Connection error while fetching {url}: {e}")]
        }
        FetchOutcome::SaveFailed(e) => vec![format!("✗ An unexpected error occurred: {e}")],
    }
}

/// Closing line of a run
pub fn summary_line(saved: usize) -> String {
    format!("Connection strengthened. Community enriched. {saved} image(s) successfully fetched.")
}

/// Prints per-URL status to stdout and drives the progress bar
pub struct ConsoleReporter {
    progress: Arc<ProgressManager>,
}

impl ConsoleReporter {
    pub fn new(progress: Arc<ProgressManager>) -> Self {
        Self { progress }
    }
}

impl FetchObserver for ConsoleReporter {
    fn fetching(&self, url: &str) {
        println!("\nFetching from: {url}");
        self.progress.start();
    }

    fn finished(&self, url: &str, outcome: &FetchOutcome) {
        let lines = status_lines(url, outcome);
        self.progress.finish_with(|| {
            for line in &lines {
                println!("{line}");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_fetcher::{Error, Fingerprint};
    use std::path::PathBuf;

    #[test]
    fn test_saved_lines() {
        let outcome = FetchOutcome::Saved {
            filename: "cat.png".to_string(),
            path: PathBuf::from("Fetched_Images").join("cat.png"),
        };
        let lines = status_lines("http://example.com/pics/cat.png", &outcome);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "✓ Successfully fetched: cat.png");
        assert!(lines[1].starts_with("✓ Image saved to Fetched_Images"));
    }

    #[test]
    fn test_rejection_and_failure_lines() {
        let url = "http://example.com/page";

        let lines = status_lines(
            url,
            &FetchOutcome::NotAnImage {
                content_type: "text/html".to_string(),
            },
        );
        assert_eq!(lines, vec![format!("✗ Skipped (not an image): {url}")]);

        let lines = status_lines(
            url,
            &FetchOutcome::Duplicate {
                fingerprint: Fingerprint::of(b"x"),
            },
        );
        assert!(lines[0].contains("Duplicate detected"));

        let lines = status_lines(
            url,
            &FetchOutcome::NetworkFailed(Error::NetworkError("timed out".to_string())),
        );
        assert_eq!(
            lines,
            vec![format!("✗ Connection error while fetching {url}: Network error: timed out")]
        );

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let lines = status_lines(url, &FetchOutcome::SaveFailed(Error::IoError(io)));
        assert!(lines[0].starts_with("✗ An unexpected error occurred: I/O error"));
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            summary_line(2),
            "Connection strengthened. Community enriched. 2 image(s) successfully fetched."
        );
    }
}
