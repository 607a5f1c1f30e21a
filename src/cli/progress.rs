//! CLI-specific progress handling for image-fetcher
//!
//! One progress bar per URL, replaced each time a new fetch starts.

use std::sync::{Arc, Mutex};

use image_fetcher::ProgressCallback;
use indicatif::{ProgressBar, ProgressStyle};

/// Creates a progress bar for CLI display
pub fn create_progress_bar(total_size: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {bytes_per_sec}")
            .expect("Failed to create progress style")
            .progress_chars("#>-")
    );
    pb
}

/// Holds the progress bar of the fetch currently in flight
#[derive(Default)]
pub struct ProgressManager {
    current: Mutex<Option<ProgressBar>>,
}

impl ProgressManager {
    /// Replace any previous bar with a fresh one
    pub fn start(&self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(old) = current.take() {
                old.finish_and_clear();
            }
            *current = Some(create_progress_bar(0));
        }
    }

    /// Clear the bar, then run `print` so output never interleaves with it
    pub fn finish_with(&self, print: impl FnOnce()) {
        let bar = self.current.lock().ok().and_then(|mut current| current.take());
        match bar {
            Some(pb) => {
                pb.finish_and_clear();
                pb.suspend(print);
            }
            None => print(),
        }
    }

    fn update(&self, downloaded: u64, total: u64) {
        if let Ok(current) = self.current.lock() {
            if let Some(ref pb) = *current {
                if total > 0 && pb.length() != Some(total) {
                    pb.set_length(total);
                }
                pb.set_position(downloaded);
            }
        }
    }

    /// Callback that feeds the library's progress reports into the current bar
    pub fn callback(self: &Arc<Self>) -> ProgressCallback {
        let manager = Arc::clone(self);
        Arc::new(move |downloaded: u64, total: u64| manager.update(downloaded, total))
    }
}
