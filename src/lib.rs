//! # Image-fetcher
//!
//! Fetches images from a list of URLs into a local directory. Each URL is handled in
//! order: content that is not declared as `image/*` is skipped, bytes already saved
//! earlier in the same run are skipped, and names that clash with existing files get a
//! `_<n>` suffix.
//!
//! ```no_run
//! # async fn demo() -> image_fetcher::Result<()> {
//! let summary = image_fetcher::fetch_images(
//!     ["https://example.com/pics/cat.png"],
//!     image_fetcher::FetchOptions::default(),
//! )
//! .await?;
//! println!("{} image(s) saved", summary.saved);
//! # Ok(())
//! # }
//! ```

mod core;

pub use crate::core::error::{Error, Result};
pub use crate::core::fetcher::{FetchOutcome, RunSummary, UrlReport};
pub use crate::core::filename::{filename_from_url, split_extension, FALLBACK_FILENAME};
pub use crate::core::fingerprint::Fingerprint;
pub use crate::core::{ImageFetcher, ImageStore};
pub use crate::core::stream::{
    FetchObserver, FetchOptions, ProgressCallback, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT,
};

/// Fetch every URL into `options.output_dir` and return the run summary.
///
/// Only setup failures (output directory, HTTP client) are returned as errors. Per-URL
/// failures are recorded in the summary and never stop the run.
pub async fn fetch_images<I, S>(urls: I, options: FetchOptions) -> Result<RunSummary>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let fetcher = ImageFetcher::new(options).await?;
    Ok(fetcher.run(urls).await)
}
