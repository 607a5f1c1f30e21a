//! The fetch-and-save loop for image-fetcher
//!
//! Each URL is fetched, checked, fingerprinted and saved before the next one starts.
//! A failure on one URL never stops the run.

use std::collections::HashSet;
use std::path::PathBuf;

use log::{debug, info, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, ClientBuilder};

use crate::core::error::{Error, Result};
use crate::core::filename::filename_from_url;
use crate::core::fingerprint::Fingerprint;
use crate::core::store::ImageStore;
use crate::core::stream::{read_body, FetchOptions};

/// Terminal state of one URL
#[derive(Debug)]
pub enum FetchOutcome {
    /// Image written to disk
    Saved { filename: String, path: PathBuf },
    /// Response did not declare an `image/` content type
    NotAnImage { content_type: String },
    /// Same bytes were already saved earlier in this run
    Duplicate { fingerprint: Fingerprint },
    /// Connection, timeout, or HTTP status failure
    NetworkFailed(Error),
    /// Any other failure, including writing the file
    SaveFailed(Error),
}

impl FetchOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, FetchOutcome::Saved { .. })
    }
}

/// Outcome of one URL, kept in input order
#[derive(Debug)]
pub struct UrlReport {
    pub url: String,
    pub outcome: FetchOutcome,
}

/// Result of a complete run
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Number of images written to disk
    pub saved: usize,
    pub reports: Vec<UrlReport>,
}

/// Fetches images one URL at a time into an [`ImageStore`]
pub struct ImageFetcher {
    client: Client,
    store: ImageStore,
    options: FetchOptions,
}

impl ImageFetcher {
    /// Create the output directory and HTTP client.
    ///
    /// These are the only failures that abort a run before it starts.
    pub async fn new(options: FetchOptions) -> Result<Self> {
        let store = ImageStore::open(&options.output_dir).await?;
        let client = ClientBuilder::new()
            .connect_timeout(options.timeout)
            .read_timeout(options.timeout)
            .user_agent(format!("image-fetcher/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            store,
            options,
        })
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    /// Process every URL in order and summarise the run.
    ///
    /// Duplicate detection only covers this call; a later run starts empty.
    pub async fn run<I, S>(&self, urls: I) -> RunSummary
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut summary = RunSummary::default();

        for url in urls {
            let url = url.as_ref();
            if let Some(ref observer) = self.options.observer {
                observer.fetching(url);
            }

            let outcome = self.fetch_one(url, &mut seen).await;
            if let Some(ref observer) = self.options.observer {
                observer.finished(url, &outcome);
            }

            if outcome.is_saved() {
                summary.saved += 1;
            }
            summary.reports.push(UrlReport {
                url: url.to_string(),
                outcome,
            });
        }

        info!(
            "Run finished: {} of {} URL(s) saved",
            summary.saved,
            summary.reports.len()
        );
        summary
    }

    /// Take one URL through to a terminal state.
    ///
    /// The fingerprint is recorded in `seen` only once the file is on disk.
    pub async fn fetch_one(&self, url: &str, seen: &mut HashSet<Fingerprint>) -> FetchOutcome {
        debug!("Fetching {url}");

        let response = match self.request(url).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request for {url} failed: {e}");
                return FetchOutcome::NetworkFailed(e);
            }
        };

        let content_type = match content_type_of(&response) {
            Ok(content_type) => content_type,
            Err(e) => return FetchOutcome::SaveFailed(e),
        };
        if !content_type.starts_with("image/") {
            debug!("Rejecting {url}: content type {content_type:?}");
            return FetchOutcome::NotAnImage { content_type };
        }

        let body = match read_body(response, &self.options).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Reading body of {url} failed: {e}");
                return FetchOutcome::NetworkFailed(e);
            }
        };

        let fingerprint = Fingerprint::of(&body);
        if seen.contains(&fingerprint) {
            debug!("Skipping {url}: duplicate of {}", fingerprint.short());
            return FetchOutcome::Duplicate { fingerprint };
        }

        let filename = filename_from_url(url);
        match self.store.save(&filename, &body).await {
            Ok(path) => {
                seen.insert(fingerprint);
                info!("Saved {url} to {}", path.display());
                FetchOutcome::Saved { filename, path }
            }
            Err(e) => {
                warn!("Saving {url} failed: {e}");
                FetchOutcome::SaveFailed(e)
            }
        }
    }

    /// Send the GET and wait for headers, giving up after `timeout` without a response
    async fn request(&self, url: &str) -> Result<reqwest::Response> {
        let target = url::Url::parse(url)?;
        let response = tokio::time::timeout(self.options.timeout, self.client.get(target).send())
            .await
            .map_err(|_| {
                Error::NetworkError(format!(
                    "No response within {}s",
                    self.options.timeout.as_secs_f64()
                ))
            })??;
        Ok(response.error_for_status()?)
    }
}

/// Declared content type, empty when the header is absent
fn content_type_of(response: &reqwest::Response) -> Result<String> {
    match response.headers().get(CONTENT_TYPE) {
        Some(value) => value
            .to_str()
            .map(str::to_string)
            .map_err(|e| Error::InvalidHeader(format!("Content-Type: {e}"))),
        None => Ok(String::new()),
    }
}
