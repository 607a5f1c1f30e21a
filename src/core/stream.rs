//! Fetch options and streamed body reading for image-fetcher
//!
//! Response bodies are read through an `AsyncRead` adapter in fixed-size chunks so
//! progress can be reported while bytes arrive.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures_util::TryStreamExt;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::core::error::{Error, Result};
use crate::core::fetcher::FetchOutcome;

/// Default output directory, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "Fetched_Images";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Progress callback: bytes received so far and expected total (0 when unknown)
pub type ProgressCallback = Arc<dyn Fn(u64, u64) + Send + Sync>;

/// Receives per-URL lifecycle notifications, in processing order
pub trait FetchObserver: Send + Sync {
    /// Request for `url` is about to be sent
    fn fetching(&self, url: &str);

    /// `url` reached a terminal state
    fn finished(&self, url: &str, outcome: &FetchOutcome);
}

/// Options for a fetch run
#[derive(Clone)]
pub struct FetchOptions {
    /// Directory fetched images are written to
    pub output_dir: PathBuf,

    /// Connect timeout, and the longest wait for response headers or the next body chunk
    pub timeout: Duration,

    /// Buffer size for streaming response bodies
    pub buffer_size: usize,

    /// Optional download progress callback
    pub progress: Option<ProgressCallback>,

    /// Optional per-URL observer
    pub observer: Option<Arc<dyn FetchObserver>>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            timeout: DEFAULT_TIMEOUT,
            buffer_size: 64 * 1024, // 64KB
            progress: None,
            observer: None,
        }
    }
}

/// Wraps an HTTP response body as an `AsyncRead`
pub fn create_http_stream(response: reqwest::Response) -> impl AsyncRead + Send + Unpin {
    tokio_util::io::StreamReader::new(
        response
            .bytes_stream()
            .map_err(std::io::Error::other),
    )
}

/// Read a whole response body into memory, reporting progress per chunk.
///
/// Each read may wait at most `options.timeout`; a body that keeps trickling in is fine.
/// `Content-Length` is only a hint and never sizes an allocation beyond a few buffers.
/// Read failures part way through are network errors.
pub async fn read_body(response: reqwest::Response, options: &FetchOptions) -> Result<Bytes> {
    let total_size = response.content_length().unwrap_or(0);
    let capacity = total_size.min(options.buffer_size as u64 * 16) as usize;
    let mut body = BytesMut::with_capacity(capacity);
    let mut buffer = vec![0u8; options.buffer_size];
    let mut stream = create_http_stream(response);

    loop {
        let bytes_read = tokio::time::timeout(options.timeout, stream.read(&mut buffer))
            .await
            .map_err(|_| {
                Error::NetworkError(format!(
                    "No body data received for {}s",
                    options.timeout.as_secs_f64()
                ))
            })?
            .map_err(|e| Error::NetworkError(format!("Stream read error: {e}")))?;

        if bytes_read == 0 {
            break;
        }

        body.extend_from_slice(&buffer[..bytes_read]);

        if let Some(ref progress) = options.progress {
            progress(body.len() as u64, total_size);
        }
    }

    Ok(body.freeze())
}
