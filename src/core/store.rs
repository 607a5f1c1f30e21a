//! Output directory handling for image-fetcher
//!
//! Owns the directory fetched images are written to and picks a free path for each one.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::io::AsyncWriteExt;

use crate::core::error::Result;
use crate::core::filename::split_extension;

/// Directory that fetched images are saved into
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Open the store, creating the directory and any missing parents.
    ///
    /// Existing contents are left untouched.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        debug!("Output directory ready: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve a path for `filename` that does not exist yet.
    ///
    /// Tries `filename` first, then `base_1.ext`, `base_2.ext` and so on, returning the
    /// first free candidate.
    pub fn resolve_path(&self, filename: &str) -> PathBuf {
        let mut candidate = self.dir.join(filename);
        if !candidate.exists() {
            return candidate;
        }

        let (base, ext) = split_extension(filename);
        let mut counter = 1u64;
        loop {
            candidate = self.dir.join(format!("{base}_{counter}{ext}"));
            if !candidate.exists() {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Write `content` to a fresh file for `filename`, returning the path used.
    ///
    /// The file is created with `create_new`, so a path that appears between
    /// resolution and creation is reported as an error rather than overwritten.
    pub async fn save(&self, filename: &str, content: &[u8]) -> Result<PathBuf> {
        let path = self.resolve_path(filename);

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(content).await?;
        file.flush().await?;

        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(path)
    }
}
