//! Core library modules for image-fetcher
//!
//! This module contains the internal implementation details of the image-fetcher library.

pub mod error;
pub mod filename;
pub mod fingerprint;
pub mod store;
pub mod stream;
pub mod fetcher;

// Re-export main types for internal use
pub use fetcher::ImageFetcher;
pub use store::ImageStore;
