//! Output filename derivation for image-fetcher
//!
//! Turns a URL into the name a fetched image is saved under.

use url::Url;

/// Name used when the URL path has no usable last segment
pub const FALLBACK_FILENAME: &str = "downloaded_image.jpg";

/// Derives the output filename from the last segment of the URL path.
///
/// Query strings and fragments are ignored. Percent-encoding is left as-is and no
/// character or extension checks are made. Falls back to [`FALLBACK_FILENAME`] when the
/// URL cannot be parsed or its path ends in `/`.
pub fn filename_from_url(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path()
                .rsplit('/')
                .next()
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

/// Splits a filename into base and extension, the extension keeping its leading dot.
///
/// Leading dots never start an extension, so `.hidden` has none.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if !name[..idx].trim_start_matches('.').is_empty() => name.split_at(idx),
        _ => (name, ""),
    }
}
