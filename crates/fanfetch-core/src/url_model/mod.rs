//! URL modeling and filename derivation.
//!
//! The local filename is the last path segment of the URL. When that segment
//! is empty (URL ends in `/`, or has no path), a fixed fallback is used.

mod path;

pub use path::filename_from_url_path;

/// Filename used when the URL path yields nothing usable.
pub const FALLBACK_FILENAME: &str = "downloaded_file";

/// Derives the local filename for `url`. Never returns an empty string.
///
/// # Examples
///
/// - `derive_filename("https://example.com/archive.zip")` → `"archive.zip"`
/// - `derive_filename("https://example.com/images/")` → `"downloaded_file"`
pub fn derive_filename(url: &str) -> String {
    filename_from_url_path(url).unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

/// Inserts `-<index>` before the extension of `name`.
///
/// Leading dots do not count as an extension separator, so `.bashrc`
/// becomes `.bashrc-3` rather than `-3.bashrc`.
pub fn with_index_suffix(name: &str, index: usize) -> String {
    match name.rfind('.') {
        Some(dot) if dot > 0 => format!("{}-{}{}", &name[..dot], index, &name[dot..]),
        _ => format!("{}-{}", name, index),
    }
}
