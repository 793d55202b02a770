//! Filename extraction from URL path.

/// Extracts the last path segment of a URL for use as a filename.
///
/// Query and fragment are ignored. Strings that do not parse as URLs are
/// treated as raw paths. Returns `None` if the last segment is empty, `.`
/// or `..`.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let segment = match url::Url::parse(url) {
        Ok(parsed) => last_segment(parsed.path()).to_string(),
        Err(_) => {
            let raw = url.split(['?', '#']).next().unwrap_or(url);
            last_segment(raw).to_string()
        }
    };
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment)
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
