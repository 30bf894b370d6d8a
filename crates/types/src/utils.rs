//! Utility functions and helpers

/// Strip trailing slashes from a base URL, keeping the scheme separator intact
pub fn strip_trailing_slash(url: &str) -> &str {
    let trimmed = url.trim_end_matches('/');
    if trimmed.ends_with(':') {
        // "https://" must not collapse to "https:"
        return url;
    }
    trimmed
}

/// Check whether two header names are the same, ignoring ASCII case
pub fn header_name_eq(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
