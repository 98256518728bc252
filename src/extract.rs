//! Flat `"key":"value"` lookup over raw JSON text.
//!
//! This is a substring search, not a parser: the key match is exact and
//! case-sensitive, and the value ends at the next `"` with no escape
//! handling, so `\"` inside a value cuts it short.

/// Room for the game name, terminator slot included.
pub const NAME_CAPACITY: usize = 200;
/// Room for the image URL, terminator slot included.
pub const IMAGE_URL_CAPACITY: usize = 500;

/// Returns the value following the first `"<key>":"` in `text`, up to the
/// next quote or the end of the text.
pub fn find_value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let pattern = format!("\"{}\":\"", key);
    let start = text.find(&pattern)? + pattern.len();
    let rest = &text[start..];

    let end = rest.find('"').unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Like [`find_value`], but owned and cut to `capacity - 1` characters.
/// A missing key yields an empty string.
pub fn extract_bounded(text: &str, key: &str, capacity: usize) -> String {
    let Some(value) = find_value(text, key) else {
        return String::new();
    };

    let limit = capacity.saturating_sub(1);
    match value.char_indices().nth(limit) {
        Some((cut, _)) => value[..cut].to_string(),
        None => value.to_string(),
    }
}
