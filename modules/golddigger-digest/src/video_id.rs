use std::sync::LazyLock;

use regex::Regex;

/// Exactly 11 id characters following `v=` or a path separator.
static RE_VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|/)([A-Za-z0-9_-]{11})").expect("valid regex"));

static RE_BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("valid regex"));

/// Extract the 11-character video id from a watch URL, short link, embed URL
/// or a bare id. Returns `None` when nothing id-shaped is present.
pub fn parse(input: &str) -> Option<String> {
    let input = input.trim();
    if RE_BARE_ID.is_match(input) {
        return Some(input.to_string());
    }
    RE_VIDEO_ID
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
