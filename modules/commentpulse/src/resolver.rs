// Identifier resolution: turn a raw id or a video URL into a canonical VideoId.
// Pure string matching, no HTTP.

use std::sync::LazyLock;

use regex::Regex;

use commentpulse_common::VideoId;

/// `watch?v=<id>` and any other URL carrying the id as a `v` query parameter.
static QUERY_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"v=([A-Za-z0-9_-]{11})").expect("valid regex"));

/// Short links and path-style URLs: `youtu.be/<id>`, `/shorts/<id>`, `/embed/<id>`, `/live/<id>`.
static PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtu\.be|/shorts|/embed|/live)/([A-Za-z0-9_-]{11})").expect("valid regex")
});

/// Resolve user input to a canonical video id. `None` means the input is not
/// recognized; callers warn and move on.
pub fn resolve(input: &str) -> Option<VideoId> {
    let trimmed = input.trim();

    if let Some(id) = VideoId::parse(trimmed) {
        return Some(id);
    }

    [&QUERY_PARAM_RE, &PATH_RE]
        .into_iter()
        .find_map(|re| re.captures(trimmed))
        .and_then(|caps| VideoId::parse(&caps[1]))
}
