use std::sync::LazyLock;

use regex::Regex;

static LINE_ENDING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n|\r").unwrap());
static HSPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+").unwrap());
static PAGE_BANNER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Página\s*\d+\s*de\s*\d+").unwrap());
static HYPHEN_WRAP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w)-\n(\w)").unwrap());

/// Canonicalize raw page text: `\n` line endings, single spaces, no
/// "Página N de M" banners, hyphenated wraps joined.
///
/// Passes repeat until nothing changes, so normalizing twice is a no-op.
pub fn normalize(raw: &str) -> String {
    let mut text = raw.to_string();
    loop {
        let next = normalize_pass(&text);
        if next == text {
            return text;
        }
        text = next;
    }
}

fn normalize_pass(text: &str) -> String {
    let text = LINE_ENDING_RE.replace_all(text, "\n");
    let text = HSPACE_RE.replace_all(&text, " ");
    let text = PAGE_BANNER_RE.replace_all(&text, "");
    HYPHEN_WRAP_RE.replace_all(&text, "${1}${2}").into_owned()
}
