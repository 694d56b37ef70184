// ABOUTME: Inline metadata extraction for slide sources
// ABOUTME: Reads comment-style key/value directives without touching the surrounding content

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Matches `<!-- key: value -->`. The colon is what separates a metadata
/// directive from a structural marker like `<!-- column -->`.
fn directive_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<!--\s*(\w+)\s*:\s*(.*?)\s*-->").unwrap())
}

/// Collect every inline directive in `text` into a key/value map.
///
/// Later occurrences of a key overwrite earlier ones. Values wrapped in a
/// matching pair of single or double quotes are unquoted. The source text is
/// not modified; see [`strip`] for the separate clean step.
pub fn extract(text: &str) -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    for caps in directive_re().captures_iter(text) {
        let key = caps[1].to_string();
        let value = unquote(caps[2].trim()).to_string();
        map.insert(key, value);
    }
    map
}

/// Remove metadata directives from `text`, leaving everything else in place.
/// Structural markers without a colon (such as column markers) survive.
pub fn strip(text: &str) -> String {
    directive_re().replace_all(text, "").into_owned()
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
