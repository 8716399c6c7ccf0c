//! Text normalization helpers for user-supplied bookmark fields.

use url::Url;

/// Invisible, deprecated or formatting characters that can reorder, hide or
/// break rendered text.
const BLOCKED_FORMAT_CHARS: &[(char, char)] = &[
    ('\u{0340}', '\u{0341}'), // combining grave/acute tone marks (clones)
    ('\u{061C}', '\u{061C}'), // arabic letter mark
    ('\u{17A3}', '\u{17A3}'), // khmer independent vowel QAQ (obsolete)
    ('\u{17D3}', '\u{17D3}'), // khmer sign bathamasat (obsolete)
    ('\u{200E}', '\u{200F}'), // LRM, RLM
    ('\u{2028}', '\u{2029}'), // line and paragraph separators
    ('\u{202A}', '\u{202E}'), // bidi embeddings and overrides
    ('\u{2066}', '\u{2069}'), // bidi isolates
    ('\u{206A}', '\u{206F}'), // deprecated format controls
    ('\u{FEFF}', '\u{FEFF}'), // byte order mark
    ('\u{FFF9}', '\u{FFFC}'), // interlinear annotation, object replacement
    ('\u{1D173}', '\u{1D17A}'), // musical beam and phrase scoping
    ('\u{E0000}', '\u{E007F}'), // language tags
];

fn is_blocked(c: char) -> bool {
    c.is_control()
        || BLOCKED_FORMAT_CHARS
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&c))
}

/// Remove control characters and every code point in `BLOCKED_FORMAT_CHARS`.
///
/// Running it twice is the same as running it once.
pub fn sanitize_unicode(value: &str) -> String {
    value.chars().filter(|&c| !is_blocked(c)).collect()
}

/// Strip `:` delimiters from both ends of an emoji name.
///
/// `":smile:"`, `"smile"` and `"::smile"` all become `"smile"`.
#[inline]
pub fn trim_emoji(value: &str) -> &str {
    value.trim_matches(':')
}

/// Number of Unicode scalar values in a string.
#[inline]
pub fn rune_count(value: &str) -> usize {
    value.chars().count()
}

/// Check whether a string is an absolute `http://` or `https://` URL with a host.
pub fn is_valid_http_url(value: &str) -> bool {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return false;
    }

    match Url::parse(value) {
        Ok(url) => url.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}
