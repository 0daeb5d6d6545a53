//! Text canonicalization applied to every filename fragment.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static DOTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.+").unwrap());
static UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());
static MP3_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)mp3").unwrap());

/// Unicode canonical composition (NFC).
pub fn nfc(text: &str) -> String {
    text.nfc().collect()
}

/// Canonicalize separators in a filename fragment.
///
/// NFC, full-width underscore to `_`, spaces removed, dots removed,
/// underscore runs collapsed, then leading/trailing underscores stripped.
pub fn clean_separators(text: &str) -> String {
    let t = nfc(text);
    let t = t.replace('＿', "_");
    let t = t.replace(' ', "");
    let t = DOTS.replace_all(&t, ".");
    let t = t.replace('.', "");
    let t = UNDERSCORES.replace_all(&t, "_");
    t.trim_matches('_').to_string()
}

/// Drop any case-insensitive `mp3` left inside a stem, e.g. `鉄琴mp3`.
pub fn strip_mp3_token(text: &str) -> String {
    MP3_TOKEN.replace_all(text, "").into_owned()
}
