use crate::normalize::nfc;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static SPEAKER_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([^0-9_]+)").unwrap());

/// Return true if the path has an `.mp3` extension, case-insensitive.
pub fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

/// Leading run of the stem without digits or underscores, used as a cheap
/// speaker filter before the full filename parse.
pub fn speaker_prefix(path: &Path) -> Option<String> {
    let stem = nfc(path.file_stem()?.to_str()?);
    SPEAKER_PREFIX.captures(&stem).map(|c| c[1].to_string())
}

/// Resolve the date placeholder: `today` becomes the local date as YYYYMMDD,
/// anything else is used literally.
pub fn resolve_unknown_date(value: &str) -> String {
    if value == "today" {
        chrono::Local::now().format("%Y%m%d").to_string()
    } else {
        value.to_string()
    }
}

/// Relative path stored in a spot playlist for an audio file name.
pub fn playlist_file_ref(file_name: &str) -> String {
    format!("audio/{}", file_name)
}
