//! Destination filename assembly.

use crate::grammar::UNKNOWN_CONTENT;
use crate::models::ParsedAudioName;
use crate::normalize::clean_separators;

/// Fixed speaker romanization. Unknown speakers pass through unchanged.
const NAME_ROMAJI: &[(&str, &str)] = &[("鈴木", "Suzuki"), ("塚本", "Tsukamoto"), ("高野", "Takano")];

pub fn romanize(speaker: &str) -> &str {
    NAME_ROMAJI
        .iter()
        .find(|(ja, _)| *ja == speaker)
        .map(|(_, romaji)| *romaji)
        .unwrap_or(speaker)
}

/// Speaker as shown in new filenames and track names.
pub fn display_speaker(speaker: &str, romanize_names: bool) -> &str {
    if romanize_names {
        romanize(speaker)
    } else {
        speaker
    }
}

/// Build `<speaker>_<date>[_<time>][_<id>]_<descriptor>.mp3`.
pub fn build_new_filename(parsed: &ParsedAudioName, romanize_names: bool) -> String {
    let speaker = display_speaker(&parsed.speaker, romanize_names);

    let mut parts: Vec<&str> = vec![speaker, parsed.date.as_str()];
    if let Some(time) = parsed.time.as_deref() {
        parts.push(time);
    }
    if let Some(id) = parsed.keep_id.as_deref() {
        parts.push(id);
    }
    parts.push(&parsed.descriptor);

    let mut joined = clean_separators(&parts.join("_"));
    if joined.is_empty() {
        joined = format!("{}_{}_{}", speaker, parsed.date, UNKNOWN_CONTENT);
    }
    format!("{}.mp3", joined)
}

/// Track title shown in a spot playlist: `<speaker>:<descriptor>`.
pub fn build_track_name(speaker: &str, descriptor: &str, romanize_names: bool) -> String {
    format!("{}:{}", display_speaker(speaker, romanize_names), descriptor)
}
