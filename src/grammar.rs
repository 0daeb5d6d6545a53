//! Recognition of the two recording filename conventions.
//!
//! Convention B (`塚本20251012_121402公園内散策_野球.mp3`) carries a date and a
//! time right after the speaker. Convention A (`鈴木_WAV_0018_001._滝_1.mp3`)
//! carries a recorder id pair instead. B is tried first: its digit-anchored
//! prefix is the more specific of the two.

use crate::models::{ParsedAudioName, SourceKind};
use crate::normalize::{clean_separators, nfc, strip_mp3_token};
use crate::util::is_mp3;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

pub const UNKNOWN_CONTENT: &str = "UnknownContent";

static DATED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<speaker>[^0-9_]+)(?P<date>\d{8})_(?P<time>\d{6})(?P<rest>.*)$").unwrap()
});

static WAV_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<speaker>[^_]+)_WAV_(?P<id1>\d{4})_(?P<id2>\d{3})(?P<rest>.*)$").unwrap()
});

const TAKE_MARKERS: [(&str, &str); 3] = [("(1)", "take1_"), ("(2)", "take2_"), ("(3)", "take3_")];

fn descriptor_or_unknown(rest: String) -> String {
    if rest.is_empty() {
        UNKNOWN_CONTENT.to_string()
    } else {
        rest
    }
}

fn parse_dated(stem: &str) -> Option<ParsedAudioName> {
    let caps = DATED.captures(stem)?;

    let rest = strip_mp3_token(&caps["rest"]);
    let mut rest = clean_separators(&rest);
    for (marker, take) in TAKE_MARKERS {
        rest = rest.replace(marker, take);
    }
    let rest = clean_separators(&rest);

    Some(ParsedAudioName {
        speaker: caps["speaker"].to_string(),
        date: caps["date"].to_string(),
        time: Some(caps["time"].to_string()),
        descriptor: descriptor_or_unknown(rest),
        source_kind: SourceKind::B,
        keep_id: None,
    })
}

fn parse_wav_id(stem: &str, unknown_date: &str, keep_id: bool) -> Option<ParsedAudioName> {
    let caps = WAV_ID.captures(stem)?;

    let rest = strip_mp3_token(&caps["rest"]);
    let rest = clean_separators(&rest);
    let rest = rest.strip_prefix('_').map(str::to_string).unwrap_or(rest);

    let keep_id = keep_id.then(|| format!("WAV{:0>4}_{:0>3}", &caps["id1"], &caps["id2"]));

    Some(ParsedAudioName {
        speaker: caps["speaker"].to_string(),
        date: unknown_date.to_string(),
        time: None,
        descriptor: descriptor_or_unknown(rest),
        source_kind: SourceKind::A,
        keep_id,
    })
}

/// Parse a recording filename, returning `None` when it is not an `.mp3`
/// or follows neither convention.
///
/// `unknown_date` fills `date` for convention A, which has none. With
/// `keep_id` set, convention A keeps its id pair as `WAVnnnn_nnn`.
pub fn parse_audio_name(filename: &str, unknown_date: &str, keep_id: bool) -> Option<ParsedAudioName> {
    let path = Path::new(filename);
    if !is_mp3(path) {
        return None;
    }
    let stem = nfc(path.file_stem()?.to_str()?);

    parse_dated(&stem).or_else(|| parse_wav_id(&stem, unknown_date, keep_id))
}
