//! Planning which spot playlists new recordings are appended to.

use crate::classify::guess_spot_title;
use crate::grammar::parse_audio_name;
use crate::models::{AssignPlan, ParsedAudioName, PlanOptions, RenamePlanItem, Track};
use crate::naming::build_track_name;
use crate::rename::list_mp3_files;
use crate::spots::SpotsDocument;
use crate::util::{is_mp3, playlist_file_ref, speaker_prefix};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Classify one parsed recording that will live at `final_path` and record
/// it either as an addition or as unmapped.
fn assign_one(
    plan: &mut AssignPlan,
    spots: &SpotsDocument,
    parsed: &ParsedAudioName,
    final_path: &Path,
    opts: &PlanOptions,
) {
    let Some(file_name) = final_path.file_name().and_then(|n| n.to_str()) else {
        return;
    };

    let title = match guess_spot_title(&parsed.descriptor) {
        Some(t) if spots.has_title(t) => t,
        guess => {
            debug!("no spot for {} (descriptor {:?}, guess {:?})", file_name, parsed.descriptor, guess);
            plan.unmapped.push(final_path.to_path_buf());
            return;
        }
    };

    let file = playlist_file_ref(file_name);
    if spots.contains_file(title, &file) {
        debug!("{} already in playlist of {}", file, title);
        return;
    }

    let track = Track {
        name: build_track_name(&parsed.speaker, &parsed.descriptor, opts.romanize_names),
        file,
    };
    plan.additions.entry(title.to_string()).or_default().push(track);
}

/// Plan additions for the `.mp3` files in `files` as they are named now.
pub fn plan_spots_additions(spots: &SpotsDocument, files: &[PathBuf], opts: &PlanOptions) -> AssignPlan {
    let mut sorted: Vec<&PathBuf> = files.iter().filter(|p| is_mp3(p)).collect();
    sorted.sort();

    let mut plan = AssignPlan::default();
    for path in sorted {
        match speaker_prefix(path) {
            Some(prefix) if opts.targets.contains(&prefix) => {}
            _ => continue,
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(parsed) = parse_audio_name(name, &opts.unknown_date, opts.keep_id) else {
            continue;
        };
        assign_one(&mut plan, spots, &parsed, path, opts);
    }
    plan
}

/// Plan additions for the files in `audio_dir`.
pub fn plan_spots_additions_from_dir(spots: &SpotsDocument, audio_dir: &Path, opts: &PlanOptions) -> Result<AssignPlan> {
    let files = list_mp3_files(audio_dir)?;
    Ok(plan_spots_additions(spots, &files, opts))
}

/// Plan additions for a pending rename plan. Each recording is parsed from
/// its source name (the record its destination was built from) while the
/// playlist entry and the unmapped report use the destination.
pub fn plan_spots_additions_from_rename_plan(
    spots: &SpotsDocument,
    rename_plan: &[RenamePlanItem],
    opts: &PlanOptions,
) -> AssignPlan {
    let mut plan = AssignPlan::default();
    for item in rename_plan {
        let Some(name) = item.src.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(parsed) = parse_audio_name(name, &opts.unknown_date, opts.keep_id) else {
            continue;
        };
        if !opts.targets.contains(&parsed.speaker) {
            continue;
        }
        assign_one(&mut plan, spots, &parsed, &item.dst, opts);
    }
    plan
}
