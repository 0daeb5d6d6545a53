//! Collision-safe rename planning and two-phase application.

use crate::grammar::parse_audio_name;
use crate::models::{PlanOptions, RenamePlanItem};
use crate::naming::build_new_filename;
use crate::util::{is_mp3, speaker_prefix};
use anyhow::{bail, Context, Result};
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

const TMP_SUFFIX: &str = ".__renametmp__";

/// Regular `.mp3` files directly inside `dir`, sorted by file name.
/// Symlinks count when they point at a regular file.
pub fn list_mp3_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        if entry.file_type().is_file() && is_mp3(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Source path and its unresolved destination, for files that pass the
/// speaker filter and parse under one of the two conventions.
fn candidates(audio_dir: &Path, opts: &PlanOptions) -> Result<Vec<RenamePlanItem>> {
    let mut out = Vec::new();
    for src in list_mp3_files(audio_dir)? {
        let Some(prefix) = speaker_prefix(&src) else {
            continue;
        };
        if !opts.targets.contains(&prefix) {
            debug!("skipping {:?}: speaker {} not targeted", src, prefix);
            continue;
        }
        let Some(name) = src.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(parsed) = parse_audio_name(name, &opts.unknown_date, opts.keep_id) else {
            debug!("skipping {:?}: unrecognized name", src);
            continue;
        };
        let dst = src.with_file_name(build_new_filename(&parsed, opts.romanize_names));
        out.push(RenamePlanItem { src, dst });
    }
    Ok(out)
}

fn dup_name(dst: &Path, n: usize) -> PathBuf {
    let stem = dst.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let ext = dst.extension().map(|e| e.to_string_lossy().into_owned()).unwrap_or_default();
    dst.with_file_name(format!("{}_dup{}.{}", stem, n, ext))
}

/// Plan renames for targeted recordings in `audio_dir`.
///
/// Destinations are made unique with a `_dup<N>` stem suffix when they are
/// already claimed in this pass or occupied by a file that stays put.
/// Files already at their destination are left out of the plan.
pub fn plan_renames(audio_dir: &Path, opts: &PlanOptions) -> Result<Vec<RenamePlanItem>> {
    let items = candidates(audio_dir, opts)?;

    // Sources that will be vacated by the two-phase apply.
    let moving: HashSet<PathBuf> = items
        .iter()
        .filter(|it| it.src != it.dst)
        .map(|it| it.src.clone())
        .collect();

    let mut claimed: HashSet<PathBuf> = HashSet::new();
    let mut resolved = Vec::with_capacity(items.len());
    for item in items {
        let occupied = |p: &Path| {
            claimed.contains(p) || (p != item.src && p.exists() && !moving.contains(p))
        };
        let mut dst = item.dst.clone();
        let mut n = 1;
        while occupied(&dst) {
            dst = dup_name(&item.dst, n);
            n += 1;
        }
        claimed.insert(dst.clone());
        resolved.push(RenamePlanItem { src: item.src, dst });
    }

    resolved.retain(|it| it.src.file_name() != it.dst.file_name());
    Ok(resolved)
}

fn tmp_path(src: &Path) -> PathBuf {
    let mut name: OsString = src.file_name().map(OsString::from).unwrap_or_default();
    name.push(TMP_SUFFIX);
    src.with_file_name(name)
}

/// Execute a rename plan in two phases: every source to a temporary
/// sibling, then every temporary to its destination. Permutations inside
/// the plan (A->B, B->A) are therefore safe. Phase two never overwrites a
/// file that exists outside the plan: such a plan is rejected before any
/// file is touched.
pub fn apply_renames(plan: &[RenamePlanItem]) -> Result<()> {
    let sources: HashSet<&Path> = plan.iter().map(|it| it.src.as_path()).collect();
    for item in plan {
        if item.dst.exists() && !sources.contains(item.dst.as_path()) {
            bail!("refusing to overwrite existing {}", item.dst.display());
        }
    }

    let mut staged: Vec<(PathBuf, &RenamePlanItem)> = Vec::with_capacity(plan.len());
    for item in plan {
        let tmp = tmp_path(&item.src);
        if tmp.exists() {
            std::fs::remove_file(&tmp).with_context(|| format!("removing stale {}", tmp.display()))?;
        }
        staged.push((tmp, item));
    }

    for (tmp, item) in &staged {
        std::fs::rename(&item.src, tmp)
            .with_context(|| format!("renaming {} -> {}", item.src.display(), tmp.display()))?;
    }

    for (tmp, item) in &staged {
        if item.dst.exists() {
            bail!("{} appeared during rename; {} left at {}", item.dst.display(), item.src.display(), tmp.display());
        }
        std::fs::rename(tmp, &item.dst)
            .with_context(|| format!("renaming {} -> {}", tmp.display(), item.dst.display()))?;
        debug!("renamed {:?} -> {:?}", item.src, item.dst);
    }

    info!("Renamed {} file(s)", plan.len());
    Ok(())
}
