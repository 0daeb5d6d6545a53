//! Planning and committing a run. Planning never touches the filesystem
//! beyond reading; the commit steps are the only mutations.

use crate::assign::{plan_spots_additions_from_dir, plan_spots_additions_from_rename_plan};
use crate::config::Config;
use crate::models::{AssignPlan, PlanOptions, RenamePlanItem};
use crate::rename::{apply_renames, plan_renames};
use crate::spots::SpotsDocument;
use anyhow::Result;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// A required input path does not exist. The CLI maps this to exit code 2.
#[derive(Debug)]
pub struct MissingInput {
    pub what: &'static str,
    pub path: PathBuf,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} not found: {}", self.what, self.path.display())
    }
}

impl std::error::Error for MissingInput {}

#[derive(Debug)]
pub struct Prepared {
    pub options: PlanOptions,
    pub renames: Vec<RenamePlanItem>,
    /// `None` when assignment is disabled.
    pub assignment: Option<AssignPlan>,
}

/// Validate inputs and compute both plans.
///
/// A missing audio directory, or a missing spots file while assignment is
/// enabled, fails before anything is planned.
pub fn prepare(cfg: &Config) -> Result<Prepared> {
    if !cfg.audio_dir.is_dir() {
        return Err(MissingInput { what: "audio directory", path: cfg.audio_dir.clone() }.into());
    }
    let options = cfg.plan_options();

    let renames = if cfg.rename {
        plan_renames(&cfg.audio_dir, &options)?
    } else {
        Vec::new()
    };

    let assignment = if cfg.assign {
        if !cfg.spots_json.is_file() {
            return Err(MissingInput { what: "spots file", path: cfg.spots_json.clone() }.into());
        }
        let spots = SpotsDocument::load(&cfg.spots_json)?;
        let plan = if renames.is_empty() {
            plan_spots_additions_from_dir(&spots, &cfg.audio_dir, &options)?
        } else {
            plan_spots_additions_from_rename_plan(&spots, &renames, &options)
        };
        Some(plan)
    } else {
        None
    };

    info!(
        "Planned {} rename(s), {} playlist addition(s)",
        renames.len(),
        assignment.as_ref().map(AssignPlan::track_count).unwrap_or(0)
    );
    Ok(Prepared { options, renames, assignment })
}

pub fn commit_renames(prepared: &Prepared) -> Result<()> {
    if prepared.renames.is_empty() {
        return Ok(());
    }
    apply_renames(&prepared.renames)
}

/// Reload the spots file, append the planned tracks and write it back.
pub fn commit_assignment(cfg: &Config, plan: &AssignPlan) -> Result<usize> {
    if plan.is_empty() {
        return Ok(0);
    }
    let mut spots = SpotsDocument::load(&cfg.spots_json)?;
    let appended = spots.apply_additions(&plan.additions)?;
    spots.save(&cfg.spots_json)?;
    info!("Appended {} track(s) to {}", appended, cfg.spots_json.display());
    Ok(appended)
}
