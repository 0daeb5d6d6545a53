use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

/// Which filename convention a record was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// `<speaker>_WAV_<id1>_<id2><rest>`
    A,
    /// `<speaker><yyyymmdd>_<hhmmss><rest>`
    B,
}

/// Fields extracted from one recording filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAudioName {
    pub speaker: String,
    pub date: String,
    pub time: Option<String>,
    pub descriptor: String,
    pub source_kind: SourceKind,
    pub keep_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlanItem {
    pub src: PathBuf,
    pub dst: PathBuf,
}

/// One playlist entry inside a spot record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub file: String,
}

/// Spot title -> tracks to append, ordered by title.
pub type Additions = BTreeMap<String, Vec<Track>>;

#[derive(Debug, Clone, Default)]
pub struct AssignPlan {
    pub additions: Additions,
    /// Files whose descriptor matched no keyword or no known spot.
    pub unmapped: Vec<PathBuf>,
}

impl AssignPlan {
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty()
    }

    pub fn track_count(&self) -> usize {
        self.additions.values().map(Vec::len).sum()
    }
}

/// Parameters shared by the rename and assignment planners.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    pub targets: HashSet<String>,
    pub romanize_names: bool,
    /// Date placeholder for names without a date, already resolved.
    pub unknown_date: String,
    pub keep_id: bool,
}
