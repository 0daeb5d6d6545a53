use crate::models::PlanOptions;
use crate::util::resolve_unknown_date;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_audio_dir")]
    pub audio_dir: PathBuf,
    #[serde(default = "default_spots_json")]
    pub spots_json: PathBuf,
    /// Speaker prefixes to process, e.g. ["鈴木", "塚本"].
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,
    #[serde(default)]
    pub romanize_names: bool,
    /// Date used for names that carry none. "today" means the local date.
    #[serde(default = "default_unknown_date")]
    pub unknown_date: String,
    /// Keep the recorder id pair of WAV-style names.
    #[serde(default = "default_true")]
    pub keep_id: bool,

    // Stages
    #[serde(default = "default_true")]
    pub rename: bool,
    #[serde(default = "default_true")]
    pub assign: bool,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub assume_yes: bool,

    /// Optional directory for a daily-rotated log file.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_audio_dir() -> PathBuf { "audio".into() }
fn default_spots_json() -> PathBuf { "spots.json".into() }
fn default_targets() -> Vec<String> { vec!["鈴木".into(), "塚本".into()] }
fn default_unknown_date() -> String { "UnknownDate".into() }
fn default_true() -> bool { true }

impl Default for Config {
    fn default() -> Self {
        Self {
            audio_dir: default_audio_dir(),
            spots_json: default_spots_json(),
            targets: default_targets(),
            romanize_names: false,
            unknown_date: default_unknown_date(),
            keep_id: true,
            rename: true,
            assign: true,
            dry_run: false,
            assume_yes: false,
            log_dir: None,
        }
    }
}

impl Config {
    pub fn from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&s)?;
        Ok(cfg)
    }

    /// Planner parameters with targets trimmed and the date placeholder resolved.
    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            targets: self
                .targets
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect(),
            romanize_names: self.romanize_names,
            unknown_date: resolve_unknown_date(&self.unknown_date),
            keep_id: self.keep_id,
        }
    }
}

/// Split a comma separated target list, dropping blanks.
pub fn parse_targets(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}
