//! The spots JSON file: an array of spot records, each with a `title` and
//! an optional `playlist` of `{name, file}` entries.
//!
//! Records are kept as raw JSON values so fields this tool does not know
//! about survive a load/save cycle in their original order.

use crate::models::Additions;
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SpotsDocument {
    spots: Vec<Value>,
    /// Title -> record index. A repeated title resolves to its last occurrence.
    index: HashMap<String, usize>,
}

impl SpotsDocument {
    pub fn from_value(value: Value) -> Result<Self> {
        let spots = match value {
            Value::Array(items) => items,
            other => bail!("spots file must be a JSON array, found {}", json_kind(&other)),
        };
        for (i, spot) in spots.iter().enumerate() {
            if !spot.is_object() {
                bail!("spot #{} must be a JSON object, found {}", i, json_kind(spot));
            }
        }
        let index = spots
            .iter()
            .enumerate()
            .map(|(i, s)| (s.get("title").and_then(Value::as_str).unwrap_or("").to_string(), i))
            .collect();
        Ok(Self { spots, index })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let value: Value = serde_json::from_str(&s).with_context(|| format!("parsing {}", path.display()))?;
        Self::from_value(value).with_context(|| format!("loading {}", path.display()))
    }

    /// Write with two-space indent, non-ASCII kept literal, trailing newline.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut out = serde_json::to_string_pretty(&self.spots)?;
        out.push('\n');
        std::fs::write(path, out).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    pub fn as_values(&self) -> &[Value] {
        &self.spots
    }

    pub fn has_title(&self, title: &str) -> bool {
        self.index.contains_key(title)
    }

    fn spot(&self, title: &str) -> Option<&Value> {
        self.index.get(title).map(|&i| &self.spots[i])
    }

    /// Current playlist entries of a spot; missing or `null` playlists are empty.
    pub fn playlist(&self, title: &str) -> &[Value] {
        self.spot(title)
            .and_then(|s| s.get("playlist"))
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True if the spot's playlist already has an entry with exactly this `file`.
    pub fn contains_file(&self, title: &str, file: &str) -> bool {
        self.playlist(title)
            .iter()
            .any(|t| t.get("file").and_then(Value::as_str) == Some(file))
    }

    /// Append planned tracks to each spot's playlist, creating the playlist
    /// when it is missing or `null`. Titles without a record are skipped.
    pub fn apply_additions(&mut self, additions: &Additions) -> Result<usize> {
        let mut appended = 0usize;
        for (title, tracks) in additions {
            let Some(&i) = self.index.get(title) else {
                debug!("no spot titled {}; skipping {} track(s)", title, tracks.len());
                continue;
            };
            let Some(obj) = self.spots[i].as_object_mut() else {
                continue;
            };
            let playlist = obj.entry("playlist").or_insert(Value::Null);
            if playlist.is_null() {
                *playlist = Value::Array(Vec::new());
            }
            match playlist {
                Value::Array(entries) => {
                    for track in tracks {
                        entries.push(serde_json::to_value(track)?);
                    }
                    appended += tracks.len();
                }
                other => bail!("playlist of spot {} is {}, expected an array", title, json_kind(other)),
            }
        }
        Ok(appended)
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
