// src/cache.rs

//! Local Cache: one JSON snapshot per target year.
//!
//! A snapshot is written whole on a successful fetch and consumed whole on
//! later runs; a refresh replaces it, never merges into it. Single-process
//! assumption, no locking.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fetch::FetchSet;

#[derive(Debug, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(rename = "fetchedAt")]
    pub fetched_at: String,
    #[serde(rename = "targetYear")]
    pub target_year: i32,
    pub data: FetchSet,
}

impl Snapshot {
    pub fn new(data: FetchSet, target_year: i32) -> Self {
        Self {
            fetched_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            target_year,
            data,
        }
    }
}

pub fn cache_path(dir: &Path, year: i32) -> PathBuf {
    dir.join(format!("wb_data_{}.json", year))
}

/// Write the full snapshot, overwriting any prior one for that year.
pub fn save(dir: &Path, snapshot: &Snapshot) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = cache_path(dir, snapshot.target_year);
    fs::write(&path, serde_json::to_string_pretty(snapshot)?)?;
    Ok(path)
}

/// Load the snapshot for `year`, or `None` when absent.
pub fn load(dir: &Path, year: i32) -> Result<Option<Snapshot>> {
    let path = cache_path(dir, year);
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(&path)?;
    let snapshot: Snapshot = serde_json::from_str(&text)?;
    Ok(Some(snapshot))
}
