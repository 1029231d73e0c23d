// src/params.rs
use std::path::PathBuf;

use chrono::Datelike;

pub const API_BASE: &str = "https://api.worldbank.org/v2";
pub const USER_AGENT: &str = "a2a_sync/0.3";

pub const DEFAULT_TABLE_FILE: &str = "src/data.js";
pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_TOLERANCE: i32 = 2;

/// Records per API page.
pub const PAGE_SIZE: u32 = 1000;
/// Courtesy pause between page requests (not a retry/backoff).
pub const PAGE_DELAY_MS: u64 = 250;
pub const HTTP_TIMEOUT_SECS: u64 = 30;
/// "Most recent N" count used by the fallback query mode.
pub const MRV_COUNT: u32 = 5;

/// How many field changes to echo before truncating the preview.
pub const CHANGE_PREVIEW_LIMIT: usize = 30;

#[derive(Clone, Debug)]
pub struct Params {
    pub year: i32,           // target year to unify the table to
    pub tolerance: i32,      // accept observations within ±tolerance years
    pub dry_run: bool,       // preview only, no writes
    pub cache_only: bool,    // forbid network; cache must exist
    pub refresh: bool,       // bypass cache, force re-fetch
    pub table_file: PathBuf, // the data.js to rewrite
    pub cache_dir: PathBuf,
}

impl Params {
    pub fn new() -> Self {
        Self {
            // Latest complete statistical cycle.
            year: chrono::Utc::now().year() - 1,
            tolerance: DEFAULT_TOLERANCE,
            dry_run: false,
            cache_only: false,
            refresh: false,
            table_file: PathBuf::from(DEFAULT_TABLE_FILE),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}
