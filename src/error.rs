// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// One bad row found while parsing the table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadRow {
    /// 1-based line number within the table body.
    pub line: usize,
    pub found: usize,
    pub preview: String,
}

/// Error taxonomy for the pipeline.
///
/// Fatal variants abort before any write: a document we cannot locate or
/// whose rows violate the schema, and a cache the user demanded but which
/// does not exist. Failures scoped to a single indicator or a single field
/// update degrade with a warning instead (see `fetch` and `merge`).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("table markers not found in {path} (expected a RAW template literal block)", path = .path.display())]
    TableMarkers { path: PathBuf },

    #[error("{n} row(s) with wrong field count (expected {expected}): {detail}", n = .rows.len(), detail = summarize(.rows))]
    RowArity { expected: usize, rows: Vec<BadRow> },

    #[error("no cached snapshot for {year} at {path} — run without --cache-only first", path = .path.display())]
    CacheMissing { year: i32, path: PathBuf },

    #[error("unknown indicator key in fetch data: {0}")]
    UnknownIndicator(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

fn summarize(rows: &[BadRow]) -> String {
    let mut out = String::new();
    for (i, r) in rows.iter().take(5).enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        out.push_str(&format!("line {} has {} fields ({})", r.line, r.found, r.preview));
    }
    if rows.len() > 5 {
        out.push_str(&format!("; … and {} more", rows.len() - 5));
    }
    out
}

pub type Result<T> = std::result::Result<T, PipelineError>;
