// src/report.rs

//! Report/Changelog Emitter: coverage statistics on stdout, plus the two
//! JSON audit artifacts written next to the table file. Nothing else
//! consumes these; they exist so a bad merge can be traced afterwards.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::indicators::{self, Indicator};
use crate::error::Result;
use crate::fetch::{FetchSet, IndicatorResults};
use crate::merge::MergeOutcome;

/// Per-indicator coverage facts.
#[derive(Debug, PartialEq, Eq)]
pub struct Coverage {
    pub total: usize,
    pub on_target: usize,
    /// Most frequent observation year; smallest wins a frequency tie.
    pub primary_year: Option<i32>,
    pub years: BTreeMap<i32, usize>,
}

pub fn coverage(results: &IndicatorResults, target_year: i32) -> Coverage {
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    for obs in results.values() {
        *years.entry(obs.year).or_default() += 1;
    }
    let on_target = years.get(&target_year).copied().unwrap_or(0);
    let primary_year = years
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
        .map(|(y, _)| *y);
    Coverage { total: results.len(), on_target, primary_year, years }
}

/// One summary line per indicator. Zero coverage gets an explicit marker;
/// it is a reporting condition, never an abort.
pub fn print_summary(data: &FetchSet, target_year: i32) {
    println!();
    println!("{}", "=".repeat(60));
    println!("DATA QUALITY REPORT — target year {}", target_year);
    println!("{}", "=".repeat(60));
    for (key, results) in data {
        let cov = coverage(results, target_year);
        if cov.total == 0 {
            println!("  [!] {}: NO DATA", key);
            continue;
        }
        let hist: Vec<String> = cov.years.iter().map(|(y, c)| format!("{}:{}", y, c)).collect();
        println!(
            "  {} {}: {} countries, {} on target | {}",
            if cov.on_target * 2 > cov.total { "[ok]" } else { "[~ ]" },
            key,
            cov.total,
            cov.on_target,
            hist.join(", ")
        );
    }
}

/* ---------------- persisted artifacts ---------------- */

#[derive(Serialize)]
struct IndicatorMeta {
    coverage: usize,
    #[serde(rename = "primaryYear", skip_serializing_if = "Option::is_none")]
    primary_year: Option<i32>,
}

#[derive(Serialize)]
struct Metadata<'a> {
    #[serde(rename = "generatedAt")]
    generated_at: String,
    #[serde(rename = "targetYear")]
    target_year: i32,
    source: &'a str,
    #[serde(rename = "fieldsUpdated")]
    fields_updated: Vec<&'a str>,
    #[serde(rename = "fieldsSkipped")]
    fields_skipped: Vec<String>,
    indicators: BTreeMap<&'a str, IndicatorMeta>,
}

/// Write `data_metadata.json` next to the table file.
pub fn write_metadata(table_file: &Path, data: &FetchSet, defs: &[Indicator], target_year: i32) -> Result<PathBuf> {
    let mut per_indicator = BTreeMap::new();
    for (key, results) in data {
        if results.is_empty() {
            continue;
        }
        let cov = coverage(results, target_year);
        if let Some(def) = indicators::find(defs, key) {
            per_indicator.insert(def.key, IndicatorMeta { coverage: cov.total, primary_year: cov.primary_year });
        }
    }

    let meta = Metadata {
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        target_year,
        source: "World Bank API v2",
        fields_updated: indicators::fetchable(defs).map(|d| d.key).collect(),
        fields_skipped: defs
            .iter()
            .filter_map(|d| d.excluded_reason().map(|r| format!("{} ({})", d.key, r)))
            .collect(),
        indicators: per_indicator,
    };

    let path = sibling(table_file, "data_metadata.json");
    fs::write(&path, serde_json::to_string_pretty(&meta)?)?;
    Ok(path)
}

#[derive(Serialize)]
struct ChangelogFile<'a> {
    date: String,
    #[serde(rename = "targetYear")]
    target_year: i32,
    updated: usize,
    #[serde(rename = "totalChanges")]
    total_changes: usize,
    changes: &'a [crate::merge::Change],
}

/// Write `data_changelog.json` next to the table file.
pub fn write_changelog(table_file: &Path, outcome: &MergeOutcome, target_year: i32) -> Result<PathBuf> {
    let log = ChangelogFile {
        date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        target_year,
        updated: outcome.updated_regions,
        total_changes: outcome.changes.len(),
        changes: &outcome.changes,
    };
    let path = sibling(table_file, "data_changelog.json");
    fs::write(&path, serde_json::to_string_pretty(&log)?)?;
    Ok(path)
}

fn sibling(table_file: &Path, name: &str) -> PathBuf {
    match table_file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.join(name),
        _ => PathBuf::from(name),
    }
}
