// src/runner.rs

//! Top-level pipeline: snapshot acquisition → report → parse → merge →
//! write-at-end. The table file is only rewritten after the entire merge
//! completed in memory, so a killed run never leaves a partial table.

use std::fs;

use anyhow::{Context, Result};
use log::info;

use crate::cache::{self, Snapshot};
use crate::config::{INDICATORS, REGION_ISO3};
use crate::error::PipelineError;
use crate::fetch;
use crate::merge;
use crate::net::WbClient;
use crate::params::{Params, CHANGE_PREVIEW_LIMIT};
use crate::report;
use crate::table::TableDocument;

pub fn run(params: &Params) -> Result<()> {
    println!("a2a_sync — target year {}, tolerance ±{} years{}",
        params.year,
        params.tolerance,
        if params.dry_run { " (dry run)" } else { "" });

    // 1. Snapshot: cache unless a refresh is forced.
    let snapshot = acquire_snapshot(params)?;

    // 2. Coverage report, zero-coverage indicators included.
    report::print_summary(&snapshot.data, params.year);

    // 3. Parse the table. Missing file or malformed table aborts here,
    //    before anything is written.
    let text = fs::read_to_string(&params.table_file)
        .with_context(|| format!("cannot read table file {}", params.table_file.display()))?;
    let mut doc = TableDocument::parse(&text, &params.table_file)?;
    println!(
        "\nParsed {}: {} regions ({} countries)",
        params.table_file.display(),
        doc.region_count(),
        doc.country_count()
    );

    // 4. Merge in memory.
    let outcome = merge::merge(&mut doc, &snapshot.data, INDICATORS, REGION_ISO3, params.year)?;
    println!(
        "\n{} regions updated, {} field changes, {} rejected by the jump guard",
        outcome.updated_regions,
        outcome.changes.len(),
        outcome.rejected
    );
    preview_changes(&outcome.changes);

    // 5. Write everything, or nothing.
    if params.dry_run {
        println!("\nDRY RUN — no files modified");
        return Ok(());
    }

    doc.set_sources_note(params.year);
    fs::write(&params.table_file, doc.serialize())
        .with_context(|| format!("cannot write {}", params.table_file.display()))?;
    println!("\nWrote {}", params.table_file.display());

    let meta = report::write_metadata(&params.table_file, &snapshot.data, INDICATORS, params.year)?;
    println!("Wrote {}", meta.display());
    let log = report::write_changelog(&params.table_file, &outcome, params.year)?;
    println!("Wrote {}", log.display());

    Ok(())
}

/// Cached snapshot if present and allowed, otherwise a fresh fetch.
/// `--cache-only` with no snapshot is fatal by design.
fn acquire_snapshot(params: &Params) -> Result<Snapshot> {
    if !params.refresh {
        if let Some(snapshot) = cache::load(&params.cache_dir, params.year)? {
            println!("Using cached data from {} (add --refresh to re-fetch)", snapshot.fetched_at);
            return Ok(snapshot);
        }
    }

    if params.cache_only {
        return Err(PipelineError::CacheMissing {
            year: params.year,
            path: cache::cache_path(&params.cache_dir, params.year),
        }
        .into());
    }

    println!("Fetching from World Bank API...\n");
    let client = WbClient::new()?;
    let data = fetch::fetch_all(&client, INDICATORS, params.year, params.tolerance);
    let snapshot = Snapshot::new(data, params.year);
    let path = cache::save(&params.cache_dir, &snapshot)?;
    info!("cache saved: {}", path.display());
    Ok(snapshot)
}

fn preview_changes(changes: &[merge::Change]) {
    if changes.is_empty() {
        return;
    }
    println!("\nChanges (first {}):", CHANGE_PREVIEW_LIMIT.min(changes.len()));
    for ch in changes.iter().take(CHANGE_PREVIEW_LIMIT) {
        println!(
            "  {:6} | {:20} | {:>12} -> {:<12} (yr {})",
            ch.region, ch.field, ch.old, ch.new, ch.year
        );
    }
    if changes.len() > CHANGE_PREVIEW_LIMIT {
        println!("  ... and {} more", changes.len() - CHANGE_PREVIEW_LIMIT);
    }
}
