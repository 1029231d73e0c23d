// src/fetch.rs

//! Remote Indicator Fetcher.
//!
//! Failure semantics: nothing here is fatal. A transport or decode error
//! on the first page switches to the most-recent-N fallback query; on any
//! later page it keeps the partial accumulation. Both strategies failing
//! yields an empty result set, which the report surfaces as zero coverage.

use std::collections::BTreeMap;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::indicators::Indicator;
use crate::net::{DateFilter, WbClient};

/// One retained observation for a (indicator, region) pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub value: f64,
    pub year: i32,
}

/// ISO3 code → retained observation.
pub type IndicatorResults = BTreeMap<String, Observation>;

/// Indicator key → results. The in-memory form of a cache snapshot's data.
pub type FetchSet = BTreeMap<String, IndicatorResults>;

/// Retain the observation nearest the target year; exact ties keep the
/// first one encountered.
fn keep_nearest(results: &mut IndicatorResults, iso3: &str, value: f64, year: i32, target: i32) {
    match results.get(iso3) {
        Some(prev) if (year - target).abs() >= (prev.year - target).abs() => {}
        _ => {
            results.insert(iso3.to_string(), Observation { value, year });
        }
    }
}

/// Fold one raw record into the accumulation. Records with no value, no
/// region code, or an unparsable date are dropped; `window` (fallback mode)
/// additionally drops observations outside the tolerance.
fn consider(
    results: &mut IndicatorResults,
    iso3: &str,
    value: Option<f64>,
    date: &str,
    target: i32,
    window: Option<i32>,
) {
    let Some(value) = value else { return };
    if iso3.is_empty() {
        return;
    }
    let Ok(year) = date.parse::<i32>() else { return };
    if let Some(tolerance) = window {
        if (year - target).abs() > tolerance {
            return;
        }
    }
    keep_nearest(results, iso3, value, year, target);
}

/// Fetch one indicator for all countries within `target ± tolerance`.
pub fn fetch_indicator(client: &WbClient, code: &str, target: i32, tolerance: i32) -> IndicatorResults {
    let filter = DateFilter::Window { start: target - tolerance, end: target + tolerance };

    let mut results = IndicatorResults::new();
    let mut page = 1u32;
    let mut total_pages = 1u32;

    while page <= total_pages {
        match client.get_page(code, &filter, page) {
            Ok((meta, records)) => {
                if records.is_empty() {
                    break;
                }
                total_pages = meta.pages.max(1);
                for r in &records {
                    consider(&mut results, &r.countryiso3code, r.value, &r.date, target, None);
                }
                page += 1;
                if page <= total_pages {
                    client.pause();
                }
            }
            Err(e) if page == 1 => {
                warn!("{code}: first page failed ({e}); falling back to most-recent query");
                return fetch_most_recent(client, code, target, tolerance);
            }
            Err(e) => {
                warn!("{code}: page {page} failed ({e}); keeping {} partial results", results.len());
                break;
            }
        }
    }

    results
}

/// Fallback strategy: ask for the most recent N observations and filter
/// locally to the tolerance window.
fn fetch_most_recent(client: &WbClient, code: &str, target: i32, tolerance: i32) -> IndicatorResults {
    let filter = DateFilter::most_recent();

    let mut results = IndicatorResults::new();
    let mut page = 1u32;
    let mut total_pages = 1u32;

    while page <= total_pages {
        match client.get_page(code, &filter, page) {
            Ok((meta, records)) => {
                if records.is_empty() {
                    break;
                }
                total_pages = meta.pages.max(1);
                for r in &records {
                    consider(&mut results, &r.countryiso3code, r.value, &r.date, target, Some(tolerance));
                }
                page += 1;
                if page <= total_pages {
                    client.pause();
                }
            }
            Err(e) => {
                warn!("{code}: fallback page {page} failed ({e})");
                break;
            }
        }
    }

    results
}

/// Fetch every WB-backed indicator in `defs`, with one progress line each.
/// External indicators are skipped here and reported as excluded.
pub fn fetch_all(client: &WbClient, defs: &[Indicator], target: i32, tolerance: i32) -> FetchSet {
    let wanted: Vec<(&Indicator, &str)> =
        defs.iter().filter_map(|d| d.wb_code().map(|c| (d, c))).collect();
    let total = wanted.len();

    let mut set = FetchSet::new();
    for (i, (def, code)) in wanted.into_iter().enumerate() {
        println!("  [{}/{}] {} ({})...", i + 1, total, def.key, code);
        let results = fetch_indicator(client, code, target, tolerance);
        println!("      {} countries", results.len());
        set.insert(def.key.to_string(), results);
    }
    set
}

/* ---------------- tests ---------------- */
