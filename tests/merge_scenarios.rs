// tests/merge_scenarios.rs
//
// Merge engine behavior against a small in-memory table: accept, no-op,
// jump-guard rejection, and the skip rules for unmapped regions.
//
use std::path::Path;

use a2a_sync::config::{INDICATORS, REGION_ISO3};
use a2a_sync::error::PipelineError;
use a2a_sync::fetch::{FetchSet, IndicatorResults, Observation};
use a2a_sync::merge::merge;
use a2a_sync::schema;
use a2a_sync::table::TableDocument;

fn row(id: &str, name: &str, kind: &str, fields: &[(usize, &str)]) -> String {
    let mut f = vec![String::new(); schema::ARITY];
    f[0] = id.into();
    f[1] = name.into();
    f[2] = kind.into();
    f[4] = id.into(); // flag key mirrors the id in the real table
    for (i, v) in fields {
        f[*i] = (*v).into();
    }
    f.join(",")
}

fn document(rows: &[String]) -> TableDocument {
    let text = format!(
        "const RAW = `\n// Field order: ...\n{}\n`.trim();\n",
        rows.join("\n")
    );
    TableDocument::parse(&text, Path::new("data.js")).unwrap()
}

fn one_indicator(key: &str, obs: &[(&str, f64, i32)]) -> FetchSet {
    let results: IndicatorResults = obs
        .iter()
        .map(|(iso, v, y)| (iso.to_string(), Observation { value: *v, year: *y }))
        .collect();
    let mut set = FetchSet::new();
    set.insert(key.to_string(), results);
    set
}

#[test]
fn equal_formatted_value_is_a_noop() {
    // GDP 27.36T ÷ 1e9 formats to "27360", which the table already holds.
    let mut doc = document(&[row("us", "United States", "country", &[(5, "335.0"), (6, "27360")])]);
    let data = one_indicator("gdpBillions", &[("USA", 27_360_000_000_000.0, 2023)]);

    let out = merge(&mut doc, &data, INDICATORS, REGION_ISO3, 2023).unwrap();
    assert!(out.changes.is_empty());
    assert_eq!(out.updated_regions, 0);
    assert_eq!(doc.regions().next().unwrap().field(6), "27360");
}

#[test]
fn population_update_is_recorded_in_the_changelog() {
    let mut doc = document(&[row("us", "United States", "country", &[(5, "335.0")])]);
    let data = one_indicator("population", &[("USA", 340_100_000.0, 2023)]);

    let out = merge(&mut doc, &data, INDICATORS, REGION_ISO3, 2023).unwrap();
    assert_eq!(out.updated_regions, 1);
    assert_eq!(out.changes.len(), 1);
    let ch = &out.changes[0];
    assert_eq!((ch.region.as_str(), ch.field.as_str()), ("us", "population"));
    assert_eq!((ch.old.as_str(), ch.new.as_str(), ch.year), ("335.0", "340.1", 2023));
    assert_eq!(doc.regions().next().unwrap().field(5), "340.1");
}

#[test]
fn hundredfold_jump_is_rejected() {
    // 50.25B people ÷ 1e6 = 50250 — a 150x jump over 335.0.
    let mut doc = document(&[row("us", "United States", "country", &[(5, "335.0")])]);
    let data = one_indicator("population", &[("USA", 50_250_000_000.0, 2023)]);

    let out = merge(&mut doc, &data, INDICATORS, REGION_ISO3, 2023).unwrap();
    assert!(out.changes.is_empty());
    assert_eq!(out.rejected, 1);
    assert_eq!(doc.regions().next().unwrap().field(5), "335.0");
}

#[test]
fn empty_field_accepts_unconditionally() {
    let mut doc = document(&[row("us", "United States", "country", &[])]);
    let data = one_indicator("population", &[("USA", 340_100_000.0, 2023)]);

    let out = merge(&mut doc, &data, INDICATORS, REGION_ISO3, 2023).unwrap();
    assert_eq!(out.changes.len(), 1);
    assert_eq!(out.changes[0].old, "");
    assert_eq!(doc.regions().next().unwrap().field(5), "340.1");
}

#[test]
fn stored_zero_behaves_like_empty_and_accepts() {
    // Ratio against a literal zero is noise; the guard does not apply.
    let mut doc = document(&[row("us", "United States", "country", &[(5, "0")])]);
    let data = one_indicator("population", &[("USA", 340_100_000.0, 2023)]);

    let out = merge(&mut doc, &data, INDICATORS, REGION_ISO3, 2023).unwrap();
    assert_eq!(out.changes.len(), 1);
    assert_eq!(out.rejected, 0);
    assert_eq!(doc.regions().next().unwrap().field(5), "340.1");
}

#[test]
fn subnational_and_unmapped_regions_are_skipped() {
    let mut doc = document(&[
        row("us-ca", "California", "state", &[(5, "39.0")]),
        row("xx", "Atlantis", "country", &[(5, "1.0")]),
    ]);
    let data = one_indicator("population", &[("USA", 340_100_000.0, 2023)]);

    let out = merge(&mut doc, &data, INDICATORS, REGION_ISO3, 2023).unwrap();
    assert!(out.changes.is_empty());
    assert_eq!(out.updated_regions, 0);
}

#[test]
fn missing_observation_for_a_country_is_skipped() {
    let mut doc = document(&[row("de", "Germany", "country", &[(5, "84.5")])]);
    let data = one_indicator("population", &[("USA", 340_100_000.0, 2023)]);

    let out = merge(&mut doc, &data, INDICATORS, REGION_ISO3, 2023).unwrap();
    assert!(out.changes.is_empty());
    assert_eq!(doc.regions().next().unwrap().field(5), "84.5");
}

#[test]
fn unknown_indicator_key_is_a_hard_error() {
    let mut doc = document(&[row("us", "United States", "country", &[])]);
    let data = one_indicator("definitelyNotAnIndicator", &[("USA", 1.0, 2023)]);

    let err = merge(&mut doc, &data, INDICATORS, REGION_ISO3, 2023).unwrap_err();
    assert!(matches!(err, PipelineError::UnknownIndicator(k) if k == "definitelyNotAnIndicator"));
    // Nothing was touched.
    assert!(doc.regions().next().unwrap().field(5).is_empty());
}

#[test]
fn changes_keep_region_then_definition_order() {
    let mut doc = document(&[
        row("cn", "China", "country", &[]),
        row("us", "United States", "country", &[]),
    ]);
    let mut data = one_indicator("population", &[("USA", 340_100_000.0, 2023), ("CHN", 1_410_000_000.0, 2023)]);
    data.extend(one_indicator("gdpBillions", &[("USA", 27_360_000_000_000.0, 2023)]));

    let out = merge(&mut doc, &data, INDICATORS, REGION_ISO3, 2023).unwrap();
    let order: Vec<(&str, &str)> = out.changes.iter().map(|c| (c.region.as_str(), c.field.as_str())).collect();
    assert_eq!(
        order,
        vec![("cn", "population"), ("us", "population"), ("us", "gdpBillions")]
    );
}
