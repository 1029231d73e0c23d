// tests/fetch_fallback.rs
//
// Degradation path: with an unreachable endpoint, the window query fails
// on its first page, the most-recent fallback fails too, and the result
// is an empty mapping — reported as zero coverage, never an error.
//
use a2a_sync::config::{Indicator, INDICATORS};
use a2a_sync::fetch::{fetch_all, fetch_indicator};
use a2a_sync::net::WbClient;
use a2a_sync::report::coverage;

#[test]
fn unreachable_endpoint_degrades_to_empty_results() {
    // Nothing listens on port 9 (discard); connects are refused locally.
    let client = WbClient::with_base("http://127.0.0.1:9").unwrap();
    let results = fetch_indicator(&client, "SP.POP.TOTL", 2023, 2);
    assert!(results.is_empty());

    let cov = coverage(&results, 2023);
    assert_eq!(cov.total, 0);
    assert_eq!(cov.on_target, 0);
    assert_eq!(cov.primary_year, None);
}

#[test]
fn externally_sourced_indicators_are_never_requested() {
    // Every definition here is External, so no request is ever issued and
    // the unreachable endpoint is never hit.
    let client = WbClient::with_base("http://127.0.0.1:9").unwrap();
    let external: Vec<Indicator> = INDICATORS
        .iter()
        .filter(|d| d.wb_code().is_none())
        .cloned()
        .collect();
    assert!(!external.is_empty());

    let set = fetch_all(&client, &external, 2023, 2);
    assert!(set.is_empty());
}
