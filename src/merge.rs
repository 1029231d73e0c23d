// src/merge.rs

//! Merge/Update Engine.
//!
//! Matches fetched observations to table rows by region id → ISO3, writes
//! transformed values into country rows, and records an ordered changelog.
//! Mutates the in-memory document only; the runner owns all file writes.

use log::warn;
use serde::Serialize;

use crate::config::indicators::{self, Indicator};
use crate::config::regions::iso3_for;
use crate::error::{PipelineError, Result};
use crate::fetch::FetchSet;
use crate::table::TableDocument;
use crate::transform::{display_value, format_display};

/// Ratio beyond which a field update is rejected as a probable unit
/// mismatch. Coarse on purpose: better to drop one real change than to
/// silently corrupt the table by three orders of magnitude.
pub const JUMP_GUARD_RATIO: f64 = 100.0;

/// One audited field-level change.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Change {
    pub region: String,
    pub field: String,
    pub idx: usize,
    pub old: String,
    pub new: String,
    pub year: i32,
}

#[derive(Debug, Default)]
pub struct MergeOutcome {
    pub changes: Vec<Change>,
    pub updated_regions: usize,
    /// Field updates rejected by the jump guard.
    pub rejected: usize,
}

/// Apply `data` to every country row of `doc`.
///
/// Every indicator key present in `data` must have a definition in `defs`;
/// an unknown key is a hard error, checked before any row is touched.
/// Regions without an ISO3 mapping are skipped, as are (region, indicator)
/// pairs with no observation.
pub fn merge(
    doc: &mut TableDocument,
    data: &FetchSet,
    defs: &[Indicator],
    iso3_map: &[(&str, &str)],
    target_year: i32,
) -> Result<MergeOutcome> {
    for key in data.keys() {
        if indicators::find(defs, key).is_none() {
            return Err(PipelineError::UnknownIndicator(key.clone()));
        }
    }

    // Definition order keeps the changelog stable per region.
    let active: Vec<&Indicator> = defs.iter().filter(|d| data.contains_key(d.key)).collect();

    let mut out = MergeOutcome::default();

    for region in doc.regions_mut() {
        if !region.is_country() {
            continue;
        }
        let id = region.id().to_string();
        let Some(iso3) = iso3_for(iso3_map, &id) else { continue };

        let mut touched = false;
        for def in &active {
            let Some(obs) = data[def.key].get(iso3) else { continue };

            let new_val = display_value(obs.value, def.scale, def.rounding);
            let new_str = format_display(new_val, def.rounding);
            let old_str = region.field(def.field).to_string();

            if old_str == new_str {
                continue;
            }

            if let Ok(old_num) = old_str.parse::<f64>() {
                // A stored literal zero is a placeholder; a ratio against it
                // is noise, so zero behaves like an empty field and accepts.
                if old_num != 0.0 && (new_val / old_num).abs() > JUMP_GUARD_RATIO {
                    warn!(
                        "skip {}.{}: {} -> {} (>{}x change, likely unit mismatch)",
                        id, def.key, old_str, new_str, JUMP_GUARD_RATIO
                    );
                    out.rejected += 1;
                    continue;
                }
            }

            region.set_field(def.field, new_str.clone());
            out.changes.push(Change {
                region: id.clone(),
                field: def.key.to_string(),
                idx: def.field,
                old: old_str,
                new: new_str,
                year: obs.year,
            });
            touched = true;
        }

        if touched {
            out.updated_regions += 1;
        }
    }

    Ok(out)
}
