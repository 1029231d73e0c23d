// src/config/indicators.rs

//! Indicator definitions: display metadata plus the field-index / source /
//! unit-conversion map for the pipeline.
//!
//! This is explicit immutable configuration. Components that need it take
//! it as a parameter (`&[Indicator]`), so tests can substitute their own
//! tables; nothing in `fetch` or `merge` reaches for this module directly.

use crate::transform::{Rounding, Scale};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Basic,
    Economic,
    Education,
    Health,
    Environment,
    Demographic,
}

/// Where an indicator's values come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Provenance {
    /// Fetchable: a World Bank indicator code.
    WorldBank { code: &'static str },
    /// Deliberately excluded from the pipeline; the provider is the reason.
    External { provider: &'static str },
}

#[derive(Clone, Copy, Debug)]
pub struct Indicator {
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub color: &'static str,
    pub category: Category,
    /// Column in the region table schema (see `schema::FIELDS`).
    pub field: usize,
    pub source: Provenance,
    pub scale: Scale,
    pub rounding: Rounding,
}

impl Indicator {
    pub fn wb_code(&self) -> Option<&'static str> {
        match self.source {
            Provenance::WorldBank { code } => Some(code),
            Provenance::External { .. } => None,
        }
    }

    pub fn excluded_reason(&self) -> Option<&'static str> {
        match self.source {
            Provenance::WorldBank { .. } => None,
            Provenance::External { provider } => Some(provider),
        }
    }
}

use Category::*;
use Provenance::*;
use Rounding::*;
use Scale::*;

/// Full indicator table, in schema field order.
///
/// Only map a field to a World Bank code where our definition matches the
/// WB definition; anything sourced elsewhere is `External` and the merge
/// never touches it.
pub const INDICATORS: &[Indicator] = &[
    Indicator { key: "population",         label: "Population",      unit: "M",     color: "#2563eb", category: Basic,       field: 5,  source: WorldBank { code: "SP.POP.TOTL" },       scale: Div1e6, rounding: Tenth },
    Indicator { key: "gdpBillions",        label: "GDP",             unit: "B$",    color: "#16a34a", category: Economic,    field: 6,  source: WorldBank { code: "NY.GDP.MKTP.CD" },    scale: Div1e9, rounding: Whole },
    Indicator { key: "gdpPerCapita",       label: "GDP/capita",      unit: "$",     color: "#15803d", category: Economic,    field: 7,  source: WorldBank { code: "NY.GDP.PCAP.CD" },    scale: Direct, rounding: Whole },
    Indicator { key: "area",               label: "Area",            unit: "k km²", color: "#a16207", category: Basic,       field: 8,  source: WorldBank { code: "AG.LND.TOTL.K2" },    scale: Div1e3, rounding: Whole },
    Indicator { key: "urbanization",       label: "Urbanization",    unit: "%",     color: "#6b7280", category: Basic,       field: 9,  source: WorldBank { code: "SP.URB.TOTL.IN.ZS" }, scale: Direct, rounding: Tenth },
    Indicator { key: "gini",               label: "Gini",            unit: "",      color: "#9333ea", category: Economic,    field: 10, source: WorldBank { code: "SI.POV.GINI" },       scale: Direct, rounding: Tenth },
    Indicator { key: "hdi",                label: "HDI",             unit: "",      color: "#0891b2", category: Basic,       field: 11, source: External { provider: "UNDP" },           scale: Direct, rounding: Tenth },
    Indicator { key: "internetPenetration", label: "Internet %",     unit: "%",     color: "#0ea5e9", category: Basic,       field: 12, source: WorldBank { code: "IT.NET.USER.ZS" },    scale: Direct, rounding: Tenth },
    Indicator { key: "lifeExpectancy",     label: "Life Expectancy", unit: "yrs",   color: "#dc2626", category: Health,      field: 13, source: WorldBank { code: "SP.DYN.LE00.IN" },    scale: Direct, rounding: Tenth },
    Indicator { key: "co2PerCapita",       label: "CO2/capita",      unit: "t",     color: "#4b5563", category: Environment, field: 14, source: WorldBank { code: "EN.ATM.CO2E.PC" },    scale: Direct, rounding: Tenth },
    Indicator { key: "universities",       label: "Universities",    unit: "",      color: "#7c3aed", category: Education,   field: 15, source: External { provider: "manual count" },   scale: Direct, rounding: Whole },
    Indicator { key: "literacy",           label: "Literacy %",      unit: "%",     color: "#ca8a04", category: Education,   field: 16, source: WorldBank { code: "SE.ADT.LITR.ZS" },    scale: Direct, rounding: Tenth },
    Indicator { key: "pisaScore",          label: "PISA Score",      unit: "",      color: "#be185d", category: Education,   field: 17, source: External { provider: "OECD" },           scale: Direct, rounding: Whole },
    Indicator { key: "doctors",            label: "Doctors /1000",   unit: "/1000", color: "#db2777", category: Health,      field: 18, source: WorldBank { code: "SH.MED.PHYS.ZS" },    scale: Direct, rounding: Tenth },
    Indicator { key: "hospitalBeds",       label: "Hospital Beds",   unit: "/1000", color: "#e11d48", category: Health,      field: 19, source: WorldBank { code: "SH.MED.BEDS.ZS" },    scale: Direct, rounding: Tenth },
    Indicator { key: "healthExpenditure",  label: "Health % GDP",    unit: "%",     color: "#f43f5e", category: Health,      field: 20, source: WorldBank { code: "SH.XPD.CHEX.GD.ZS" }, scale: Direct, rounding: Tenth },
    Indicator { key: "manufacturing",      label: "Manufacturing %", unit: "%",     color: "#78716c", category: Economic,    field: 21, source: WorldBank { code: "NV.IND.MANF.ZS" },    scale: Direct, rounding: Tenth },
    Indicator { key: "exports",            label: "Exports",         unit: "B$",    color: "#0d9488", category: Economic,    field: 22, source: WorldBank { code: "NE.EXP.GNFS.CD" },    scale: Div1e9, rounding: Whole },
    Indicator { key: "fdiInflow",          label: "FDI Inflow",      unit: "B$",    color: "#0f766e", category: Economic,    field: 23, source: WorldBank { code: "BX.KLT.DINV.CD.WD" }, scale: Div1e9, rounding: Whole },
    Indicator { key: "forestCover",        label: "Forest %",        unit: "%",     color: "#166534", category: Environment, field: 24, source: WorldBank { code: "AG.LND.FRST.ZS" },    scale: Direct, rounding: Tenth },
    Indicator { key: "pm25",               label: "PM2.5",           unit: "µg/m³", color: "#525252", category: Environment, field: 25, source: WorldBank { code: "EN.ATM.PM25.MC.M3" }, scale: Direct, rounding: Tenth },
    Indicator { key: "renewableEnergy",    label: "Renewable %",     unit: "%",     color: "#059669", category: Environment, field: 26, source: WorldBank { code: "EG.FEC.RNEW.ZS" },    scale: Direct, rounding: Tenth },
    Indicator { key: "unemployment",       label: "Unemployment %",  unit: "%",     color: "#dc2626", category: Economic,    field: 27, source: WorldBank { code: "SL.UEM.TOTL.ZS" },    scale: Direct, rounding: Tenth },
    Indicator { key: "inflation",          label: "Inflation %",     unit: "%",     color: "#b91c1c", category: Economic,    field: 28, source: WorldBank { code: "FP.CPI.TOTL.ZG" },    scale: Direct, rounding: Tenth },
    Indicator { key: "rdExpenditure",      label: "R&D % GDP",       unit: "%",     color: "#7c3aed", category: Economic,    field: 29, source: WorldBank { code: "GB.XPD.RSDV.GD.ZS" }, scale: Direct, rounding: Tenth },
    Indicator { key: "militarySpending",   label: "Military % GDP",  unit: "%",     color: "#374151", category: Economic,    field: 30, source: WorldBank { code: "MS.MIL.XPND.GD.ZS" }, scale: Direct, rounding: Tenth },
    Indicator { key: "populationDensity",  label: "Pop. Density",    unit: "/km²",  color: "#d97706", category: Demographic, field: 31, source: WorldBank { code: "EN.POP.DNST" },       scale: Direct, rounding: Whole },
    Indicator { key: "medianAge",          label: "Median Age",      unit: "yrs",   color: "#9333ea", category: Demographic, field: 32, source: External { provider: "UN" },             scale: Direct, rounding: Tenth },
    Indicator { key: "birthRate",          label: "Birth Rate",      unit: "‰",     color: "#2563eb", category: Demographic, field: 33, source: WorldBank { code: "SP.DYN.CBRT.IN" },    scale: Direct, rounding: Tenth },
    Indicator { key: "deathRate",          label: "Death Rate",      unit: "‰",     color: "#475569", category: Demographic, field: 34, source: WorldBank { code: "SP.DYN.CDRT.IN" },    scale: Direct, rounding: Tenth },
];

/// Indicators the pipeline actually fetches.
pub fn fetchable(defs: &[Indicator]) -> impl Iterator<Item = &Indicator> {
    defs.iter().filter(|d| d.wb_code().is_some())
}

/// Look up one definition by key.
pub fn find<'a>(defs: &'a [Indicator], key: &str) -> Option<&'a Indicator> {
    defs.iter().find(|d| d.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    #[test]
    fn field_indices_are_within_schema_and_unique() {
        let mut seen = [false; schema::ARITY];
        for d in INDICATORS {
            assert!(d.field < schema::ARITY, "{} out of range", d.key);
            assert!(d.field >= 5, "{} points at an identity column", d.key);
            assert!(!seen[d.field], "duplicate field index {}", d.field);
            seen[d.field] = true;
        }
    }

    #[test]
    fn excluded_indicators_carry_a_reason() {
        let excluded: Vec<_> = INDICATORS.iter().filter(|d| d.wb_code().is_none()).collect();
        assert_eq!(excluded.len(), 4);
        for d in excluded {
            assert!(d.excluded_reason().is_some());
        }
    }

    #[test]
    fn keys_are_unique() {
        for (i, a) in INDICATORS.iter().enumerate() {
            for b in &INDICATORS[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }
}
