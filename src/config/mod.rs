// src/config/mod.rs

pub mod indicators;
pub mod regions;

pub use indicators::{Category, Indicator, Provenance, INDICATORS};
pub use regions::REGION_ISO3;
