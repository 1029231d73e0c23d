// src/lib.rs

pub mod cli;
pub mod config;
pub mod params;
pub mod schema;

pub mod cache;
pub mod error;
pub mod fetch;
pub mod merge;
pub mod net;
pub mod report;
pub mod runner;
pub mod table;
pub mod transform;
