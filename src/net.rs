// src/net.rs

//! Thin wrapper around the World Bank v2 statistical endpoint.
//!
//! Responses are a two-element JSON array: pagination metadata, then the
//! observation records. Both are decoded in one shot; a payload that does
//! not match (error envelopes are a one-element array) surfaces as a
//! decode error the fetcher treats as a non-fatal page failure.

use std::{thread, time::Duration};

use serde::Deserialize;

use crate::error::Result;
use crate::params::{API_BASE, HTTP_TIMEOUT_SECS, MRV_COUNT, PAGE_DELAY_MS, PAGE_SIZE, USER_AGENT};

/// Date selection for one indicator query.
#[derive(Clone, Copy, Debug)]
pub enum DateFilter {
    /// `date=start:end` window around the target year.
    Window { start: i32, end: i32 },
    /// `mrv=N`: most recent N observations, regardless of window.
    MostRecent(u32),
}

impl DateFilter {
    fn query(&self) -> String {
        match self {
            DateFilter::Window { start, end } => format!("date={}:{}", start, end),
            DateFilter::MostRecent(n) => format!("mrv={}", n),
        }
    }

    pub fn most_recent() -> Self {
        DateFilter::MostRecent(MRV_COUNT)
    }
}

#[derive(Debug, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct WbRecord {
    #[serde(default)]
    pub countryiso3code: String,
    pub value: Option<f64>,
    #[serde(default)]
    pub date: String,
}

pub struct WbClient {
    base: String,
    http: reqwest::blocking::Client,
    page_delay: Duration,
}

impl WbClient {
    pub fn new() -> Result<Self> {
        Self::with_base(API_BASE)
    }

    /// Custom endpoint base, for tests and mirrors.
    pub fn with_base(base: &str) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            http,
            page_delay: Duration::from_millis(PAGE_DELAY_MS),
        })
    }

    /// GET one page of one indicator for all countries.
    pub fn get_page(&self, code: &str, filter: &DateFilter, page: u32) -> Result<(PageInfo, Vec<WbRecord>)> {
        let url = format!(
            "{}/country/all/indicator/{}?{}&format=json&per_page={}&page={}",
            self.base,
            code,
            filter.query(),
            PAGE_SIZE,
            page
        );
        log::debug!("GET {url}");
        let resp = self.http.get(&url).send()?.error_for_status()?;
        let (meta, records): (PageInfo, Option<Vec<WbRecord>>) = resp.json()?;
        Ok((meta, records.unwrap_or_default()))
    }

    /// Courtesy pause between page requests.
    pub fn pause(&self) {
        if !self.page_delay.is_zero() {
            thread::sleep(self.page_delay);
        }
    }
}
