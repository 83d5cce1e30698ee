mod activity;
mod summary;

pub use activity::ActivityAnalyzer;
pub use summary::SummaryAnalyzer;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::log::Dataset;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: SummaryStats,
    pub activity: ActivityStats,
}

/// Headline productivity metrics for the analyzed period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_requests: usize,
    pub date_range: Option<(NaiveDateTime, NaiveDateTime)>,
    /// Number of distinct calendar days with at least one request.
    pub active_days: usize,
    pub average_requests_per_day: f64,
    pub peak_day: Option<NaiveDate>,
    pub peak_day_requests: usize,
    pub unique_targets: usize,
}

/// Date-, tool-, and endpoint-bucketed request counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityStats {
    /// Per-day totals keyed by calendar date, ascending.
    pub daily: BTreeMap<NaiveDate, DailyActivity>,
    /// (tool, request count), descending by count.
    pub tools: Vec<(String, usize)>,
    /// (url, request count), descending by count.
    pub endpoints: Vec<(String, usize)>,
    /// (target host, request count), descending by count.
    pub targets: Vec<(String, usize)>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyActivity {
    pub total: usize,
    pub tools: BTreeMap<String, usize>,
}

pub trait Analyzer {
    type Output;

    fn analyze(&self, dataset: &Dataset) -> crate::Result<Self::Output>;
}
