use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use super::{ActivityStats, Analyzer, DailyActivity};
use crate::Result;
use crate::log::Dataset;

pub struct ActivityAnalyzer;

impl Analyzer for ActivityAnalyzer {
    type Output = ActivityStats;

    fn analyze(&self, dataset: &Dataset) -> Result<Self::Output> {
        tracing::debug!("Analyzing activity breakdowns");

        let mut daily: BTreeMap<NaiveDate, DailyActivity> = BTreeMap::new();
        let mut tools: HashMap<String, usize> = HashMap::new();
        let mut endpoints: HashMap<String, usize> = HashMap::new();
        let mut targets: HashMap<String, usize> = HashMap::new();

        for record in dataset {
            let day = daily.entry(record.timestamp.date()).or_default();
            day.total += 1;
            *day.tools.entry(record.tool.clone()).or_default() += 1;

            *tools.entry(record.tool.clone()).or_default() += 1;
            *endpoints.entry(record.url.clone()).or_default() += 1;
            if !record.target.is_empty() {
                *targets.entry(record.target.clone()).or_default() += 1;
            }
        }

        tracing::info!(
            "Activity analysis complete: {} day(s), {} tool(s), {} endpoint(s)",
            daily.len(),
            tools.len(),
            endpoints.len()
        );

        Ok(ActivityStats {
            daily,
            tools: sorted_by_count(tools),
            endpoints: sorted_by_count(endpoints),
            targets: sorted_by_count(targets),
        })
    }
}

/// Descending by count, ties broken by name for stable output.
fn sorted_by_count(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}
