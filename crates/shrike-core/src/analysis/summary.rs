use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;

use super::{Analyzer, SummaryStats};
use crate::Result;
use crate::log::Dataset;

pub struct SummaryAnalyzer;

impl Analyzer for SummaryAnalyzer {
    type Output = SummaryStats;

    fn analyze(&self, dataset: &Dataset) -> Result<Self::Output> {
        tracing::debug!("Analyzing summary statistics");

        if dataset.is_empty() {
            return Ok(SummaryStats {
                total_requests: 0,
                date_range: None,
                active_days: 0,
                average_requests_per_day: 0.0,
                peak_day: None,
                peak_day_requests: 0,
                unique_targets: 0,
            });
        }

        let total_requests = dataset.len();

        let start = dataset.iter().map(|r| r.timestamp).min();
        let end = dataset.iter().map(|r| r.timestamp).max();
        let date_range = start.zip(end);

        // Per-day counts; BTreeMap so the peak-day tie-break is the earliest
        // date, deterministically.
        let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for record in dataset {
            *per_day.entry(record.timestamp.date()).or_default() += 1;
        }

        let active_days = per_day.len();
        let average_requests_per_day = total_requests as f64 / active_days as f64;

        let mut peak_day = None;
        let mut peak_day_requests = 0;
        for (day, count) in &per_day {
            if *count > peak_day_requests {
                peak_day = Some(*day);
                peak_day_requests = *count;
            }
        }

        let unique_targets = dataset
            .iter()
            .filter(|r| !r.target.is_empty())
            .map(|r| r.target.as_str())
            .collect::<HashSet<_>>()
            .len();

        tracing::info!(
            "Summary analysis complete: {} requests over {} day(s)",
            total_requests,
            active_days
        );

        Ok(SummaryStats {
            total_requests,
            date_range,
            active_days,
            average_requests_per_day,
            peak_day,
            peak_day_requests,
            unique_targets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::Record;
    use chrono::NaiveDate;

    fn record(day: u32, hour: u32, target: &str) -> Record {
        Record {
            timestamp: NaiveDate::from_ymd_opt(2025, 7, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            url: format!("https://{}/x", target),
            target: target.to_string(),
            tool: "Proxy".to_string(),
            method: "GET".to_string(),
            status: Some(200),
            extension: String::new(),
            source_file: "a.csv".to_string(),
        }
    }

    #[test]
    fn test_summary_counts_and_peak_day() {
        let dataset = vec![
            record(21, 9, "a.test"),
            record(22, 10, "a.test"),
            record(22, 11, "b.test"),
            record(22, 12, "b.test"),
            record(23, 9, "a.test"),
        ];

        let stats = SummaryAnalyzer.analyze(&dataset).unwrap();

        assert_eq!(stats.total_requests, 5);
        assert_eq!(stats.active_days, 3);
        assert_eq!(stats.peak_day, NaiveDate::from_ymd_opt(2025, 7, 22));
        assert_eq!(stats.peak_day_requests, 3);
        assert_eq!(stats.unique_targets, 2);
        assert!((stats.average_requests_per_day - 5.0 / 3.0).abs() < 1e-9);

        let (start, end) = stats.date_range.unwrap();
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2025, 7, 21).unwrap());
        assert_eq!(end.date(), NaiveDate::from_ymd_opt(2025, 7, 23).unwrap());
    }

    #[test]
    fn test_empty_dataset_yields_zeroes() {
        let stats = SummaryAnalyzer.analyze(&vec![]).unwrap();

        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.active_days, 0);
        assert_eq!(stats.date_range, None);
        assert_eq!(stats.peak_day, None);
    }

    #[test]
    fn test_empty_target_not_counted_as_unique() {
        let mut r = record(22, 10, "a.test");
        r.target = String::new();
        let stats = SummaryAnalyzer.analyze(&vec![r]).unwrap();
        assert_eq!(stats.unique_targets, 0);
    }
}
