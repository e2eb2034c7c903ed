//! Duration statistics over correlated patient rows.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::config::CorrelationConfig;
use crate::traits::PatientEvent;

/// Day-count thresholds used by the summary.
pub mod thresholds {
    /// Days per year, as used by the historical reports (no leap handling).
    pub const DAYS_PER_YEAR: i64 = 365;

    /// Five years in days (1825) - the fallback inclusion gate and the first
    /// exceedance threshold.
    pub const FIVE_YEARS: i64 = 5 * DAYS_PER_YEAR;

    /// Ten years in days (3650) - the second exceedance threshold.
    pub const TEN_YEARS: i64 = 10 * DAYS_PER_YEAR;
}

/// Aggregates per-patient interval durations.
///
/// One [`record`](DurationStatistics::record) call per processed row; a
/// sample is admitted either directly (a nearest event was found) or via the
/// long-gap fallback (no nearest event, but the patient's last examination
/// lies at least the configured gap after the reference date). Short gaps
/// without a subsequent dental event carry no information and contribute
/// nothing.
///
/// Samples live in a value-deduplicating set: two rows with numerically
/// identical durations collapse to one contribution. That matches the
/// historical reports this pipeline reproduces; switching to multiset
/// semantics would change every published percentage and is deliberately not
/// done here.
#[derive(Debug, Clone)]
pub struct DurationStatistics {
    samples: BTreeSet<i64>,
    fallback_gap_days: i64,
}

impl Default for DurationStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl DurationStatistics {
    /// Creates an aggregator with the default fallback gap (1825 days).
    pub fn new() -> Self {
        Self {
            samples: BTreeSet::new(),
            fallback_gap_days: thresholds::FIVE_YEARS,
        }
    }

    /// Creates an aggregator using the run configuration's fallback gap.
    pub fn with_config(config: &CorrelationConfig) -> Self {
        Self {
            samples: BTreeSet::new(),
            fallback_gap_days: config.fallback_gap_days,
        }
    }

    /// Records one processed row.
    ///
    /// - With a nearest event: the distance from the reference date to the
    ///   event date is included unconditionally.
    /// - Without one, but with a last-examination date at least the fallback
    ///   gap after the reference date: that gap is included.
    /// - Otherwise the row contributes nothing.
    pub fn record(
        &mut self,
        reference_date: NaiveDate,
        nearest_event: Option<&PatientEvent>,
        last_examination_date: Option<NaiveDate>,
    ) {
        if let Some(event) = nearest_event {
            let days = (event.date - reference_date).num_days();
            self.samples.insert(days);
        } else if let Some(examination) = last_examination_date {
            let days = (examination - reference_date).num_days();
            if days >= self.fallback_gap_days {
                self.samples.insert(days);
            }
        }
    }

    /// Number of distinct duration samples collected so far.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Computes the summary, or `None` when no samples were collected.
    pub fn summarize(&self) -> Option<StatisticsSummary> {
        if self.samples.is_empty() {
            return None;
        }

        let count = self.samples.len();
        let sum: i64 = self.samples.iter().sum();
        let mean_days = (sum as f64 / count as f64).floor() as i64;
        let mean_years = round_to(mean_days as f64 / thresholds::DAYS_PER_YEAR as f64, 2);

        let over_five = self
            .samples
            .iter()
            .filter(|&&d| d >= thresholds::FIVE_YEARS)
            .count();
        let over_ten = self
            .samples
            .iter()
            .filter(|&&d| d >= thresholds::TEN_YEARS)
            .count();

        Some(StatisticsSummary {
            count,
            mean_days,
            mean_years,
            over_five_years: over_five,
            over_ten_years: over_ten,
            pct_over_five_years: percentage(over_five, count),
            pct_over_ten_years: percentage(over_ten, count),
        })
    }
}

/// Summary of the collected duration samples.
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSummary {
    /// Number of distinct samples.
    pub count: usize,
    /// Mean duration in days, floored.
    pub mean_days: i64,
    /// Mean duration in years, rounded to 2 decimal places.
    pub mean_years: f64,
    /// Samples of at least five years.
    pub over_five_years: usize,
    /// Samples of at least ten years.
    pub over_ten_years: usize,
    /// Share of samples of at least five years, in percent, 1 decimal place.
    pub pct_over_five_years: f64,
    /// Share of samples of at least ten years, in percent, 1 decimal place.
    pub pct_over_ten_years: f64,
}

fn percentage(part: usize, whole: usize) -> f64 {
    round_to(part as f64 / whole as f64 * 100.0, 1)
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
