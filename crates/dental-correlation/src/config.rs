//! Configuration for correlation runs.

use crate::statistics::thresholds;

/// Configuration for a correlation run.
///
/// # Example
///
/// ```rust
/// use dental_correlation::CorrelationConfig;
///
/// let config = CorrelationConfig::builder()
///     .with_fallback_gap_days(2 * 365)
///     .with_progress_interval(500)
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct CorrelationConfig {
    /// Minimum last-examination gap (in days) for the fallback inclusion
    /// rule. Rows with no nearest event and a shorter gap contribute nothing
    /// to statistics.
    pub fallback_gap_days: i64,
    /// Emit a progress log line every this many processed rows
    /// (None = no progress logging).
    pub progress_interval: Option<usize>,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            fallback_gap_days: thresholds::FIVE_YEARS,
            progress_interval: Some(100),
        }
    }
}

impl CorrelationConfig {
    /// Creates a new builder.
    pub fn builder() -> CorrelationConfigBuilder {
        CorrelationConfigBuilder::default()
    }
}

/// Builder for [`CorrelationConfig`].
#[derive(Debug, Clone, Default)]
pub struct CorrelationConfigBuilder {
    fallback_gap_days: Option<i64>,
    progress_interval: Option<usize>,
}

impl CorrelationConfigBuilder {
    /// Sets the fallback inclusion gap in days.
    pub fn with_fallback_gap_days(mut self, days: i64) -> Self {
        self.fallback_gap_days = Some(days);
        self
    }

    /// Sets the progress logging interval in rows.
    pub fn with_progress_interval(mut self, rows: usize) -> Self {
        self.progress_interval = Some(rows);
        self
    }

    /// Builds the configuration, filling unset fields with defaults.
    pub fn build(self) -> CorrelationConfig {
        let defaults = CorrelationConfig::default();
        CorrelationConfig {
            fallback_gap_days: self.fallback_gap_days.unwrap_or(defaults.fallback_gap_days),
            progress_interval: self.progress_interval.or(defaults.progress_interval),
        }
    }
}
