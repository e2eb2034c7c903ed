//! Report row and run-level report types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::statistics::StatisticsSummary;

/// One output record per processed initial-treatment row.
///
/// Serde field names match the historical CSV headers, so serializing rows
/// through the `csv` crate reproduces the established report layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Pseudonymized patient identifier.
    #[serde(rename = "AnoPID")]
    pub patient_id: String,

    /// Date of the initial qualifying treatment.
    #[serde(rename = "InitDate")]
    pub initial_date: NaiveDate,

    /// Code of the initial qualifying treatment.
    #[serde(rename = "InitPce")]
    pub initial_code: String,

    /// Date of the nearest related event, if one was found.
    #[serde(rename = "EventDate")]
    pub event_date: Option<NaiveDate>,

    /// Code of the nearest related event, if one was found.
    #[serde(rename = "EventPce")]
    pub event_code: Option<String>,

    /// The patient's last recorded examination date, if any.
    #[serde(rename = "LastExaminationDate")]
    pub last_examination_date: Option<NaiveDate>,
}

/// Outcome of a full correlation run.
#[derive(Debug, Clone)]
pub struct CorrelationReport {
    /// Rows processed and written to the sink.
    pub rows_processed: usize,
    /// Rows skipped because their expression had no tooth procedure site.
    pub rows_skipped: usize,
    /// Aggregate duration statistics; `None` when no row produced a sample.
    pub summary: Option<StatisticsSummary>,
}
