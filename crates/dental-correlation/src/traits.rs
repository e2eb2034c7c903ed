//! Collaborator traits for correlation runs.
//!
//! The correlation engine never talks to a database or a terminology server
//! directly. It consumes three seams:
//!
//! - [`EventStore`] - the longitudinal patient-event history
//! - [`TerminologyExpander`] - ECL constraint expansion
//! - [`ReportSink`] - per-row report output
//!
//! Implement these in the application crate (CSV extract + FHIR server in
//! `dental-report`) or with in-memory fixtures in tests.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::CorrelationResult;
use crate::report::ReportRow;

/// One row of a patient's longitudinal event history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientEvent {
    /// Pseudonymized patient identifier.
    pub patient_id: String,
    /// Date the event was recorded.
    pub date: NaiveDate,
    /// The event's code in brief compositional grammar.
    pub code: String,
}

impl PatientEvent {
    /// Creates a patient event.
    pub fn new(patient_id: impl Into<String>, date: NaiveDate, code: impl Into<String>) -> Self {
        Self {
            patient_id: patient_id.into(),
            date,
            code: code.into(),
        }
    }
}

/// One entry of a terminology-server expansion result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionEntry {
    /// The expanded code (may itself be a postcoordinated expression).
    pub code: String,
    /// Display term, if the server supplied one.
    pub display: Option<String>,
}

/// Read access to the patient-event history.
///
/// Implementations must honor the stated orderings; the matcher and the
/// pipeline rely on them instead of re-sorting.
pub trait EventStore {
    /// All events whose code is any of `codes`, ordered by patient ID then
    /// date ascending.
    fn initial_events(&self, codes: &[String]) -> CorrelationResult<Vec<PatientEvent>>;

    /// All events for one patient bearing exactly `code`, ordered by date
    /// ascending.
    fn patient_events(&self, patient_id: &str, code: &str) -> CorrelationResult<Vec<PatientEvent>>;

    /// Latest examination date per patient, for the fixed examination
    /// sentinel code.
    fn last_examination_dates(&self) -> CorrelationResult<HashMap<String, NaiveDate>>;
}

/// Expansion of an ECL constraint into its member codes.
///
/// The result is treated as authoritative and complete; no pagination is
/// handled at this boundary.
pub trait TerminologyExpander {
    /// Expands `constraint` into its member codes.
    fn expand(&self, constraint: &str) -> CorrelationResult<Vec<ExpansionEntry>>;
}

/// Destination for per-row report output.
///
/// Rows are written in processing order; rows written before a fatal error
/// remain written.
pub trait ReportSink {
    /// Writes one report row.
    fn write_row(&mut self, row: &ReportRow) -> CorrelationResult<()>;
}

impl ReportSink for Vec<ReportRow> {
    fn write_row(&mut self, row: &ReportRow) -> CorrelationResult<()> {
        self.push(row.clone());
        Ok(())
    }
}
