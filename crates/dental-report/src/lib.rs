//! # dental-report
//!
//! Application shell for the dental PCE correlation pipeline.
//!
//! Supplies the concrete collaborators the `dental-correlation` engine
//! abstracts over:
//!
//! - [`FhirTerminologyClient`](fhir::FhirTerminologyClient) - ECL expansion
//!   against a FHIR terminology server's `ValueSet/$expand` operation
//! - [`CsvEventStore`](store::CsvEventStore) - the patient-event history,
//!   loaded from a `;`-delimited research extract
//! - [`CsvReportSink`](output::CsvReportSink) - the per-row report CSV
//!
//! plus configuration from the environment and the command-line surface.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod fhir;
pub mod output;
pub mod store;
