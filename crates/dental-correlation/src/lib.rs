//! # dental-correlation
//!
//! Clinical-code correlation engine for dental patient event histories.
//!
//! Given a cohort's initial qualifying treatments (composite restorations
//! recorded as postcoordinated SNOMED CT expressions), the engine finds the
//! chronologically nearest later caries event on the same tooth for each
//! patient, falls back to the patient's last examination date for long
//! caries-free intervals, and aggregates the resulting durations.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      dental-correlation                       │
//! │                                                               │
//! │  CorrelationPipeline (per initial-treatment row)              │
//! │  ├── resolve procedure sites     (dental-expression)          │
//! │  ├── derive caries constraint    (dental-expression)          │
//! │  ├── expand constraint           (TerminologyExpander trait)  │
//! │  ├── find nearest event          (EventStore trait)           │
//! │  ├── emit report row             (ReportSink trait)           │
//! │  └── record duration sample      (DurationStatistics)         │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The three traits are the only seams to the outside world; the engine
//! itself is synchronous, single-threaded and free of global state. Concrete
//! implementations (CSV extract, FHIR terminology server, CSV report) live
//! in the `dental-report` application crate.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod error;
mod matcher;
mod pipeline;
mod report;
mod statistics;
mod traits;

pub use config::{CorrelationConfig, CorrelationConfigBuilder};
pub use error::{CorrelationError, CorrelationResult};
pub use matcher::find_nearest_event;
pub use pipeline::CorrelationPipeline;
pub use report::{CorrelationReport, ReportRow};
pub use statistics::{thresholds, DurationStatistics, StatisticsSummary};
pub use traits::{EventStore, ExpansionEntry, PatientEvent, ReportSink, TerminologyExpander};

// Re-export commonly used types from dependencies for convenience
pub use dental_expression::{Concept, ConceptCatalog, PostCoordinatedExpression};
