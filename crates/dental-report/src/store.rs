//! Patient-event history backed by a `;`-delimited research extract.
//!
//! The extract has one row per clinical event:
//!
//! ```text
//! AnoPID;Date;SCTtotal
//! P0001;2015-03-02;234789004:363704007=245575001,363704007=245653002
//! ```
//!
//! The whole extract is loaded up front and queried in memory, so every
//! per-row lookup during the correlation run is a filter over sorted rows.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use dental_correlation::{CorrelationError, CorrelationResult, EventStore, PatientEvent};
use dental_expression::well_known;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct EventRecord {
    #[serde(rename = "AnoPID")]
    patient_id: String,
    #[serde(rename = "Date")]
    date: NaiveDate,
    #[serde(rename = "SCTtotal")]
    code: String,
}

/// In-memory [`EventStore`] loaded from a CSV extract.
#[derive(Debug)]
pub struct CsvEventStore {
    /// Sorted by `(patient_id, date)`.
    events: Vec<PatientEvent>,
}

impl CsvEventStore {
    /// Loads the extract at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> CorrelationResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            CorrelationError::DataAccess(format!("cannot open {}: {e}", path.display()))
        })?;
        Self::from_reader(file)
    }

    /// Loads the extract from any reader. Mostly useful for tests.
    pub fn from_reader<R: Read>(reader: R) -> CorrelationResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().delimiter(b';').from_reader(reader);

        let mut events = Vec::new();
        for record in csv_reader.deserialize() {
            let record: EventRecord =
                record.map_err(|e| CorrelationError::DataAccess(e.to_string()))?;
            events.push(PatientEvent::new(&record.patient_id, record.date, &record.code));
        }
        events.sort_by(|a, b| (&a.patient_id, a.date).cmp(&(&b.patient_id, b.date)));

        tracing::info!(events = events.len(), "loaded patient-event extract");
        Ok(Self { events })
    }

    /// Number of events in the extract.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the extract is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventStore for CsvEventStore {
    fn initial_events(&self, codes: &[String]) -> CorrelationResult<Vec<PatientEvent>> {
        // The backing vector is already (patient, date)-sorted; filtering
        // preserves that order.
        Ok(self
            .events
            .iter()
            .filter(|e| codes.contains(&e.code))
            .cloned()
            .collect())
    }

    fn patient_events(&self, patient_id: &str, code: &str) -> CorrelationResult<Vec<PatientEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|e| e.patient_id == patient_id && e.code == code)
            .cloned()
            .collect())
    }

    fn last_examination_dates(&self) -> CorrelationResult<HashMap<String, NaiveDate>> {
        let examination_code = well_known::DENTAL_EXAMINATION.to_string();
        let mut latest: HashMap<String, NaiveDate> = HashMap::new();
        for event in self.events.iter().filter(|e| e.code == examination_code) {
            latest
                .entry(event.patient_id.clone())
                .and_modify(|d| *d = (*d).max(event.date))
                .or_insert(event.date);
        }
        Ok(latest)
    }
}
