//! Nearest-event matching within a patient's history.

use chrono::NaiveDate;
use dental_expression::PostCoordinatedExpression;

use crate::error::CorrelationResult;
use crate::traits::{EventStore, PatientEvent};

/// Finds the chronologically nearest qualifying event at or after the
/// reference date.
///
/// Fetches the patient's events for every candidate expression, pools them
/// and sorts the pool by date ascending. Selection then follows three rules:
///
/// 1. reference date ≥ latest pooled date → `None` (the initial treatment
///    already lies at or after everything on record)
/// 2. reference date ≤ earliest pooled date → the earliest event
/// 3. otherwise → the first pooled event whose date is ≥ the reference date
///
/// An empty pool also returns `None`; a missing match is an expected
/// outcome, not an error.
pub fn find_nearest_event<S: EventStore + ?Sized>(
    store: &S,
    patient_id: &str,
    reference_date: NaiveDate,
    candidates: &[PostCoordinatedExpression],
) -> CorrelationResult<Option<PatientEvent>> {
    let mut events: Vec<PatientEvent> = Vec::new();
    for candidate in candidates {
        events.extend(store.patient_events(patient_id, candidate.expression())?);
    }

    events.sort_by_key(|e| e.date);

    let (Some(earliest), Some(latest)) = (events.first(), events.last()) else {
        // No related event exists for this tooth; a normal situation.
        return Ok(None);
    };

    let nearest = if reference_date >= latest.date {
        None
    } else if reference_date <= earliest.date {
        Some(earliest.clone())
    } else {
        events.iter().find(|e| e.date >= reference_date).cloned()
    };

    tracing::debug!(
        patient_id,
        %reference_date,
        pooled = events.len(),
        nearest = nearest.as_ref().map(|e| e.date.to_string()),
        "nearest-event selection"
    );

    Ok(nearest)
}
