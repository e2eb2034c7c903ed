//! End-to-end pipeline tests over in-memory collaborators.

use std::collections::HashMap;

use chrono::NaiveDate;
use dental_correlation::{
    Concept, ConceptCatalog, CorrelationError, CorrelationPipeline, CorrelationResult,
    EventStore, ExpansionEntry, PatientEvent, PostCoordinatedExpression, ReportRow,
    TerminologyExpander,
};

const TOOTH_48: u64 = 245575001;
const TOOTH_36: u64 = 245572003;
const SURFACE_OCCLUSAL: u64 = 245653002;

const INIT_48: &str = "234789004:363704007=245575001,363704007=245653002";
const INIT_36: &str = "234789004:363704007=245572003,363704007=245653002";
const CARIES_48: &str = "80967001:363698007=245575001";
const CARIES_36: &str = "80967001:363698007=245572003";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn teeth() -> ConceptCatalog {
    vec![
        Concept::new(TOOTH_48, "Lower right third molar tooth"),
        Concept::new(TOOTH_36, "Lower left first molar tooth"),
    ]
    .into_iter()
    .collect()
}

fn surfaces() -> ConceptCatalog {
    vec![Concept::new(SURFACE_OCCLUSAL, "Occlusal surface")]
        .into_iter()
        .collect()
}

/// In-memory history store with the ordering guarantees of the trait.
struct MemoryStore {
    events: Vec<PatientEvent>,
    examinations: HashMap<String, NaiveDate>,
}

impl MemoryStore {
    fn new(events: Vec<PatientEvent>) -> Self {
        Self {
            events,
            examinations: HashMap::new(),
        }
    }

    fn with_examination(mut self, patient_id: &str, d: NaiveDate) -> Self {
        self.examinations.insert(patient_id.to_string(), d);
        self
    }
}

impl EventStore for MemoryStore {
    fn initial_events(&self, codes: &[String]) -> CorrelationResult<Vec<PatientEvent>> {
        let mut rows: Vec<PatientEvent> = self
            .events
            .iter()
            .filter(|e| codes.contains(&e.code))
            .cloned()
            .collect();
        rows.sort_by(|a, b| (&a.patient_id, a.date).cmp(&(&b.patient_id, b.date)));
        Ok(rows)
    }

    fn patient_events(&self, patient_id: &str, code: &str) -> CorrelationResult<Vec<PatientEvent>> {
        let mut rows: Vec<PatientEvent> = self
            .events
            .iter()
            .filter(|e| e.patient_id == patient_id && e.code == code)
            .cloned()
            .collect();
        rows.sort_by_key(|e| e.date);
        Ok(rows)
    }

    fn last_examination_dates(&self) -> CorrelationResult<HashMap<String, NaiveDate>> {
        Ok(self.examinations.clone())
    }
}

/// Expander that answers per-tooth constraints with the matching caries code.
struct ToothAwareExpander;

impl TerminologyExpander for ToothAwareExpander {
    fn expand(&self, constraint: &str) -> CorrelationResult<Vec<ExpansionEntry>> {
        let code = if constraint.contains(&format!("|Finding site|={TOOTH_48}")) {
            CARIES_48
        } else if constraint.contains(&format!("|Finding site|={TOOTH_36}")) {
            CARIES_36
        } else {
            return Ok(Vec::new());
        };
        Ok(vec![ExpansionEntry {
            code: code.to_string(),
            display: Some("Dental caries".to_string()),
        }])
    }
}

/// Expander that serves a fixed number of calls, then fails as an
/// unreachable server would.
struct FailingExpander {
    successes: std::cell::Cell<usize>,
}

impl FailingExpander {
    fn after(successes: usize) -> Self {
        Self {
            successes: std::cell::Cell::new(successes),
        }
    }
}

impl TerminologyExpander for FailingExpander {
    fn expand(&self, constraint: &str) -> CorrelationResult<Vec<ExpansionEntry>> {
        let remaining = self.successes.get();
        if remaining == 0 {
            return Err(CorrelationError::Expansion {
                constraint: constraint.to_string(),
                message: "503 Service Unavailable".to_string(),
            });
        }
        self.successes.set(remaining - 1);
        ToothAwareExpander.expand(constraint)
    }
}

fn initial_expressions() -> Vec<PostCoordinatedExpression> {
    vec![
        PostCoordinatedExpression::new(INIT_48, "Composite restoration, tooth 48"),
        PostCoordinatedExpression::new(INIT_36, "Composite restoration, tooth 36"),
    ]
}

#[test]
fn correlates_each_restoration_with_caries_on_the_same_tooth() {
    // P1 has restorations on two teeth; each must pair with its own tooth's
    // caries event, not the other's.
    let store = MemoryStore::new(vec![
        PatientEvent::new("P1", date(2014, 5, 5), INIT_48),
        PatientEvent::new("P1", date(2014, 6, 6), INIT_36),
        PatientEvent::new("P1", date(2018, 1, 1), CARIES_48),
        PatientEvent::new("P1", date(2016, 1, 1), CARIES_36),
    ]);

    let teeth = teeth();
    let surfaces = surfaces();
    let pipeline = CorrelationPipeline::new(&store, &ToothAwareExpander, &teeth, &surfaces);
    let mut rows: Vec<ReportRow> = Vec::new();
    let report = pipeline.run(&initial_expressions(), &mut rows).unwrap();

    assert_eq!(report.rows_processed, 2);
    assert_eq!(rows[0].initial_code, INIT_48);
    assert_eq!(rows[0].event_code.as_deref(), Some(CARIES_48));
    assert_eq!(rows[0].event_date, Some(date(2018, 1, 1)));
    assert_eq!(rows[1].initial_code, INIT_36);
    assert_eq!(rows[1].event_code.as_deref(), Some(CARIES_36));
    assert_eq!(rows[1].event_date, Some(date(2016, 1, 1)));
}

#[test]
fn cohort_statistics_deduplicate_identical_durations() {
    // Two patients with identical 2000-day intervals collapse to one sample;
    // a third patient with a distinct interval makes two.
    let store = MemoryStore::new(vec![
        PatientEvent::new("P1", date(2010, 1, 1), INIT_48),
        PatientEvent::new("P1", date(2010, 1, 1) + chrono::Duration::days(2000), CARIES_48),
        PatientEvent::new("P2", date(2012, 1, 1), INIT_48),
        PatientEvent::new("P2", date(2012, 1, 1) + chrono::Duration::days(2000), CARIES_48),
        PatientEvent::new("P3", date(2013, 1, 1), INIT_48),
        PatientEvent::new("P3", date(2013, 1, 1) + chrono::Duration::days(100), CARIES_48),
    ]);

    let teeth = teeth();
    let surfaces = surfaces();
    let pipeline = CorrelationPipeline::new(&store, &ToothAwareExpander, &teeth, &surfaces);
    let mut rows: Vec<ReportRow> = Vec::new();
    let report = pipeline.run(&initial_expressions(), &mut rows).unwrap();

    assert_eq!(report.rows_processed, 3);
    let summary = report.summary.unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.mean_days, 1050); // floor((2000 + 100) / 2)
}

#[test]
fn short_examination_gap_contributes_nothing() {
    let store = MemoryStore::new(vec![PatientEvent::new("P1", date(2015, 1, 1), INIT_48)])
        .with_examination("P1", date(2015, 1, 1) + chrono::Duration::days(1000));

    let teeth = teeth();
    let surfaces = surfaces();
    let pipeline = CorrelationPipeline::new(&store, &ToothAwareExpander, &teeth, &surfaces);
    let mut rows: Vec<ReportRow> = Vec::new();
    let report = pipeline.run(&initial_expressions(), &mut rows).unwrap();

    // The row is still reported, including the examination date.
    assert_eq!(report.rows_processed, 1);
    assert_eq!(
        rows[0].last_examination_date,
        Some(date(2015, 1, 1) + chrono::Duration::days(1000))
    );
    // But it yields no statistics sample.
    assert!(report.summary.is_none());
}

#[test]
fn expansion_failure_aborts_but_keeps_rows_written_so_far() {
    let store = MemoryStore::new(vec![
        PatientEvent::new("P1", date(2014, 5, 5), INIT_48),
        PatientEvent::new("P2", date(2015, 5, 5), INIT_48),
    ]);

    let expander = FailingExpander::after(1);
    let teeth = teeth();
    let surfaces = surfaces();
    let pipeline = CorrelationPipeline::new(&store, &expander, &teeth, &surfaces);
    let mut rows: Vec<ReportRow> = Vec::new();
    let result = pipeline.run(&initial_expressions(), &mut rows);

    let err = result.unwrap_err();
    assert!(matches!(err, CorrelationError::Expansion { .. }));
    assert!(err.to_string().contains("503 Service Unavailable"));
    // P1's row was written before P2's expansion failed.
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].patient_id, "P1");
}

#[test]
fn empty_cohort_produces_empty_report() {
    let store = MemoryStore::new(vec![]);

    let teeth = teeth();
    let surfaces = surfaces();
    let pipeline = CorrelationPipeline::new(&store, &ToothAwareExpander, &teeth, &surfaces);
    let mut rows: Vec<ReportRow> = Vec::new();
    let report = pipeline.run(&initial_expressions(), &mut rows).unwrap();

    assert_eq!(report.rows_processed, 0);
    assert_eq!(report.rows_skipped, 0);
    assert!(rows.is_empty());
    assert!(report.summary.is_none());
}

#[test]
fn restoration_with_no_later_event_and_no_examination_reports_empty_columns() {
    let store = MemoryStore::new(vec![PatientEvent::new("P1", date(2015, 1, 1), INIT_48)]);

    let teeth = teeth();
    let surfaces = surfaces();
    let pipeline = CorrelationPipeline::new(&store, &ToothAwareExpander, &teeth, &surfaces);
    let mut rows: Vec<ReportRow> = Vec::new();
    let report = pipeline.run(&initial_expressions(), &mut rows).unwrap();

    assert_eq!(rows.len(), 1);
    assert!(rows[0].event_date.is_none());
    assert!(rows[0].event_code.is_none());
    assert!(rows[0].last_examination_date.is_none());
    assert!(report.summary.is_none());
}
