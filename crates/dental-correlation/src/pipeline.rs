//! The row-by-row correlation pipeline.

use dental_expression::{
    dental_caries_constraint, ConceptCatalog, ExpressionError, PostCoordinatedExpression,
};

use crate::config::CorrelationConfig;
use crate::error::CorrelationResult;
use crate::matcher::find_nearest_event;
use crate::report::{CorrelationReport, ReportRow};
use crate::statistics::DurationStatistics;
use crate::traits::{EventStore, ReportSink, TerminologyExpander};

/// Drives one pass over all qualifying initial-treatment rows.
///
/// For each row delivered by the store (ordered by patient then date):
/// construct an ad hoc expression from the stored code, resolve its
/// procedure sites, derive the per-tooth caries constraint, expand it via
/// the terminology service, find the nearest later event in the patient's
/// history, emit one report row and record the duration sample. Output
/// order mirrors input order; nothing is re-sorted downstream.
///
/// All state lives in the pipeline's borrowed context; the catalogs are
/// read-only throughout the run.
pub struct CorrelationPipeline<'a, S, T>
where
    S: EventStore,
    T: TerminologyExpander,
{
    store: &'a S,
    terminology: &'a T,
    teeth: &'a ConceptCatalog,
    surfaces: &'a ConceptCatalog,
    config: CorrelationConfig,
}

impl<'a, S, T> CorrelationPipeline<'a, S, T>
where
    S: EventStore,
    T: TerminologyExpander,
{
    /// Creates a pipeline with the default configuration.
    pub fn new(
        store: &'a S,
        terminology: &'a T,
        teeth: &'a ConceptCatalog,
        surfaces: &'a ConceptCatalog,
    ) -> Self {
        Self::with_config(store, terminology, teeth, surfaces, CorrelationConfig::default())
    }

    /// Creates a pipeline with an explicit configuration.
    pub fn with_config(
        store: &'a S,
        terminology: &'a T,
        teeth: &'a ConceptCatalog,
        surfaces: &'a ConceptCatalog,
        config: CorrelationConfig,
    ) -> Self {
        Self {
            store,
            terminology,
            teeth,
            surfaces,
            config,
        }
    }

    /// Runs the pipeline over every row matching the initial expression set,
    /// writing one report row per processed event to `sink`.
    ///
    /// Rows whose stored expression resolves no tooth site are logged and
    /// skipped; external-call failures abort the run. Rows already written
    /// to the sink stay written either way.
    pub fn run(
        &self,
        initial_expressions: &[PostCoordinatedExpression],
        sink: &mut dyn ReportSink,
    ) -> CorrelationResult<CorrelationReport> {
        let last_examinations = self.store.last_examination_dates()?;

        let codes: Vec<String> = initial_expressions
            .iter()
            .map(|pce| pce.expression().to_string())
            .collect();
        let rows = self.store.initial_events(&codes)?;
        tracing::info!(rows = rows.len(), "matched initial-treatment events");

        let mut statistics = DurationStatistics::with_config(&self.config);
        let mut processed = 0usize;
        let mut skipped = 0usize;

        for row in &rows {
            tracing::debug!(
                patient_id = row.patient_id,
                date = %row.date,
                code = row.code,
                "processing initial event"
            );

            let mut item = PostCoordinatedExpression::ad_hoc(row.code.clone());
            item.resolve_procedure_sites(self.teeth, self.surfaces);

            let constraint = match dental_caries_constraint(&item) {
                Ok(constraint) => constraint,
                Err(ExpressionError::MissingToothSite { expression }) => {
                    tracing::warn!(
                        patient_id = row.patient_id,
                        expression,
                        "no tooth procedure site; skipping row"
                    );
                    skipped += 1;
                    continue;
                }
            };

            let candidates: Vec<PostCoordinatedExpression> = self
                .terminology
                .expand(&constraint)?
                .into_iter()
                .map(|entry| match entry.display {
                    Some(display) => PostCoordinatedExpression::new(entry.code, display),
                    None => PostCoordinatedExpression::ad_hoc(entry.code),
                })
                .collect();
            tracing::debug!(constraint, candidates = candidates.len(), "expanded constraint");

            let nearest = find_nearest_event(self.store, &row.patient_id, row.date, &candidates)?;
            let last_examination = last_examinations.get(&row.patient_id).copied();

            sink.write_row(&ReportRow {
                patient_id: row.patient_id.clone(),
                initial_date: row.date,
                initial_code: row.code.clone(),
                event_date: nearest.as_ref().map(|e| e.date),
                event_code: nearest.as_ref().map(|e| e.code.clone()),
                last_examination_date: last_examination,
            })?;

            statistics.record(row.date, nearest.as_ref(), last_examination);

            processed += 1;
            if let Some(interval) = self.config.progress_interval {
                if interval > 0 && processed % interval == 0 {
                    tracing::info!(processed, total = rows.len(), "correlation progress");
                }
            }
        }

        Ok(CorrelationReport {
            rows_processed: processed,
            rows_skipped: skipped,
            summary: statistics.summarize(),
        })
    }
}
