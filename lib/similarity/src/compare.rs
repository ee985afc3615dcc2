//! Record comparator
//!
//! Flattens a predicted record and its ground truth, scores every
//! ground-truth field, and produces an [`AccuracyReport`]. Paths present only
//! in the prediction are ignored; ground-truth paths missing from the
//! prediction score 0.0.

use crate::report::{AccuracyReport, BatchSummary};
use crate::scorer::FieldScorer;
use crate::sink::ResultSink;
use fieldscore_core::{flatten, DocumentInput, Error, FlatDocument, Result};
use fieldscore_schema::{SchemaDescriptor, SchemaError, SchemaIndex};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Errors from a recorded comparison
#[derive(Debug, thiserror::Error)]
pub enum CompareError {
    /// An input could not be decoded; nothing was scored
    #[error(transparent)]
    Parse(#[from] Error),

    /// The report was computed but the sink rejected it
    #[error("Report computed but not recorded: {source}")]
    Record {
        report: Box<AccuracyReport>,
        source: Error,
    },
}

impl CompareError {
    /// The computed report, if scoring got that far
    pub fn report(&self) -> Option<&AccuracyReport> {
        match self {
            CompareError::Parse(_) => None,
            CompareError::Record { report, .. } => Some(report),
        }
    }

    pub fn into_report(self) -> Option<AccuracyReport> {
        match self {
            CompareError::Parse(_) => None,
            CompareError::Record { report, .. } => Some(*report),
        }
    }
}

/// Comparator bound to one schema and, optionally, one result sink
#[derive(Clone)]
pub struct Comparator {
    index: Arc<SchemaIndex>,
    sink: Option<Arc<dyn ResultSink>>,
}

impl std::fmt::Debug for Comparator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Comparator")
            .field("fields", &self.index.len())
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

impl Comparator {
    /// Create a comparator from a schema descriptor
    pub fn new(schema: &SchemaDescriptor) -> std::result::Result<Self, SchemaError> {
        Ok(Self::from_index(SchemaIndex::build(schema)?))
    }

    pub fn from_index(index: SchemaIndex) -> Self {
        Self {
            index: Arc::new(index),
            sink: None,
        }
    }

    /// Record every report produced by [`Comparator::compare`] in `sink`
    pub fn with_sink(mut self, sink: Arc<dyn ResultSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Get a reference to the introspected schema
    pub fn index(&self) -> &SchemaIndex {
        &self.index
    }

    pub fn scorer(&self) -> FieldScorer<'_> {
        FieldScorer::new(&self.index)
    }

    /// Score every ground-truth path of two flattened records
    pub fn score_flat(
        &self,
        predicted: &FlatDocument,
        truth: &FlatDocument,
    ) -> BTreeMap<String, f64> {
        let scorer = self.scorer();
        truth
            .iter()
            .map(|(path, true_value)| {
                let score = match predicted.get(path) {
                    Some(predicted_value) => {
                        scorer.score(path, Some(predicted_value), Some(true_value))
                    }
                    None => 0.0,
                };
                (path.clone(), score)
            })
            .collect()
    }

    /// Compare two decoded records
    pub fn score_documents(
        &self,
        predicted: &Map<String, Value>,
        truth: &Map<String, Value>,
    ) -> AccuracyReport {
        let field_accuracies = self.score_flat(&flatten(predicted), &flatten(truth));
        AccuracyReport::new(field_accuracies)
    }

    /// Decode and compare two records without recording the result
    pub fn evaluate(
        &self,
        predicted: impl Into<DocumentInput>,
        truth: impl Into<DocumentInput>,
    ) -> Result<AccuracyReport> {
        let predicted = predicted.into().into_object("predicted")?;
        let truth = truth.into().into_object("ground truth")?;

        let report = self.score_documents(&predicted, &truth);
        debug!(
            overall_accuracy = report.overall_accuracy,
            fields = report.field_accuracies.len(),
            "Comparison scored"
        );
        Ok(report)
    }

    /// Decode, compare and append the report to the sink, if one is set
    pub fn compare(
        &self,
        predicted: impl Into<DocumentInput>,
        truth: impl Into<DocumentInput>,
    ) -> std::result::Result<AccuracyReport, CompareError> {
        let report = self.evaluate(predicted, truth)?;

        if let Some(sink) = &self.sink {
            if let Err(source) = sink.append(&report) {
                warn!(error = %source, "Failed to record accuracy report");
                return Err(CompareError::Record {
                    report: Box::new(report),
                    source,
                });
            }
        }
        Ok(report)
    }

    /// Compare pairs one after another
    ///
    /// A failing pair does not stop the batch. Reports that were computed but
    /// could not be recorded are still part of the outcome.
    pub fn compare_batch<I, P, T>(&self, pairs: I) -> BatchOutcome
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<DocumentInput>,
        T: Into<DocumentInput>,
    {
        let mut outcome = BatchOutcome::default();
        for (position, (predicted, truth)) in pairs.into_iter().enumerate() {
            match self.compare(predicted, truth) {
                Ok(report) => outcome.reports.push(report),
                Err(error) => {
                    warn!(position, error = %error, "Batch comparison failed");
                    if let Some(report) = error.report() {
                        outcome.reports.push(report.clone());
                    }
                    outcome.failures.push(BatchFailure { position, error });
                }
            }
        }
        outcome
    }
}

/// A pair of a batch that failed
#[derive(Debug)]
pub struct BatchFailure {
    /// Zero-based position of the pair in the batch
    pub position: usize,
    pub error: CompareError,
}

/// Reports and failures of a batch run
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub reports: Vec<AccuracyReport>,
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    pub fn summary(&self) -> BatchSummary {
        BatchSummary::compute(&self.reports)
    }
}
