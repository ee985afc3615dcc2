//! Accuracy reports
//!
//! One [`AccuracyReport`] per comparison, and a [`BatchSummary`] that averages
//! many of them.

use chrono::{DateTime, Utc};
use fieldscore_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of comparing one predicted record against its ground truth
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccuracyReport {
    /// When the comparison ran
    pub timestamp: DateTime<Utc>,
    /// Unweighted mean of all field accuracies
    pub overall_accuracy: f64,
    /// Per-field similarity keyed by dot-path
    pub field_accuracies: BTreeMap<String, f64>,
}

impl AccuracyReport {
    /// Build a report stamped with the current time
    pub fn new(field_accuracies: BTreeMap<String, f64>) -> Self {
        Self::with_timestamp(field_accuracies, Utc::now())
    }

    pub fn with_timestamp(
        field_accuracies: BTreeMap<String, f64>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            overall_accuracy: mean_accuracy(&field_accuracies),
            field_accuracies,
        }
    }

    /// Serialize to a single line of JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// The `n` lowest scoring fields, worst first
    pub fn weakest_fields(&self, n: usize) -> Vec<(&str, f64)> {
        let mut fields: Vec<_> = self
            .field_accuracies
            .iter()
            .map(|(path, score)| (path.as_str(), *score))
            .collect();
        fields.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        fields.truncate(n);
        fields
    }
}

/// Mean of field scores. A record with no fields has nothing to get wrong.
fn mean_accuracy(field_accuracies: &BTreeMap<String, f64>) -> f64 {
    if field_accuracies.is_empty() {
        return 1.0;
    }
    field_accuracies.values().sum::<f64>() / field_accuracies.len() as f64
}

/// Aggregate statistics over a batch of reports
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BatchSummary {
    /// Number of reports summarized
    pub reports_count: usize,
    /// Mean overall accuracy
    pub avg_overall_accuracy: f64,
    pub min_overall_accuracy: f64,
    pub max_overall_accuracy: f64,
    /// Mean accuracy per field, over the reports containing that field
    pub field_accuracies: BTreeMap<String, f64>,
    /// Field with the lowest mean accuracy
    pub weakest_field: Option<String>,
}

impl BatchSummary {
    /// Compute stats from reports
    pub fn compute(reports: &[AccuracyReport]) -> Self {
        if reports.is_empty() {
            return Self {
                reports_count: 0,
                avg_overall_accuracy: 0.0,
                min_overall_accuracy: 0.0,
                max_overall_accuracy: 0.0,
                field_accuracies: BTreeMap::new(),
                weakest_field: None,
            };
        }

        let overall: Vec<f64> = reports.iter().map(|r| r.overall_accuracy).collect();
        let avg_overall_accuracy = overall.iter().sum::<f64>() / overall.len() as f64;
        let min_overall_accuracy = overall.iter().copied().fold(f64::INFINITY, f64::min);
        let max_overall_accuracy = overall.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for report in reports {
            for (path, score) in &report.field_accuracies {
                let entry = sums.entry(path.clone()).or_insert((0.0, 0));
                entry.0 += score;
                entry.1 += 1;
            }
        }
        let field_accuracies: BTreeMap<String, f64> = sums
            .into_iter()
            .map(|(path, (sum, count))| (path, sum / count as f64))
            .collect();

        let weakest_field = field_accuracies
            .iter()
            .min_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(path, _)| path.clone());

        Self {
            reports_count: reports.len(),
            avg_overall_accuracy,
            min_overall_accuracy,
            max_overall_accuracy,
            field_accuracies,
            weakest_field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(fields: &[(&str, f64)]) -> AccuracyReport {
        AccuracyReport::new(
            fields
                .iter()
                .map(|(path, score)| (path.to_string(), *score))
                .collect(),
        )
    }

    #[test]
    fn test_overall_is_mean() {
        let r = report(&[("a", 1.0), ("b", 0.5), ("c.d", 0.0)]);
        assert!((r.overall_accuracy - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_empty_report() {
        let r = report(&[]);
        assert_eq!(r.overall_accuracy, 1.0);
        assert!(r.field_accuracies.is_empty());
    }

    #[test]
    fn test_report_json_shape() {
        let r = report(&[("sentiment.urgency", 0.75)]);
        let json = r.to_json().unwrap();

        assert!(json.contains("\"timestamp\""));
        assert!(json.contains("\"overall_accuracy\":0.75"));
        assert!(json.contains("\"field_accuracies\":{\"sentiment.urgency\":0.75}"));
        assert!(!json.contains('\n'));

        let parsed = AccuracyReport::from_json(&json).unwrap();
        assert_eq!(parsed, r);
    }

    #[test]
    fn test_weakest_fields() {
        let r = report(&[("a", 0.9), ("b", 0.1), ("c", 0.5)]);
        assert_eq!(r.weakest_fields(2), vec![("b", 0.1), ("c", 0.5)]);
    }

    #[test]
    fn test_batch_summary() {
        let reports = vec![
            report(&[("a", 1.0), ("b", 0.0)]),
            report(&[("a", 0.5), ("b", 1.0)]),
            report(&[("a", 1.0), ("c", 0.25)]),
        ];

        let summary = BatchSummary::compute(&reports);
        assert_eq!(summary.reports_count, 3);
        assert!((summary.field_accuracies["a"] - 2.5 / 3.0).abs() < 1e-12);
        assert!((summary.field_accuracies["b"] - 0.5).abs() < 1e-12);
        assert!((summary.field_accuracies["c"] - 0.25).abs() < 1e-12);
        assert_eq!(summary.weakest_field.as_deref(), Some("c"));
        assert!((summary.min_overall_accuracy - 0.5).abs() < 1e-12);
        assert!((summary.max_overall_accuracy - 0.75).abs() < 1e-12);
        assert!((summary.avg_overall_accuracy - (0.5 + 0.75 + 0.625) / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_batch_summary() {
        let summary = BatchSummary::compute(&[]);
        assert_eq!(summary.reports_count, 0);
        assert!(summary.weakest_field.is_none());
    }
}
