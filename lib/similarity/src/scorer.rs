//! Field scorer
//!
//! Scores one flattened field of a predicted record against the same field
//! of the ground truth. Dispatch order:
//!
//! 1. both absent (or null) -> 1.0, exactly one absent -> 0.0
//! 2. soft accuracy field -> ordinal distance within the enum
//! 3. declared kind: boolean, numeric, timestamp, list
//! 4. anything else -> exact match
//!
//! A value that does not fit its declared kind falls through to exact match.

use crate::distance::{
    boolean_similarity, exact_similarity, list_similarity, number_similarity, ordinal_similarity,
    parse_timestamp, timestamp_similarity, values_equal,
};
use fieldscore_schema::{FieldKind, OrderedEnum, SchemaIndex};
use serde_json::Value;

/// Type-dispatched scorer over an introspected schema
#[derive(Debug, Clone, Copy)]
pub struct FieldScorer<'a> {
    index: &'a SchemaIndex,
}

impl<'a> FieldScorer<'a> {
    pub fn new(index: &'a SchemaIndex) -> Self {
        Self { index }
    }

    /// Similarity in [0.0, 1.0] of `predicted` to `truth` at `path`
    pub fn score(&self, path: &str, predicted: Option<&Value>, truth: Option<&Value>) -> f64 {
        let (predicted, truth) = match (present(predicted), present(truth)) {
            (None, None) => return 1.0,
            (Some(p), Some(t)) => (p, t),
            _ => return 0.0,
        };

        if let Some(ordered) = self.index.soft_enum(path) {
            return soft_accuracy(ordered, predicted, truth);
        }

        match self.index.kind(path) {
            Some(FieldKind::Boolean) => match (predicted.as_bool(), truth.as_bool()) {
                (Some(p), Some(t)) => boolean_similarity(p, t),
                _ => exact_similarity(predicted, truth),
            },
            Some(FieldKind::Numeric) => match (predicted.as_f64(), truth.as_f64()) {
                (Some(p), Some(t)) => number_similarity(p, t),
                _ => exact_similarity(predicted, truth),
            },
            Some(FieldKind::Timestamp) => {
                match (parse_timestamp(predicted), parse_timestamp(truth)) {
                    (Some(p), Some(t)) => timestamp_similarity(p, t),
                    _ => exact_similarity(predicted, truth),
                }
            }
            Some(FieldKind::List) => match (predicted.as_array(), truth.as_array()) {
                (Some(p), Some(t)) => list_similarity(p, t),
                _ => exact_similarity(predicted, truth),
            },
            _ => exact_similarity(predicted, truth),
        }
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Ordinal distance scoring; values outside the enum score 0.0
fn soft_accuracy(ordered: &OrderedEnum, predicted: &Value, truth: &Value) -> f64 {
    if values_equal(predicted, truth) {
        return 1.0;
    }

    let position = |v: &Value| v.as_str().and_then(|s| ordered.position(s));
    match (position(predicted), position(truth)) {
        (Some(p), Some(t)) => ordinal_similarity(p, t, ordered.cardinality()),
        _ => 0.0,
    }
}
