//! # fieldscore Similarity
//!
//! A schema-driven comparator for structured records.
//!
//! This crate scores a machine-produced record against a human-authored
//! ground truth of the same shape, field by field, and aggregates the result
//! into an [`AccuracyReport`].
//!
//! ## Features
//!
//! - **Type-dispatched scoring**: exact match, relative numeric distance,
//!   ordinal distance for ordered enums, Jaccard for lists, 24h decay for
//!   timestamps
//! - **Graceful degradation**: wrong values, wrong types and missing fields
//!   lower a field's score instead of failing the comparison
//! - **Pluggable sinks**: every report can be appended to a [`ResultSink`]
//!
//! ## Example
//!
//! ```rust
//! use fieldscore_schema::{SchemaDescriptor, FieldDescriptor};
//! use fieldscore_similarity::Comparator;
//! use serde_json::json;
//!
//! let schema = SchemaDescriptor::default()
//!     .with_enum("SentimentLevel", ["very_negative", "negative", "neutral", "positive", "very_positive"])
//!     .with_field("tone", FieldDescriptor::ordered_enum("SentimentLevel"))
//!     .with_field("amount", FieldDescriptor::number());
//!
//! let comparator = Comparator::new(&schema).unwrap();
//! let report = comparator
//!     .evaluate(json!({"tone": "neutral", "amount": 80.0}), json!({"tone": "very_positive", "amount": 100.0}))
//!     .unwrap();
//!
//! assert!((report.field_accuracies["tone"] - 0.5).abs() < 1e-9);
//! assert!((report.field_accuracies["amount"] - 0.8).abs() < 1e-9);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Schema    │────>│ SchemaIndex │────>│ FieldScorer │
//! │ (descriptor)│     │ (kinds/enum)│     │ (per path)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ predicted + │────>│  Flatten    │────>│ Comparator  │
//! │ ground truth│     │ (dot-paths) │     │ (aggregate) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                         ┌─────────────┐
//!                                         │ ResultSink  │
//!                                         │ (append)    │
//!                                         └─────────────┘
//! ```

pub mod compare;
pub mod distance;
pub mod report;
pub mod scorer;
pub mod sink;

// Re-export main types for convenience
pub use compare::{BatchFailure, BatchOutcome, CompareError, Comparator};
pub use report::{AccuracyReport, BatchSummary};
pub use scorer::FieldScorer;
pub use sink::{MemorySink, ResultSink};
