//! # fieldscore
//!
//! Scores a machine-produced structured record against a human-authored
//! ground truth of the same shape.
//!
//! Given a schema describing field types and the ordered categorical types
//! of a record, fieldscore computes a similarity per field, averages them
//! into an overall accuracy, and appends the report to an append-only log.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! fieldscore compare --schema schema.json --predicted pred.json --truth truth.json
//! fieldscore batch --schema schema.json --input dataset.csv
//! fieldscore summarize --results Results.csv
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use fieldscore::prelude::*;
//! use std::sync::Arc;
//!
//! let schema = SchemaDescriptor::from_path("schema.json").unwrap();
//! let comparator = Comparator::new(&schema)
//!     .unwrap()
//!     .with_sink(Arc::new(ReportLog::new("Results.csv")));
//!
//! let report = comparator
//!     .compare(r#"{"urgency": "urgent"}"#, r#"{"urgency": "immediate"}"#)
//!     .unwrap();
//! println!("overall accuracy: {}", report.overall_accuracy);
//! ```
//!
//! ## Scoring
//!
//! | Field kind | Similarity |
//! |------------|------------|
//! | ordered enum | `1 - distance / (cardinality - 1)` |
//! | boolean | exact match |
//! | numeric | one minus the relative difference, floored at 0 |
//! | timestamp | linear decay to 0 over 24 hours |
//! | list | Jaccard index of the element sets |
//! | anything else | exact match |
//!
//! ## Crate Structure
//!
//! - [`fieldscore-core`](https://docs.rs/fieldscore-core) - document decoding, flattening, errors
//! - [`fieldscore-schema`](https://docs.rs/fieldscore-schema) - schema descriptors and introspection
//! - [`fieldscore-similarity`](https://docs.rs/fieldscore-similarity) - field scoring and aggregation
//! - [`fieldscore-storage`](https://docs.rs/fieldscore-storage) - append-only report log

// Re-export core types
pub use fieldscore_core::{
    flatten, DocumentInput, FlatDocument,
    Error, Result,
};

// Re-export schema
pub use fieldscore_schema::{
    SchemaDescriptor, FieldDescriptor, FieldType, FieldKind,
    SchemaIndex, EnumRegistry, OrderedEnum, SchemaError,
};

// Re-export similarity
pub use fieldscore_similarity::{
    Comparator, CompareError, FieldScorer,
    AccuracyReport, BatchSummary, BatchOutcome,
    ResultSink, MemorySink,
};

// Re-export storage
pub use fieldscore_storage::{ReportLog, DEFAULT_LOG_FILE};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DocumentInput, Error, Result,
        SchemaDescriptor, FieldDescriptor, FieldKind, SchemaIndex,
        Comparator, CompareError, AccuracyReport, BatchSummary,
        ResultSink, MemorySink, ReportLog,
    };
}

/// Per-kind similarity functions
pub mod distance {
    pub use fieldscore_similarity::distance::{
        boolean_similarity, exact_similarity, list_similarity, number_similarity,
        ordinal_similarity, parse_timestamp, timestamp_similarity, values_equal,
    };
}
