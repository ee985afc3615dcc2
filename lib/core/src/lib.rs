//! # fieldscore Core
//!
//! Core library for the fieldscore record comparator.
//!
//! This crate provides the pieces every other crate builds on:
//!
//! - [`DocumentInput`] - a record given as JSON or as (possibly CSV-quoted) JSON text
//! - [`flatten`] - nested record to dot-path map
//! - [`Error`] - the shared error type
//!
//! ## Example
//!
//! ```rust
//! use fieldscore_core::{flatten, DocumentInput};
//!
//! let doc = DocumentInput::from(r#"{"sentiment": {"urgency": "urgent"}, "tags": ["a"]}"#)
//!     .into_object("predicted")
//!     .unwrap();
//! let flat = flatten(&doc);
//! assert_eq!(flat["sentiment.urgency"], "urgent");
//! ```

pub mod document;
pub mod error;
pub mod flatten;

pub use document::{parse_json_text, unescape_csv_quoted, DocumentInput};
pub use error::{Error, Result};
pub use flatten::{flatten, join_path, FlatDocument, PATH_SEPARATOR};
