//! # fieldscore Schema
//!
//! Schema descriptors and introspection for structured record comparison.
//!
//! ## Overview
//!
//! A [`SchemaDescriptor`] declares the type of every field of a record and
//! the ordered member lists of its categorical types. [`SchemaIndex::build`]
//! walks it once and yields:
//!
//! - the kind of every dot-path (boolean, numeric, string, list, object,
//!   timestamp, ordered enum)
//! - the soft accuracy fields: ordered enum fields graded by proximity
//! - the [`EnumRegistry`] those fields point into
//!
//! Descriptors can be written by hand or imported from a JSON Schema
//! document with [`from_json_schema`].
//!
//! ## Schema Definition
//!
//! ```rust
//! use fieldscore_schema::{SchemaDescriptor, FieldDescriptor, SchemaIndex, FieldKind};
//!
//! let schema = SchemaDescriptor::default()
//!     .with_enum("UrgencyLevel", ["standard", "urgent", "immediate", "emergency"])
//!     .with_field("urgency", FieldDescriptor::ordered_enum("UrgencyLevel"))
//!     .with_field("priority_score", FieldDescriptor::number());
//!
//! let index = SchemaIndex::build(&schema).unwrap();
//! assert_eq!(index.kind("priority_score"), Some(FieldKind::Numeric));
//! assert!(index.is_soft("urgency"));
//! ```

pub mod enums;
pub mod introspect;
pub mod json_schema;
pub mod schema;

// Re-export main types
pub use enums::{EnumRegistry, OrderedEnum};
pub use introspect::{FieldKind, SchemaIndex};
pub use json_schema::from_json_schema;
pub use schema::{FieldDescriptor, FieldType, SchemaDescriptor, SchemaError};
