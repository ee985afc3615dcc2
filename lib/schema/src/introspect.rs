//! Schema introspection
//!
//! Walks a [`SchemaDescriptor`] once and produces the lookup tables the field
//! scorer needs: dot-path -> field kind, and the soft accuracy fields (ordered
//! enum fields whose enum is declared) linked to their registry entry.

use crate::enums::{EnumRegistry, OrderedEnum};
use crate::schema::{FieldDescriptor, FieldType, SchemaDescriptor, SchemaError};
use ahash::AHashMap;
use fieldscore_core::join_path;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Scalar kind of a flattened field
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Boolean,
    /// Integer or floating point
    Numeric,
    String,
    List,
    Object,
    Timestamp,
    OrderedEnum,
}

impl From<FieldType> for FieldKind {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Boolean => FieldKind::Boolean,
            FieldType::Integer | FieldType::Number => FieldKind::Numeric,
            FieldType::String => FieldKind::String,
            FieldType::Timestamp => FieldKind::Timestamp,
            FieldType::List => FieldKind::List,
            FieldType::Object => FieldKind::Object,
            FieldType::Enum => FieldKind::OrderedEnum,
        }
    }
}

/// Introspected schema: field kinds, soft accuracy fields and enum registry
///
/// Read-only after construction, so one index may serve any number of
/// comparisons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaIndex {
    kinds: AHashMap<String, FieldKind>,
    soft_fields: AHashMap<String, String>,
    enums: EnumRegistry,
}

impl SchemaIndex {
    /// Build the index from a descriptor
    ///
    /// An enum field whose enum is not declared is kept as a plain field and
    /// scored by exact match.
    pub fn build(schema: &SchemaDescriptor) -> Result<Self, SchemaError> {
        schema.validate()?;

        let mut index = Self {
            kinds: AHashMap::new(),
            soft_fields: AHashMap::new(),
            enums: EnumRegistry::from_declarations(&schema.enums),
        };
        index.walk(&schema.fields, None);

        debug!(
            fields = index.kinds.len(),
            soft_fields = index.soft_fields.len(),
            enums = index.enums.len(),
            "Schema introspected"
        );
        Ok(index)
    }

    fn walk(&mut self, fields: &BTreeMap<String, FieldDescriptor>, parent: Option<&str>) {
        for (name, field) in fields {
            let path = join_path(parent, name);

            if field.field_type == FieldType::Enum {
                match field.enum_name.as_deref() {
                    Some(enum_name) if self.enums.contains(enum_name) => {
                        self.soft_fields.insert(path.clone(), enum_name.to_string());
                    }
                    Some(enum_name) => {
                        warn!(path = %path, enum_name, "Enum not declared, using exact match");
                    }
                    None => {
                        warn!(path = %path, "Enum field without enum name, using exact match");
                    }
                }
            }

            if field.field_type == FieldType::Object {
                self.walk(&field.fields, Some(path.as_str()));
            }
            self.kinds.insert(path, field.field_type.into());
        }
    }

    /// Declared kind of a path, `None` if the schema does not know it
    #[inline]
    pub fn kind(&self, path: &str) -> Option<FieldKind> {
        self.kinds.get(path).copied()
    }

    /// Ordered enum backing a soft accuracy field
    #[inline]
    pub fn soft_enum(&self, path: &str) -> Option<&OrderedEnum> {
        self.soft_fields
            .get(path)
            .and_then(|name| self.enums.get(name))
    }

    pub fn is_soft(&self, path: &str) -> bool {
        self.soft_fields.contains_key(path)
    }

    pub fn enums(&self) -> &EnumRegistry {
        &self.enums
    }

    /// All known paths with their kinds, sorted by path
    pub fn field_kinds(&self) -> Vec<(&str, FieldKind)> {
        let mut kinds: Vec<_> = self.kinds.iter().map(|(p, k)| (p.as_str(), *k)).collect();
        kinds.sort_unstable_by(|a, b| a.0.cmp(b.0));
        kinds
    }

    /// Soft accuracy fields with their enum names, sorted by path
    pub fn soft_fields(&self) -> Vec<(&str, &str)> {
        let mut soft: Vec<_> = self
            .soft_fields
            .iter()
            .map(|(p, e)| (p.as_str(), e.as_str()))
            .collect();
        soft.sort_unstable();
        soft
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
