//! Schema descriptor definitions
//!
//! A schema descriptor is the static description of a record type: every
//! field's declared type, nested object fields, and the ordered member lists
//! of the categorical types whose order carries meaning.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// Schema descriptor for a structured record
///
/// Supplied once when a comparator is created and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SchemaDescriptor {
    /// Schema version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    /// Ordered categorical types: name -> members, lowest to highest
    #[serde(default)]
    pub enums: BTreeMap<String, Vec<String>>,

    /// Top-level fields keyed by field name
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDescriptor>,
}

fn default_version() -> u32 {
    1
}

impl SchemaDescriptor {
    /// Create a new descriptor with the given top-level fields
    pub fn new(fields: BTreeMap<String, FieldDescriptor>) -> Self {
        Self {
            version: 1,
            enums: BTreeMap::new(),
            fields,
        }
    }

    /// Add a field
    pub fn with_field(mut self, name: impl Into<String>, field: FieldDescriptor) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Declare an ordered categorical type
    pub fn with_enum<I, S>(mut self, name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enums
            .insert(name.into(), members.into_iter().map(Into::into).collect());
        self
    }

    /// Check enum declarations: at least one member, no duplicates
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (name, members) in &self.enums {
            if members.is_empty() {
                return Err(SchemaError::EmptyEnum(name.clone()));
            }
            for (i, member) in members.iter().enumerate() {
                if members[..i].contains(member) {
                    return Err(SchemaError::DuplicateEnumMember {
                        enum_name: name.clone(),
                        member: member.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Parse a descriptor from JSON, accepting either the native format or a
    /// JSON Schema document
    pub fn from_json_value(value: &Value) -> Result<Self, SchemaError> {
        if looks_like_json_schema(value) {
            return crate::json_schema::from_json_schema(value);
        }
        serde_json::from_value(value.clone()).map_err(|e| SchemaError::Parse(e.to_string()))
    }

    /// Parse a descriptor from JSON text
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| SchemaError::Parse(e.to_string()))?;
        Self::from_json_value(&value)
    }

    /// Load a descriptor from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SchemaError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }
}

fn looks_like_json_schema(value: &Value) -> bool {
    value.get("$schema").is_some()
        || value.get("properties").is_some()
        || value.get("definitions").is_some()
        || value.get("$defs").is_some()
}

/// Declared type of a single field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDescriptor {
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Name of the ordered categorical type (enum fields only)
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_name: Option<String>,

    /// Child fields (object fields only)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fields: BTreeMap<String, FieldDescriptor>,
}

impl FieldDescriptor {
    fn of(field_type: FieldType) -> Self {
        Self {
            field_type,
            enum_name: None,
            fields: BTreeMap::new(),
        }
    }

    pub fn boolean() -> Self {
        Self::of(FieldType::Boolean)
    }

    pub fn integer() -> Self {
        Self::of(FieldType::Integer)
    }

    pub fn number() -> Self {
        Self::of(FieldType::Number)
    }

    pub fn string() -> Self {
        Self::of(FieldType::String)
    }

    pub fn timestamp() -> Self {
        Self::of(FieldType::Timestamp)
    }

    /// List field; the element type is not tracked
    pub fn list() -> Self {
        Self::of(FieldType::List)
    }

    /// Nested object field
    pub fn object(fields: BTreeMap<String, FieldDescriptor>) -> Self {
        Self {
            field_type: FieldType::Object,
            enum_name: None,
            fields,
        }
    }

    /// Ordered categorical field referring to a declared enum
    pub fn ordered_enum(enum_name: impl Into<String>) -> Self {
        Self {
            field_type: FieldType::Enum,
            enum_name: Some(enum_name.into()),
            fields: BTreeMap::new(),
        }
    }
}

/// Field type enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Boolean,
    Integer,
    Number,
    String,
    Timestamp,
    List,
    Object,
    /// Ordered categorical type
    Enum,
}

/// Errors that can occur while loading or validating a schema
#[derive(Debug, Clone, thiserror::Error)]
pub enum SchemaError {
    #[error("Enum '{0}' has no members")]
    EmptyEnum(String),

    #[error("Enum '{enum_name}' lists member '{member}' more than once")]
    DuplicateEnumMember { enum_name: String, member: String },

    #[error("Unresolved schema reference '{0}'")]
    UnresolvedRef(String),

    #[error("Schema parse error: {0}")]
    Parse(String),

    #[error("Schema read error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_builder() {
        let schema = SchemaDescriptor::default()
            .with_enum("UrgencyLevel", ["standard", "urgent", "immediate", "emergency"])
            .with_field("urgency", FieldDescriptor::ordered_enum("UrgencyLevel"))
            .with_field("flexibility", FieldDescriptor::boolean());

        assert_eq!(schema.fields.len(), 2);
        assert_eq!(schema.enums["UrgencyLevel"].len(), 4);
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_empty_enum_error() {
        let schema = SchemaDescriptor::default().with_enum("Nothing", Vec::<String>::new());
        assert!(matches!(schema.validate(), Err(SchemaError::EmptyEnum(_))));
    }

    #[test]
    fn test_duplicate_member_error() {
        let schema = SchemaDescriptor::default().with_enum("Tone", ["neutral", "neutral"]);
        assert!(matches!(
            schema.validate(),
            Err(SchemaError::DuplicateEnumMember { .. })
        ));
    }

    #[test]
    fn test_native_format_parse() {
        let value = json!({
            "enums": {"Tone": ["negative", "neutral", "positive"]},
            "fields": {
                "email_id": {"type": "string"},
                "sentiment": {
                    "type": "object",
                    "fields": {
                        "overall_tone": {"type": "enum", "enum": "Tone"},
                        "satisfaction_score": {"type": "number"}
                    }
                }
            }
        });

        let schema = SchemaDescriptor::from_json_value(&value).unwrap();
        assert_eq!(schema.version, 1);
        let sentiment = &schema.fields["sentiment"];
        assert_eq!(sentiment.field_type, FieldType::Object);
        assert_eq!(
            sentiment.fields["overall_tone"].enum_name.as_deref(),
            Some("Tone")
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let schema = SchemaDescriptor::default()
            .with_enum("Tone", ["negative", "positive"])
            .with_field("tone", FieldDescriptor::ordered_enum("Tone"))
            .with_field("dates", FieldDescriptor::list());

        let text = serde_json::to_string(&schema).unwrap();
        let parsed = SchemaDescriptor::from_json_str(&text).unwrap();
        assert_eq!(schema, parsed);
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(
            &path,
            r#"{"enums": {"Urgency": ["standard", "urgent"]}, "fields": {"urgency": {"type": "enum", "enum": "Urgency"}}}"#,
        )
        .unwrap();

        let schema = SchemaDescriptor::from_path(&path).unwrap();
        assert_eq!(schema.fields["urgency"].field_type, FieldType::Enum);
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SchemaDescriptor::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SchemaError::Io(_)));
    }
}
