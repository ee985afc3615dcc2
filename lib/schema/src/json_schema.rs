//! JSON Schema import
//!
//! Converts a JSON Schema document (as generated for a typed record model)
//! into a [`SchemaDescriptor`]. References to definitions holding an `enum`
//! array become ordered enum fields named after the definition; references
//! to object definitions are expanded in place. A definition reached again
//! while it is still being expanded becomes an object with no children.

use crate::schema::{FieldDescriptor, SchemaDescriptor, SchemaError};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// Build a descriptor from a JSON Schema document
pub fn from_json_schema(schema: &Value) -> Result<SchemaDescriptor, SchemaError> {
    let empty = Map::new();
    let definitions = schema
        .get("definitions")
        .or_else(|| schema.get("$defs"))
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let mut importer = Importer {
        definitions,
        enums: BTreeMap::new(),
        resolving: Vec::new(),
    };

    let fields = match schema.get("properties").and_then(Value::as_object) {
        Some(properties) => importer.properties(properties, None)?,
        None => BTreeMap::new(),
    };

    let descriptor = SchemaDescriptor {
        version: 1,
        enums: importer.enums,
        fields,
    };
    descriptor.validate()?;
    Ok(descriptor)
}

struct Importer<'a> {
    definitions: &'a Map<String, Value>,
    enums: BTreeMap<String, Vec<String>>,
    resolving: Vec<String>,
}

impl<'a> Importer<'a> {
    fn properties(
        &mut self,
        properties: &Map<String, Value>,
        parent: Option<&str>,
    ) -> Result<BTreeMap<String, FieldDescriptor>, SchemaError> {
        let mut fields = BTreeMap::new();
        for (name, node) in properties {
            let path = fieldscore_core::join_path(parent, name);
            fields.insert(name.clone(), self.field(node, &path, None)?);
        }
        Ok(fields)
    }

    /// Convert one schema node. `definition` is the name of the definition
    /// the node was reached through, if any.
    fn field(
        &mut self,
        node: &Value,
        path: &str,
        definition: Option<&str>,
    ) -> Result<FieldDescriptor, SchemaError> {
        if let Some(reference) = node.get("$ref").and_then(Value::as_str) {
            return self.reference(reference, path);
        }

        if let Some(first) = node
            .get("allOf")
            .and_then(Value::as_array)
            .and_then(|all| all.first())
        {
            return self.field(first, path, definition);
        }

        for combinator in ["anyOf", "oneOf"] {
            if let Some(branches) = node.get(combinator).and_then(Value::as_array) {
                if let Some(branch) = branches.iter().find(|b| !is_null_type(b)) {
                    return self.field(branch, path, definition);
                }
            }
        }

        if let Some(members) = node.get("enum").and_then(Value::as_array) {
            let enum_name = definition.unwrap_or(path).to_string();
            let members = members.iter().map(member_name).collect();
            self.enums.entry(enum_name.clone()).or_insert(members);
            return Ok(FieldDescriptor::ordered_enum(enum_name));
        }

        let declared = match node.get("type") {
            Some(Value::String(t)) => Some(t.as_str()),
            Some(Value::Array(types)) => types
                .iter()
                .filter_map(Value::as_str)
                .find(|t| *t != "null"),
            _ => None,
        };

        let field = match declared {
            Some("boolean") => FieldDescriptor::boolean(),
            Some("integer") => FieldDescriptor::integer(),
            Some("number") => FieldDescriptor::number(),
            Some("array") => FieldDescriptor::list(),
            Some("string") => match node.get("format").and_then(Value::as_str) {
                Some("date-time") | Some("date") => FieldDescriptor::timestamp(),
                _ => FieldDescriptor::string(),
            },
            Some("object") | None if node.get("properties").is_some() => {
                let properties = node
                    .get("properties")
                    .and_then(Value::as_object)
                    .map(|p| self.properties(p, Some(path)))
                    .transpose()?
                    .unwrap_or_default();
                FieldDescriptor::object(properties)
            }
            Some("object") => FieldDescriptor::object(BTreeMap::new()),
            _ => FieldDescriptor::string(),
        };
        Ok(field)
    }

    fn reference(&mut self, reference: &str, path: &str) -> Result<FieldDescriptor, SchemaError> {
        let name = reference
            .strip_prefix("#/definitions/")
            .or_else(|| reference.strip_prefix("#/$defs/"))
            .ok_or_else(|| SchemaError::UnresolvedRef(reference.to_string()))?;

        let definitions = self.definitions;
        let target = definitions
            .get(name)
            .ok_or_else(|| SchemaError::UnresolvedRef(reference.to_string()))?;

        // A definition that refers back to itself is cut off as a leaf object
        if self.resolving.iter().any(|r| r == name) {
            debug!("Recursive reference to '{}' at '{}' kept as a leaf object", name, path);
            return Ok(FieldDescriptor::object(BTreeMap::new()));
        }

        self.resolving.push(name.to_string());
        let field = self.field(target, path, Some(name));
        self.resolving.pop();
        field
    }
}

fn is_null_type(node: &Value) -> bool {
    node.get("type").and_then(Value::as_str) == Some("null")
}

fn member_name(member: &Value) -> String {
    match member {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
