//! Document flattening
//!
//! Turns a nested record into a single-level map keyed by dot-path.
//! Objects are recursed into; arrays and scalars are stored whole.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Separator between path segments
pub const PATH_SEPARATOR: char = '.';

/// Flattened record: dot-path -> leaf value
pub type FlatDocument = BTreeMap<String, Value>;

/// Flatten a JSON object into dot-path keys
pub fn flatten(document: &Map<String, Value>) -> FlatDocument {
    let mut flat = FlatDocument::new();
    flatten_into(document, None, &mut flat);
    flat
}

/// Join a parent path and a key
pub fn join_path(parent: Option<&str>, key: &str) -> String {
    match parent {
        Some(parent) => {
            let mut path = String::with_capacity(parent.len() + 1 + key.len());
            path.push_str(parent);
            path.push(PATH_SEPARATOR);
            path.push_str(key);
            path
        }
        None => key.to_string(),
    }
}

fn flatten_into(map: &Map<String, Value>, parent: Option<&str>, out: &mut FlatDocument) {
    for (key, value) in map {
        let path = join_path(parent, key);
        match value {
            Value::Object(child) => flatten_into(child, Some(path.as_str()), out),
            leaf => {
                out.insert(path, leaf.clone());
            }
        }
    }
}
