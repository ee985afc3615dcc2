//! Similarity functions for the different field kinds
//!
//! All functions return a similarity score in range [0.0, 1.0] where 1.0 means identical.

use ahash::AHashSet;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};

/// Seconds over which timestamp similarity decays from 1.0 to 0.0
pub const TIMESTAMP_DECAY_SECONDS: f64 = 86_400.0;

/// Exact match: 1 if equal, 0 otherwise
///
/// Numbers compare by value, so `150` and `150.0` are equal.
#[inline]
pub fn exact_similarity(a: &Value, b: &Value) -> f64 {
    if values_equal(a, b) { 1.0 } else { 0.0 }
}

/// Structural equality with numbers compared by value
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => x == y,
            _ => match (x.as_u64(), y.as_u64()) {
                (Some(x), Some(y)) => x == y,
                _ => x.as_f64() == y.as_f64(),
            },
        },
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

/// Calculate boolean similarity
#[inline]
pub fn boolean_similarity(a: bool, b: bool) -> f64 {
    if a == b { 1.0 } else { 0.0 }
}

/// Relative numeric similarity: 1 - |a - b| / max(|a|, |b|), floored at 0
pub fn number_similarity(a: f64, b: f64) -> f64 {
    let max = a.abs().max(b.abs());
    if max == 0.0 {
        return if a == b { 1.0 } else { 0.0 };
    }
    (1.0 - (a - b).abs() / max).max(0.0)
}

/// Ordinal similarity between two positions of an ordered enum
///
/// Each step of distance costs `1 / (cardinality - 1)`. A single-member enum
/// has no distance to measure and always scores 1.0.
pub fn ordinal_similarity(predicted: usize, truth: usize, cardinality: usize) -> f64 {
    if cardinality <= 1 {
        return 1.0;
    }
    let penalty_step = 1.0 / (cardinality - 1) as f64;
    let distance = predicted.abs_diff(truth) as f64;
    (1.0 - distance * penalty_step).max(0.0)
}

/// Linear decay over 24 hours of absolute time difference
pub fn timestamp_similarity(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    let diff_seconds = (a - b).num_milliseconds().unsigned_abs() as f64 / 1000.0;
    (1.0 - diff_seconds / TIMESTAMP_DECAY_SECONDS).max(0.0)
}

/// List similarity
///
/// Empty lists only match empty lists. Otherwise the lists are treated as
/// sets (duplicates collapse, order ignored) and compared by Jaccard index.
pub fn list_similarity(a: &[Value], b: &[Value]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return if a.is_empty() && b.is_empty() { 1.0 } else { 0.0 };
    }
    jaccard_similarity(a, b)
}

/// Jaccard index over list elements
///
/// Composite elements compare structurally: object keys are ordered before
/// hashing so `{"a":1,"b":2}` and `{"b":2,"a":1}` are the same element.
pub fn jaccard_similarity(a: &[Value], b: &[Value]) -> f64 {
    let set_a: AHashSet<String> = a.iter().map(canonical_key).collect();
    let set_b: AHashSet<String> = b.iter().map(canonical_key).collect();

    if set_a.is_empty() && set_b.is_empty() {
        return 1.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

/// Hashable key for a JSON value with object keys in sorted order
///
/// Whole-valued floats are written in integer form so `2.0` and `2` share a key.
pub fn canonical_key(value: &Value) -> String {
    canonicalize(value).to_string()
}

fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key.as_str()]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Value::from(f as i64),
            _ => value.clone(),
        },
        other => other.clone(),
    }
}

/// Interpret a JSON value as an absolute point in time
///
/// Accepts RFC 3339 strings, naive date-times (taken as UTC), plain dates
/// (midnight UTC) and numbers (Unix seconds).
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_timestamp_str(s.trim()),
        Value::Number(n) => {
            let seconds = n.as_f64()?;
            if !seconds.is_finite() {
                return None;
            }
            let whole = seconds.floor();
            let nanos = ((seconds - whole) * 1e9) as u32;
            DateTime::<Utc>::from_timestamp(whole as i64, nanos)
        }
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
