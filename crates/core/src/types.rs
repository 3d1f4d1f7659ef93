use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single trait value attached to a visitor or account record.
///
/// Scalars are tagged at the boundary; nested values (objects, arrays, null)
/// are carried opaquely and handed to the destination without validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Opaque(serde_json::Value),
}

/// Ordered trait map sent with identify/group calls.
pub type TraitMap = BTreeMap<String, TraitValue>;

impl TraitValue {
    /// Tag a loose JSON value. Scalars become their tagged variant; objects,
    /// arrays, and null stay opaque.
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(b) => TraitValue::Bool(b),
            serde_json::Value::Number(n) => TraitValue::Number(n),
            serde_json::Value::String(s) => TraitValue::String(s),
            other => TraitValue::Opaque(other),
        }
    }
}

impl From<&str> for TraitValue {
    fn from(value: &str) -> Self {
        TraitValue::String(value.to_string())
    }
}

impl From<String> for TraitValue {
    fn from(value: String) -> Self {
        TraitValue::String(value)
    }
}

impl From<bool> for TraitValue {
    fn from(value: bool) -> Self {
        TraitValue::Bool(value)
    }
}

impl From<i64> for TraitValue {
    fn from(value: i64) -> Self {
        TraitValue::Number(value.into())
    }
}

impl From<f64> for TraitValue {
    fn from(value: f64) -> Self {
        // NaN and infinities have no JSON representation
        match serde_json::Number::from_f64(value) {
            Some(n) => TraitValue::Number(n),
            None => TraitValue::Opaque(serde_json::Value::Null),
        }
    }
}

/// Convert a loose JSON value into a trait map. Non-object input (including
/// null) is treated as an empty map; malformed traits never error.
pub fn trait_map_from_json(value: serde_json::Value) -> TraitMap {
    match value {
        serde_json::Value::Object(fields) => fields
            .into_iter()
            .map(|(key, value)| (key, TraitValue::from_json(value)))
            .collect(),
        _ => TraitMap::new(),
    }
}

/// Merge `incoming` into `target`: same-named keys are overwritten, all other
/// keys persist.
pub fn merge_traits(target: &mut TraitMap, incoming: &TraitMap) {
    for (key, value) in incoming {
        target.insert(key.clone(), value.clone());
    }
}
