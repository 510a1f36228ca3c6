// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the form-side (FormFields) and wire-side (EncodedPayload) shapes shared by the codec layers
// role: model/types
// outputs: Serializable value types with stable JSON shapes (untagged field values, transparent maps)
// invariants:
// - FieldValue serializes as a bare JSON string, array of strings, or number
// - EncodedPayload is always a JSON object; AdvSearch is created on first nested write
// - FormFields iterates in key order
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key of the nested sub-object carrying contact/lead criteria.
pub const ADV_SEARCH_KEY: &str = "AdvSearch";

/// Value of a single semantic form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
  Text(String),
  List(Vec<String>),
  Number(serde_json::Number),
}

impl FieldValue {
  pub fn as_text(&self) -> Option<&str> {
    match self {
      FieldValue::Text(s) => Some(s),
      _ => None,
    }
  }

  /// Values in order; a scalar text yields one element, numbers yield none.
  pub fn values(&self) -> Vec<String> {
    match self {
      FieldValue::Text(s) => vec![s.clone()],
      FieldValue::List(items) => items.clone(),
      FieldValue::Number(_) => Vec::new(),
    }
  }

  /// True when the value carries nothing a search could filter on.
  pub fn is_blank(&self) -> bool {
    match self {
      FieldValue::Text(s) => s.trim().is_empty(),
      FieldValue::List(items) => items.iter().all(|s| s.trim().is_empty()),
      FieldValue::Number(_) => false,
    }
  }

  /// Lenient conversion from an arbitrary UI JSON value. Nulls, booleans and objects
  /// have no form representation and yield `None`.
  pub fn from_json(value: &Value) -> Option<FieldValue> {
    match value {
      Value::String(s) => Some(FieldValue::Text(s.clone())),
      Value::Number(n) => Some(FieldValue::Number(n.clone())),
      Value::Array(items) => {
        let list: Vec<String> = items
          .iter()
          .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
          })
          .collect();
        Some(FieldValue::List(list))
      }
      _ => None,
    }
  }
}

impl From<&str> for FieldValue {
  fn from(s: &str) -> Self {
    FieldValue::Text(s.to_string())
  }
}

impl From<Vec<&str>> for FieldValue {
  fn from(items: Vec<&str>) -> Self {
    FieldValue::List(items.into_iter().map(str::to_string).collect())
  }
}

/// The flat set of semantic fields a user edits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields(BTreeMap<String, FieldValue>);

impl FormFields {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build from a UI JSON object, dropping values that have no form representation.
  pub fn from_json(value: &Value) -> FormFields {
    let mut out = FormFields::new();

    if let Some(obj) = value.as_object() {
      for (key, raw) in obj {
        match FieldValue::from_json(raw) {
          Some(v) => out.insert(key.clone(), v),
          None => tracing::debug!(field = %key, "dropping form value without a field representation"),
        }
      }
    }

    out
  }

  pub fn get(&self, key: &str) -> Option<&FieldValue> {
    self.0.get(key)
  }

  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
    self.0.insert(key.into(), value.into());
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.0.contains_key(key)
  }

  /// Present and not blank.
  pub fn is_populated(&self, key: &str) -> bool {
    self.0.get(key).map(|v| !v.is_blank()).unwrap_or(false)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
    self.0.iter()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FormFields {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut out = FormFields::new();
    for (k, v) in iter {
      out.insert(k, v);
    }
    out
  }
}

/// Where a wire field lives inside the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
  TopLevel,
  AdvSearch,
}

/// The wire object exchanged with the remote search API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedPayload(Map<String, Value>);

impl EncodedPayload {
  pub fn from_map(map: Map<String, Value>) -> Self {
    Self(map)
  }

  /// Wrap a JSON value; anything other than an object is rejected.
  pub fn from_value(value: Value) -> Option<Self> {
    match value {
      Value::Object(map) => Some(Self(map)),
      _ => None,
    }
  }

  pub fn get(&self, location: Location, key: &str) -> Option<&Value> {
    match location {
      Location::TopLevel => self.0.get(key),
      Location::AdvSearch => self.0.get(ADV_SEARCH_KEY).and_then(|adv| adv.get(key)),
    }
  }

  pub fn set(&mut self, location: Location, key: &str, value: Value) {
    match location {
      Location::TopLevel => {
        self.0.insert(key.to_string(), value);
      }
      Location::AdvSearch => {
        let adv = self
          .0
          .entry(ADV_SEARCH_KEY)
          .or_insert_with(|| Value::Object(Map::new()));

        if !adv.is_object() {
          tracing::warn!("replacing non-object AdvSearch value before nested write");
          *adv = Value::Object(Map::new());
        }

        if let Value::Object(map) = adv {
          map.insert(key.to_string(), value);
        }
      }
    }
  }

  pub fn as_map(&self) -> &Map<String, Value> {
    &self.0
  }

  pub fn into_value(self) -> Value {
    Value::Object(self.0)
  }
}
