// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed filter identities (rep/product/business unit) built once at the UI boundary, and their id-string rendering
// role: boundary/filter-identity
// inputs: Raw UI JSON (scalar, object with id/value/gsEmployeesID/name, or arrays of those)
// outputs: FilterIdentity values; comma-joined numeric id strings or the "all" sentinel
// invariants:
// - shape inspection happens only in FilterIdentity::from_ui_value
// - labels never resolve to ids
// - an id string is never empty; no surviving id yields "all"
// errors: None; unresolvable entries are dropped and logged
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire sentinel meaning "no restriction".
pub const ALL_SENTINEL: &str = "all";

/// A filter selection as the UI handed it over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "raw", rename_all = "lowercase")]
pub enum FilterIdentity {
  /// An explicit identifier (`id`, `gsEmployeesID`, or a bare number).
  Id(String),
  /// A select-box value; may embed `IE=<id>~`.
  Value(String),
  /// Display text only.
  Label(String),
}

impl FilterIdentity {
  /// Classify one raw UI value. Blank strings, nulls and shapeless objects yield `None`.
  pub fn from_ui_value(value: &Value) -> Option<FilterIdentity> {
    match value {
      Value::String(s) if s.trim().is_empty() => None,
      Value::String(s) => Some(FilterIdentity::Value(s.clone())),
      Value::Number(n) => Some(FilterIdentity::Id(n.to_string())),
      Value::Object(obj) => {
        let field = |key: &str| obj.get(key).and_then(scalar_text);

        field("id")
          .map(FilterIdentity::Id)
          .or_else(|| field("value").map(FilterIdentity::Value))
          .or_else(|| field("gsEmployeesID").map(FilterIdentity::Id))
          .or_else(|| field("name").map(FilterIdentity::Label))
          .or_else(|| field("label").map(FilterIdentity::Label))
      }
      _ => None,
    }
  }

  /// Classify a scalar, object, or array of either.
  pub fn from_ui_values(value: &Value) -> Vec<FilterIdentity> {
    match value {
      Value::Array(items) => items.iter().filter_map(FilterIdentity::from_ui_value).collect(),
      other => FilterIdentity::from_ui_value(other).into_iter().collect(),
    }
  }

  /// Numeric ids carried by this identity, in order.
  pub fn numeric_ids(&self) -> Vec<String> {
    static EMBEDDED_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"IE=(\d+)~").unwrap());

    let raw = match self {
      FilterIdentity::Id(raw) | FilterIdentity::Value(raw) => raw.trim(),
      FilterIdentity::Label(_) => return Vec::new(),
    };

    let embedded: Vec<String> = EMBEDDED_ID
      .captures_iter(raw)
      .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
      .collect();

    if !embedded.is_empty() {
      return embedded;
    }

    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
      vec![raw.to_string()]
    } else {
      Vec::new()
    }
  }
}

fn scalar_text(value: &Value) -> Option<String> {
  match value {
    Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

/// Join every resolvable id with `,`; fall back to [`ALL_SENTINEL`].
pub fn join_ids(filter: &str, identities: &[FilterIdentity]) -> String {
  let ids: Vec<String> = identities.iter().flat_map(FilterIdentity::numeric_ids).collect();

  if ids.is_empty() {
    if !identities.is_empty() {
      tracing::warn!(filter, given = identities.len(), "no resolvable id in filter; using \"all\"");
    }
    return ALL_SENTINEL.to_string();
  }

  ids.join(",")
}
