// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Whole-payload <-> whole-form conversion driven by the per-kind mapping tables
// role: codec/criteria-mapper
// inputs: EncodedPayload or FormFields plus a SearchKind
// outputs: FormFields (decode) or a complete EncodedPayload seeded from default_params (encode)
// invariants:
// - absent, null, or empty wire values never produce a form field
// - unknown wire keys and unknown semantic keys are ignored
// - a failure in one field skips only that field
// errors: Per-field failures are logged via tracing and swallowed
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashSet;

use anyhow::{bail, Result};
use serde_json::Value;

use crate::codec::{self, decode_date, DELIMITER};
use crate::kind::{SearchKind, RESULT_TYPE_KEY};
use crate::mapping::{self, MappingEntry, Multiplicity, WireEncoding};
use crate::model::{EncodedPayload, FieldValue, FormFields, Location};
use crate::params::default_params;

/// Decode every mapped wire field present in `payload`.
pub fn to_form_fields(payload: &EncodedPayload, kind: SearchKind) -> FormFields {
  let mut fields = FormFields::new();

  for entry in mapping::entries(kind) {
    let raw = match payload.get(entry.location, entry.wire_key) {
      Some(v) if !is_absent(v) => v,
      _ => continue,
    };

    match decode_entry(entry, raw) {
      Ok(Some(value)) => fields.insert(entry.semantic_key, value),
      Ok(None) => {}
      Err(e) => tracing::warn!(
        field = entry.semantic_key,
        wire_key = entry.wire_key,
        error = %e,
        "skipping undecodable criteria field"
      ),
    }
  }

  fields
}

/// Encode every populated, mapped semantic field into a complete request.
pub fn to_payload(fields: &FormFields, kind: SearchKind) -> EncodedPayload {
  let mut payload = default_params();
  payload.set(Location::TopLevel, RESULT_TYPE_KEY, Value::from(kind.result_type()));

  let mut written: HashSet<(Location, &'static str)> = HashSet::new();

  for entry in mapping::entries(kind) {
    let value = match fields.get(entry.semantic_key) {
      Some(v) if !v.is_blank() => v,
      _ => continue,
    };

    if written.contains(&(entry.location, entry.wire_key)) {
      tracing::debug!(
        field = entry.semantic_key,
        wire_key = entry.wire_key,
        "wire field already written by a primary alias"
      );
      continue;
    }

    match encode_entry(entry, value) {
      Ok(wire) => {
        payload.set(entry.location, entry.wire_key, wire);
        written.insert((entry.location, entry.wire_key));
      }
      Err(e) => tracing::warn!(
        field = entry.semantic_key,
        wire_key = entry.wire_key,
        error = %e,
        "skipping unencodable criteria field"
      ),
    }
  }

  for (key, _) in fields.iter() {
    if mapping::lookup(kind, key).is_none() {
      tracing::debug!(field = %key, ?kind, "ignoring unmapped form field");
    }
  }

  payload
}

fn is_absent(value: &Value) -> bool {
  match value {
    Value::Null => true,
    Value::String(s) => s.trim().is_empty(),
    _ => false,
  }
}

fn decode_entry(entry: &MappingEntry, raw: &Value) -> Result<Option<FieldValue>> {
  let decoded = match entry.encoding {
    WireEncoding::Tagged { tag, multiplicity } => {
      let text = match raw {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().filter_map(Value::as_str).collect::<String>(),
        other => bail!("expected a tagged string, found {}", json_kind(other)),
      };

      match (codec::decode(&text, tag), multiplicity) {
        (FieldValue::List(mut items), Multiplicity::Single) => {
          tracing::warn!(
            field = entry.semantic_key,
            groups = items.len(),
            "single-valued field carries several groups; keeping the first"
          );
          FieldValue::Text(items.remove(0))
        }
        (value, _) => value,
      }
    }
    WireEncoding::Date => match raw {
      Value::String(s) => FieldValue::Text(decode_date(s)),
      other => bail!("expected a date string, found {}", json_kind(other)),
    },
    WireEncoding::Raw => match FieldValue::from_json(raw) {
      Some(value) => value,
      None => bail!("unsupported raw value {}", json_kind(raw)),
    },
  };

  Ok(if decoded.is_blank() { None } else { Some(decoded) })
}

fn encode_entry(entry: &MappingEntry, value: &FieldValue) -> Result<Value> {
  match entry.encoding {
    WireEncoding::Tagged { tag, multiplicity } => {
      let mut values: Vec<String> = match value {
        FieldValue::Number(n) => vec![n.to_string()],
        other => other.values().into_iter().filter(|v| !v.trim().is_empty()).collect(),
      };

      if values.iter().any(|v| v.contains(DELIMITER)) {
        tracing::warn!(field = entry.semantic_key, "value contains '~' and will not round-trip");
      }

      if multiplicity == Multiplicity::Single && values.len() > 1 {
        tracing::warn!(
          field = entry.semantic_key,
          given = values.len(),
          "single-valued field given several values; encoding the first"
        );
        values.truncate(1);
      }

      Ok(Value::String(codec::encode(tag, &values)))
    }
    WireEncoding::Date => match value {
      FieldValue::Text(s) => Ok(Value::String(decode_date(s))),
      _ => bail!("date fields take a single date string"),
    },
    WireEncoding::Raw => Ok(match value {
      FieldValue::Text(s) => Value::String(s.clone()),
      FieldValue::Number(n) => Value::Number(n.clone()),
      FieldValue::List(items) => Value::from(items.clone()),
    }),
  }
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
