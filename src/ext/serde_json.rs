// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path lookup into API responses and lenient unwrapping of JSON-string-encoded objects
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper (typed extraction, object decoding)
// invariants: No panics; missing paths yield an empty fetch; the empty path addresses the root
// errors: object_lenient surfaces unparsable or non-object JSON strings as anyhow errors
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A possibly-missing location inside a JSON document.
pub struct JsonFetched<'a> {
  inner: Option<&'a Value>,
}

impl<'a> JsonFetched<'a> {
  pub fn value(&self) -> Option<&'a Value> {
    self.inner
  }

  /// Deserialize the fetched value as `T`.
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.inner.and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  /// The fetched value as an object, parsing it first when it is a JSON string.
  ///
  /// Missing and `null` locations yield `Ok(None)`.
  pub fn object_lenient(&self) -> Result<Option<Map<String, Value>>> {
    match self.inner {
      None | Some(Value::Null) => Ok(None),
      Some(Value::Object(map)) => Ok(Some(map.clone())),
      Some(Value::String(s)) => {
        let parsed: Value = serde_json::from_str(s).context("parsing string-encoded JSON object")?;
        match parsed {
          Value::Object(map) => Ok(Some(map)),
          other => bail!("string-encoded JSON is not an object: {}", other),
        }
      }
      Some(other) => bail!("expected an object, found {}", other),
    }
  }
}

/// Fetch nested values via dotted paths like "content.Data".
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;

  /// First path that resolves to a non-null value.
  fn fetch_first(&self, paths: &[&str]) -> JsonFetched<'_> {
    for path in paths {
      let fetched = self.fetch(path);
      if fetched.value().map(|v| !v.is_null()).unwrap_or(false) {
        return fetched;
      }
    }
    JsonFetched { inner: None }
  }
}

impl JsonFetch for Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let mut cur = self;

    for key in path.split('.') {
      match cur.get(key) {
        Some(next) => cur = next,
        None => return JsonFetched { inner: None },
      }
    }

    JsonFetched { inner: Some(cur) }
  }
}
