// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Reopen saved searches: unwrap API responses, resolve the search kind, decode criteria
// role: codec/restore
// inputs: Raw API response JSON (bare payload, {content:{Data}}, {Data}, or string-encoded Data)
// outputs: RestoredSearch { kind, fields }; batches restored in parallel, input order kept
// invariants:
// - never fails: an undecodable response restores as an empty opportunity search
// - an explicit kind override skips resolution but not unwrapping
// errors: Logged via tracing at the response boundary and swallowed
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ext::serde_json::JsonFetch;
use crate::kind::{resolve_map, SearchKind};
use crate::mapper::to_form_fields;
use crate::model::{EncodedPayload, FormFields};

/// Where API responses may carry the payload, most specific first. The empty path is the bare payload.
const PAYLOAD_PATHS: &[&str] = &["content.Data", "Data", ""];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestoredSearch {
  pub kind: SearchKind,
  pub fields: FormFields,
}

/// Extract the search payload from an API response.
pub fn unwrap_response(response: &Value) -> Result<EncodedPayload> {
  response
    .fetch_first(PAYLOAD_PATHS)
    .object_lenient()
    .context("unwrapping search payload from response")?
    .map(EncodedPayload::from_map)
    .context("response carries no search payload")
}

/// Restore a saved search, resolving its kind from the payload.
pub fn restore_saved_search(response: &Value) -> RestoredSearch {
  restore_with_kind(response, None)
}

/// Restore a saved search; `kind` overrides resolution when given.
pub fn restore_with_kind(response: &Value, kind: Option<SearchKind>) -> RestoredSearch {
  match unwrap_response(response) {
    Ok(payload) => {
      let kind = kind.unwrap_or_else(|| resolve_map(payload.as_map()));
      RestoredSearch {
        kind,
        fields: to_form_fields(&payload, kind),
      }
    }
    Err(e) => {
      tracing::warn!(error = %format!("{e:#}"), "could not restore saved search; returning empty criteria");
      RestoredSearch::default()
    }
  }
}

/// Restore many saved searches in parallel.
pub fn restore_many(responses: &[Value], kind: Option<SearchKind>) -> Vec<RestoredSearch> {
  responses.par_iter().map(|r| restore_with_kind(r, kind)).collect()
}
