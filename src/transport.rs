// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Interface to the search endpoint; encode a form, post it, restore the echoed criteria
// role: transport/seam
// inputs: FormFields + SearchKind; a caller-supplied SearchTransport
// outputs: RestoredSearch decoded from the transport's response
// side_effects: Whatever the SearchTransport implementation performs
// invariants: No HTTP client ships here; transports are injected
// errors: Transport failures propagate as anyhow errors with context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use serde_json::Value;

use crate::kind::SearchKind;
use crate::mapper::to_payload;
use crate::model::{EncodedPayload, FormFields};
use crate::restore::{restore_with_kind, RestoredSearch};

pub trait SearchTransport {
  fn post_search(&self, payload: &EncodedPayload) -> Result<Value>;
}

/// Encode `fields`, post them, and decode the criteria the endpoint echoes back.
pub fn run_search(transport: &dyn SearchTransport, fields: &FormFields, kind: SearchKind) -> Result<RestoredSearch> {
  let payload = to_payload(fields, kind);
  let response = transport
    .post_search(&payload)
    .with_context(|| format!("posting {kind:?} search"))?;

  Ok(restore_with_kind(&response, None))
}
