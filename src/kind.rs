use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::FormFields;

/// Which result set a search targets.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum SearchKind {
  #[default]
  Opportunity,
  Proposal,
}

/// Wire discriminator field.
pub const RESULT_TYPE_KEY: &str = "ResultType";

/// Semantic fields that only exist on proposal searches.
pub const PROPOSAL_ONLY_FIELDS: &[&str] = &[
  "proposalRep",
  "proposalName",
  "proposalId",
  "proposalStatus",
  "proposalApprovalStatus",
  "internalApprovalStage",
  "proposalCreatedDateFrom",
  "proposalCreatedDateTo",
  "proposalAmountFrom",
  "proposalAmountTo",
];

/// Wire keys that only carry values on proposal searches.
pub const PROPOSAL_ONLY_WIRE_KEYS: &[&str] = &[
  "ProposalRep",
  "ProposalName",
  "ProposalIDs",
  "ProposalStatus",
  "ProposalApprovalStatus",
  "InternalApprovalStage",
  "ProposalCreateDateRangeFrom",
  "ProposalCreateDateRangeTo",
  "ProposalTotalRangeFrom",
  "ProposalTotalRangeTo",
];

impl SearchKind {
  /// Value of `ResultType` on the wire.
  pub fn result_type(self) -> u8 {
    match self {
      SearchKind::Opportunity => 1,
      SearchKind::Proposal => 2,
    }
  }

  /// `2` (number or numeric string) is a proposal search; anything else is an opportunity search.
  pub fn from_result_type(value: &Value) -> SearchKind {
    let code = match value {
      Value::Number(n) => n.as_i64(),
      Value::String(s) => s.trim().parse::<i64>().ok(),
      _ => None,
    };

    if code == Some(2) {
      SearchKind::Proposal
    } else {
      SearchKind::Opportunity
    }
  }
}

/// Classify a payload or a raw form object.
///
/// An explicit `ResultType` always wins, even when stale proposal fields are also present.
pub fn resolve(data: &Value) -> SearchKind {
  data.as_object().map(resolve_map).unwrap_or_default()
}

/// [`resolve`] over an already-unwrapped JSON object.
pub fn resolve_map(data: &Map<String, Value>) -> SearchKind {
  if let Some(rt) = data.get(RESULT_TYPE_KEY).filter(|v| !v.is_null()) {
    return SearchKind::from_result_type(rt);
  }

  let has_proposal_field = PROPOSAL_ONLY_FIELDS
    .iter()
    .chain(PROPOSAL_ONLY_WIRE_KEYS)
    .any(|key| data.get(*key).map(value_is_present).unwrap_or(false));

  if has_proposal_field {
    SearchKind::Proposal
  } else {
    SearchKind::Opportunity
  }
}

/// Classify a typed form-field set by the proposal-only heuristic.
pub fn resolve_fields(fields: &FormFields) -> SearchKind {
  if PROPOSAL_ONLY_FIELDS.iter().any(|key| fields.is_populated(key)) {
    SearchKind::Proposal
  } else {
    SearchKind::Opportunity
  }
}

fn value_is_present(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::String(s) => !s.trim().is_empty(),
    Value::Array(items) => !items.is_empty(),
    _ => true,
  }
}
