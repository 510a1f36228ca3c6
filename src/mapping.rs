// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Static semantic-field <-> wire-field tables, one per search kind
// role: model/mapping
// outputs: MappingEntry iterators in table order (shared entries first, then kind-specific)
// invariants:
// - every tagged entry declares its multiplicity explicitly; nothing is inferred from the tag
// - aliases of one wire key are listed primary-first; encode lets the first populated alias win
// - semantic keys are unique within a kind's table
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use crate::codec::Tag;
use crate::kind::SearchKind;
use crate::model::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
  Single,
  Multi,
}

/// How a wire field carries its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireEncoding {
  Tagged { tag: Tag, multiplicity: Multiplicity },
  /// Plain date string, normalized to `YYYY-MM-DD` in both directions.
  Date,
  /// Untouched string, number or list.
  Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingEntry {
  pub semantic_key: &'static str,
  pub wire_key: &'static str,
  pub location: Location,
  pub encoding: WireEncoding,
}

impl MappingEntry {
  const fn top(semantic_key: &'static str, wire_key: &'static str, encoding: WireEncoding) -> Self {
    Self {
      semantic_key,
      wire_key,
      location: Location::TopLevel,
      encoding,
    }
  }

  const fn nested(self) -> Self {
    Self {
      location: Location::AdvSearch,
      ..self
    }
  }
}

const fn tagged(tag: Tag, multiplicity: Multiplicity) -> WireEncoding {
  WireEncoding::Tagged { tag, multiplicity }
}

const fn text(semantic_key: &'static str, wire_key: &'static str) -> MappingEntry {
  MappingEntry::top(semantic_key, wire_key, tagged(Tag::StartsWith, Multiplicity::Single))
}

const fn ids(semantic_key: &'static str, wire_key: &'static str) -> MappingEntry {
  MappingEntry::top(semantic_key, wire_key, tagged(Tag::IsEqual, Multiplicity::Multi))
}

const fn choice(semantic_key: &'static str, wire_key: &'static str) -> MappingEntry {
  MappingEntry::top(semantic_key, wire_key, tagged(Tag::IsIn, Multiplicity::Single))
}

const fn choices(semantic_key: &'static str, wire_key: &'static str) -> MappingEntry {
  MappingEntry::top(semantic_key, wire_key, tagged(Tag::IsIn, Multiplicity::Multi))
}

const fn date(semantic_key: &'static str, wire_key: &'static str) -> MappingEntry {
  MappingEntry::top(semantic_key, wire_key, WireEncoding::Date)
}

const fn raw(semantic_key: &'static str, wire_key: &'static str) -> MappingEntry {
  MappingEntry::top(semantic_key, wire_key, WireEncoding::Raw)
}

/// Entries present in both search kinds.
static SHARED_ENTRIES: &[MappingEntry] = &[
  text("companyName", "CustomerName"),
  text("opportunityName", "OppName"),
  ids("opportunityType", "Type"),
  ids("businessUnit", "BusinessUnit"),
  ids("product", "Products"),
  ids("assignedRep", "AssignedTo"),
  ids("stage", "Stage"),
  date("createdDateFrom", "CreatedFrom"),
  date("createdDateTo", "CreatedTo"),
  date("closeDateFrom", "CloseFrom"),
  date("projectedCloseDateFrom", "CloseFrom"),
  date("closeDateTo", "CloseTo"),
  date("projectedCloseDateTo", "CloseTo"),
  choice("status", "Status"),
];

static OPPORTUNITY_ENTRIES: &[MappingEntry] = &[
  ids("source", "Source"),
  ids("lossReason", "LossReason"),
  ids("salesPresenter", "SalesPresenter"),
  ids("createdBy", "CreatedBy"),
  date("actualCloseDateFrom", "ActualCloseFrom"),
  date("actualCloseDateTo", "ActualCloseTo"),
  choice("probability", "Probability"),
  // contact / lead criteria
  text("contactName", "ContactName").nested(),
  text("address", "Address").nested(),
  text("city", "City").nested(),
  ids("state", "State").nested(),
  text("zip", "Zip").nested(),
  text("county", "County").nested(),
  ids("country", "Country").nested(),
  text("email", "Email").nested(),
  text("phone", "Phone").nested(),
  choice("leadQuality", "LeadQuality").nested(),
  ids("leadTypes", "LeadTypes").nested(),
  ids("leadSources", "LeadSources").nested(),
  ids("prospectingStages", "ProspectingStages").nested(),
  ids("workflows", "WorkFlows").nested(),
  choices("leadStatus", "LeadStatus").nested(),
];

static PROPOSAL_ENTRIES: &[MappingEntry] = &[
  ids("proposalRep", "ProposalRep"),
  text("proposalName", "ProposalName"),
  ids("proposalId", "ProposalIDs"),
  choices("proposalStatus", "ProposalStatus"),
  choice("proposalApprovalStatus", "ProposalApprovalStatus"),
  ids("internalApprovalStage", "InternalApprovalStage"),
  date("proposalCreatedDateFrom", "ProposalCreateDateRangeFrom"),
  date("proposalCreatedDateTo", "ProposalCreateDateRangeTo"),
  raw("proposalAmountFrom", "ProposalTotalRangeFrom"),
  raw("proposalAmountTo", "ProposalTotalRangeTo"),
];

/// All entries for `kind`, shared entries first.
pub fn entries(kind: SearchKind) -> impl Iterator<Item = &'static MappingEntry> {
  let specific = match kind {
    SearchKind::Opportunity => OPPORTUNITY_ENTRIES,
    SearchKind::Proposal => PROPOSAL_ENTRIES,
  };

  SHARED_ENTRIES.iter().chain(specific.iter())
}

pub fn lookup(kind: SearchKind, semantic_key: &str) -> Option<&'static MappingEntry> {
  entries(kind).find(|e| e.semantic_key == semantic_key)
}

/// Semantic keys reading from the same wire field, primary first.
pub fn aliases(kind: SearchKind, location: Location, wire_key: &str) -> Vec<&'static str> {
  entries(kind)
    .filter(|e| e.location == location && e.wire_key == wire_key)
    .map(|e| e.semantic_key)
    .collect()
}
