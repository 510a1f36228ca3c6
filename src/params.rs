// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Build the complete default search request and merge report filters (period, rep, product, business unit) into it
// role: params/builder
// inputs: ReportFilters (typed identities, period, optional custom range), today's date
// outputs: Fresh EncodedPayload values; never mutates inputs
// invariants:
// - default_params() carries every top-level key and every AdvSearch key; no key is ever omitted
// - filter ids are comma-joined numeric strings or "all"
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::identity::{join_ids, FilterIdentity, ALL_SENTINEL};
use crate::model::{EncodedPayload, Location, ADV_SEARCH_KEY};
use crate::window::{resolve_period, DateRange, Period};

pub const DEFAULT_PAGE_SIZE: i64 = 1000;

/// Default wire value for one request key.
#[derive(Debug, Clone, Copy)]
enum WireDefault {
  Empty,
  Null,
  Flag,
  /// `-1` tri-state: any / no / yes.
  AnyFlag,
  Int(i64),
  Str(&'static str),
}

impl WireDefault {
  fn to_value(self) -> Value {
    match self {
      WireDefault::Empty => Value::String(String::new()),
      WireDefault::Null => Value::Null,
      WireDefault::Flag => Value::Bool(false),
      WireDefault::AnyFlag => Value::from(-1),
      WireDefault::Int(n) => Value::from(n),
      WireDefault::Str(s) => Value::String(s.to_string()),
    }
  }
}

use WireDefault::{AnyFlag, Empty, Flag, Int, Null, Str};

static TOP_LEVEL_DEFAULTS: &[(&str, WireDefault)] = &[
  ("CustomerName", Empty),
  ("OppName", Empty),
  ("Type", Empty),
  ("BusinessUnit", Empty),
  ("Source", Empty),
  ("Products", Empty),
  ("LossReason", Empty),
  ("AssignedTo", Empty),
  ("SalesPresenter", Empty),
  ("Stage", Empty),
  ("CreatedBy", Empty),
  ("CreatedFrom", Empty),
  ("CreatedTo", Empty),
  ("CloseFrom", Empty),
  ("CloseTo", Empty),
  ("ActualCloseFrom", Empty),
  ("ActualCloseTo", Empty),
  ("Status", Empty),
  ("Probability", Empty),
  ("ResultType", Int(1)),
  ("ProposalRep", Empty),
  ("ProposalName", Empty),
  ("ProposalStatus", Empty),
  ("ProposalIDs", Empty),
  ("ProposalApprovalStatus", Empty),
  ("ProposalCreateDateRangeFrom", Empty),
  ("ProposalCreateDateRangeTo", Empty),
  ("ProposalTotalRangeFrom", Null),
  ("ProposalTotalRangeTo", Null),
  ("InternalApprovalStage", Empty),
  ("SavedSearchID", Int(0)),
  ("SearchName", Empty),
  ("PageSize", Int(DEFAULT_PAGE_SIZE)),
  ("CurPage", Int(1)),
  ("SortBy", Empty),
  ("SortDirection", Str("desc")),
];

static ADV_SEARCH_DEFAULTS: &[(&str, WireDefault)] = &[
  // contact
  ("ContactName", Empty),
  ("FirstName", Empty),
  ("LastName", Empty),
  ("Title", Empty),
  ("Department", Empty),
  ("Email", Empty),
  ("Phone", Empty),
  ("Mobile", Empty),
  ("Fax", Empty),
  ("Website", Empty),
  ("ContactID", Int(-1)),
  ("IsPrimaryContact", Flag),
  ("HasEmail", AnyFlag),
  ("HasPhone", AnyFlag),
  ("DoNotEmail", AnyFlag),
  ("DoNotCall", AnyFlag),
  // address
  ("Address", Empty),
  ("Address2", Empty),
  ("City", Empty),
  ("State", Empty),
  ("Zip", Empty),
  ("County", Empty),
  ("Country", Empty),
  ("Territory", Empty),
  ("Region", Empty),
  // company
  ("CompanyType", Empty),
  ("Industry", Empty),
  ("ParentCompanyID", Int(0)),
  ("IsActive", AnyFlag),
  ("IncludeInactive", Flag),
  ("IncludeArchived", Flag),
  // lead
  ("LeadQuality", Empty),
  ("LeadTypes", Empty),
  ("LeadSources", Empty),
  ("LeadStatus", Empty),
  ("ProspectingStages", Empty),
  ("WorkFlows", Empty),
  ("CampaignID", Int(0)),
  ("SourceCampaign", Empty),
  ("Tags", Empty),
  ("MatchAllTags", Flag),
  // activity
  ("ActivityTypes", Empty),
  ("HasActivity", AnyFlag),
  ("LastActivityFrom", Empty),
  ("LastActivityTo", Empty),
  ("NextActivityFrom", Empty),
  ("NextActivityTo", Empty),
  // ownership
  ("OwnerID", Int(0)),
  ("AssignedTeamID", Int(0)),
  ("CreatedByID", Int(0)),
];

/// Every top-level key the API expects (excluding `AdvSearch`).
pub fn top_level_keys() -> impl Iterator<Item = &'static str> {
  TOP_LEVEL_DEFAULTS.iter().map(|(k, _)| *k)
}

/// Every key of the nested `AdvSearch` object.
pub fn adv_search_keys() -> impl Iterator<Item = &'static str> {
  ADV_SEARCH_DEFAULTS.iter().map(|(k, _)| *k)
}

fn defaults_map(table: &[(&str, WireDefault)]) -> Map<String, Value> {
  table.iter().map(|(k, d)| (k.to_string(), d.to_value())).collect()
}

/// The complete request baseline the API requires on every call.
pub fn default_params() -> EncodedPayload {
  let mut map = defaults_map(TOP_LEVEL_DEFAULTS);
  map.insert(ADV_SEARCH_KEY.to_string(), Value::Object(defaults_map(ADV_SEARCH_DEFAULTS)));
  EncodedPayload::from_map(map)
}

/// Report filters as handed over by the UI boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportFilters {
  #[serde(default)]
  pub period: Period,
  #[serde(default)]
  pub custom_range: Option<DateRange>,
  /// `None` means no rep filter was set at all.
  #[serde(default)]
  pub rep: Option<Vec<FilterIdentity>>,
  #[serde(default)]
  pub product: Option<Vec<FilterIdentity>>,
  #[serde(default)]
  pub business_unit: Option<Vec<FilterIdentity>>,
  /// Session user applied when no rep filter is set.
  #[serde(default)]
  pub default_assignee: Option<String>,
}

impl ReportFilters {
  /// Build from a raw UI JSON object (`period`, `customRange`, `rep`, `product`,
  /// `businessUnit`); identities are classified here, once.
  pub fn from_ui_json(value: &Value) -> ReportFilters {
    let identities = |key: &str| value.get(key).filter(|v| !v.is_null()).map(FilterIdentity::from_ui_values);

    let custom_range = value.get("customRange").and_then(|r| {
      let from = r.get("from").or_else(|| r.get("start")).and_then(Value::as_str)?;
      let to = r.get("to").or_else(|| r.get("end")).and_then(Value::as_str)?;
      Some(DateRange {
        from: from.to_string(),
        to: to.to_string(),
      })
    });

    ReportFilters {
      period: value
        .get("period")
        .and_then(Value::as_str)
        .map(|p| p.parse::<Period>().unwrap_or_default())
        .unwrap_or_default(),
      custom_range,
      rep: identities("rep"),
      product: identities("product"),
      business_unit: identities("businessUnit"),
      default_assignee: None,
    }
  }
}

/// Default request with created dates, assignee, products and business units filled in.
pub fn build_filtered_params(filters: &ReportFilters, today: NaiveDate) -> EncodedPayload {
  let mut payload = default_params();

  if let Some(range) = resolve_period(&filters.period, filters.custom_range.as_ref(), today) {
    payload.set(Location::TopLevel, "CreatedFrom", Value::String(range.from));
    payload.set(Location::TopLevel, "CreatedTo", Value::String(range.to));
  }

  let assigned = match &filters.rep {
    Some(reps) => join_ids("rep", reps),
    None => filters
      .default_assignee
      .as_deref()
      .map(str::trim)
      .filter(|id| !id.is_empty())
      .map(str::to_string)
      .unwrap_or_else(|| ALL_SENTINEL.to_string()),
  };
  payload.set(Location::TopLevel, "AssignedTo", Value::String(assigned));

  let products = filters.product.as_deref().map(|p| join_ids("product", p));
  payload.set(
    Location::TopLevel,
    "Products",
    Value::String(products.unwrap_or_else(|| ALL_SENTINEL.to_string())),
  );

  let units = filters.business_unit.as_deref().map(|b| join_ids("businessUnit", b));
  payload.set(
    Location::TopLevel,
    "BusinessUnit",
    Value::String(units.unwrap_or_else(|| ALL_SENTINEL.to_string())),
  );

  payload
}
