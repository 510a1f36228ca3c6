// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Check form criteria against per-kind required-field rules and date-range ordering
// role: validation
// inputs: FormFields, SearchKind, a RuleSource (hardcoded defaults or a fetching RuleProvider)
// outputs: RuleSet per kind; Vec<ValidationIssue> from a single evaluator
// side_effects: RuleProvider calls only; results memoized in a caller-owned RequiredFieldsCache
// invariants:
// - cache expiry is measured with the injected Clock, never read from process-wide state
// - provider failures fall back to the default rules and are logged
// errors: Provider errors are swallowed here; validation itself cannot fail
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::decode_date;
use crate::kind::SearchKind;
use crate::model::FormFields;

/// How long fetched rules stay fresh.
pub const REQUIRED_FIELDS_TTL_SECS: i64 = 5 * 60;

// --- Clock seam ---
pub trait Clock {
  fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    self.0
  }
}

// --- Rule sources ---
pub trait RuleProvider {
  fn fetch_required_fields(&self, kind: SearchKind) -> Result<Vec<String>>;
}

pub enum RuleSource<'a> {
  Defaults,
  Fetched(&'a dyn RuleProvider),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
  pub required: Vec<String>,
}

impl RuleSet {
  pub fn defaults(kind: SearchKind) -> RuleSet {
    let required: &[&str] = match kind {
      SearchKind::Opportunity => &["createdDateFrom", "createdDateTo"],
      SearchKind::Proposal => &["proposalCreatedDateFrom", "proposalCreatedDateTo"],
    };
    RuleSet {
      required: required.iter().map(|s| s.to_string()).collect(),
    }
  }
}

#[derive(Debug, Clone)]
struct CachedRules {
  kind: SearchKind,
  required: Vec<String>,
  stored_at: DateTime<Utc>,
}

/// Single-slot memo of fetched required fields.
#[derive(Debug, Clone)]
pub struct RequiredFieldsCache {
  entry: Option<CachedRules>,
  ttl: Duration,
}

impl Default for RequiredFieldsCache {
  fn default() -> Self {
    Self::with_ttl(Duration::seconds(REQUIRED_FIELDS_TTL_SECS))
  }
}

impl RequiredFieldsCache {
  pub fn with_ttl(ttl: Duration) -> Self {
    Self { entry: None, ttl }
  }

  /// Fresh rules for `kind`, if any.
  pub fn get(&self, kind: SearchKind, now: DateTime<Utc>) -> Option<&[String]> {
    self
      .entry
      .as_ref()
      .filter(|e| e.kind == kind && now - e.stored_at < self.ttl)
      .map(|e| e.required.as_slice())
  }

  pub fn store(&mut self, kind: SearchKind, required: Vec<String>, now: DateTime<Utc>) {
    self.entry = Some(CachedRules {
      kind,
      required,
      stored_at: now,
    });
  }
}

/// Produce the rule table for `kind` from `source`.
pub fn resolve_rules(
  source: &RuleSource<'_>,
  kind: SearchKind,
  cache: &mut RequiredFieldsCache,
  clock: &dyn Clock,
) -> RuleSet {
  let provider = match source {
    RuleSource::Defaults => return RuleSet::defaults(kind),
    RuleSource::Fetched(provider) => *provider,
  };

  let now = clock.now();

  if let Some(required) = cache.get(kind, now) {
    return RuleSet {
      required: required.to_vec(),
    };
  }

  match provider.fetch_required_fields(kind) {
    Ok(required) => {
      cache.store(kind, required.clone(), now);
      RuleSet { required }
    }
    Err(e) => {
      tracing::warn!(?kind, error = %format!("{e:#}"), "fetching required fields failed; using defaults");
      RuleSet::defaults(kind)
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ValidationIssue {
  MissingRequired {
    field: String,
  },
  InvertedRange {
    from_field: String,
    to_field: String,
    from: String,
    to: String,
  },
}

/// Evaluate `fields` against `rules`. An empty result means the form is valid.
pub fn validate(fields: &FormFields, kind: SearchKind, rules: &RuleSet) -> Vec<ValidationIssue> {
  let mut issues: Vec<ValidationIssue> = rules
    .required
    .iter()
    .filter(|field| !fields.is_populated(field))
    .map(|field| ValidationIssue::MissingRequired { field: field.clone() })
    .collect();

  for (key, value) in fields.iter() {
    let Some(stem) = key.strip_suffix("From") else { continue };
    let to_key = format!("{stem}To");

    let (Some(from), Some(to)) = (value.as_text(), fields.get(&to_key).and_then(|v| v.as_text())) else {
      continue;
    };

    let from = decode_date(from);
    let to = decode_date(to);

    if let (Some(f), Some(t)) = (parse_day(&from), parse_day(&to)) {
      if f > t {
        issues.push(ValidationIssue::InvertedRange {
          from_field: key.clone(),
          to_field: to_key,
          from,
          to,
        });
      }
    }
  }

  tracing::debug!(?kind, issues = issues.len(), "validated criteria");
  issues
}

fn parse_day(s: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
