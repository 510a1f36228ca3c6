// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Encode/decode single wire values in the tagged `TAG=value~` micro-syntax; normalize wire dates
// role: codec/field
// inputs: Tag plus one or many string values; raw wire strings
// outputs: Tagged wire strings; FieldValue (scalar for one group, list for several)
// invariants:
// - encode of N values yields exactly N tagged groups, in call order
// - decode never returns a one-element list; zero groups fall back to stripped input
// - decode_date is idempotent on YYYY-MM-DD and returns unrecognized input unchanged
// errors: None; malformed input degrades to best-effort output
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::FieldValue;

/// Group terminator. Values containing it do not survive a round trip.
pub const DELIMITER: char = '~';

/// Match semantics of a tagged wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
  /// `SW`: starts-with text match.
  #[serde(rename = "SW")]
  StartsWith,
  /// `IE`: is-equal id match.
  #[serde(rename = "IE")]
  IsEqual,
  /// `IN`: enumerated match.
  #[serde(rename = "IN")]
  IsIn,
}

impl Tag {
  pub fn as_str(self) -> &'static str {
    match self {
      Tag::StartsWith => "SW",
      Tag::IsEqual => "IE",
      Tag::IsIn => "IN",
    }
  }

  fn pattern(self) -> &'static Regex {
    static SW: Lazy<Regex> = Lazy::new(|| Regex::new(r"SW=([^~]+)~").unwrap());
    static IE: Lazy<Regex> = Lazy::new(|| Regex::new(r"IE=([^~]+)~").unwrap());
    static IN: Lazy<Regex> = Lazy::new(|| Regex::new(r"IN=([^~]+)~").unwrap());

    match self {
      Tag::StartsWith => &*SW,
      Tag::IsEqual => &*IE,
      Tag::IsIn => &*IN,
    }
  }
}

impl fmt::Display for Tag {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Encode values as consecutive `TAG=value~` groups.
pub fn encode<S: AsRef<str>>(tag: Tag, values: &[S]) -> String {
  let mut out = String::new();

  for value in values {
    out.push_str(tag.as_str());
    out.push('=');
    out.push_str(value.as_ref());
    out.push(DELIMITER);
  }

  out
}

/// Encode a single value; identical to `encode(tag, &[value])`.
pub fn encode_one(tag: Tag, value: &str) -> String {
  encode(tag, &[value])
}

/// Decode every `TAG=value~` group for `tag`, in order of appearance.
///
/// One group yields `Text`, several yield `List`. With no group the input is returned
/// with stray tag prefixes and delimiters stripped.
pub fn decode(formatted: &str, tag: Tag) -> FieldValue {
  let mut captured: Vec<String> = tag
    .pattern()
    .captures_iter(formatted)
    .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
    .collect();

  match captured.len() {
    0 => FieldValue::Text(strip_markup(formatted)),
    1 => FieldValue::Text(captured.remove(0)),
    _ => FieldValue::List(captured),
  }
}

/// Remove any `SW=`/`IE=`/`IN=` prefixes and `~` characters.
pub fn strip_markup(raw: &str) -> String {
  static TAG_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:SW|IE|IN)=").unwrap());

  TAG_PREFIX
    .replace_all(raw, "")
    .replace(DELIMITER, "")
    .trim()
    .to_string()
}

/// Normalize a wire date to `YYYY-MM-DD`.
///
/// Timestamps keep only their (UTC) date part, `M/D/YYYY` is padded and reordered, and
/// anything else comes back unchanged.
pub fn decode_date(value: &str) -> String {
  static TIME_SEP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d[T ]\d{1,2}:\d{2}").unwrap());
  static US_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").unwrap());

  let trimmed = value.trim();

  if TIME_SEP.is_match(trimmed) {
    return parse_timestamp_date(trimmed)
      .map(|d| d.format("%Y-%m-%d").to_string())
      .unwrap_or_else(|| value.to_string());
  }

  if let Some(caps) = US_DATE.captures(trimmed) {
    let month: u32 = caps[1].parse().unwrap_or(0);
    let day: u32 = caps[2].parse().unwrap_or(0);
    let year: i32 = caps[3].parse().unwrap_or(0);

    if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
      return date.format("%Y-%m-%d").to_string();
    }
  }

  value.to_string()
}

fn parse_timestamp_date(raw: &str) -> Option<NaiveDate> {
  const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
  ];

  if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
    return Some(dt.with_timezone(&Utc).date_naive());
  }

  NAIVE_FORMATS
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    .map(|ndt| ndt.date())
}
