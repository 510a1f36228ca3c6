use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{FieldValue, FormFields};

/// Human-readable description of the active criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSummary {
  pub count: usize,
  pub summary: String,
  pub has_criteria: bool,
}

impl fmt::Display for SearchSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.has_criteria {
      write!(f, "{} criteria active: {}", self.count, self.summary)
    } else {
      f.write_str("No criteria active")
    }
  }
}

/// Summarize text-valued criteria. List and numeric values are not described.
pub fn summarize(fields: &FormFields) -> SearchSummary {
  let entries: Vec<String> = fields
    .iter()
    .filter_map(|(key, value)| match value {
      FieldValue::Text(s) if !s.trim().is_empty() => Some(format!("{}: {}", humanize_key(key), s.trim())),
      _ => None,
    })
    .collect();

  SearchSummary {
    count: entries.len(),
    summary: entries.join(", "),
    has_criteria: !entries.is_empty(),
  }
}

/// `companyName` -> `Company Name`.
pub fn humanize_key(key: &str) -> String {
  let mut out = String::with_capacity(key.len() + 4);

  for (i, c) in key.chars().enumerate() {
    if i == 0 {
      out.extend(c.to_uppercase());
    } else {
      if c.is_uppercase() {
        out.push(' ');
      }
      out.push(c);
    }
  }

  out
}
