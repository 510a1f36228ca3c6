use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identity::FilterIdentity;
use crate::kind::SearchKind;
use crate::params::ReportFilters;
use crate::util;
use crate::window::{DateRange, Period};

#[derive(Parser, Debug)]
#[command(
    name = "saved-search",
    version,
    about = "Encode, decode and summarize saved-search criteria payloads",
    long_about = None
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,

  /// JSON input file ("-" reads stdin)
  #[arg(long, global = true, default_value = "-")]
  pub input: String,

  /// JSON output file ("-" writes stdout)
  #[arg(long, global = true, default_value = "-")]
  pub out: String,

  /// Timezone used to decide "today" for report periods: local, utc, or an IANA name
  #[arg(long, global = true, default_value = "local")]
  pub tz: String,

  /// Override "today" as YYYY-MM-DD (hidden; tests only)
  #[arg(long = "today-override", global = true, hide = true)]
  pub today_override: Option<String>,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Restore form criteria from a saved-search payload, API response, or an array of them
  Decode {
    /// Skip kind resolution and decode with this table
    #[arg(long, value_enum)]
    kind: Option<SearchKind>,
  },
  /// Encode form criteria into a complete search request
  Encode {
    /// Search kind (default: resolved from the fields)
    #[arg(long, value_enum)]
    kind: Option<SearchKind>,
  },
  /// Print the default search request
  Defaults,
  /// Build a filtered report request from flags and/or a UI filter JSON file
  Filter(FilterArgs),
  /// Describe the active text criteria
  Summarize,
  /// Classify a payload or form as an opportunity or proposal search
  Kind,
  /// Check form criteria for missing required fields and inverted date ranges
  Validate {
    #[arg(long, value_enum)]
    kind: Option<SearchKind>,
  },
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
  /// Report period, e.g. thisMonth, last30Days, custom, or a phrase like "last tuesday"
  #[arg(long)]
  pub period: Option<String>,

  /// Custom range start; must be paired with --to
  #[arg(long, alias = "start")]
  pub from: Option<String>,

  /// Custom range end (inclusive); must be paired with --from
  #[arg(long, alias = "end")]
  pub to: Option<String>,

  /// Rep id or select value (repeatable)
  #[arg(long)]
  pub rep: Vec<String>,

  /// Product id or select value (repeatable)
  #[arg(long)]
  pub product: Vec<String>,

  /// Business unit id or select value (repeatable)
  #[arg(long)]
  pub business_unit: Vec<String>,

  /// JSON file of raw UI filter values (period, customRange, rep, product, businessUnit)
  #[arg(long)]
  pub filters: Option<String>,

  /// Session user id assigned when no rep filter is given
  #[arg(long)]
  pub current_user: Option<String>,
}

/// Filter flags after validation; applied over the optional filter file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterPlan {
  pub file: Option<String>,
  pub period: Option<Period>,
  pub custom_range: Option<DateRange>,
  pub rep: Option<Vec<FilterIdentity>>,
  pub product: Option<Vec<FilterIdentity>>,
  pub business_unit: Option<Vec<FilterIdentity>>,
  pub current_user: Option<String>,
}

impl FilterPlan {
  /// Merge flags over the UI filter JSON; flags win where given.
  pub fn into_filters(self, file_json: Option<&Value>) -> ReportFilters {
    let mut filters = file_json.map(ReportFilters::from_ui_json).unwrap_or_default();

    if let Some(period) = self.period {
      filters.period = period;
    }
    if self.custom_range.is_some() {
      filters.custom_range = self.custom_range;
    }
    if self.rep.is_some() {
      filters.rep = self.rep;
    }
    if self.product.is_some() {
      filters.product = self.product;
    }
    if self.business_unit.is_some() {
      filters.business_unit = self.business_unit;
    }
    filters.default_assignee = self.current_user;

    filters
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
  Decode { kind: Option<SearchKind> },
  Encode { kind: Option<SearchKind> },
  Defaults,
  Filter(FilterPlan),
  Summarize,
  Kind,
  Validate { kind: Option<SearchKind> },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub action: Action,
  pub input: String,
  pub out: String,
  pub today: NaiveDate,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let today = match cli.today_override.as_deref() {
    Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
      .with_context(|| format!("--today-override must be YYYY-MM-DD, got {:?}", s))?,
    None => util::today_in_tz(&cli.tz),
  };

  let action = match cli.command {
    None => bail!("Provide a subcommand: decode, encode, defaults, filter, summarize, kind, or validate"),
    Some(Command::Decode { kind }) => Action::Decode { kind },
    Some(Command::Encode { kind }) => Action::Encode { kind },
    Some(Command::Defaults) => Action::Defaults,
    Some(Command::Filter(args)) => Action::Filter(filter_plan(args)?),
    Some(Command::Summarize) => Action::Summarize,
    Some(Command::Kind) => Action::Kind,
    Some(Command::Validate { kind }) => Action::Validate { kind },
  };

  Ok(EffectiveConfig {
    action,
    input: cli.input,
    out: cli.out,
    today,
  })
}

fn filter_plan(args: FilterArgs) -> Result<FilterPlan> {
  let period = args.period.as_deref().map(|p| p.parse::<Period>().unwrap_or_default());

  let custom_range = match (args.from, args.to) {
    (Some(from), Some(to)) => Some(DateRange { from, to }),
    (None, None) => None,
    _ => bail!("--from and --to must be given together"),
  };

  let period = match (period, &custom_range) {
    (None, Some(_)) => Some(Period::Custom),
    (Some(p), Some(_)) if p != Period::Custom => {
      bail!("--from/--to only apply to the custom period; drop --period or use --period custom")
    }
    (p, _) => p,
  };

  let identities = |raw: Vec<String>| -> Option<Vec<FilterIdentity>> {
    if raw.is_empty() {
      None
    } else {
      Some(raw.into_iter().map(FilterIdentity::Value).collect())
    }
  };

  Ok(FilterPlan {
    file: args.filters,
    period,
    custom_range,
    rep: identities(args.rep),
    product: identities(args.product),
    business_unit: identities(args.business_unit),
    current_user: args.current_user.filter(|u| !u.trim().is_empty()),
  })
}
