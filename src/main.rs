use anyhow::Result;
use clap::Parser;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use saved_search_codec::cli::{normalize, Action, Cli, EffectiveConfig};
use saved_search_codec::kind::{resolve_fields, resolve_map, SearchKind};
use saved_search_codec::model::FormFields;
use saved_search_codec::validation::{resolve_rules, validate, RequiredFieldsCache, RuleSource, SystemClock};
use saved_search_codec::{
  build_filtered_params, default_params, restore, summarize, to_payload, util,
};

fn init_tracing() {
  // stdout carries JSON only; diagnostics go to stderr.
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = tracing_subscriber::fmt()
    .with_ansi(false)
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  init_tracing();

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: run the action
  let output = run(&cfg)?;

  // Phase 3: emit
  util::write_json(&cfg.out, &output)
}

fn run(cfg: &EffectiveConfig) -> Result<Value> {
  let output = match &cfg.action {
    Action::Defaults => default_params().into_value(),
    Action::Filter(plan) => {
      let file_json = plan.file.as_deref().map(util::read_json).transpose()?;
      let filters = plan.clone().into_filters(file_json.as_ref());
      tracing::debug!(?filters, today = %cfg.today, "building filtered request");
      build_filtered_params(&filters, cfg.today).into_value()
    }
    Action::Decode { kind } => {
      let input = util::read_json(&cfg.input)?;
      match &input {
        Value::Array(responses) => serde_json::to_value(restore::restore_many(responses, *kind))?,
        single => serde_json::to_value(restore::restore_with_kind(single, *kind))?,
      }
    }
    Action::Encode { kind } => {
      let fields = read_fields(&cfg.input)?;
      let kind = kind.unwrap_or_else(|| resolve_fields(&fields));
      to_payload(&fields, kind).into_value()
    }
    Action::Summarize => {
      let fields = read_fields(&cfg.input)?;
      serde_json::to_value(summarize(&fields))?
    }
    Action::Kind => {
      let input = util::read_json(&cfg.input)?;
      let kind = restore::unwrap_response(&input)
        .map(|payload| resolve_map(payload.as_map()))
        .unwrap_or_default();
      json!({ "kind": kind })
    }
    Action::Validate { kind } => {
      let fields = read_fields(&cfg.input)?;
      let kind: SearchKind = kind.unwrap_or_else(|| resolve_fields(&fields));
      let mut cache = RequiredFieldsCache::default();
      let rules = resolve_rules(&RuleSource::Defaults, kind, &mut cache, &SystemClock);
      let issues = validate(&fields, kind, &rules);
      json!({ "kind": kind, "issues": issues })
    }
  };

  Ok(output)
}

fn read_fields(input: &str) -> Result<FormFields> {
  let value = util::read_json(input)?;
  if !value.is_object() {
    anyhow::bail!("expected a JSON object of form fields");
  }
  Ok(FormFields::from_json(&value))
}
