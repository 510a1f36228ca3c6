// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: CLI plumbing: JSON input/output, timezone-aware "today", and man page rendering
// role: utilities/helpers
// inputs: Paths or "-" for stdio; timezone labels (local, utc, IANA); clap CommandFactory
// outputs: Parsed JSON values, pretty JSON written to stdout or files, calendar dates, man page text
// side_effects: write_json creates parent directories for file targets
// invariants:
// - "-" always means stdio
// - unknown timezone labels fall back to UTC with a warning
// errors: IO and JSON errors bubble with the offending path in context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use clap::CommandFactory;
use serde_json::Value;

/// Today's calendar date in `tz` (`local`, `utc`, or an IANA name).
pub fn today_in_tz(tz: &str) -> NaiveDate {
  date_in_tz(Utc::now(), tz)
}

pub fn date_in_tz(instant: DateTime<Utc>, tz: &str) -> NaiveDate {
  if tz.eq_ignore_ascii_case("local") {
    return instant.with_timezone(&Local).date_naive();
  }

  if tz.eq_ignore_ascii_case("utc") {
    return instant.date_naive();
  }

  match tz.parse::<Tz>() {
    Ok(zone) => instant.with_timezone(&zone).date_naive(),
    Err(_) => {
      tracing::warn!(tz, "unknown timezone; using UTC");
      instant.date_naive()
    }
  }
}

/// Read and parse JSON from `path`, or stdin when `path` is "-".
pub fn read_json(path: &str) -> Result<Value> {
  let text = if path == "-" {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
    buf
  } else {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path))?
  };

  serde_json::from_str(&text).with_context(|| format!("parsing JSON from {}", display_source(path)))
}

/// Pretty-print `value` to `out`, or stdout when `out` is "-".
pub fn write_json(out: &str, value: &Value) -> Result<()> {
  let json = serde_json::to_string_pretty(value)?;

  if out == "-" {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json).context("writing stdout")?;
    return Ok(());
  }

  if let Some(parent) = Path::new(out).parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
  }
  std::fs::write(out, format!("{}\n", json)).with_context(|| format!("writing {}", out))
}

fn display_source(path: &str) -> &str {
  if path == "-" {
    "stdin"
  } else {
    path
  }
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
