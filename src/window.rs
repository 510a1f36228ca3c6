use std::convert::Infallible;
use std::str::FromStr;

use chrono::{Datelike, Days, Duration, Months, NaiveDate};
use chrono_english::{parse_duration, Interval};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use two_timer::parse as parse_natural;

use crate::codec::decode_date;

// Report periods resolve to inclusive created-date bounds.

#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
pub enum Period {
  #[default]
  All,
  Today,
  Yesterday,
  ThisWeek,
  LastWeek,
  ThisMonth,
  LastMonth,
  ThisQuarter,
  LastQuarter,
  ThisYear,
  LastYear,
  LastDays(u32),
  Custom,
  /// Anything else; handed to the natural-language parsers.
  Phrase(String),
}

impl FromStr for Period {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    static LAST_DAYS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^last(\d+)days?$").unwrap());

    let compact: String = s
      .trim()
      .chars()
      .filter(|c| !matches!(c, ' ' | '_' | '-'))
      .collect::<String>()
      .to_lowercase();

    let period = match compact.as_str() {
      "" | "all" | "alltime" => Period::All,
      "today" => Period::Today,
      "yesterday" => Period::Yesterday,
      "thisweek" => Period::ThisWeek,
      "lastweek" => Period::LastWeek,
      "thismonth" => Period::ThisMonth,
      "lastmonth" => Period::LastMonth,
      "thisquarter" => Period::ThisQuarter,
      "lastquarter" => Period::LastQuarter,
      "thisyear" => Period::ThisYear,
      "lastyear" => Period::LastYear,
      "custom" => Period::Custom,
      other => match LAST_DAYS.captures(other).and_then(|c| c[1].parse::<u32>().ok()) {
        Some(n) => Period::LastDays(n),
        None => Period::Phrase(s.trim().to_string()),
      },
    };

    Ok(period)
  }
}

/// Inclusive date bounds as wire strings.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct DateRange {
  pub from: String,
  pub to: String,
}

impl DateRange {
  fn between(from: NaiveDate, to: NaiveDate) -> Self {
    Self {
      from: from.format("%Y-%m-%d").to_string(),
      to: to.format("%Y-%m-%d").to_string(),
    }
  }
}

/// Resolve a period against `today`. `None` means "no date restriction".
pub fn resolve_period(period: &Period, custom: Option<&DateRange>, today: NaiveDate) -> Option<DateRange> {
  let (from, to) = match period {
    Period::All => return None,
    Period::Custom => {
      return match custom {
        Some(range) => Some(DateRange {
          from: decode_date(&range.from),
          to: decode_date(&range.to),
        }),
        None => {
          tracing::warn!("custom period without a custom range; leaving created dates empty");
          None
        }
      };
    }
    Period::Phrase(phrase) => return phrase_range(phrase, today),
    Period::Today => (today, today),
    Period::Yesterday => {
      let y = today - Duration::days(1);
      (y, y)
    }
    Period::ThisWeek => (start_of_week(today), today),
    Period::LastWeek => {
      let this_week = start_of_week(today);
      (this_week - Duration::days(7), this_week - Duration::days(1))
    }
    Period::ThisMonth => (first_of_month(today), today),
    Period::LastMonth => {
      let this_month = first_of_month(today);
      let last_day = this_month - Duration::days(1);
      (first_of_month(last_day), last_day)
    }
    Period::ThisQuarter => (first_of_quarter(today), today),
    Period::LastQuarter => {
      let this_quarter = first_of_quarter(today);
      let last_day = this_quarter - Duration::days(1);
      (first_of_quarter(last_day), last_day)
    }
    Period::ThisYear => (first_of_year(today.year())?, today),
    Period::LastYear => {
      let start = first_of_year(today.year() - 1)?;
      (start, first_of_year(today.year())? - Duration::days(1))
    }
    Period::LastDays(n) => (days_back(today, u64::from(*n))?, today),
  };

  Some(DateRange::between(from, to))
}

fn start_of_week(date: NaiveDate) -> NaiveDate {
  date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
  date.with_day(1).unwrap_or(date)
}

fn first_of_quarter(date: NaiveDate) -> NaiveDate {
  let month = (date.month0() / 3) * 3 + 1;
  NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
}

fn first_of_year(year: i32) -> Option<NaiveDate> {
  NaiveDate::from_ymd_opt(year, 1, 1)
}

fn days_back(today: NaiveDate, days: u64) -> Option<NaiveDate> {
  let from = today.checked_sub_days(Days::new(days));
  if from.is_none() {
    tracing::warn!(days, %today, "report period reaches past the calendar; leaving created dates empty");
  }
  from
}

/// Durations ("3 weeks ago") via chrono-english, then natural ranges ("last tuesday") via two_timer.
fn phrase_range(input: &str, today: NaiveDate) -> Option<DateRange> {
  let phrase = input.trim().to_lowercase();

  // Created-date filters look back, so the sign of a duration is ignored.
  if let Ok(interval) = parse_duration(&phrase) {
    let from = match interval {
      Interval::Seconds(secs) => days_back(today, u64::from(secs.unsigned_abs()) / 86_400)?,
      Interval::Days(days) => days_back(today, u64::from(days.unsigned_abs()))?,
      Interval::Months(months) => today.checked_sub_months(Months::new(months.unsigned_abs()))?,
    };

    return Some(DateRange::between(from, today));
  }

  let noon = today.and_hms_opt(12, 0, 0)?;
  let config = two_timer::Config::new().now(noon);

  if let Ok((start, end, _)) = parse_natural(&phrase, Some(config)) {
    // two_timer ends are exclusive
    let last = (end - Duration::seconds(1)).date().min(today);
    let first = start.date().min(last);

    return Some(DateRange::between(first, last));
  }

  tracing::warn!(phrase = %input, "unrecognized report period; leaving created dates empty");
  None
}
