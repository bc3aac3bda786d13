//! Shared utilities for CLI commands.

use std::sync::LazyLock;

use anyhow::Context;
use chrono::{Duration, Months, NaiveDate};
use regex::Regex;

/// Pre-compiled regex for relative date parsing.
static RELATIVE_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:in\s+(\d+)\s+(day|week|month)s?|(\d+)\s+(day|week|month)s?\s+ago)$").unwrap()
});

/// Conservative bound for relative offsets (~1000 years in days).
const MAX_RELATIVE_DAYS: u32 = 1000 * 366;

/// Parse a date as ISO 8601, a named day, or an offset from `today`.
///
/// Supports:
/// - ISO 8601: "2024-03-13"
/// - Named: "today", "tomorrow", "yesterday"
/// - Relative: "3 days ago", "in 2 weeks", "1 month ago"
pub fn parse_date(s: &str, today: NaiveDate) -> anyhow::Result<NaiveDate> {
    let s = s.trim();
    match s {
        "today" => return Ok(today),
        "tomorrow" => return today.succ_opt().context("date out of range"),
        "yesterday" => return today.pred_opt().context("date out of range"),
        _ => {}
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }

    let Some(caps) = RELATIVE_DATE_RE.captures(s) else {
        anyhow::bail!(
            "Invalid date: {s}. Use YYYY-MM-DD, today/tomorrow/yesterday, or relative (e.g., '2 weeks ago', 'in 3 days')"
        );
    };

    let (n, unit, forward) = match (caps.get(1), caps.get(2), caps.get(3), caps.get(4)) {
        (Some(n), Some(unit), _, _) => (n.as_str(), unit.as_str(), true),
        (_, _, Some(n), Some(unit)) => (n.as_str(), unit.as_str(), false),
        _ => anyhow::bail!("Invalid date: {s}"),
    };
    let n: u32 = n.parse().context("failed to parse number in relative date")?;

    let shifted = match unit {
        "day" | "week" => {
            let days = if unit == "week" { n.saturating_mul(7) } else { n };
            if days > MAX_RELATIVE_DAYS {
                anyhow::bail!("Relative date too far away: {s}");
            }
            let delta = Duration::days(i64::from(days));
            if forward {
                today.checked_add_signed(delta)
            } else {
                today.checked_sub_signed(delta)
            }
        }
        "month" => {
            if n > MAX_RELATIVE_DAYS / 28 {
                anyhow::bail!("Relative date too far away: {s}");
            }
            if forward {
                today.checked_add_months(Months::new(n))
            } else {
                today.checked_sub_months(Months::new(n))
            }
        }
        unit => anyhow::bail!("Unknown date unit: {unit}"),
    };
    shifted.context("date out of range")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_date("2024-02-29", today()).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_parse_named_days() {
        assert_eq!(parse_date("today", today()).unwrap(), today());
        assert_eq!(parse_date("tomorrow", today()).unwrap(), date(2024, 3, 14));
        assert_eq!(parse_date("yesterday", today()).unwrap(), date(2024, 3, 12));
    }

    #[test]
    fn test_parse_relative_dates() {
        assert_eq!(parse_date("3 days ago", today()).unwrap(), date(2024, 3, 10));
        assert_eq!(parse_date("in 2 weeks", today()).unwrap(), date(2024, 3, 27));
        assert_eq!(parse_date("1 month ago", today()).unwrap(), date(2024, 2, 13));
        assert_eq!(parse_date("in 1 week", today()).unwrap(), date(2024, 3, 20));
    }

    #[test]
    fn test_month_offset_clamps_to_month_end() {
        let jan31 = date(2024, 1, 31);
        assert_eq!(parse_date("in 1 month", jan31).unwrap(), date(2024, 2, 29));
    }

    #[test]
    fn test_parse_invalid_date() {
        let err = parse_date("next tuesday", today()).unwrap_err();
        assert!(err.to_string().contains("Invalid date"));
        assert!(parse_date("2024-02-30", today()).is_err());
    }

    #[test]
    fn test_parse_relative_too_large() {
        let err = parse_date("999999 weeks ago", today()).unwrap_err();
        assert!(err.to_string().contains("too far"));
    }
}
