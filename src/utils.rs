// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

pub const UA: &str = concat!(
    "moneydash/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/moneydash)"
);

static NON_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9.,]").expect("static regex"));

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

pub fn parse_month(s: &str) -> Result<String> {
    let s = s.trim();
    NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
        .with_context(|| format!("Invalid month '{}', expected YYYY-MM", s))?;
    Ok(s.to_string())
}

/// Parse what a person types into an amount field: "12", "-3.5",
/// "$1,234.56", "R$ 1.234,56", "(20.00)".
pub fn parse_currency(s: &str) -> Result<Decimal> {
    let raw = s.trim();
    let Some(first_digit) = raw.find(|c: char| c.is_ascii_digit()) else {
        return Err(anyhow!("Invalid amount '{}'", s));
    };
    // A minus sign only counts ahead of the number ("-12", "R$ -12").
    let (lead, body) = raw.split_at(first_digit);
    if body.contains('-') {
        return Err(anyhow!("Invalid amount '{}'", s));
    }
    let negative = lead.contains('-') || (raw.starts_with('(') && raw.ends_with(')'));
    let cleaned = NON_NUMERIC.replace_all(raw, "").to_string();

    let last_dot = cleaned.rfind('.');
    let last_comma = cleaned.rfind(',');
    let normalized = match (last_dot, last_comma) {
        (Some(d), Some(c)) => {
            if c > d {
                cleaned.replace('.', "").replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
        (None, Some(c)) => {
            let frac = &cleaned[c + 1..];
            if cleaned.matches(',').count() == 1 && (1..=2).contains(&frac.len()) {
                cleaned.replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
        (Some(_), None) if cleaned.matches('.').count() > 1 => cleaned.replace('.', ""),
        _ => cleaned,
    };

    let value = normalized
        .parse::<Decimal>()
        .with_context(|| format!("Invalid amount '{}'", s))?;
    Ok(if negative { -value } else { value })
}

pub fn fmt_money(d: &Decimal) -> String {
    let rounded = d.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let s = format!("{:.2}", rounded.abs());
    let (int_part, frac) = s.split_once('.').unwrap_or((s.as_str(), "00"));
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, frac)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_formats() {
        assert_eq!(parse_currency("12").unwrap(), Decimal::new(12, 0));
        assert_eq!(parse_currency("$1,234.56").unwrap(), Decimal::new(123456, 2));
        assert_eq!(parse_currency("R$ 1.234,56").unwrap(), Decimal::new(123456, 2));
        assert_eq!(parse_currency("12,5").unwrap(), Decimal::new(125, 1));
        assert_eq!(parse_currency("1,000").unwrap(), Decimal::new(1000, 0));
        assert_eq!(parse_currency("-3.5").unwrap(), Decimal::new(-35, 1));
        assert_eq!(parse_currency("(20.00)").unwrap(), Decimal::new(-2000, 2));
        assert_eq!(parse_currency("R$ -12").unwrap(), Decimal::new(-12, 0));
        assert!(parse_currency("1-2").is_err());
        assert!(parse_currency("12-").is_err());
        assert!(parse_currency("abc").is_err());
        assert!(parse_currency("").is_err());
    }

    #[test]
    fn money_is_grouped() {
        assert_eq!(fmt_money(&Decimal::new(123456789, 2)), "1,234,567.89");
        assert_eq!(fmt_money(&Decimal::new(-5, 1)), "-0.50");
        assert_eq!(fmt_money(&Decimal::ZERO), "0.00");
    }

    #[test]
    fn last_day_handles_leap_years() {
        assert_eq!(
            last_day_of_month(2024, 2),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            last_day_of_month(2025, 12),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
        );
        assert!(parse_month("2025-13").is_err());
    }
}
