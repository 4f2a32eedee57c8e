//! Date reformatting
//!
//! Both reformatters return `None` instead of guessing when the input does
//! not match.

use std::sync::OnceLock;

use chrono::NaiveDate;
use phf::phf_map;
use regex::Regex;

const OUTPUT_FORMAT: &str = "%d/%m/%Y";

static MONTHS: phf::Map<&'static str, u32> = phf_map! {
    "january" => 1,
    "february" => 2,
    "march" => 3,
    "april" => 4,
    "may" => 5,
    "june" => 6,
    "july" => 7,
    "august" => 8,
    "september" => 9,
    "october" => 10,
    "november" => 11,
    "december" => 12,
};

/// `dd-mm-yyyy` → `dd/mm/yyyy`
pub fn reformat_strict(raw: &str) -> Option<String> {
    NaiveDate::parse_from_str(raw.trim(), "%d-%m-%Y")
        .ok()
        .map(|d| d.format(OUTPUT_FORMAT).to_string())
}

/// `"<day><st|nd|rd|th?> <MonthName> <year>"` anywhere in the text → `dd/mm/yyyy`
pub fn reformat_loose(raw: &str) -> Option<String> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+([a-z]+)\s+(\d{4})\b").ok())
        .as_ref()?;

    let captures = pattern.captures(raw)?;
    let day: u32 = captures[1].parse().ok()?;
    let month = *MONTHS.get(captures[2].to_ascii_lowercase().as_str())?;
    let year: i32 = captures[3].parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format(OUTPUT_FORMAT).to_string())
}
