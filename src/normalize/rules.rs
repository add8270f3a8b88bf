//! Per-field cleaning rules. One function per source field, each a pure
//! best-effort transform: malformed input degrades to absence or is passed
//! through unmodified, never an error.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static NUMBER_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\s*-\s*\d+$").unwrap());
static RANGE_GAP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*-\s*").unwrap());
static EMBEDDED_POSTAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\b\d{5}\b.*").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").unwrap());
static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\s+").unwrap());

/// Cleans the street-number field.
///
/// The lone `-` placeholder becomes absent. A `12 - 14` style range loses the
/// spaces around its hyphen. A leading digit run followed by anything else
/// keeps only the digits, unless the remainder is one of the French ordinal
/// suffixes (`bis`, `ter`) which carry meaning and are kept as-is.
pub fn clean_street_number(value: &str) -> Option<String> {
    if value == "-" {
        return None;
    }
    if NUMBER_RANGE.is_match(value) {
        return Some(RANGE_GAP.replace_all(value, "-").into_owned());
    }

    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    let rest = &value[digits.len()..];
    if digits.is_empty() || rest.is_empty() {
        return Some(value.to_string());
    }
    let suffix = rest.trim_start();
    if suffix.starts_with("bis") || suffix.starts_with("ter") {
        Some(value.to_string())
    } else {
        Some(digits)
    }
}

/// Cleans the street-name field.
///
/// Applied in order: the lone `-` placeholder becomes absent; an embedded
/// 5-digit postal token and everything after it are dropped (full addresses
/// sometimes land in this column); whitespace runs collapse to one space; a
/// leading house number duplicating the street-number column is stripped;
/// text after the first comma is dropped; the final word is title-cased.
/// If nothing survives the cleaning, the field is absent.
pub fn clean_street_name(value: &str) -> Option<String> {
    if value == "-" {
        return None;
    }
    let mut name = EMBEDDED_POSTAL.replace(value, "").into_owned();
    name = WHITESPACE_RUN.replace_all(&name, " ").into_owned();
    name = LEADING_NUMBER.replace(&name, "").into_owned();
    if let Some(idx) = name.find(',') {
        name.truncate(idx);
    }

    let mut words: Vec<String> = name.split_whitespace().map(str::to_string).collect();
    let last = words.last_mut()?;
    *last = title_case(last);
    Some(words.join(" "))
}

/// Validates the postal code: anything that is not exactly five characters
/// (including the `0` placeholder the source uses) becomes absent.
pub fn clean_postal_code(value: &str) -> Option<String> {
    if value.chars().count() == 5 {
        Some(value.to_string())
    } else {
        None
    }
}

/// Single-word capitalization: first letter uppercased, the rest lowercased.
pub fn clean_city_name(value: &str) -> String {
    capitalize(value)
}

/// Reformats a French local phone number.
///
/// The lone `-` placeholder becomes absent. Every non-digit character is
/// stripped; when exactly ten digits remain and the first is `0`, the value
/// is rewritten as `+33 D DD DD DD DD` from the nine digits after the leading
/// zero. Anything else is left untouched (best-effort, not validating).
pub fn clean_phone(value: &str) -> Option<String> {
    if value == "-" {
        return None;
    }
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 10 && digits.starts_with('0') {
        let d = &digits[1..];
        return Some(format!(
            "+33 {} {} {} {} {}",
            &d[0..1],
            &d[1..3],
            &d[3..5],
            &d[5..7],
            &d[7..9]
        ));
    }
    Some(value.to_string())
}

/// Cleans the maintenance-frequency text: capitalized like a city name, then
/// the common misspelling `Tout` as the leading word is corrected to `Tous`.
/// Only the exact leading token is touched; the rest of the sentence is kept.
pub fn clean_frequency(value: &str) -> String {
    let fixed = capitalize(value);
    match fixed.strip_prefix("Tout") {
        Some(rest) if rest.chars().next().map_or(true, |c| !c.is_alphabetic()) => {
            format!("Tous{}", rest)
        }
        _ => fixed,
    }
}

/// Parses a `YYYY-MM-DD` calendar date; anything else is absent.
pub fn coerce_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

/// True when a frequency cell actually holds a calendar date.
pub fn frequency_is_date(value: &str) -> bool {
    coerce_date(value).is_some()
}

/// Parses a floating-point coordinate; anything else is absent.
pub fn coerce_float(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Python-style title casing of a single word: the first letter of every
/// alphabetic run is uppercased, the rest lowercased, so hyphenated words
/// like `jean-luc` become `Jean-Luc`.
fn title_case(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut prev_alphabetic = false;
    for c in word.chars() {
        if c.is_alphabetic() {
            if prev_alphabetic {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alphabetic = true;
        } else {
            out.push(c);
            prev_alphabetic = false;
        }
    }
    out
}
