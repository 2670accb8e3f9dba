use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::normalize::digits_only;

// ── Compiled regex cache ─────────────────────────────────────────────────────

macro_rules! re {
    ($name:ident, $pat:expr) => {
        fn $name() -> &'static Regex {
            static R: OnceLock<Regex> = OnceLock::new();
            R.get_or_init(|| Regex::new($pat).expect("invalid regex"))
        }
    };
}

re!(re_date, r"\b(\d{1,2})[./-](\d{1,2})[./-](\d{4})\b");
re!(re_rate, r"%\s*0*(\d{1,2})([^0-9]|$)");

/// First calendar-valid `DD<sep>MM<sep>YYYY` in the text, normalized to
/// `.`-separated. Empty string when none matches.
pub fn extract_date(text: &str) -> String {
    for c in re_date().captures_iter(text) {
        let (Some(d), Some(m), Some(y)) = (c.get(1), c.get(2), c.get(3)) else {
            continue;
        };
        let valid = match (
            d.as_str().parse::<u32>(),
            m.as_str().parse::<u32>(),
            y.as_str().parse::<i32>(),
        ) {
            (Ok(day), Ok(month), Ok(year)) => {
                NaiveDate::from_ymd_opt(year, month, day).is_some()
            }
            _ => false,
        };
        if valid {
            return format!("{}.{}.{}", d.as_str(), m.as_str(), y.as_str());
        }
    }
    String::new()
}

/// Compile the sequence-number pattern from the configured labels: digits
/// following any label, with an optional `:`/`.`/`#` in between. `None` when
/// no labels are configured.
pub fn build_sequence_regex(labels: &[String]) -> Option<Regex> {
    if labels.is_empty() {
        return None;
    }
    let alternatives = labels
        .iter()
        .map(|l| regex::escape(l))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?:{alternatives})\s*[:.#]?\s*(\d+)")).ok()
}

/// Digits following the first sequence label in the text, empty when absent.
pub fn extract_sequence(text: &str, pattern: Option<&Regex>) -> String {
    let Some(re) = pattern else {
        return String::new();
    };
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| digits_only(m.as_str()))
        .unwrap_or_default()
}

/// Whether a chunk reads as a calendar date — its digits would parse as an
/// amount, but it never is one.
pub fn is_date_like(text: &str) -> bool {
    re_date().is_match(text)
}

/// The percent rate a line advertises (`%10`, `% 20`, `%01`), if any.
pub fn rate_percent(text: &str) -> Option<u8> {
    re_rate()
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
