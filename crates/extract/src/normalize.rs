use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::config::CorrectionTable;

/// Clean one recognized fragment into a monetary amount.
///
/// Total function: any input maps to a value, and 0.0 is the "nothing found"
/// sentinel — callers must treat it as absence, never as a real zero amount.
pub fn normalize_amount(raw: &str, table: &CorrectionTable) -> f64 {
    let upper = raw.to_uppercase();
    // Currency markers must go before the confusion fixes run: the L→1 fix
    // would otherwise turn a trailing "TL" into a stray digit.
    let upper = upper.replace("TL", "").replace('₺', "");
    let mut fixed: String = upper.chars().map(|c| table.fix_char(c)).collect();
    for (pattern, replacement) in &table.patches {
        fixed = fixed.replace(pattern.as_str(), replacement.as_str());
    }

    // Everything that is not a digit or separator goes: whitespace, currency
    // markers (TL, ₺), the `*` annotation, stray punctuation.
    let kept: String = fixed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let cleaned = resolve_separators(&kept);
    match Decimal::from_str(&cleaned) {
        Ok(d) => d.to_f64().unwrap_or(0.0),
        Err(_) => 0.0,
    }
}

/// The last separator is the decimal point; every other `,`/`.` is grouping.
/// Handles both `1.250,00` and `1,250.00` without a locale switch.
fn resolve_separators(s: &str) -> String {
    let last = s.rfind([',', '.']);
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        match c {
            '0'..='9' => out.push(c),
            ',' | '.' if Some(i) == last => out.push('.'),
            _ => {}
        }
    }
    out
}

/// Keep only digits — sequence-number cleanup.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}
