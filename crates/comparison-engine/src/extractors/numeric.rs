// Numeric normalization for measurements and currency amounts
use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{FieldFlag, Measure};

lazy_static! {
    /// Digits with optional comma grouping in threes and a `.` decimal point
    static ref CANONICAL_NUMBER: Regex =
        Regex::new(r"^(?:\d{1,3}(?:,\d{3})+|\d+)?(?:\.\d+)?$").unwrap();
}

/// Parses a number as printed in a report.
///
/// Strips currency symbols, thousands separators and trailing units
/// (`ft`, `sq`, `LF`, `'`, `%`). Accounting parentheses mean negative.
/// Comma decimals (`1.870,07`) are rejected rather than misread.
pub fn parse_number(token: &str) -> Option<f64> {
    let mut s = token.trim();

    let mut negative = false;
    if let Some(inner) = s.strip_prefix('(').and_then(|t| t.strip_suffix(')')) {
        negative = true;
        s = inner.trim();
    }
    if let Some(rest) = s.strip_prefix('-') {
        negative = !negative;
        s = rest.trim_start();
    }
    s = s.strip_prefix('$').unwrap_or(s).trim_start();
    if let Some(rest) = s.strip_prefix('-') {
        negative = !negative;
        s = rest;
    }

    let s = s.trim_end_matches(|c: char| {
        c.is_ascii_alphabetic() || matches!(c, '\'' | '"' | '%' | '.')
    });

    if !s.bytes().any(|b| b.is_ascii_digit()) || !CANONICAL_NUMBER.is_match(s) {
        return None;
    }

    let value: f64 = s.replace(',', "").parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Builds a [`Measure`] from a located value, flagging it when unparseable.
///
/// Only the first token of the value is treated as the number; the rest is
/// usually a unit or a comment (`56 ft (4 Ridges)`).
pub fn measure(field: &str, value: &str, flags: &mut Vec<FieldFlag>) -> Measure {
    let raw = number_token(value);
    let parsed = parse_number(raw);

    if parsed.is_none() {
        tracing::warn!(field, raw, "field matched but value is not numeric");
        flags.push(FieldFlag {
            field: field.to_string(),
            raw: raw.to_string(),
            reason: "value is not a number".to_string(),
        });
    }

    Measure::new(raw, parsed)
}

/// Picks the numeric part of a value, keeping `$ 1,234.00` together
fn number_token(value: &str) -> &str {
    let value = value.trim();
    let mut tokens = value.split_whitespace();
    let Some(first) = tokens.next() else {
        return value;
    };

    if matches!(first, "$" | "-" | "-$") {
        // Symbol printed apart from the digits; keep the symbol with its number
        if let Some(second) = tokens.next() {
            let end = value.find(second).map(|i| i + second.len()).unwrap_or(value.len());
            return &value[..end];
        }
    }
    first
}
