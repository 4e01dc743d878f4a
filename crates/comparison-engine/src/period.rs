//! Date and price-list period normalization
//!
//! Report dates arrive in whatever shape the vendor printed them. Everything
//! here returns `None` on input it cannot read; nothing panics.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

lazy_static! {
    /// Month code + two-digit year at the end of a price-list tag (`FLTA8X_MAR23`)
    static ref PERIOD_TOKEN: Regex = Regex::new(r"([A-Za-z]{3})(\d{2})(?:[^\d]|$)").unwrap();

    /// Numeric dates: 2023-07-15, 7/15/2023, 15.07.23
    static ref NUMERIC_DATE: Regex =
        Regex::new(r"^(\d{1,4})[/\-.](\d{1,2})[/\-.](\d{1,4})$").unwrap();

    /// Trailing clock time, optionally with AM/PM and a zone abbreviation
    static ref TRAILING_TIME: Regex = Regex::new(
        r"(?i)[\sT]+(\d{1,2}:\d{2}(?::\d{2})?)\s*([AP]\.?M\.?)?\s*(?:[A-Z]{2,4})?$"
    )
    .unwrap();

    /// Leading weekday name ("Saturday, July 15, 2023")
    static ref LEADING_WEEKDAY: Regex =
        Regex::new(r"(?i)^(?:mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+").unwrap();

    static ref ORDINAL_SUFFIX: Regex = Regex::new(r"(?i)(\d)(?:st|nd|rd|th)\b").unwrap();
}

const TEXT_DATE_FORMATS: &[&str] = &["%B %d, %Y", "%B %d %Y", "%d %B %Y", "%d %B, %Y"];

/// Decodes the period encoded in a price-list tag into the first day of that month (UTC).
///
/// The last `MMMYY` group in the token is used; an unknown month code yields
/// `None` rather than falling back to an earlier group.
pub fn parse_period_token(token: &str) -> Option<DateTime<Utc>> {
    let caps = PERIOD_TOKEN.captures_iter(token).last()?;
    let code = caps.get(1)?.as_str().to_ascii_uppercase();
    let month = MONTH_ABBREVIATIONS.iter().position(|m| *m == code)? as u32 + 1;
    let year = 2000 + caps.get(2)?.as_str().parse::<i32>().ok()?;

    NaiveDate::from_ymd_opt(year, month, 1)?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
}

/// Parses free-form date text into a UTC instant.
///
/// Slash dates are read month-first (US reports) unless the first number
/// cannot be a month. Two-digit years pivot at 70. Date-only input yields
/// midnight UTC; a trailing clock time is honoured when it parses.
pub fn parse_loose(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt.and_utc());
        }
    }

    let (date_part, time) = split_time(text);
    let date = parse_date(date_part)?;
    Some(date.and_time(time.unwrap_or(NaiveTime::MIN)).and_utc())
}

/// Signed month difference `newer - older` as `(yA*12+mA) - (yB*12+mB)`.
///
/// Positive when `newer` falls in a later month than `older`.
pub fn month_diff(newer: &impl Datelike, older: &impl Datelike) -> i32 {
    (newer.year() * 12 + newer.month() as i32) - (older.year() * 12 + older.month() as i32)
}

fn split_time(text: &str) -> (&str, Option<NaiveTime>) {
    let Some(caps) = TRAILING_TIME.captures(text) else {
        return (text, None);
    };
    let (Some(whole), Some(clock)) = (caps.get(0), caps.get(1)) else {
        return (text, None);
    };

    let meridiem = caps
        .get(2)
        .map(|m| m.as_str().replace('.', "").to_ascii_uppercase());
    let time = match meridiem {
        Some(ampm) => {
            let value = format!("{} {}", clock.as_str(), ampm);
            NaiveTime::parse_from_str(&value, "%I:%M %p")
                .or_else(|_| NaiveTime::parse_from_str(&value, "%I:%M:%S %p"))
                .ok()
        }
        None => NaiveTime::parse_from_str(clock.as_str(), "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(clock.as_str(), "%H:%M:%S"))
            .ok(),
    };

    (text[..whole.start()].trim_end(), time)
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    if let Some(caps) = NUMERIC_DATE.captures(text) {
        return numeric_date(caps.get(1)?.as_str(), caps.get(2)?.as_str(), caps.get(3)?.as_str());
    }

    let cleaned = LEADING_WEEKDAY.replace(text, "");
    let cleaned = ORDINAL_SUFFIX.replace_all(&cleaned, "$1");
    let cleaned = cleaned.replace('.', "");
    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    TEXT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&cleaned, format).ok())
}

fn numeric_date(a: &str, b: &str, c: &str) -> Option<NaiveDate> {
    let (first, second, third): (u32, u32, u32) = (a.parse().ok()?, b.parse().ok()?, c.parse().ok()?);

    if a.len() == 4 {
        return NaiveDate::from_ymd_opt(first as i32, second, third);
    }

    let year = match c.len() {
        4 => third as i32,
        2 if third >= 70 => 1900 + third as i32,
        2 => 2000 + third as i32,
        _ => return None,
    };

    // Month-first unless the first number cannot be a month
    let (month, day) = if first > 12 && second <= 12 {
        (second, first)
    } else {
        (first, second)
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_period_token_decodes_month_and_year() {
        assert_eq!(parse_period_token("FLTA8X_MAR23"), Some(utc(2023, 3, 1)));
        assert_eq!(parse_period_token("_JAN22"), Some(utc(2022, 1, 1)));
        assert_eq!(parse_period_token("txbe28_dec19"), Some(utc(2019, 12, 1)));
    }

    #[test]
    fn test_period_token_rejects_unknown_month() {
        assert_eq!(parse_period_token("PRICE_XYZ99"), None);
        assert_eq!(parse_period_token("FLTA8X"), None);
        assert_eq!(parse_period_token(""), None);
        assert_eq!(parse_period_token("MAR2023"), None);
    }

    #[test]
    fn test_parse_loose_numeric_formats() {
        assert_eq!(parse_loose("2023-07-15"), Some(utc(2023, 7, 15)));
        assert_eq!(parse_loose("7/15/2023"), Some(utc(2023, 7, 15)));
        assert_eq!(parse_loose("07-15-23"), Some(utc(2023, 7, 15)));
        assert_eq!(parse_loose("15/07/2023"), Some(utc(2023, 7, 15)));
        assert_eq!(parse_loose("3/4/2023"), Some(utc(2023, 3, 4)));
        assert_eq!(parse_loose("1/2/98"), Some(utc(1998, 1, 2)));
    }

    #[test]
    fn test_parse_loose_text_formats() {
        assert_eq!(parse_loose("July 15, 2023"), Some(utc(2023, 7, 15)));
        assert_eq!(parse_loose("Jul. 15 2023"), Some(utc(2023, 7, 15)));
        assert_eq!(parse_loose("15 July 2023"), Some(utc(2023, 7, 15)));
        assert_eq!(parse_loose("Saturday, July 15th, 2023"), Some(utc(2023, 7, 15)));
    }

    #[test]
    fn test_parse_loose_with_time() {
        assert_eq!(
            parse_loose("7/15/2023 10:32 AM"),
            Some(Utc.with_ymd_and_hms(2023, 7, 15, 10, 32, 0).unwrap())
        );
        assert_eq!(
            parse_loose("2023-07-15T18:05:00Z"),
            Some(Utc.with_ymd_and_hms(2023, 7, 15, 18, 5, 0).unwrap())
        );
        assert_eq!(
            parse_loose("2023-07-15 18:05"),
            Some(Utc.with_ymd_and_hms(2023, 7, 15, 18, 5, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_loose_rejects_garbage() {
        assert_eq!(parse_loose(""), None);
        assert_eq!(parse_loose("unknown"), None);
        assert_eq!(parse_loose("13/13/2023"), None);
        assert_eq!(parse_loose("2/30/2023"), None);
    }

    #[test]
    fn test_month_diff_sign_convention() {
        let claim = utc(2023, 7, 15);
        assert_eq!(month_diff(&claim, &utc(2023, 3, 1)), 4);
        assert_eq!(month_diff(&claim, &utc(2022, 1, 1)), 18);
        assert_eq!(month_diff(&utc(2023, 3, 1), &claim), -4);
        assert_eq!(month_diff(&claim, &utc(2023, 7, 1)), 0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: loose date parsing never panics
        #[test]
        fn parse_loose_no_panic(text in "\\PC*") {
            let _ = parse_loose(&text);
        }

        /// Property: period decoding never panics
        #[test]
        fn parse_period_token_no_panic(token in "\\PC*") {
            let _ = parse_period_token(&token);
        }

        /// Property: every valid tag decodes to the first of its month
        #[test]
        fn period_token_is_first_of_month(month in 0usize..12, yy in 0u32..100) {
            let token = format!("FLTA8X_{}{:02}", MONTH_ABBREVIATIONS[month], yy);
            let decoded = parse_period_token(&token).unwrap();
            prop_assert_eq!(decoded.day(), 1);
            prop_assert_eq!(decoded.month() as usize, month + 1);
            prop_assert_eq!(decoded.year(), 2000 + yy as i32);
        }
    }
}
