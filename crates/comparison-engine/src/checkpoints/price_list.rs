//! Price-list currency: was the estimate priced with a list from around the claim date?

use super::{checkpoint, INSURANCE_REPORT};
use crate::period::{month_diff, parse_loose, parse_period_token};
use chrono::{DateTime, Utc};
use shared_types::{CheckpointStatus, ComparisonCheckpoint};

/// Intermediate verdict before it is folded into a checkpoint status
#[derive(Debug, Clone, PartialEq, Eq)]
enum PeriodVerdict {
    /// Signed months the price list lags the claim date, inside the window
    Within(i32),
    /// Outside the window; positive means the price list is older
    Outside(i32),
    /// One side absent or unreadable
    Warning(PeriodWarning),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PeriodWarning {
    Absent { price_list: bool, claim_date: bool },
    UnreadablePriceList(String),
    UnreadableClaimDate(String),
}

fn judge(price_list: Option<&str>, claim_date: Option<&str>, window: u32) -> PeriodVerdict {
    let (Some(tag), Some(date)) = (price_list, claim_date) else {
        return PeriodVerdict::Warning(PeriodWarning::Absent {
            price_list: price_list.is_none(),
            claim_date: claim_date.is_none(),
        });
    };

    let Some(period) = parse_period_token(tag) else {
        return PeriodVerdict::Warning(PeriodWarning::UnreadablePriceList(tag.to_string()));
    };
    let Some(claimed) = parse_loose(date) else {
        return PeriodVerdict::Warning(PeriodWarning::UnreadableClaimDate(date.to_string()));
    };

    // Claim date is the newer operand: positive = price list predates the claim
    let diff = month_diff(&claimed, &period);
    if diff.unsigned_abs() <= window {
        PeriodVerdict::Within(diff)
    } else {
        PeriodVerdict::Outside(diff)
    }
}

fn fold(
    verdict: &PeriodVerdict,
    period: Option<DateTime<Utc>>,
    window: u32,
) -> (CheckpointStatus, String) {
    let month = period.map(|p| p.format("%b %Y").to_string()).unwrap_or_default();

    match verdict {
        PeriodVerdict::Within(0) => (
            CheckpointStatus::Pass,
            format!("Price list ({}) is from the claim month", month),
        ),
        PeriodVerdict::Within(diff) => (
            CheckpointStatus::Pass,
            format!(
                "Price list ({}) is {} {} the claim date, within {} months",
                month,
                months(*diff),
                if *diff > 0 { "before" } else { "after" },
                window
            ),
        ),
        PeriodVerdict::Outside(diff) if *diff > 0 => (
            CheckpointStatus::Failed,
            format!(
                "Price list ({}) is too old: {} before the claim date, allowed {} months",
                month,
                months(*diff),
                window
            ),
        ),
        PeriodVerdict::Outside(diff) => (
            CheckpointStatus::Failed,
            format!(
                "Price list ({}) is too recent: {} after the claim date, allowed {} months",
                month,
                months(*diff),
                window
            ),
        ),
        PeriodVerdict::Warning(PeriodWarning::Absent {
            price_list,
            claim_date,
        }) => {
            let absent = match (*price_list, *claim_date) {
                (true, true) => "Price list and claim date",
                (true, false) => "Price list",
                _ => "Claim date",
            };
            (
                CheckpointStatus::Missing,
                format!("{} not found in {}", absent, INSURANCE_REPORT),
            )
        }
        PeriodVerdict::Warning(PeriodWarning::UnreadablePriceList(tag)) => (
            CheckpointStatus::Failed,
            format!("Price list '{}' has no recognizable month code", tag),
        ),
        PeriodVerdict::Warning(PeriodWarning::UnreadableClaimDate(date)) => (
            CheckpointStatus::Failed,
            format!("Claim date '{}' could not be parsed", date),
        ),
    }
}

fn months(diff: i32) -> String {
    match diff.unsigned_abs() {
        1 => "1 month".to_string(),
        n => format!("{} months", n),
    }
}

/// Checks the estimate's price-list month against its claim date.
///
/// The price list is taken from the insurance report, as is the claim date
/// (date of loss, falling back to the estimate date). The roof report has no
/// counterpart, so `roof_value` is always `None`.
pub fn check_price_list_date(
    name: &str,
    price_list: Option<&str>,
    claim_date: Option<&str>,
    window: u32,
) -> ComparisonCheckpoint {
    let verdict = judge(price_list, claim_date, window);
    let period = price_list.and_then(parse_period_token);
    let (status, notes) = fold(&verdict, period, window);

    let shown: Vec<String> = price_list
        .map(|tag| format!("price list {}", tag))
        .into_iter()
        .chain(claim_date.map(|date| format!("claim date {}", date)))
        .collect();
    let insurance_value = (!shown.is_empty()).then(|| shown.join("; "));

    checkpoint(name, status, None, insurance_value, notes)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: arbitrary tags and dates never panic
        #[test]
        fn check_no_panic(tag in "\\PC*", date in "\\PC*") {
            let _ = check_price_list_date("Price List Date", Some(tag.as_str()), Some(date.as_str()), 5);
        }

        /// Property: status agrees with the signed month difference
        #[test]
        fn status_follows_window(lag in -30i32..30) {
            const MONTHS: [&str; 12] = [
                "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
            ];
            // Claim date is July 2023; step the price list back by `lag` months
            let index = 2023 * 12 + 6 - lag;
            let tag = format!("FLTA8X_{}{:02}", MONTHS[(index % 12) as usize], (index / 12) % 100);
            let result = check_price_list_date("Price List Date", Some(tag.as_str()), Some("2023-07-15"), 5);

            let expected = if lag.abs() <= 5 {
                CheckpointStatus::Pass
            } else {
                CheckpointStatus::Failed
            };
            prop_assert_eq!(result.status, expected);
        }
    }
}
