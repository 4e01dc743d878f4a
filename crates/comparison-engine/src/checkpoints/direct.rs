//! Same field on both reports: compare after normalization

use super::{checkpoint, missing_note, INSURANCE_REPORT, ROOF_REPORT};
use crate::config::Tolerance;
use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{CheckpointStatus, ComparisonCheckpoint, Measure};

lazy_static! {
    /// Rise over a 12 inch run: "6/12", "6:12", "6 / 12 pitch"
    static ref PITCH_RATIO: Regex = Regex::new(r"(\d+(?:\.\d+)?)\s*[/:]\s*12\b").unwrap();
}

const ADDRESS_ABBREVIATIONS: &[(&str, &str)] = &[
    ("street", "st"),
    ("avenue", "ave"),
    ("road", "rd"),
    ("drive", "dr"),
    ("boulevard", "blvd"),
    ("lane", "ln"),
    ("court", "ct"),
    ("circle", "cir"),
    ("place", "pl"),
    ("terrace", "ter"),
    ("parkway", "pkwy"),
    ("highway", "hwy"),
    ("trail", "trl"),
    ("north", "n"),
    ("south", "s"),
    ("east", "e"),
    ("west", "w"),
    ("apartment", "apt"),
    ("suite", "ste"),
];

/// How text values are brought to a comparable form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextForm {
    /// Case-folded and punctuation-free, plus USPS suffix abbreviations and ZIP+4 reduced to ZIP
    Address,
    /// `N/12` when a ratio is present, otherwise plain
    Pitch,
}

impl TextForm {
    pub fn normalize(self, value: &str) -> String {
        match self {
            TextForm::Address => address(value),
            TextForm::Pitch => pitch(value),
        }
    }
}

/// Case-folded, punctuation dropped, whitespace collapsed
fn plain(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn address(value: &str) -> String {
    let normalized = plain(value);
    let mut tokens: Vec<&str> = Vec::new();

    for token in normalized.split(' ') {
        let is_plus_four = token.len() == 4
            && token.chars().all(|c| c.is_ascii_digit())
            && tokens
                .last()
                .is_some_and(|prev| prev.len() == 5 && prev.chars().all(|c| c.is_ascii_digit()));
        if is_plus_four {
            continue;
        }

        let abbreviated = ADDRESS_ABBREVIATIONS
            .iter()
            .find(|(long, _)| *long == token)
            .map_or(token, |(_, short)| *short);
        tokens.push(abbreviated);
    }

    tokens.join(" ")
}

fn pitch(value: &str) -> String {
    PITCH_RATIO
        .captures(value)
        .and_then(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
        .map(|rise| format!("{}/12", rise))
        .unwrap_or_else(|| plain(value))
}

/// Compares a text field present on both reports
pub fn compare_text(
    name: &str,
    roof: Option<&str>,
    insurance: Option<&str>,
    form: TextForm,
) -> ComparisonCheckpoint {
    let roof_value = roof.map(str::to_string);
    let insurance_value = insurance.map(str::to_string);

    let (status, notes) = match (roof, insurance) {
        (Some(r), Some(i)) => {
            let (a, b) = (form.normalize(r), form.normalize(i));
            if a.is_empty() || b.is_empty() {
                let side = if a.is_empty() { ROOF_REPORT } else { INSURANCE_REPORT };
                (CheckpointStatus::Failed, format!("Value in {} is empty", side))
            } else if a == b {
                (CheckpointStatus::Pass, "Values match".to_string())
            } else {
                (
                    CheckpointStatus::Failed,
                    format!("Values differ ('{}' vs '{}')", a, b),
                )
            }
        }
        _ => (
            CheckpointStatus::Missing,
            missing_note(roof.is_none(), insurance.is_none()),
        ),
    };

    checkpoint(name, status, roof_value, insurance_value, notes)
}

/// Compares a measurement present on both reports within `tolerance`
pub fn compare_numeric(
    name: &str,
    roof: Option<&Measure>,
    insurance: Option<&Measure>,
    tolerance: &Tolerance,
    unit: &str,
) -> ComparisonCheckpoint {
    let roof_value = roof.map(|m| m.raw.clone());
    let insurance_value = insurance.map(|m| m.raw.clone());

    let (status, notes) = match (roof, insurance) {
        (Some(r), Some(i)) => match (r.value, i.value) {
            (Some(a), Some(b)) => numeric_verdict(a, b, tolerance, unit),
            (None, None) => (
                CheckpointStatus::Failed,
                format!("Neither value is a number ('{}', '{}')", r.raw, i.raw),
            ),
            (None, Some(_)) => (
                CheckpointStatus::Failed,
                format!("Value in {} is not a number: '{}'", ROOF_REPORT, r.raw),
            ),
            (Some(_), None) => (
                CheckpointStatus::Failed,
                format!("Value in {} is not a number: '{}'", INSURANCE_REPORT, i.raw),
            ),
        },
        _ => (
            CheckpointStatus::Missing,
            missing_note(roof.is_none(), insurance.is_none()),
        ),
    };

    checkpoint(name, status, roof_value, insurance_value, notes)
}

fn numeric_verdict(
    roof: f64,
    insurance: f64,
    tolerance: &Tolerance,
    unit: &str,
) -> (CheckpointStatus, String) {
    let difference = (roof - insurance).abs();
    let allowed = tolerance.allowance(roof, insurance);

    if difference == 0.0 {
        (CheckpointStatus::Pass, "Values match".to_string())
    } else if tolerance.allows(roof, insurance) {
        (
            CheckpointStatus::Pass,
            format!(
                "Within tolerance (difference {:.2} {}, allowed {:.2} {})",
                difference, unit, allowed, unit
            ),
        )
    } else {
        (
            CheckpointStatus::Failed,
            format!(
                "Difference of {:.2} {} exceeds allowed {:.2} {}",
                difference, unit, allowed, unit
            ),
        )
    }
}
