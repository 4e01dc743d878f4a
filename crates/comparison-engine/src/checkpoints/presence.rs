//! Fields that must exist on one document, with nothing to compare against

use super::{checkpoint, INSURANCE_REPORT, ROOF_REPORT};
use shared_types::{CheckpointStatus, ComparisonCheckpoint};

fn verdict(value: Option<&str>, document: &str) -> (CheckpointStatus, String) {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => (CheckpointStatus::Pass, format!("Present in {}", document)),
        // A label with nothing after it carries no identifier
        Some(_) => (
            CheckpointStatus::Missing,
            format!("Label found in {} but the value is empty", document),
        ),
        None => (CheckpointStatus::Missing, format!("Not found in {}", document)),
    }
}

pub fn check_roof_field(name: &str, value: Option<&str>) -> ComparisonCheckpoint {
    let (status, notes) = verdict(value, ROOF_REPORT);
    checkpoint(name, status, value.map(str::to_string), None, notes)
}

pub fn check_insurance_field(name: &str, value: Option<&str>) -> ComparisonCheckpoint {
    let (status, notes) = verdict(value, INSURANCE_REPORT);
    checkpoint(name, status, None, value.map(str::to_string), notes)
}
