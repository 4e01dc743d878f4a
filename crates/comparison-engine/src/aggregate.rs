//! Tallies checkpoint statuses into the final result

use crate::error::EngineError;
use shared_types::{CheckpointStatus, ComparisonCheckpoint, ComparisonResult, ComparisonSummary};

/// Builds the result from evaluated checkpoints in one pass.
///
/// An empty list is a run that produced nothing to show: `success` is false
/// and `error` carries the [`EngineError::NoCheckpointsEvaluated`] message.
pub fn aggregate(comparisons: Vec<ComparisonCheckpoint>) -> ComparisonResult {
    let mut summary = ComparisonSummary {
        total: comparisons.len(),
        ..Default::default()
    };

    for c in &comparisons {
        match c.status {
            CheckpointStatus::Pass => summary.pass += 1,
            CheckpointStatus::Failed => summary.failed += 1,
            CheckpointStatus::Missing => summary.missing += 1,
        }
    }

    let success = !comparisons.is_empty();
    ComparisonResult {
        success,
        summary,
        comparisons,
        error: (!success).then(|| EngineError::NoCheckpointsEvaluated.to_string()),
    }
}
