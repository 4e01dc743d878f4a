#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckpointStatus {
    Pass,
    Failed,
    Missing,
}

impl CheckpointStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckpointStatus::Pass => "pass",
            CheckpointStatus::Failed => "failed",
            CheckpointStatus::Missing => "missing",
        }
    }
}

impl std::fmt::Display for CheckpointStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComparisonCheckpoint {
    pub checkpoint: String, // e.g., "Total Roof Area"
    pub status: CheckpointStatus,
    pub roof_value: Option<String>,
    pub insurance_value: Option<String>,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComparisonSummary {
    pub pass: usize,
    pub failed: usize,
    pub missing: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComparisonResult {
    pub success: bool,
    pub summary: ComparisonSummary,
    pub comparisons: Vec<ComparisonCheckpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>, // Only set when success is false
}
