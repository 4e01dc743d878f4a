pub mod records;
pub mod types;

pub use records::{
    DocumentMeta, FieldFlag, InsuranceReportData, LineItem, Measure, RoofReportData,
};
pub use types::{CheckpointStatus, ComparisonCheckpoint, ComparisonResult, ComparisonSummary};
