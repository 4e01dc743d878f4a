use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Could not read document '{filename}': no extractable text")]
    EmptyDocument { filename: String },

    #[error("Field '{field}' matched but its value could not be parsed: {raw}")]
    UnparseableField { field: String, raw: String },

    #[error("Document read but no comparable data found: no checkpoints were evaluated")]
    NoCheckpointsEvaluated,
}
