//! Roof-measurement vs insurance-estimate reconciliation.
//!
//! Raw report text goes in, a checkpoint-by-checkpoint [`ComparisonResult`]
//! comes out:
//!
//! ```
//! use comparison_engine::ComparisonEngine;
//! use shared_types::DocumentMeta;
//!
//! let engine = ComparisonEngine::new();
//! let result = engine
//!     .compare_documents(
//!         "Ridges = 56 ft",
//!         &DocumentMeta::new("roof.pdf", 1),
//!         "56.00 Total Ridge Length",
//!         &DocumentMeta::new("estimate.pdf", 1),
//!     )
//!     .unwrap();
//! assert!(result.success);
//! assert_eq!(result.summary.total, 15);
//! ```

pub mod aggregate;
pub mod checkpoints;
pub mod config;
pub mod error;
pub mod extractors;
pub mod patterns;
pub mod period;

pub use aggregate::aggregate;
pub use checkpoints::{evaluate_checkpoints, Checkpoint};
pub use config::{ComparisonConfig, Tolerance};
pub use error::EngineError;
pub use extractors::{
    extract, field_errors, AssistedExtractor, FieldExtractor, InsuranceRuleExtractor,
    RoofRuleExtractor,
};

use shared_types::{ComparisonResult, DocumentMeta, InsuranceReportData, RoofReportData};

/// ComparisonEngine entry point
#[derive(Debug, Clone, Default)]
pub struct ComparisonEngine {
    config: ComparisonConfig,
}

impl ComparisonEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ComparisonConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    /// Extract a roof-measurement report with the deterministic rules
    pub fn extract_roof(
        &self,
        raw_text: &str,
        meta: &DocumentMeta,
    ) -> Result<RoofReportData, EngineError> {
        extract(&RoofRuleExtractor, raw_text, meta)
    }

    /// Extract an insurance estimate with the deterministic rules
    pub fn extract_insurance(
        &self,
        raw_text: &str,
        meta: &DocumentMeta,
    ) -> Result<InsuranceReportData, EngineError> {
        extract(&InsuranceRuleExtractor, raw_text, meta)
    }

    /// Compare two already extracted records
    pub fn compare(
        &self,
        roof: &RoofReportData,
        insurance: &InsuranceReportData,
    ) -> ComparisonResult {
        let result = aggregate(evaluate_checkpoints(roof, insurance, &self.config));

        tracing::info!(
            roof = %roof.source.filename,
            insurance = %insurance.source.filename,
            pass = result.summary.pass,
            failed = result.summary.failed,
            missing = result.summary.missing,
            "comparison complete"
        );
        result
    }

    /// Extract both documents with the deterministic rules and compare them.
    ///
    /// Fails only when a document has no extractable text.
    pub fn compare_documents(
        &self,
        roof_text: &str,
        roof_meta: &DocumentMeta,
        insurance_text: &str,
        insurance_meta: &DocumentMeta,
    ) -> Result<ComparisonResult, EngineError> {
        let roof = self.extract_roof(roof_text, roof_meta)?;
        let insurance = self.extract_insurance(insurance_text, insurance_meta)?;
        Ok(self.compare(&roof, &insurance))
    }
}
