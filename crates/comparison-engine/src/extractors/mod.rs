//! Field extraction: raw report text in, typed record out
//!
//! Each document kind has a deterministic rule set. Any other strategy (for
//! example fields proposed by an external model) plugs in through
//! [`FieldExtractor`]; the comparator only ever sees records.

pub mod assisted;
pub mod insurance;
pub mod numeric;
pub mod roof;

pub use assisted::{AssistedExtractor, ProposedFields};
pub use insurance::InsuranceRuleExtractor;
pub use roof::RoofRuleExtractor;

use crate::error::EngineError;
use crate::patterns::{find_value, first_token};
use regex::Regex;
use shared_types::{DocumentMeta, FieldFlag, Measure};

/// A strategy that turns one document's text into its typed record
pub trait FieldExtractor {
    type Record;

    /// Run every field rule over the full text. Never fails: fields that
    /// cannot be located are left `None`.
    fn extract_fields(&self, text: &str, meta: &DocumentMeta) -> Self::Record;
}

/// Validates the input and runs `extractor` over it.
///
/// Fails with [`EngineError::EmptyDocument`] when the text is blank or the
/// page count is zero; no partial record is produced in that case.
pub fn extract<E: FieldExtractor>(
    extractor: &E,
    raw_text: &str,
    meta: &DocumentMeta,
) -> Result<E::Record, EngineError> {
    if raw_text.trim().is_empty() || meta.page_count == 0 {
        tracing::warn!(
            filename = %meta.filename,
            pages = meta.page_count,
            "document has no extractable text"
        );
        return Err(EngineError::EmptyDocument {
            filename: meta.filename.clone(),
        });
    }

    Ok(extractor.extract_fields(raw_text, meta))
}

/// Flags recorded on a record, as non-fatal errors
pub fn field_errors(flags: &[FieldFlag]) -> Vec<EngineError> {
    flags
        .iter()
        .map(|flag| EngineError::UnparseableField {
            field: flag.field.clone(),
            raw: flag.raw.clone(),
        })
        .collect()
}

pub(crate) fn find_text(re: &Regex, text: &str) -> Option<String> {
    find_value(re, text).map(str::to_string)
}

pub(crate) fn find_token(re: &Regex, text: &str) -> Option<String> {
    find_value(re, text).map(|v| first_token(v).to_string())
}

pub(crate) fn find_measure(
    field: &str,
    re: &Regex,
    text: &str,
    flags: &mut Vec<FieldFlag>,
) -> Option<Measure> {
    let value = find_value(re, text)?;
    let found = numeric::measure(field, value, flags);
    tracing::debug!(field, raw = %found.raw, "matched field");
    Some(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_empty_document() {
        let meta = DocumentMeta::new("roof.pdf", 2);
        let err = extract(&RoofRuleExtractor, "  \n\t ", &meta).unwrap_err();
        assert_eq!(
            err,
            EngineError::EmptyDocument {
                filename: "roof.pdf".to_string()
            }
        );
    }

    #[test]
    fn test_zero_pages_is_empty_document() {
        let meta = DocumentMeta::new("estimate.pdf", 0);
        let result = extract(&InsuranceRuleExtractor, "Claim Number: CLM-1", &meta);
        assert!(matches!(result, Err(EngineError::EmptyDocument { .. })));
    }

    #[test]
    fn test_extract_runs_rules_on_valid_input() {
        let meta = DocumentMeta::new("estimate.pdf", 1);
        let record = extract(&InsuranceRuleExtractor, "Claim Number: CLM-1", &meta).unwrap();
        assert_eq!(record.claim_number.as_deref(), Some("CLM-1"));
        assert_eq!(record.source, meta);
    }

    #[test]
    fn test_flags_convert_to_unparseable_field_errors() {
        let meta = DocumentMeta::new("roof.pdf", 1);
        let record = extract(&RoofRuleExtractor, "Total Roof Area = N/A", &meta).unwrap();
        let errors = field_errors(&record.flags);
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            EngineError::UnparseableField { field, .. } if field == "total_area"
        ));
    }
}
