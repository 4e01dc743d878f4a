//! Report comparison front end
//!
//! Loads the two reports from disk, picks an extraction strategy for each and
//! runs the engine. `main.rs` only parses arguments and prints.

use anyhow::{Context, Result};
use comparison_engine::{
    extract, field_errors, AssistedExtractor, ComparisonConfig, ComparisonEngine,
    InsuranceRuleExtractor, RoofRuleExtractor,
};
use shared_pdf::{split_pages, PdfTextSource};
use shared_types::{ComparisonResult, DocumentMeta, InsuranceReportData, RoofReportData};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything one run needs, independent of how it was requested
#[derive(Debug, Clone, Default)]
pub struct CompareRequest {
    pub roof: PathBuf,
    pub insurance: PathBuf,
    pub config: Option<PathBuf>,
    /// Model-proposed roof fields (JSON)
    pub roof_fields: Option<PathBuf>,
    /// Model-proposed insurance fields (JSON)
    pub insurance_fields: Option<PathBuf>,
}

/// Reads a report as text plus metadata.
///
/// `.pdf` files go through the PDF text source; anything else is read as
/// already extracted text with form feeds separating pages.
pub fn load_document(path: &Path) -> Result<(String, DocumentMeta)> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        let pdf = PdfTextSource::from_file(path)
            .with_context(|| format!("Failed to extract text from {}", path.display()))?;
        let meta = pdf.meta(filename);
        Ok((pdf.text, meta))
    } else {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report: {}", path.display()))?;
        let pages = split_pages(&text).len() as u32;
        Ok((text, DocumentMeta::new(filename, pages)))
    }
}

fn read_payload(path: Option<&Path>) -> Result<Option<String>> {
    path.map(|p| {
        fs::read_to_string(p)
            .with_context(|| format!("Failed to read field payload: {}", p.display()))
    })
    .transpose()
}

fn extract_roof(
    text: &str,
    meta: &DocumentMeta,
    payload: Option<String>,
) -> Result<RoofReportData> {
    let record = match payload {
        Some(payload) => extract(
            &AssistedExtractor::new(payload, RoofRuleExtractor),
            text,
            meta,
        )?,
        None => extract(&RoofRuleExtractor, text, meta)?,
    };
    Ok(record)
}

fn extract_insurance(
    text: &str,
    meta: &DocumentMeta,
    payload: Option<String>,
) -> Result<InsuranceReportData> {
    let record = match payload {
        Some(payload) => extract(
            &AssistedExtractor::new(payload, InsuranceRuleExtractor),
            text,
            meta,
        )?,
        None => extract(&InsuranceRuleExtractor, text, meta)?,
    };
    Ok(record)
}

/// Loads both reports and compares them
pub fn run(request: &CompareRequest) -> Result<ComparisonResult> {
    let config = match &request.config {
        Some(path) => ComparisonConfig::from_file(path)?,
        None => ComparisonConfig::default(),
    };
    let engine = ComparisonEngine::with_config(config);

    let (roof_text, roof_meta) = load_document(&request.roof)?;
    let (insurance_text, insurance_meta) = load_document(&request.insurance)?;

    let roof = extract_roof(
        &roof_text,
        &roof_meta,
        read_payload(request.roof_fields.as_deref())?,
    )?;
    let insurance = extract_insurance(
        &insurance_text,
        &insurance_meta,
        read_payload(request.insurance_fields.as_deref())?,
    )?;

    for error in field_errors(&roof.flags)
        .into_iter()
        .chain(field_errors(&insurance.flags))
    {
        tracing::warn!("{}", error);
    }

    Ok(engine.compare(&roof, &insurance))
}
