//! Field rules for roof-measurement reports
//!
//! Measurement vendors print `label = value unit` lines, e.g.
//! `Ridges = 56 ft (4 Ridges)` or `Total Roof Area: 2,345 sq ft`.

use super::{find_measure, find_text, find_token, FieldExtractor};
use crate::patterns::*;
use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{DocumentMeta, RoofReportData};

lazy_static! {
    static ref REPORT_ID: Regex = label_then_value(ROOF_REPORT_ID_LABELS, false);
    static ref REPORT_DATE: Regex = label_then_value(ROOF_REPORT_DATE_LABELS, false);
    static ref PROPERTY_ADDRESS: Regex = label_then_value(PROPERTY_ADDRESS_LABELS, false);
    static ref PITCH: Regex = label_then_value(PITCH_LABELS, true);

    static ref TOTAL_AREA: Regex = label_then_value(TOTAL_AREA_LABELS, true);
    static ref TOTAL_SQUARES: Regex = label_then_value(SQUARES_LABELS, true);
    static ref FACETS: Regex = label_then_value(FACET_LABELS, true);
    static ref RIDGES: Regex = label_then_value(RIDGE_LABELS, true);
    static ref HIPS: Regex = label_then_value(HIP_LABELS, true);
    static ref VALLEYS: Regex = label_then_value(VALLEY_LABELS, true);
    static ref RAKES: Regex = label_then_value(RAKE_LABELS, true);
    static ref EAVES: Regex = label_then_value(EAVE_LABELS, true);
    static ref DRIP_EDGE: Regex = label_then_value(DRIP_EDGE_LABELS, true);
    static ref STEP_FLASHING: Regex = label_then_value(STEP_FLASHING_LABELS, true);
    static ref FLASHING: Regex = label_then_value(FLASHING_LINE_LABELS, true);
}

/// Deterministic rule set for roof-measurement reports
#[derive(Debug, Clone, Copy, Default)]
pub struct RoofRuleExtractor;

impl FieldExtractor for RoofRuleExtractor {
    type Record = RoofReportData;

    fn extract_fields(&self, text: &str, meta: &DocumentMeta) -> RoofReportData {
        let mut flags = Vec::new();

        let record = RoofReportData {
            source: meta.clone(),
            report_id: find_token(&REPORT_ID, text),
            report_date: find_text(&REPORT_DATE, text),
            property_address: find_text(&PROPERTY_ADDRESS, text),
            total_area: find_measure("total_area", &TOTAL_AREA, text, &mut flags),
            total_squares: find_measure("total_squares", &TOTAL_SQUARES, text, &mut flags),
            predominant_pitch: find_text(&PITCH, text),
            facets: find_measure("facets", &FACETS, text, &mut flags),
            ridges: find_measure("ridges", &RIDGES, text, &mut flags),
            hips: find_measure("hips", &HIPS, text, &mut flags),
            valleys: find_measure("valleys", &VALLEYS, text, &mut flags),
            rakes: find_measure("rakes", &RAKES, text, &mut flags),
            eaves: find_measure("eaves", &EAVES, text, &mut flags),
            drip_edge: find_measure("drip_edge", &DRIP_EDGE, text, &mut flags),
            step_flashing: find_measure("step_flashing", &STEP_FLASHING, text, &mut flags),
            flashing: find_measure("flashing", &FLASHING, text, &mut flags),
            flags,
        };

        tracing::debug!(
            filename = %meta.filename,
            flagged = record.flags.len(),
            "extracted roof report fields"
        );
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::Measure;

    const REPORT: &str = "\
Premium Roof Report
Report Number: 51234567
Report Date: 07/20/2023
Property Address: 123 Main Street, Tampa, FL 33601

Total Roof Area = 2,345 sq ft
Total Roof Facets = 12
Predominant Pitch = 6/12
Ridges = 56 ft (4 Ridges)
Hips = 43 ft (4 Hips)
Valleys = 20 ft (2 Valleys)
Rakes = 100 ft (8 Rakes)
Eaves/Starter = 150 ft (10 Eaves)
Drip Edge (Eaves + Rakes) = 250 ft (18 Lengths)
Step flashing = 30 ft (6 Lengths)
Flashing = 12 ft (2 Lengths)
";

    fn extract(text: &str) -> RoofReportData {
        RoofRuleExtractor.extract_fields(text, &DocumentMeta::new("roof.pdf", 3))
    }

    #[test]
    fn test_extracts_identifiers() {
        let record = extract(REPORT);
        assert_eq!(record.report_id.as_deref(), Some("51234567"));
        assert_eq!(record.report_date.as_deref(), Some("07/20/2023"));
        assert_eq!(
            record.property_address.as_deref(),
            Some("123 Main Street, Tampa, FL 33601")
        );
        assert_eq!(record.predominant_pitch.as_deref(), Some("6/12"));
        assert_eq!(record.source, DocumentMeta::new("roof.pdf", 3));
    }

    #[test]
    fn test_extracts_measurements() {
        let record = extract(REPORT);
        let value = |m: &Option<Measure>| m.as_ref().and_then(|m| m.value);

        assert_eq!(value(&record.total_area), Some(2345.0));
        assert_eq!(record.total_area.as_ref().map(|m| m.raw.as_str()), Some("2,345"));
        assert_eq!(value(&record.facets), Some(12.0));
        assert_eq!(value(&record.ridges), Some(56.0));
        assert_eq!(value(&record.hips), Some(43.0));
        assert_eq!(value(&record.valleys), Some(20.0));
        assert_eq!(value(&record.rakes), Some(100.0));
        assert_eq!(value(&record.eaves), Some(150.0));
        assert_eq!(value(&record.drip_edge), Some(250.0));
        assert_eq!(value(&record.step_flashing), Some(30.0));
        assert_eq!(value(&record.flashing), Some(12.0));
        assert!(record.total_squares.is_none());
        assert!(record.flags.is_empty());
    }

    #[test]
    fn test_tolerates_reordered_fields_and_spacing() {
        let text = "hips:43\n   RIDGES   =   56 ft\nTotal Area - 2,345\nnotes";
        let record = extract(text);
        assert_eq!(record.hips.and_then(|m| m.value), Some(43.0));
        assert_eq!(record.ridges.and_then(|m| m.value), Some(56.0));
        assert_eq!(record.total_area.and_then(|m| m.value), Some(2345.0));
    }

    #[test]
    fn test_missing_fields_stay_none() {
        let record = extract("Ridges = 56 ft");
        assert!(record.report_id.is_none());
        assert!(record.property_address.is_none());
        assert!(record.total_area.is_none());
        assert!(record.valleys.is_none());
    }

    #[test]
    fn test_unparseable_value_is_kept_and_flagged() {
        let record = extract("Total Roof Area = N/A\nRidges = 56 ft");
        assert_eq!(record.total_area, Some(Measure::new("N/A", None)));
        assert_eq!(record.flags.len(), 1);
        assert_eq!(record.flags[0].field, "total_area");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        assert_eq!(extract(REPORT), extract(REPORT));
    }
}
