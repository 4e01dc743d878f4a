//! Field rules for insurance-claim estimates
//!
//! Estimates mix two layouts: header fields read `Label: value`, while the
//! roof summary prints the value first (`56.25 Total Ridge Length`). Both are
//! tried for summary measurements, value-first winning. Drip edge and step
//! flashing come from their summary line when there is one, else from the
//! first installed line item.

use super::numeric::parse_number;
use super::{find_measure, find_text, find_token, FieldExtractor};
use crate::patterns::*;
use lazy_static::lazy_static;
use regex::Regex;
use shared_types::{DocumentMeta, FieldFlag, InsuranceReportData, LineItem, Measure};

/// Label pair for a summary measurement: value-first layout, then labelled layout
struct SummaryRule {
    field: &'static str,
    value_first: Regex,
    labelled: Regex,
}

impl SummaryRule {
    fn new(field: &'static str, labels: &str) -> Self {
        Self {
            field,
            value_first: value_then_label(labels),
            labelled: label_then_value(labels, false),
        }
    }

    fn find(&self, text: &str, flags: &mut Vec<FieldFlag>) -> Option<Measure> {
        find_measure(self.field, &self.value_first, text, flags)
            .or_else(|| find_measure(self.field, &self.labelled, text, flags))
    }
}

lazy_static! {
    static ref CLAIM_NUMBER: Regex = label_then_value(CLAIM_NUMBER_LABELS, false);
    static ref POLICY_NUMBER: Regex = label_then_value(POLICY_NUMBER_LABELS, false);
    static ref INSURED: Regex = label_then_value(INSURED_LABELS, false);
    static ref PROPERTY_ADDRESS: Regex = label_then_value(PROPERTY_ADDRESS_LABELS, false);
    static ref DATE_OF_LOSS: Regex = label_then_value(DATE_OF_LOSS_LABELS, false);
    static ref DATE_INSPECTED: Regex = label_then_value(DATE_INSPECTED_LABELS, false);
    static ref ESTIMATE_DATE: Regex = label_then_value(ESTIMATE_DATE_LABELS, false);
    static ref PRICE_LIST: Regex = label_then_value(PRICE_LIST_LABELS, false);
    static ref PITCH: Regex = label_then_value(PITCH_LABELS, true);

    static ref SURFACE_AREA: SummaryRule = SummaryRule::new("surface_area", SURFACE_AREA_LABELS);
    static ref NUMBER_OF_SQUARES: SummaryRule =
        SummaryRule::new("number_of_squares", INSURANCE_SQUARES_LABELS);
    static ref TOTAL_PERIMETER: SummaryRule = SummaryRule::new("total_perimeter", PERIMETER_LABELS);
    static ref RIDGE_LENGTH: SummaryRule = SummaryRule::new("ridge_length", TOTAL_RIDGE_LABELS);
    static ref HIP_LENGTH: SummaryRule = SummaryRule::new("hip_length", TOTAL_HIP_LABELS);
    static ref VALLEY_LENGTH: SummaryRule = SummaryRule::new("valley_length", TOTAL_VALLEY_LABELS);
    static ref RAKE_LENGTH: SummaryRule = SummaryRule::new("rake_length", TOTAL_RAKE_LABELS);
    static ref EAVE_LENGTH: SummaryRule = SummaryRule::new("eave_length", TOTAL_EAVE_LABELS);
    static ref DRIP_EDGE: Regex = label_then_value(DRIP_EDGE_SUMMARY_LABELS, false);
    static ref STEP_FLASHING: Regex = label_then_value(STEP_FLASHING_SUMMARY_LABELS, false);

    static ref REPLACEMENT_COST: Regex = label_then_value(REPLACEMENT_COST_LABELS, true);
    static ref DEPRECIATION: Regex = label_then_value(DEPRECIATION_LABELS, true);
    static ref ACTUAL_CASH_VALUE: Regex = label_then_value(ACTUAL_CASH_VALUE_LABELS, true);
    static ref DEDUCTIBLE: Regex = label_then_value(DEDUCTIBLE_LABELS, true);
    static ref NET_CLAIM: Regex = label_then_value(NET_CLAIM_LABELS, true);

    /// Numbered estimate line: `12.  Drip edge   245.67 LF   3.01 ...`
    static ref LINE_ITEM: Regex = Regex::new(
        r"(?m)^[ \t]*(\d{1,4})\.[ \t]+(\S.*?)[ \t]+(-?[\d,]*\.?\d+)[ \t]*(SQ|LF|SF|SY|EA|HR|LS|CF|DA|MO|WK|RM)\b"
    )
    .unwrap();
}

/// Deterministic rule set for insurance estimates
#[derive(Debug, Clone, Copy, Default)]
pub struct InsuranceRuleExtractor;

impl FieldExtractor for InsuranceRuleExtractor {
    type Record = InsuranceReportData;

    fn extract_fields(&self, text: &str, meta: &DocumentMeta) -> InsuranceReportData {
        let mut flags = Vec::new();
        let line_items = extract_line_items(text);

        let drip_edge = find_measure("drip_edge", &DRIP_EDGE, text, &mut flags)
            .or_else(|| line_item_quantity(&line_items, "drip edge"));
        let step_flashing = find_measure("step_flashing", &STEP_FLASHING, text, &mut flags)
            .or_else(|| line_item_quantity(&line_items, "step flashing"));

        let record = InsuranceReportData {
            source: meta.clone(),
            claim_number: find_token(&CLAIM_NUMBER, text),
            policy_number: find_token(&POLICY_NUMBER, text),
            insured_name: find_text(&INSURED, text),
            property_address: find_text(&PROPERTY_ADDRESS, text),
            date_of_loss: find_text(&DATE_OF_LOSS, text),
            date_inspected: find_text(&DATE_INSPECTED, text),
            estimate_date: find_text(&ESTIMATE_DATE, text),
            price_list: find_token(&PRICE_LIST, text),
            surface_area: SURFACE_AREA.find(text, &mut flags),
            number_of_squares: NUMBER_OF_SQUARES.find(text, &mut flags),
            total_perimeter: TOTAL_PERIMETER.find(text, &mut flags),
            ridge_length: RIDGE_LENGTH.find(text, &mut flags),
            hip_length: HIP_LENGTH.find(text, &mut flags),
            valley_length: VALLEY_LENGTH.find(text, &mut flags),
            rake_length: RAKE_LENGTH.find(text, &mut flags),
            eave_length: EAVE_LENGTH.find(text, &mut flags),
            drip_edge,
            step_flashing,
            predominant_pitch: find_text(&PITCH, text),
            line_items,
            replacement_cost: find_measure("replacement_cost", &REPLACEMENT_COST, text, &mut flags),
            depreciation: find_measure("depreciation", &DEPRECIATION, text, &mut flags),
            actual_cash_value: find_measure("actual_cash_value", &ACTUAL_CASH_VALUE, text, &mut flags),
            deductible: find_measure("deductible", &DEDUCTIBLE, text, &mut flags),
            net_claim: find_measure("net_claim", &NET_CLAIM, text, &mut flags),
            flags,
        };

        tracing::debug!(
            filename = %meta.filename,
            line_items = record.line_items.len(),
            flagged = record.flags.len(),
            "extracted insurance estimate fields"
        );
        record
    }
}

/// Parses every numbered estimate line in document order
pub fn extract_line_items(text: &str) -> Vec<LineItem> {
    LINE_ITEM
        .captures_iter(text)
        .filter_map(|caps| {
            let number = caps.get(1)?.as_str().parse().ok()?;
            let quantity = caps.get(3)?.as_str();
            Some(LineItem {
                number,
                description: caps.get(2)?.as_str().trim().to_string(),
                quantity: Measure::new(quantity, parse_number(quantity)),
                unit: caps.get(4)?.as_str().to_string(),
            })
        })
        .collect()
}

/// Quantity of the first installed (not removal-only) line mentioning `keyword`
fn line_item_quantity(items: &[LineItem], keyword: &str) -> Option<Measure> {
    items
        .iter()
        .find(|item| {
            let description = item.description.to_lowercase();
            description.contains(keyword)
                && !description.starts_with("remove")
                && !description.starts_with("detach")
        })
        .map(|item| item.quantity.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ESTIMATE: &str = "\
Insured: Jane Homeowner
Property: 123 Main St, Tampa, FL 33601
Claim Number: CLM-2023-0042    Policy Number: HO-998877
Date of Loss: 7/15/2023 12:00 AM
Date Inspected: 7/20/2023
Date Est. Completed: 8/01/2023 10:32 AM
Price List: FLTA8X_MAR23
Restoration/Service/Remodel

Roof1
1,870.07 Surface Area        18.70 Number of Squares
198.50 Total Perimeter Length  56.25 Total Ridge Length
43.17 Total Hip Length  20.00 Total Valley Length

DESCRIPTION   QUANTITY  UNIT PRICE  TAX  RCV  DEPREC.  ACV
1.  Remove Laminated - comp. shingle rfg. - w/out felt   18.70 SQ   62.18   0.00   1,162.77
2.  Laminated - comp. shingle rfg. - w/out felt   21.33 SQ   255.41   142.80   5,590.71
3.  Remove Drip edge   245.00 LF   0.35   0.00   85.75
4.  Drip edge   245.00 LF   3.01   10.20   747.65
5.  Step flashing   30.00 LF   10.52   4.10   319.70

Replacement Cost Value   $12,345.67
Less Depreciation   (1,234.56)
Actual Cash Value   $11,111.11
Less Deductible   (1,000.00)
Net Claim   $10,111.11
";

    fn extract(text: &str) -> InsuranceReportData {
        InsuranceRuleExtractor.extract_fields(text, &DocumentMeta::new("estimate.pdf", 7))
    }

    fn value(m: &Option<Measure>) -> Option<f64> {
        m.as_ref().and_then(|m| m.value)
    }

    #[test]
    fn test_extracts_header_fields() {
        let record = extract(ESTIMATE);
        assert_eq!(record.insured_name.as_deref(), Some("Jane Homeowner"));
        assert_eq!(
            record.property_address.as_deref(),
            Some("123 Main St, Tampa, FL 33601")
        );
        assert_eq!(record.claim_number.as_deref(), Some("CLM-2023-0042"));
        assert_eq!(record.policy_number.as_deref(), Some("HO-998877"));
        assert_eq!(record.date_of_loss.as_deref(), Some("7/15/2023 12:00 AM"));
        assert_eq!(record.date_inspected.as_deref(), Some("7/20/2023"));
        assert_eq!(record.estimate_date.as_deref(), Some("8/01/2023 10:32 AM"));
        assert_eq!(record.price_list.as_deref(), Some("FLTA8X_MAR23"));
    }

    #[test]
    fn test_extracts_value_first_roof_summary() {
        let record = extract(ESTIMATE);
        assert_eq!(value(&record.surface_area), Some(1870.07));
        assert_eq!(value(&record.number_of_squares), Some(18.70));
        assert_eq!(value(&record.total_perimeter), Some(198.50));
        assert_eq!(value(&record.ridge_length), Some(56.25));
        assert_eq!(value(&record.hip_length), Some(43.17));
        assert_eq!(value(&record.valley_length), Some(20.0));
        assert!(record.rake_length.is_none());
        assert!(record.eave_length.is_none());
    }

    #[test]
    fn test_extracts_line_items_and_quantities() {
        let record = extract(ESTIMATE);
        assert_eq!(record.line_items.len(), 5);
        assert_eq!(record.line_items[1].number, 2);
        assert_eq!(record.line_items[1].unit, "SQ");
        assert_eq!(record.line_items[1].quantity.value, Some(21.33));
        assert_eq!(record.line_items[3].description, "Drip edge");

        // Removal lines are skipped when reading installed quantities
        assert_eq!(value(&record.drip_edge), Some(245.0));
        assert_eq!(value(&record.step_flashing), Some(30.0));
    }

    #[test]
    fn test_summary_line_wins_over_line_items() {
        let record = extract(
            "Drip Edge: 250.00\nStep Flashing = 32\n\
             4.  Drip edge   245.00 LF   3.01\n\
             5.  Step flashing - aluminum   30.00 LF   10.52\n",
        );
        assert_eq!(value(&record.drip_edge), Some(250.0));
        assert_eq!(value(&record.step_flashing), Some(32.0));
        assert_eq!(record.line_items.len(), 2);
        assert!(record.flags.is_empty());
    }

    #[test]
    fn test_line_item_description_is_not_a_summary_line() {
        let record = extract("5.  Step flashing - aluminum   30.00 LF   10.52\n");
        assert_eq!(value(&record.step_flashing), Some(30.0));
        assert!(record.flags.is_empty());
    }

    #[test]
    fn test_extracts_claim_totals() {
        let record = extract(ESTIMATE);
        assert_eq!(value(&record.replacement_cost), Some(12345.67));
        assert_eq!(value(&record.depreciation), Some(-1234.56));
        assert_eq!(value(&record.actual_cash_value), Some(11111.11));
        assert_eq!(value(&record.deductible), Some(-1000.0));
        assert_eq!(value(&record.net_claim), Some(10111.11));
        assert!(record.flags.is_empty());
    }

    #[test]
    fn test_labelled_summary_layout_is_accepted() {
        let record = extract("Surface Area: 1,870.07\nTotal Eaves Length: 150.00\nTotal Rake Length: 100.00");
        assert_eq!(value(&record.surface_area), Some(1870.07));
        assert_eq!(value(&record.eave_length), Some(150.0));
        assert_eq!(value(&record.rake_length), Some(100.0));
    }

    #[test]
    fn test_unparseable_summary_value_is_flagged() {
        let record = extract("Surface Area: pending\nClaim Number: CLM-1");
        assert_eq!(record.surface_area, Some(Measure::new("pending", None)));
        assert_eq!(record.flags.len(), 1);
        assert_eq!(record.flags[0].field, "surface_area");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        assert_eq!(extract(ESTIMATE), extract(ESTIMATE));
    }
}
