//! Label patterns and lookup helpers shared by the field rules
//!
//! Labels are regex fragments (alternations) rather than literal keywords so
//! that the same rule tolerates the spelling used by different report vendors.
//! Every rule is anchored on its label, never on position in the document.

use regex::Regex;

// Roof-measurement report labels (value follows the label)

pub const ROOF_REPORT_ID_LABELS: &str =
    r"Report\s*(?:Number|No\.?|ID|#)|Order\s*(?:Number|No\.?|ID|#)";
pub const ROOF_REPORT_DATE_LABELS: &str =
    r"Report\s+Date|Date\s+of\s+Report|Date\s+Prepared|Prepared\s+On";
pub const PROPERTY_ADDRESS_LABELS: &str =
    r"(?:Property|Site|Job|Loss|Risk)\s+Address|Property\s+Location|Property|Address";
pub const TOTAL_AREA_LABELS: &str = r"Total\s+Roof\s+Area|Total\s+Area|Roof\s+Area";
pub const SQUARES_LABELS: &str = r"Total\s+Squares|Number\s+of\s+Squares|Squares";
pub const PITCH_LABELS: &str = r"(?:Predominant|Primary)\s+Pitch|Pitch";
pub const FACET_LABELS: &str = r"(?:Total\s+)?(?:Roof\s+)?Facets";
pub const RIDGE_LABELS: &str = r"(?:Total\s+)?Ridges?(?:\s+Length)?";
pub const HIP_LABELS: &str = r"(?:Total\s+)?Hips?(?:\s+Length)?";
pub const VALLEY_LABELS: &str = r"(?:Total\s+)?Valleys?(?:\s+Length)?";
pub const RAKE_LABELS: &str = r"(?:Total\s+)?Rakes?(?:\s+Length)?";
pub const EAVE_LABELS: &str = r"(?:Total\s+)?Eaves?(?:/Starter)?(?:\s+Length)?";
pub const DRIP_EDGE_LABELS: &str = r"(?:Total\s+)?Drip\s+Edge(?:\s*\(Eaves\s*\+\s*Rakes\))?";
pub const STEP_FLASHING_LABELS: &str = r"(?:Total\s+)?Step\s+Flashing";
/// Wall flashing; anchored at line start so it cannot match inside "Step Flashing"
pub const FLASHING_LINE_LABELS: &str = r"^[ \t]*(?:Total\s+)?(?:Wall\s+|Counter\s+)?Flashing";

// Insurance estimate labels

pub const CLAIM_NUMBER_LABELS: &str = r"Claim\s*(?:Number|No\.?|#)";
pub const POLICY_NUMBER_LABELS: &str = r"Policy\s*(?:Number|No\.?|#)";
pub const INSURED_LABELS: &str = r"Insured(?:\s+Name)?";
pub const DATE_OF_LOSS_LABELS: &str = r"Date\s+of\s+Loss|Loss\s+Date|DOL";
pub const DATE_INSPECTED_LABELS: &str = r"Date\s+Inspected|Inspection\s+Date";
pub const ESTIMATE_DATE_LABELS: &str =
    r"Date\s+Est(?:\.|imate)?\s+Completed|Estimate\s+Date|Date\s+Estimated";
pub const PRICE_LIST_LABELS: &str = r"Price\s*List";
pub const SURFACE_AREA_LABELS: &str = r"(?:Roof\s+)?Surface\s+Area";
pub const INSURANCE_SQUARES_LABELS: &str = r"Number\s+of\s+Squares|Total\s+Squares";
pub const PERIMETER_LABELS: &str = r"Total\s+Perimeter\s+Length";
pub const TOTAL_RIDGE_LABELS: &str = r"Total\s+Ridge\s+Length";
pub const TOTAL_HIP_LABELS: &str = r"Total\s+Hip\s+Length";
pub const TOTAL_VALLEY_LABELS: &str = r"Total\s+Valleys?\s+Length";
pub const TOTAL_RAKE_LABELS: &str = r"Total\s+Rakes?\s+Length";
pub const TOTAL_EAVE_LABELS: &str = r"Total\s+Eaves?\s+Length";
pub const REPLACEMENT_COST_LABELS: &str = r"Replacement\s+Cost\s+Value|Total\s+RCV|RCV";
pub const DEPRECIATION_LABELS: &str =
    r"(?:Less\s+)?(?:Total\s+)?(?:Recoverable\s+)?Depreciation";
pub const ACTUAL_CASH_VALUE_LABELS: &str = r"Actual\s+Cash\s+Value|ACV";
pub const DEDUCTIBLE_LABELS: &str = r"(?:Less\s+)?Deductible";
pub const NET_CLAIM_LABELS: &str = r"Net\s+Claim|Net\s+Payment";
/// Summary lines only; numbered line items ("4.  Drip edge ...") never match
pub const DRIP_EDGE_SUMMARY_LABELS: &str = r"^[ \t]*(?:Total\s+)?Drip\s+Edge";
pub const STEP_FLASHING_SUMMARY_LABELS: &str = r"^[ \t]*(?:Total\s+)?Step\s+Flashing";

/// Build a `label <separator> value` pattern.
///
/// The value runs to the end of the line. With `bare_numbers` the separator may
/// be omitted when the value starts like a number (`Ridges 56 ft`).
pub(crate) fn label_then_value(labels: &str, bare_numbers: bool) -> Regex {
    let bare = if bare_numbers {
        r"|[ \t]+([\d$(.\-][^\r\n]*)"
    } else {
        ""
    };
    let pattern = format!(r"(?im)(?:^|\b)(?:{labels})(?:[ \t]*[:=#\-][ \t]*([^\r\n]*){bare})");
    Regex::new(&pattern).unwrap()
}

/// Build a `value label` pattern, the layout used by estimate roof summaries
/// (`1,870.07 Surface Area`).
pub(crate) fn value_then_label(labels: &str) -> Regex {
    let pattern = format!(
        r"(?im)(\(?-?\$?\d[\d,]*(?:\.\d+)?\)?)[ \t]*(?:SF|LF|SQ)?[ \t]+(?:{labels})\b"
    );
    Regex::new(&pattern).unwrap()
}

/// Find the value for the first match of `re`.
///
/// The value is cut at the first column gap (tab or two spaces) so that
/// side-by-side fields on one line stay apart. When the label ends its line,
/// the following line is used if it does not itself look like a label.
/// `Some("")` means the label was present with nothing after it.
pub fn find_value<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    let caps = re.captures(text)?;
    let m = caps.get(1).or_else(|| caps.get(2))?;
    let segment = column_segment(m.as_str());
    if !segment.is_empty() {
        return Some(segment);
    }
    Some(next_line_value(text, m.end()).unwrap_or(""))
}

/// First whitespace-delimited token of a value, for identifiers and numbers
pub fn first_token(value: &str) -> &str {
    value.split_whitespace().next().unwrap_or("")
}

fn column_segment(value: &str) -> &str {
    let value = value.trim_start();
    let end = [value.find('\t'), value.find("  ")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(value.len());
    value[..end].trim_end()
}

fn next_line_value(text: &str, end: usize) -> Option<&str> {
    let rest = text.get(end..)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;
    let line = rest.lines().next()?;
    if line.contains(':') || line.contains('=') {
        return None;
    }
    let segment = column_segment(line);
    (!segment.is_empty()).then_some(segment)
}
