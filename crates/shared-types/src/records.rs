//! Typed records produced by extracting one report's text.
//!
//! Every field is optional: `None` means no rule located the field, which is
//! distinct from a field that was located but held an empty or unparseable
//! value (see [`Measure`] and [`FieldFlag`]).

/// Metadata handed over by whatever produced the raw text
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct DocumentMeta {
    pub filename: String,
    pub page_count: u32,
}

impl DocumentMeta {
    pub fn new(filename: impl Into<String>, page_count: u32) -> Self {
        Self {
            filename: filename.into(),
            page_count,
        }
    }
}

/// A numeric value as it appeared in the report plus its canonical number.
///
/// `value` is `None` when the label matched but the text could not be read as
/// a number; the raw text is kept so nothing is silently dropped.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "MeasureRepr")]
pub struct Measure {
    pub raw: String,
    pub value: Option<f64>,
}

/// Accepted input shapes: the full object, a bare number, or a string.
///
/// A string is kept raw with no value; callers normalize it with the same
/// number rules the extractors use.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum MeasureRepr {
    Full { raw: String, value: Option<f64> },
    Number(f64),
    Text(String),
}

impl From<MeasureRepr> for Measure {
    fn from(repr: MeasureRepr) -> Self {
        match repr {
            MeasureRepr::Full { raw, value } => Measure { raw, value },
            MeasureRepr::Number(n) => Measure {
                raw: n.to_string(),
                value: Some(n),
            },
            MeasureRepr::Text(raw) => Measure { raw, value: None },
        }
    }
}

impl Measure {
    pub fn new(raw: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            raw: raw.into(),
            value,
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.value.is_some()
    }
}

/// A field whose label was found but whose value could not be normalized
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FieldFlag {
    pub field: String,
    pub raw: String,
    pub reason: String,
}

/// One numbered line of an insurance estimate
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LineItem {
    pub number: u32,
    pub description: String,
    pub quantity: Measure,
    pub unit: String,
}

/// Fields extracted from a roof-measurement report
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RoofReportData {
    pub source: DocumentMeta,
    pub report_id: Option<String>,
    pub report_date: Option<String>,
    pub property_address: Option<String>,
    /// Square feet
    pub total_area: Option<Measure>,
    pub total_squares: Option<Measure>,
    pub predominant_pitch: Option<String>,
    pub facets: Option<Measure>,
    // Linear feet from here down
    pub ridges: Option<Measure>,
    pub hips: Option<Measure>,
    pub valleys: Option<Measure>,
    pub rakes: Option<Measure>,
    pub eaves: Option<Measure>,
    pub drip_edge: Option<Measure>,
    pub step_flashing: Option<Measure>,
    pub flashing: Option<Measure>,
    pub flags: Vec<FieldFlag>,
}

/// Fields extracted from an insurance-claim estimate
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct InsuranceReportData {
    pub source: DocumentMeta,
    pub claim_number: Option<String>,
    pub policy_number: Option<String>,
    pub insured_name: Option<String>,
    pub property_address: Option<String>,
    pub date_of_loss: Option<String>,
    pub date_inspected: Option<String>,
    pub estimate_date: Option<String>,
    /// Price list identifier, e.g. `FLTA8X_MAR23`
    pub price_list: Option<String>,
    pub surface_area: Option<Measure>,
    pub number_of_squares: Option<Measure>,
    pub total_perimeter: Option<Measure>,
    pub ridge_length: Option<Measure>,
    pub hip_length: Option<Measure>,
    pub valley_length: Option<Measure>,
    pub rake_length: Option<Measure>,
    pub eave_length: Option<Measure>,
    pub drip_edge: Option<Measure>,
    pub step_flashing: Option<Measure>,
    pub predominant_pitch: Option<String>,
    pub line_items: Vec<LineItem>,
    pub replacement_cost: Option<Measure>,
    pub depreciation: Option<Measure>,
    pub actual_cash_value: Option<Measure>,
    pub deductible: Option<Measure>,
    pub net_claim: Option<Measure>,
    pub flags: Vec<FieldFlag>,
}

impl InsuranceReportData {
    /// Date used when judging price-list currency: loss date, else estimate date.
    /// Blank values count as absent.
    pub fn claim_date(&self) -> Option<&str> {
        non_blank(&self.date_of_loss).or_else(|| non_blank(&self.estimate_date))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
