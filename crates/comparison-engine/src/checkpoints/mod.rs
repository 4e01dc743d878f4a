//! The published checkpoint catalogue
//!
//! Each checkpoint reads one field (or a derived pair) from the two records
//! and produces exactly one [`ComparisonCheckpoint`]. Checkpoints are
//! independent and always evaluated in catalogue order.

pub mod direct;
pub mod presence;
pub mod price_list;

use crate::config::ComparisonConfig;
use direct::TextForm;
use shared_types::{
    CheckpointStatus, ComparisonCheckpoint, InsuranceReportData, Measure, RoofReportData,
};

pub(crate) const ROOF_REPORT: &str = "roof report";
pub(crate) const INSURANCE_REPORT: &str = "insurance report";

/// One entry of the catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Checkpoint {
    PropertyAddress,
    TotalRoofArea,
    NumberOfSquares,
    PredominantPitch,
    RidgeLength,
    HipLength,
    ValleyLength,
    RakeLength,
    EaveLength,
    DripEdge,
    StepFlashing,
    PriceListDate,
    ClaimNumber,
    DateOfLoss,
    RoofReportId,
}

impl Checkpoint {
    /// Every checkpoint, in evaluation order
    pub const ALL: [Checkpoint; 15] = [
        Checkpoint::PropertyAddress,
        Checkpoint::TotalRoofArea,
        Checkpoint::NumberOfSquares,
        Checkpoint::PredominantPitch,
        Checkpoint::RidgeLength,
        Checkpoint::HipLength,
        Checkpoint::ValleyLength,
        Checkpoint::RakeLength,
        Checkpoint::EaveLength,
        Checkpoint::DripEdge,
        Checkpoint::StepFlashing,
        Checkpoint::PriceListDate,
        Checkpoint::ClaimNumber,
        Checkpoint::DateOfLoss,
        Checkpoint::RoofReportId,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Checkpoint::PropertyAddress => "Property Address",
            Checkpoint::TotalRoofArea => "Total Roof Area",
            Checkpoint::NumberOfSquares => "Number of Squares",
            Checkpoint::PredominantPitch => "Predominant Pitch",
            Checkpoint::RidgeLength => "Ridge Length",
            Checkpoint::HipLength => "Hip Length",
            Checkpoint::ValleyLength => "Valley Length",
            Checkpoint::RakeLength => "Rake Length",
            Checkpoint::EaveLength => "Eave Length",
            Checkpoint::DripEdge => "Drip Edge",
            Checkpoint::StepFlashing => "Step Flashing",
            Checkpoint::PriceListDate => "Price List Date",
            Checkpoint::ClaimNumber => "Claim Number",
            Checkpoint::DateOfLoss => "Date of Loss",
            Checkpoint::RoofReportId => "Roof Report ID",
        }
    }

    pub fn evaluate(
        self,
        roof: &RoofReportData,
        insurance: &InsuranceReportData,
        config: &ComparisonConfig,
    ) -> ComparisonCheckpoint {
        let name = self.name();
        let length = |r: &Option<Measure>, i: &Option<Measure>| {
            direct::compare_numeric(name, r.as_ref(), i.as_ref(), &config.length, "LF")
        };

        match self {
            Checkpoint::PropertyAddress => direct::compare_text(
                name,
                roof.property_address.as_deref(),
                insurance.property_address.as_deref(),
                TextForm::Address,
            ),
            Checkpoint::TotalRoofArea => direct::compare_numeric(
                name,
                roof.total_area.as_ref(),
                insurance.surface_area.as_ref(),
                &config.area,
                "SF",
            ),
            Checkpoint::NumberOfSquares => direct::compare_numeric(
                name,
                roof.total_squares.as_ref(),
                insurance.number_of_squares.as_ref(),
                &config.squares,
                "SQ",
            ),
            Checkpoint::PredominantPitch => direct::compare_text(
                name,
                roof.predominant_pitch.as_deref(),
                insurance.predominant_pitch.as_deref(),
                TextForm::Pitch,
            ),
            Checkpoint::RidgeLength => length(&roof.ridges, &insurance.ridge_length),
            Checkpoint::HipLength => length(&roof.hips, &insurance.hip_length),
            Checkpoint::ValleyLength => length(&roof.valleys, &insurance.valley_length),
            Checkpoint::RakeLength => length(&roof.rakes, &insurance.rake_length),
            Checkpoint::EaveLength => length(&roof.eaves, &insurance.eave_length),
            Checkpoint::DripEdge => length(&roof.drip_edge, &insurance.drip_edge),
            Checkpoint::StepFlashing => length(&roof.step_flashing, &insurance.step_flashing),
            Checkpoint::PriceListDate => price_list::check_price_list_date(
                name,
                insurance.price_list.as_deref(),
                insurance.claim_date(),
                config.price_list_window_months,
            ),
            Checkpoint::ClaimNumber => presence::check_insurance_field(
                name,
                insurance.claim_number.as_deref(),
            ),
            Checkpoint::DateOfLoss => presence::check_insurance_field(
                name,
                insurance.date_of_loss.as_deref(),
            ),
            Checkpoint::RoofReportId => {
                presence::check_roof_field(name, roof.report_id.as_deref())
            }
        }
    }
}

/// Runs every enabled checkpoint in catalogue order
pub fn evaluate_checkpoints(
    roof: &RoofReportData,
    insurance: &InsuranceReportData,
    config: &ComparisonConfig,
) -> Vec<ComparisonCheckpoint> {
    Checkpoint::ALL
        .iter()
        .filter(|checkpoint| config.is_enabled(checkpoint.name()))
        .map(|checkpoint| {
            let result = checkpoint.evaluate(roof, insurance, config);
            tracing::debug!(
                checkpoint = %result.checkpoint,
                status = %result.status,
                notes = %result.notes,
                "evaluated checkpoint"
            );
            result
        })
        .collect()
}

pub(crate) fn checkpoint(
    name: &str,
    status: CheckpointStatus,
    roof_value: Option<String>,
    insurance_value: Option<String>,
    notes: impl Into<String>,
) -> ComparisonCheckpoint {
    ComparisonCheckpoint {
        checkpoint: name.to_string(),
        status,
        roof_value,
        insurance_value,
        notes: notes.into(),
    }
}

/// Note for a two-sided checkpoint with at least one side absent
pub(crate) fn missing_note(roof_missing: bool, insurance_missing: bool) -> String {
    match (roof_missing, insurance_missing) {
        (true, true) => "Not found in either report".to_string(),
        (true, false) => format!("Not found in {}", ROOF_REPORT),
        _ => format!("Not found in {}", INSURANCE_REPORT),
    }
}
