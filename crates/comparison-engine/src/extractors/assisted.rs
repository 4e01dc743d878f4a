//! Extraction from fields proposed by an external model
//!
//! The model call itself happens elsewhere; this strategy receives its JSON
//! answer, trusts whatever fields it filled, and lets the deterministic rules
//! fill the rest. An unusable answer degrades to the rules alone. Proposed
//! numbers go through the same normalizer as rule-extracted ones, so a value
//! the rules would flag is flagged here too.

use super::numeric;
use super::FieldExtractor;
use serde::de::DeserializeOwned;
use shared_types::{DocumentMeta, InsuranceReportData, RoofReportData};

/// A record as proposed by a model, before it is trusted
pub trait ProposedFields {
    /// Re-reads every numeric field from its raw text, replacing any flags
    /// the payload carried with the normalizer's own.
    fn normalize_measures(&mut self);

    /// Merge two records of the same kind, keeping `self` where it has a value
    fn fill_missing(self, fallback: Self) -> Self;
}

macro_rules! impl_proposed_fields {
    (
        $record:ident {
            text { $($text:ident),* $(,)? }
            measures { $($measure:ident),* $(,)? }
            $(items { $($items:ident),* $(,)? })?
        }
    ) => {
        impl ProposedFields for $record {
            fn normalize_measures(&mut self) {
                self.flags.clear();
                $(
                    if let Some(proposed) = self.$measure.take() {
                        self.$measure = Some(numeric::measure(
                            stringify!($measure),
                            &proposed.raw,
                            &mut self.flags,
                        ));
                    }
                )*
                $($(
                    for item in self.$items.iter_mut() {
                        let field = format!("{}[{}]", stringify!($items), item.number);
                        item.quantity =
                            numeric::measure(&field, &item.quantity.raw, &mut self.flags);
                    }
                )*)?
            }

            fn fill_missing(mut self, fallback: Self) -> Self {
                let mut filled: Vec<&str> = Vec::new();
                $(
                    if self.$text.is_none() && fallback.$text.is_some() {
                        self.$text = fallback.$text;
                        filled.push(stringify!($text));
                    }
                )*
                $(
                    if self.$measure.is_none() && fallback.$measure.is_some() {
                        self.$measure = fallback.$measure;
                        filled.push(stringify!($measure));
                    }
                )*
                $($(
                    if self.$items.is_empty() {
                        self.$items = fallback.$items;
                    }
                )*)?
                // Keep rule flags only for values that came from the rules
                self.flags.extend(
                    fallback
                        .flags
                        .into_iter()
                        .filter(|flag| filled.contains(&flag.field.as_str())),
                );
                self.source = fallback.source;
                self
            }
        }
    };
}

impl_proposed_fields!(RoofReportData {
    text { report_id, report_date, property_address, predominant_pitch }
    measures {
        total_area,
        total_squares,
        facets,
        ridges,
        hips,
        valleys,
        rakes,
        eaves,
        drip_edge,
        step_flashing,
        flashing,
    }
});

impl_proposed_fields!(InsuranceReportData {
    text {
        claim_number,
        policy_number,
        insured_name,
        property_address,
        date_of_loss,
        date_inspected,
        estimate_date,
        price_list,
        predominant_pitch,
    }
    measures {
        surface_area,
        number_of_squares,
        total_perimeter,
        ridge_length,
        hip_length,
        valley_length,
        rake_length,
        eave_length,
        drip_edge,
        step_flashing,
        replacement_cost,
        depreciation,
        actual_cash_value,
        deductible,
        net_claim,
    }
    items { line_items }
});

/// Model-proposed fields backed by a deterministic rule set
#[derive(Debug, Clone)]
pub struct AssistedExtractor<E> {
    payload: String,
    rules: E,
}

impl<E> AssistedExtractor<E> {
    /// `payload` is the model's JSON answer, optionally wrapped in a code fence
    pub fn new(payload: impl Into<String>, rules: E) -> Self {
        Self {
            payload: payload.into(),
            rules,
        }
    }
}

impl<E> FieldExtractor for AssistedExtractor<E>
where
    E: FieldExtractor,
    E::Record: DeserializeOwned + ProposedFields,
{
    type Record = E::Record;

    fn extract_fields(&self, text: &str, meta: &DocumentMeta) -> E::Record {
        let from_rules = self.rules.extract_fields(text, meta);

        match serde_json::from_str::<E::Record>(json_body(&self.payload)) {
            Ok(mut proposed) => {
                proposed.normalize_measures();
                proposed.fill_missing(from_rules)
            }
            Err(e) => {
                tracing::warn!(
                    filename = %meta.filename,
                    error = %e,
                    "model payload unusable, using rule extraction only"
                );
                from_rules
            }
        }
    }
}

/// The outermost `{ ... }` of a model answer
fn json_body(payload: &str) -> &str {
    match (payload.find('{'), payload.rfind('}')) {
        (Some(start), Some(end)) if start < end => &payload[start..=end],
        _ => payload,
    }
}
