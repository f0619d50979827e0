//! Filter option extraction
//!
//! Option lists hold the distinct raw values of each categorical field in
//! first-seen order. The "All" choice is added by [`FilterOptions::choices`],
//! never by the extractor, and display labels are applied there too.

use rustc_hash::FxHashSet;
use serde::Serialize;
use utoipa::ToSchema;

use super::display::option_label;
use super::fields::CategoricalField;
use crate::data::Record;

/// Label of the sentinel choice that clears a selector
const ALL_LABEL: &str = "All";

/// Distinct values of `field` across `records`, first-seen order, case-sensitive
pub fn distinct_values(records: &[Record], field: CategoricalField) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    records
        .iter()
        .map(|record| field.value(record))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// A selectable value for a filter control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FilterChoice {
    /// Raw value to submit; `null` is the "All" sentinel
    pub value: Option<String>,
    pub label: String,
}

impl FilterChoice {
    pub fn all() -> Self {
        Self {
            value: None,
            label: ALL_LABEL.to_string(),
        }
    }
}

/// Option lists for all categorical fields of one dataset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub centre_number: Vec<String>,
    pub customer_journey_point: Vec<String>,
    pub training_type: Vec<String>,
    pub status: Vec<String>,
}

impl FilterOptions {
    pub fn from_records(records: &[Record]) -> Self {
        Self {
            centre_number: distinct_values(records, CategoricalField::CentreNumber),
            customer_journey_point: distinct_values(
                records,
                CategoricalField::CustomerJourneyPoint,
            ),
            training_type: distinct_values(records, CategoricalField::TrainingType),
            status: distinct_values(records, CategoricalField::Status),
        }
    }

    pub fn values(&self, field: CategoricalField) -> &[String] {
        match field {
            CategoricalField::CentreNumber => &self.centre_number,
            CategoricalField::CustomerJourneyPoint => &self.customer_journey_point,
            CategoricalField::TrainingType => &self.training_type,
            CategoricalField::Status => &self.status,
        }
    }

    /// Choices for a control: "All" followed by each observed value
    pub fn choices(&self, field: CategoricalField) -> Vec<FilterChoice> {
        std::iter::once(FilterChoice::all())
            .chain(self.values(field).iter().map(|value| FilterChoice {
                value: Some(value.clone()),
                label: option_label(field, value).to_string(),
            }))
            .collect()
    }
}
