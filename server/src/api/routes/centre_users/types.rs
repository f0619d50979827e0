//! Centre user API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::types::{default_page, validate_page};
use crate::core::config::PaginationConfig;
use crate::domain::dataset::{DatasetSnapshot, LoadState};
use crate::domain::records::{
    CategoricalField, Column, FilterChange, FilterChoice, FilterOptions, FilterState,
};

/// Query params for listing centre user records
///
/// A selector that is absent means "All". A selector that is present but
/// empty (`status=`) matches records whose field is empty.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListRecordsQuery {
    #[serde(default = "default_page")]
    #[validate(custom(function = "validate_page"))]
    pub page: u32,
    /// Defaults to the configured page size
    #[validate(range(min = 1, max = 500, message = "Limit must be between 1 and 500"))]
    pub limit: Option<u32>,
    #[validate(length(max = 256, message = "search must be at most 256 characters"))]
    pub search: Option<String>,
    #[validate(length(max = 256, message = "centre_number must be at most 256 characters"))]
    pub centre_number: Option<String>,
    #[validate(length(
        max = 256,
        message = "customer_journey_point must be at most 256 characters"
    ))]
    pub customer_journey_point: Option<String>,
    #[validate(length(max = 256, message = "training_type must be at most 256 characters"))]
    pub training_type: Option<String>,
    #[validate(length(max = 256, message = "status must be at most 256 characters"))]
    pub status: Option<String>,
}

impl ListRecordsQuery {
    pub fn filter_state(&self) -> FilterState {
        FilterState::new()
            .with(FilterChange::Search(
                self.search.clone().unwrap_or_default(),
            ))
            .with(FilterChange::Select(
                CategoricalField::CentreNumber,
                self.centre_number.clone(),
            ))
            .with(FilterChange::Select(
                CategoricalField::CustomerJourneyPoint,
                self.customer_journey_point.clone(),
            ))
            .with(FilterChange::Select(
                CategoricalField::TrainingType,
                self.training_type.clone(),
            ))
            .with(FilterChange::Select(
                CategoricalField::Status,
                self.status.clone(),
            ))
    }
}

/// Choices for one categorical selector
#[derive(Debug, Serialize, ToSchema)]
pub struct FilterGroupDto {
    pub field: CategoricalField,
    pub label: &'static str,
    /// "All" first, then observed values in first-seen order
    pub choices: Vec<FilterChoice>,
}

/// Filter controls for the records grid
#[derive(Debug, Serialize, ToSchema)]
pub struct FilterOptionsResponse {
    pub filters: Vec<FilterGroupDto>,
    pub page_size_options: Vec<u32>,
    pub default_page_size: u32,
}

impl FilterOptionsResponse {
    pub fn build(options: &FilterOptions, pagination: &PaginationConfig) -> Self {
        Self {
            filters: CategoricalField::ALL
                .into_iter()
                .map(|field| FilterGroupDto {
                    field,
                    label: field.label(),
                    choices: options.choices(field),
                })
                .collect(),
            page_size_options: pagination.page_size_options.clone(),
            default_page_size: pagination.default_page_size,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ColumnsResponse {
    pub columns: Vec<Column>,
}

/// Dataset load state
#[derive(Debug, Serialize, ToSchema)]
pub struct DatasetStatusDto {
    pub state: LoadState,
    pub source: String,
    pub record_count: usize,
    /// Newest load issued
    pub latest_seq: u64,
    /// Load whose outcome is currently applied (0 before the first completes)
    pub applied_seq: u64,
    pub loaded_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl DatasetStatusDto {
    pub fn new(snapshot: &DatasetSnapshot, source: String) -> Self {
        Self {
            state: snapshot.state,
            source,
            record_count: snapshot.records.len(),
            latest_seq: snapshot.latest_seq,
            applied_seq: snapshot.applied_seq,
            loaded_at: snapshot.loaded_at,
            last_error: snapshot.last_error.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReloadResponse {
    /// Sequence number of the load just started
    pub seq: u64,
    pub state: LoadState,
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::data::Record;

    #[test]
    fn test_filter_state_from_query() {
        let query = ListRecordsQuery {
            search: Some("Intro".into()),
            status: Some(String::new()),
            ..Default::default()
        };
        let state = query.filter_state();
        assert_eq!(state.search_term, "Intro");
        assert_eq!(state.status.as_deref(), Some(""));
        assert_eq!(state.centre_number, None);
    }

    #[test]
    fn test_filter_options_response_order_and_labels() {
        let records = vec![
            Record {
                centre_number: "C2".into(),
                status: String::new(),
                ..Default::default()
            },
            Record {
                centre_number: "C1".into(),
                status: "Completed".into(),
                ..Default::default()
            },
        ];
        let response = FilterOptionsResponse::build(
            &FilterOptions::from_records(&records),
            &PaginationConfig::default(),
        );

        let fields: Vec<_> = response.filters.iter().map(|g| g.field).collect();
        assert_eq!(fields, CategoricalField::ALL.to_vec());

        let status = &response.filters[3];
        assert_eq!(status.label, "Status");
        let labels: Vec<_> = status.choices.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, ["All", "Not Started", "Completed"]);
        assert_eq!(status.choices[1].value.as_deref(), Some(""));

        assert_eq!(response.page_size_options, vec![5, 10, 25]);
        assert_eq!(response.default_page_size, 10);
    }
}
