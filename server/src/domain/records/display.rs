//! Display formatting for the records grid
//!
//! Row identity, status labels and the fixed column schema consumed by table
//! renderers. Formatting happens here only; filtering always works on raw
//! values.

use rustc_hash::FxHashSet;
use serde::Serialize;
use utoipa::ToSchema;

use super::fields::{CategoricalField, RecordField};
use crate::data::Record;

/// Display label for an empty status
pub const STATUS_NOT_STARTED: &str = "Not Started";

/// Row identity: `{centreNumber}-{userEmailAddress}-{trainingModule}`
pub fn row_id(record: &Record) -> String {
    format!(
        "{}-{}-{}",
        record.centre_number, record.user_email_address, record.training_module
    )
}

/// Row ids carried by more than one record, each reported once
pub fn duplicate_row_ids(records: &[Record]) -> Vec<String> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut reported: FxHashSet<String> = FxHashSet::default();
    let mut duplicates = Vec::new();
    for id in records.iter().map(row_id) {
        if !seen.contains(&id) {
            seen.insert(id);
        } else if reported.insert(id.clone()) {
            duplicates.push(id);
        }
    }
    duplicates
}

/// Status as shown to users
pub fn format_status(status: &str) -> &str {
    if status.is_empty() {
        STATUS_NOT_STARTED
    } else {
        status
    }
}

/// Label for a filter option value
pub fn option_label(field: CategoricalField, value: &str) -> &str {
    match field {
        CategoricalField::Status => format_status(value),
        _ => value,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    Number,
}

/// One grid column
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Column {
    pub field: &'static str,
    pub header_name: &'static str,
    pub kind: ColumnKind,
    /// Whether the cell shows a formatted value rather than the raw one
    pub formatted: bool,
}

fn column(field: RecordField, header_name: &'static str) -> Column {
    let (kind, formatted) = match field {
        RecordField::Progress => (ColumnKind::Number, false),
        RecordField::Status => (ColumnKind::Text, true),
        _ => (ColumnKind::Text, false),
    };
    Column {
        field: field.as_str(),
        header_name,
        kind,
        formatted,
    }
}

/// Columns of the records grid, in display order
pub fn columns() -> [Column; 7] {
    [
        column(RecordField::CentreNumber, "Centre Number"),
        column(RecordField::CustomerJourneyPoint, "Customer Journey Point"),
        column(RecordField::TrainingModule, "Training Module"),
        column(RecordField::TrainingType, "Training Type"),
        column(RecordField::UserEmailAddress, "User Email"),
        column(RecordField::Status, "Status"),
        column(RecordField::Progress, "Progress (%)"),
    ]
}

/// A record prepared for display
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RecordRow {
    pub id: String,
    pub centre_number: String,
    pub customer_journey_point: String,
    pub training_module: String,
    pub training_type: String,
    pub user_email_address: String,
    /// Raw status (empty when not started)
    pub status: String,
    pub status_label: String,
    pub progress: f64,
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        Self {
            id: row_id(record),
            centre_number: record.centre_number.clone(),
            customer_journey_point: record.customer_journey_point.clone(),
            training_module: record.training_module.clone(),
            training_type: record.training_type.clone(),
            user_email_address: record.user_email_address.clone(),
            status: record.status.clone(),
            status_label: format_status(&record.status).to_string(),
            progress: record.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(status: &str) -> Record {
        Record {
            centre_number: "C1".into(),
            customer_journey_point: "Onboarding".into(),
            training_module: "M1".into(),
            training_type: "Induction".into(),
            user_email_address: "a@x.com".into(),
            status: status.into(),
            progress: 25.0,
        }
    }

    #[test]
    fn test_row_id() {
        assert_eq!(row_id(&sample("")), "C1-a@x.com-M1");
    }

    #[test]
    fn test_duplicate_row_ids() {
        let mut other_module = sample("");
        other_module.training_module = "M2".into();
        let records = vec![
            sample(""),
            other_module,
            sample("Complete"),
            sample("In Progress"),
        ];
        assert_eq!(duplicate_row_ids(&records), vec!["C1-a@x.com-M1"]);
        assert!(duplicate_row_ids(&records[..2]).is_empty());
    }

    #[test]
    fn test_format_status() {
        assert_eq!(format_status(""), "Not Started");
        assert_eq!(format_status("Complete"), "Complete");
    }

    #[test]
    fn test_option_label_only_formats_status() {
        assert_eq!(option_label(CategoricalField::Status, ""), "Not Started");
        assert_eq!(option_label(CategoricalField::CentreNumber, ""), "");
        assert_eq!(option_label(CategoricalField::TrainingType, "Induction"), "Induction");
    }

    #[test]
    fn test_record_row_formats_status() {
        let row = RecordRow::from(&sample(""));
        assert_eq!(row.id, "C1-a@x.com-M1");
        assert_eq!(row.status, "");
        assert_eq!(row.status_label, "Not Started");
        assert_eq!(row.progress, 25.0);

        let row = RecordRow::from(&sample("In Progress"));
        assert_eq!(row.status_label, "In Progress");
    }

    #[test]
    fn test_columns_schema() {
        let cols = columns();
        let fields: Vec<&str> = cols.iter().map(|c| c.field).collect();
        assert_eq!(
            fields,
            vec![
                "centreNumber",
                "customerJourneyPoint",
                "trainingModule",
                "trainingType",
                "userEmailAddress",
                "status",
                "progress"
            ]
        );
        assert_eq!(cols[4].header_name, "User Email");
        assert!(cols[5].formatted);
        assert_eq!(cols[6].kind, ColumnKind::Number);
        assert_eq!(cols[6].header_name, "Progress (%)");
    }
}
