//! Record field selectors
//!
//! Free-text search covers an explicit, ordered list of fields so that adding
//! a field to [`Record`] never silently widens search scope.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::data::Record;
use crate::data::record::display_number;

/// Every field of a record, in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    CentreNumber,
    CustomerJourneyPoint,
    TrainingModule,
    TrainingType,
    UserEmailAddress,
    Status,
    Progress,
}

/// Fields concatenated for free-text search, in join order
pub const SEARCH_FIELDS: [RecordField; 7] = [
    RecordField::CentreNumber,
    RecordField::CustomerJourneyPoint,
    RecordField::TrainingModule,
    RecordField::TrainingType,
    RecordField::UserEmailAddress,
    RecordField::Status,
    RecordField::Progress,
];

impl RecordField {
    /// Wire name of the field (matches the dataset JSON keys)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CentreNumber => "centreNumber",
            Self::CustomerJourneyPoint => "customerJourneyPoint",
            Self::TrainingModule => "trainingModule",
            Self::TrainingType => "trainingType",
            Self::UserEmailAddress => "userEmailAddress",
            Self::Status => "status",
            Self::Progress => "progress",
        }
    }

    /// Raw field value rendered as text
    pub fn render<'a>(&self, record: &'a Record) -> Cow<'a, str> {
        match self {
            Self::CentreNumber => Cow::Borrowed(&record.centre_number),
            Self::CustomerJourneyPoint => Cow::Borrowed(&record.customer_journey_point),
            Self::TrainingModule => Cow::Borrowed(&record.training_module),
            Self::TrainingType => Cow::Borrowed(&record.training_type),
            Self::UserEmailAddress => Cow::Borrowed(&record.user_email_address),
            Self::Status => Cow::Borrowed(&record.status),
            Self::Progress => Cow::Owned(display_number(record.progress)),
        }
    }
}

/// Fields that can be constrained by an exact-match selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    CentreNumber,
    CustomerJourneyPoint,
    TrainingType,
    Status,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 4] = [
        Self::CentreNumber,
        Self::CustomerJourneyPoint,
        Self::TrainingType,
        Self::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CentreNumber => "centre_number",
            Self::CustomerJourneyPoint => "customer_journey_point",
            Self::TrainingType => "training_type",
            Self::Status => "status",
        }
    }

    /// Control label shown next to the selector
    pub fn label(&self) -> &'static str {
        match self {
            Self::CentreNumber => "Centre",
            Self::CustomerJourneyPoint => "Customer Journey Point",
            Self::TrainingType => "Training Type",
            Self::Status => "Status",
        }
    }

    pub fn value<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            Self::CentreNumber => &record.centre_number,
            Self::CustomerJourneyPoint => &record.customer_journey_point,
            Self::TrainingType => &record.training_type,
            Self::Status => &record.status,
        }
    }
}

/// Space-joined text of all searchable fields
pub fn search_text(record: &Record) -> String {
    SEARCH_FIELDS
        .iter()
        .map(|field| field.render(record))
        .collect::<Vec<_>>()
        .join(" ")
}
