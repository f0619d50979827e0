//! Record filtering
//!
//! A record is visible when it satisfies every active constraint:
//! - search: case-insensitive substring over [`search_text`], active when the
//!   term is non-empty (whitespace is significant, nothing is trimmed)
//! - each categorical selector: exact, case-sensitive equality, active when set
//!
//! Filtering is a stable, pure pass over the dataset.

use super::fields::{CategoricalField, search_text};
use crate::data::Record;

/// User-chosen constraints
///
/// A selector of `None` means "All". `Some("")` is a real selection that
/// matches records whose field is empty (the "Not Started" status).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub centre_number: Option<String>,
    pub customer_journey_point: Option<String>,
    pub training_type: Option<String>,
    pub status: Option<String>,
}

/// A single-field update to a [`FilterState`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Search(String),
    Select(CategoricalField, Option<String>),
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite exactly one field
    pub fn set(&mut self, change: FilterChange) {
        match change {
            FilterChange::Search(term) => self.search_term = term,
            FilterChange::Select(field, value) => *self.selector_mut(field) = value,
        }
    }

    pub fn with(mut self, change: FilterChange) -> Self {
        self.set(change);
        self
    }

    pub fn selection(&self, field: CategoricalField) -> Option<&str> {
        match field {
            CategoricalField::CentreNumber => self.centre_number.as_deref(),
            CategoricalField::CustomerJourneyPoint => self.customer_journey_point.as_deref(),
            CategoricalField::TrainingType => self.training_type.as_deref(),
            CategoricalField::Status => self.status.as_deref(),
        }
    }

    fn selector_mut(&mut self, field: CategoricalField) -> &mut Option<String> {
        match field {
            CategoricalField::CentreNumber => &mut self.centre_number,
            CategoricalField::CustomerJourneyPoint => &mut self.customer_journey_point,
            CategoricalField::TrainingType => &mut self.training_type,
            CategoricalField::Status => &mut self.status,
        }
    }

    /// True when no constraint is active
    pub(crate) fn is_unconstrained(&self) -> bool {
        self.search_term.is_empty()
            && CategoricalField::ALL
                .iter()
                .all(|field| self.selection(*field).is_none())
    }

    /// Compile into a predicate (lower-cases the search term once)
    pub fn predicate(&self) -> RecordPredicate<'_> {
        RecordPredicate {
            needle: (!self.search_term.is_empty()).then(|| self.search_term.to_lowercase()),
            state: self,
        }
    }
}

/// Compiled form of a [`FilterState`]
#[derive(Debug)]
pub struct RecordPredicate<'a> {
    needle: Option<String>,
    state: &'a FilterState,
}

impl RecordPredicate<'_> {
    pub fn matches(&self, record: &Record) -> bool {
        self.matches_selectors(record) && self.matches_search(record)
    }

    fn matches_selectors(&self, record: &Record) -> bool {
        CategoricalField::ALL.iter().all(|field| {
            self.state
                .selection(*field)
                .is_none_or(|wanted| field.value(record) == wanted)
        })
    }

    fn matches_search(&self, record: &Record) -> bool {
        match &self.needle {
            Some(needle) => search_text(record).to_lowercase().contains(needle.as_str()),
            None => true,
        }
    }
}

/// Records satisfying every active constraint, in dataset order
pub fn apply<'a>(records: &'a [Record], state: &FilterState) -> Vec<&'a Record> {
    if state.is_unconstrained() {
        return records.iter().collect();
    }
    let predicate = state.predicate();
    records
        .iter()
        .filter(|record| predicate.matches(record))
        .collect()
}
