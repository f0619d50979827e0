//! Record filter engine
//!
//! Pure functions over an immutable dataset:
//! - option extraction for the categorical selectors
//! - predicate evaluation (search + exact-match selectors)
//! - display formatting and pagination for the grid

pub mod display;
pub mod fields;
pub mod filter;
pub mod options;
pub mod query;

pub use display::{
    Column, ColumnKind, RecordRow, STATUS_NOT_STARTED, columns, duplicate_row_ids, format_status,
    row_id,
};
pub use fields::{CategoricalField, RecordField, SEARCH_FIELDS, search_text};
pub use filter::{FilterChange, FilterState, RecordPredicate, apply};
pub use options::{FilterChoice, FilterOptions, distinct_values};
pub use query::{QueryResult, RecordQuery};
