//! Domain logic for the centre user viewer
//!
//! - `records` - option extraction, filtering, display and pagination
//! - `dataset` - the loaded dataset and its load sequencing

pub mod dataset;
pub mod records;

pub use dataset::{DatasetService, DatasetSnapshot, LoadState};
