//! Filtered, paginated views over a dataset

use super::display::RecordRow;
use super::filter::{FilterState, apply};
use crate::data::Record;

/// One page request over a filtered dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordQuery {
    pub filter: FilterState,
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
}

/// Rows of the requested page plus the total number of matches
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub rows: Vec<RecordRow>,
    pub total: u64,
}

impl RecordQuery {
    pub fn run(&self, records: &[Record]) -> QueryResult {
        let matched = apply(records, &self.filter);
        let total = matched.len() as u64;

        let limit = self.limit.max(1) as usize;
        let offset = (self.page.max(1) as usize - 1).saturating_mul(limit);

        let rows = matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(RecordRow::from)
            .collect();

        tracing::trace!(
            total,
            page = self.page,
            limit = self.limit,
            "Ran record query"
        );

        QueryResult { rows, total }
    }
}
