//! Dataset service
//!
//! Holds the current dataset behind a lock and coordinates loads. Every load
//! is tagged with a sequence number; a completion is applied only when it
//! belongs to the newest load issued, so a slow, stale load can never
//! overwrite a newer one. Load failures are logged and keep the previous
//! dataset (empty before the first successful load).

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use tokio::task::JoinHandle;
use utoipa::ToSchema;

use crate::data::{DataLoader, LoadError, Record};
use crate::domain::records::duplicate_row_ids;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    Loading,
    Ready,
}

struct DatasetInner {
    records: Arc<Vec<Record>>,
    /// Newest load sequence number handed out
    latest_seq: u64,
    /// Sequence number of the load whose completion was last applied
    applied_seq: u64,
    loaded_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

/// Point-in-time view of the dataset
#[derive(Debug, Clone)]
pub struct DatasetSnapshot {
    pub records: Arc<Vec<Record>>,
    pub state: LoadState,
    pub latest_seq: u64,
    pub applied_seq: u64,
    pub loaded_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl DatasetSnapshot {
    /// True once any load has completed (successfully or not)
    pub fn is_available(&self) -> bool {
        self.applied_seq > 0
    }
}

pub struct DatasetService {
    loader: Arc<dyn DataLoader>,
    inner: RwLock<DatasetInner>,
}

impl DatasetService {
    pub fn new(loader: Arc<dyn DataLoader>) -> Self {
        Self {
            loader,
            inner: RwLock::new(DatasetInner {
                records: Arc::new(Vec::new()),
                latest_seq: 0,
                applied_seq: 0,
                loaded_at: None,
                last_error: None,
            }),
        }
    }

    pub fn source(&self) -> String {
        self.loader.source()
    }

    pub fn snapshot(&self) -> DatasetSnapshot {
        let inner = self.inner.read();
        let state = if inner.applied_seq == inner.latest_seq && inner.applied_seq > 0 {
            LoadState::Ready
        } else {
            LoadState::Loading
        };
        DatasetSnapshot {
            records: Arc::clone(&inner.records),
            state,
            latest_seq: inner.latest_seq,
            applied_seq: inner.applied_seq,
            loaded_at: inner.loaded_at,
            last_error: inner.last_error.clone(),
        }
    }

    /// Register a new load and return its sequence number
    pub fn begin_load(&self) -> u64 {
        let mut inner = self.inner.write();
        inner.latest_seq += 1;
        tracing::debug!(seq = inner.latest_seq, "Dataset load started");
        inner.latest_seq
    }

    /// Apply the outcome of load `seq`
    ///
    /// Returns false when a newer load has been issued since, in which case
    /// the outcome is discarded.
    pub fn complete_load(&self, seq: u64, result: Result<Vec<Record>, LoadError>) -> bool {
        let mut inner = self.inner.write();
        if seq != inner.latest_seq {
            tracing::debug!(
                seq,
                latest = inner.latest_seq,
                "Discarding stale dataset load"
            );
            return false;
        }

        match result {
            Ok(records) => {
                let duplicates = duplicate_row_ids(&records);
                if let Some(first) = duplicates.first() {
                    tracing::warn!(
                        seq,
                        count = duplicates.len(),
                        first = %first,
                        "Dataset has records sharing a row id"
                    );
                }
                tracing::info!(seq, count = records.len(), "Dataset loaded");
                inner.records = Arc::new(records);
                inner.loaded_at = Some(Utc::now());
                inner.last_error = None;
            }
            Err(e) => {
                tracing::error!(
                    seq,
                    error = %e,
                    kept = inner.records.len(),
                    "Error loading dataset, keeping previous records"
                );
                inner.last_error = Some(e.to_string());
            }
        }
        inner.applied_seq = seq;
        true
    }

    /// Run one full load through the configured loader
    pub async fn load(&self) -> bool {
        let seq = self.begin_load();
        let result = self.loader.load_data().await;
        self.complete_load(seq, result)
    }

    /// Start a load in the background, returning its sequence number
    pub fn spawn_load(self: &Arc<Self>) -> (u64, JoinHandle<()>) {
        let seq = self.begin_load();
        let service = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let result = service.loader.load_data().await;
            service.complete_load(seq, result);
        });
        (seq, handle)
    }
}
