//! Dataset loaders
//!
//! A loader produces the full dataset in one asynchronous call. The file
//! loader accepts either a bare JSON array of records or the processed export
//! shape, an object holding the records under `centreUserData`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use super::error::LoadError;
use super::record::Record;
use crate::utils::file::display_path;

/// Source of centre user records
#[async_trait]
pub trait DataLoader: Send + Sync {
    /// Load the complete dataset
    async fn load_data(&self) -> Result<Vec<Record>, LoadError>;

    /// Human readable source description for logs
    fn source(&self) -> String;
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DatasetDocument {
    Bare(Vec<Record>),
    Processed {
        #[serde(rename = "centreUserData")]
        centre_user_data: Vec<Record>,
    },
}

impl DatasetDocument {
    fn into_records(self) -> Vec<Record> {
        match self {
            Self::Bare(records) => records,
            Self::Processed { centre_user_data } => centre_user_data,
        }
    }
}

/// Parse a dataset document from JSON text
pub fn parse_dataset(json: &str) -> Result<Vec<Record>, LoadError> {
    serde_json::from_str::<DatasetDocument>(json)
        .map(DatasetDocument::into_records)
        .map_err(|e| LoadError::Parse(e.to_string()))
}

/// Loads records from a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileLoader {
    path: PathBuf,
}

impl JsonFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DataLoader for JsonFileLoader {
    async fn load_data(&self) -> Result<Vec<Record>, LoadError> {
        tracing::debug!(path = %self.path.display(), "Reading dataset file");
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| LoadError::from_io(&self.path, e))?;
        let records = parse_dataset(&json)?;
        tracing::trace!(count = records.len(), "Parsed dataset file");
        Ok(records)
    }

    fn source(&self) -> String {
        display_path(&self.path)
    }
}
