//! Static company dataset, parsed and validated once at startup.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::{CompanyRecord, CoreError, ValidationError};

/// Company dataset compiled into the binary.
pub const BUNDLED_DATASET: &str = include_str!("../data/companies.json");

/// Validated, ordered set of company records.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<CompanyRecord>,
}

impl Dataset {
    /// Validate records and reject duplicate tickers, preserving input order.
    pub fn new(records: Vec<CompanyRecord>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.ticker().clone()) {
                return Err(ValidationError::DuplicateTicker {
                    ticker: record.ticker().to_string(),
                });
            }
            record.validate()?;
        }
        Ok(Self { records })
    }

    /// Dataset compiled into the binary.
    pub fn bundled() -> Result<Self, CoreError> {
        Self::from_json_str(BUNDLED_DATASET)
    }

    pub fn from_json_str(input: &str) -> Result<Self, CoreError> {
        let records: Vec<CompanyRecord> = serde_json::from_str(input)?;
        Ok(Self::new(records)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<CompanyRecord> {
        self.records
    }
}
