//! Read-only lookup over the loaded dataset.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::normalize_key;
use crate::{CompanyRecord, CoreError, Dataset, Ticker};

/// Projection used by the company list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySummary {
    pub ticker: Ticker,
    pub name: String,
    pub sector: String,
    pub current_score: f64,
    pub risk_level: String,
}

impl CompanySummary {
    pub fn from_record(record: &CompanyRecord) -> Self {
        Self {
            ticker: record.ticker().clone(),
            name: record.company_info.name.clone(),
            sector: record.company_info.sector.clone(),
            current_score: record.credit_metrics.score,
            risk_level: record.credit_metrics.risk_level.clone(),
        }
    }
}

/// Immutable company store preserving dataset order.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    records: Vec<CompanyRecord>,
    index: HashMap<String, usize>,
}

impl CompanyRepository {
    pub fn new(dataset: Dataset) -> Self {
        let records = dataset.into_records();
        let index = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.ticker().as_str().to_owned(), position))
            .collect();
        Self { records, index }
    }

    /// Case-insensitive exact lookup.
    pub fn lookup(&self, ticker: &str) -> Result<&CompanyRecord, CoreError> {
        let key = normalize_key(ticker);
        self.index
            .get(&key)
            .map(|position| &self.records[*position])
            .ok_or(CoreError::NotFound { ticker: key })
    }

    pub fn list_summaries(&self) -> Vec<CompanySummary> {
        self.records.iter().map(CompanySummary::from_record).collect()
    }

    pub fn records(&self) -> impl Iterator<Item = &CompanyRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
